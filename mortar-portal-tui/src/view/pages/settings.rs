//! 设置页面视图

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::model::state::SettingItem;
use crate::model::App;
use crate::view::theme::{colors, Styles};

/// 设置项的标签宽度（用于对齐，基于显示宽度）
const LABEL_WIDTH: usize = 20;
/// 值区域的宽度（包含 ◀ ▶ 符号）
const VALUE_WIDTH: usize = 20;

/// 渲染设置页面
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let settings = &app.settings;
    let mut lines = vec![Line::from("")];

    for (index, item) in SettingItem::all().iter().enumerate() {
        let is_selected = settings.selected_index == index;
        let row = match item {
            SettingItem::Theme => {
                render_setting_row("Theme", settings.theme.label(), is_selected)
            }
            SettingItem::ApiEndpoint => {
                render_read_only_row("API Endpoint", &settings.api_base_url, is_selected)
            }
        };
        lines.push(row);
    }

    lines.push(Line::from(""));
    lines.push(Line::from(""));

    let path_row = |label: &'static str, value: Option<&str>| {
        Line::from(vec![
            Span::styled(format!("    {label:<LABEL_WIDTH$}"), Styles::muted()),
            Span::styled(": ", Styles::muted()),
            Span::styled(value.unwrap_or("unavailable").to_string(), Styles::muted()),
        ])
    };
    lines.push(path_row("Config file", settings.config_path.as_deref()));
    lines.push(path_row("Log file", settings.log_path.as_deref()));

    lines.push(Line::from(""));
    lines.push(Line::styled(
        "  The API endpoint is read from the config file or MORTAR_PORTAL_API_URL.",
        Styles::muted(),
    ));
    lines.push(Line::from(""));

    // 操作提示
    lines.push(Line::from(vec![
        Span::styled("  ↑↓", Styles::hint_key()),
        Span::styled(" Move | ", Styles::hint_desc()),
        Span::styled("←→", Styles::hint_key()),
        Span::styled(" Switch option | ", Styles::hint_desc()),
        Span::styled("Tab", Styles::hint_key()),
        Span::styled(" Switch panel", Styles::hint_desc()),
    ]));

    frame.render_widget(Paragraph::new(lines), area);
}

fn label_spans(label: &str, is_selected: bool) -> Vec<Span<'static>> {
    let c = colors();
    let prefix = if is_selected { "▶ " } else { "  " };
    let label_style = if is_selected {
        Style::default().fg(c.fg).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(c.muted)
    };

    // 使用 unicode-width 计算显示宽度
    let label_padding = LABEL_WIDTH.saturating_sub(label.width());
    vec![
        Span::styled(prefix, label_style),
        Span::styled(format!("  {label}"), label_style),
        Span::raw(" ".repeat(label_padding)),
        Span::styled(": ", Style::default().fg(c.muted)),
    ]
}

/// 渲染可切换的设置项
fn render_setting_row(label: &str, value: &str, is_selected: bool) -> Line<'static> {
    let c = colors();
    let value_style = if is_selected {
        Style::default()
            .fg(c.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(c.highlight)
    };

    // 值居中显示在 ◀ ▶ 之间
    let available_space = VALUE_WIDTH.saturating_sub(4);
    let left_padding = available_space.saturating_sub(value.width()) / 2;
    let right_padding = available_space
        .saturating_sub(value.width())
        .saturating_sub(left_padding);

    let (left_arrow, right_arrow) = if is_selected {
        ("◀ ", " ▶")
    } else {
        // 未选中时保持对齐
        ("  ", "  ")
    };

    let mut spans = label_spans(label, is_selected);
    spans.extend([
        Span::styled(left_arrow, Style::default().fg(c.key)),
        Span::raw(" ".repeat(left_padding)),
        Span::styled(value.to_string(), value_style),
        Span::raw(" ".repeat(right_padding)),
        Span::styled(right_arrow, Style::default().fg(c.key)),
    ]);
    Line::from(spans)
}

/// 只读设置项：不显示切换箭头
fn render_read_only_row(label: &str, value: &str, is_selected: bool) -> Line<'static> {
    let c = colors();
    let mut spans = label_spans(label, is_selected);
    spans.push(Span::raw("  "));
    spans.push(Span::styled(value.to_string(), Style::default().fg(c.fg)));
    spans.push(Span::styled("  (read-only)", Styles::muted()));
    Line::from(spans)
}
