//! 弹窗组件

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::state::{DeleteFocus, Modal};
use crate::model::App;
use crate::view::theme::{colors, Styles};

/// 注解搜索弹窗中最多列出的条目数
const MAX_SUGGESTIONS: usize = 8;
const SEARCH_DIALOG_HEIGHT: u16 = 24;

/// 渲染弹窗（如果有活动弹窗）
pub fn render(app: &App, frame: &mut Frame) {
    let Some(ref modal) = app.modal.active else {
        return;
    };

    match modal {
        Modal::ConfirmDelete { prompt, focus, .. } => render_confirm_delete(frame, prompt, *focus),
        Modal::AnnotationSearch { query, selected } => {
            render_annotation_search(app, frame, query, *selected);
        }
        Modal::Error { title, message } => render_error(frame, title, message),
        Modal::Help => render_help(frame),
    }
}

/// 计算居中弹窗区域
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// 清除背景并画出边框，返回内容区域
fn open_dialog(frame: &mut Frame, area: Rect, title: &str, border: Style) -> Rect {
    let c = colors();
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {title} "))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(border)
        .style(Style::default().bg(c.bg).fg(c.fg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    Rect::new(
        inner.x + 1,
        inner.y,
        inner.width.saturating_sub(2),
        inner.height,
    )
}

/// 渲染确认删除弹窗
fn render_confirm_delete(frame: &mut Frame, prompt: &str, focus: DeleteFocus) {
    let c = colors();
    let area = centered_rect(56, 9, frame.area());
    let inner = open_dialog(
        frame,
        area,
        "Confirm Deletion",
        Style::default().fg(c.error),
    );

    let button = |label: &'static str, focused: bool| {
        if focused {
            Span::styled(label, Style::default().fg(c.bg).bg(c.error))
        } else {
            Span::styled(label, Style::default().fg(c.fg))
        }
    };

    let lines = vec![
        Line::from(""),
        Line::styled(prompt.to_string(), Style::default().fg(c.fg)),
        Line::from(""),
        Line::from(vec![
            Span::raw("    "),
            button(" Cancel ", focus == DeleteFocus::No),
            Span::raw("    "),
            button(" Delete ", focus == DeleteFocus::Yes),
        ]),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

/// 渲染注解搜索弹窗
fn render_annotation_search(app: &App, frame: &mut Frame, query: &str, selected: usize) {
    let c = colors();
    let suggestions = app
        .rule_form
        .as_ref()
        .map(|state| state.form.draft().annotations.suggestions(query))
        .unwrap_or_default();

    let area = centered_rect(72, SEARCH_DIALOG_HEIGHT, frame.area());
    let inner = open_dialog(
        frame,
        area,
        "Add Annotation",
        Style::default().fg(c.border_focused),
    );

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Search: ", Styles::muted()),
            Span::styled(format!("{query}▎"), Style::default().fg(c.fg)),
        ]),
        Line::from(""),
    ];

    if suggestions.is_empty() {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            lines.push(Line::styled("All known annotations are added.", Styles::muted()));
        } else {
            lines.push(Line::styled("No known annotation matches.", Styles::muted()));
            lines.push(Line::from(vec![
                Span::styled("Enter", Styles::hint_key()),
                Span::styled(format!(" adds \"{trimmed}\" as a custom key"), Styles::muted()),
            ]));
        }
    } else {
        // 让选中项保持在可见窗口内
        let start = selected.saturating_sub(MAX_SUGGESTIONS - 1);
        for (i, info) in suggestions
            .iter()
            .enumerate()
            .skip(start)
            .take(MAX_SUGGESTIONS)
        {
            let is_selected = i == selected;
            let key_style = if is_selected {
                Styles::selected()
            } else {
                Style::default().fg(c.fg)
            };
            let prefix = if is_selected { "▶ " } else { "  " };
            lines.push(Line::styled(format!("{prefix}{}", info.key), key_style));
            lines.push(Line::styled(format!("    {}", info.description), Styles::muted()));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("↑↓", Styles::hint_key()),
        Span::styled(" Select | ", Styles::muted()),
        Span::styled("Enter", Styles::hint_key()),
        Span::styled(" Add | ", Styles::muted()),
        Span::styled("Esc", Styles::hint_key()),
        Span::styled(" Cancel", Styles::muted()),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// 渲染错误弹窗
fn render_error(frame: &mut Frame, title: &str, message: &str) {
    let c = colors();
    let area = centered_rect(56, 9, frame.area());
    let inner = open_dialog(frame, area, title, Style::default().fg(c.error));

    let lines = vec![
        Line::from(""),
        Line::styled(message.to_string(), Style::default().fg(c.fg)),
        Line::from(""),
        Line::styled("Press Esc or Enter to close", Styles::muted()),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}

/// 渲染帮助弹窗
fn render_help(frame: &mut Frame) {
    let c = colors();
    let area = centered_rect(58, 24, frame.area());
    let inner = open_dialog(frame, area, "Help", Style::default().fg(c.border_focused));

    let section = |title: &'static str| {
        Line::styled(
            title,
            Style::default()
                .fg(c.highlight)
                .add_modifier(Modifier::BOLD),
        )
    };
    let row = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {key:<10}"), Styles::hint_key()),
            Span::styled(desc, Style::default().fg(c.fg)),
        ])
    };

    let lines = vec![
        section("Global"),
        row("Tab", "Switch panel"),
        row("Esc", "Back / Cancel"),
        row("Alt+r", "Refresh"),
        row("Alt+t", "Toggle theme"),
        row("Alt+q", "Quit"),
        Line::from(""),
        section("Resources"),
        row("↑↓ / jk", "Select"),
        row("←→", "Switch tab"),
        row("/", "Search"),
        row("n / Alt+a", "New proxy rule"),
        row("e / Enter", "Edit proxy rule"),
        row("d / Alt+d", "Delete proxy rule"),
        Line::from(""),
        section("Proxy rule form"),
        row("Tab / ↑↓", "Next / previous field"),
        row("Alt+a", "Add destination or annotation"),
        row("Alt+d", "Remove row"),
        row("Ctrl+s", "Save"),
        Line::from(""),
        Line::styled("Press Esc to close the help", Styles::muted()),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
