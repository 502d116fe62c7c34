//! 资源列表页面视图

use mortar_portal_client::{Ingress, ProxyRule};
use mortar_portal_core::resources::{ListPhase, ResourceEntry, SEARCH_PLACEHOLDER};
use mortar_portal_core::search::ResourceFilter;
use mortar_portal_core::status::{classify, ResourceHealth};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::model::App;
use crate::view::theme::{colors, Styles};

/// 详情区域高度（含上边框）
const DETAIL_HEIGHT: u16 = 8;

/// 渲染资源列表页面
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let list = &app.resources.list;
    let search_rows = u16::from(list.search_enabled());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // 标签页
            Constraint::Length(search_rows), // 搜索框
            Constraint::Min(1),              // 列表
            Constraint::Length(DETAIL_HEIGHT),
        ])
        .split(area);

    render_tabs(app, frame, rows[0]);
    if list.search_enabled() {
        render_search(app, frame, rows[1]);
    }

    match list.phase() {
        ListPhase::Loading => render_message(frame, rows[2], &["Loading resources..."]),
        ListPhase::Failed(message) => render_failed(frame, rows[2], message),
        ListPhase::Loaded => match list.empty_message() {
            Some(message) => render_message(frame, rows[2], &[message]),
            None => {
                render_list(app, frame, rows[2]);
                render_detail(app, frame, rows[3]);
            }
        },
    }
}

/// 渲染标签页：All (n) │ Proxy Rules (n) │ Ingresses (n)
fn render_tabs(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let list = &app.resources.list;
    let mut spans = vec![Span::raw(" ")];

    for (i, filter) in ResourceFilter::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(c.border)));
        }
        let style = if *filter == list.filter() {
            Style::default()
                .fg(c.highlight)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(c.muted)
        };
        spans.push(Span::styled(list.tab_label(*filter), style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_search(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let query = app.resources.list.query();
    let searching = app.resources.searching;

    let text = if query.is_empty() && !searching {
        Span::styled(SEARCH_PLACEHOLDER, Styles::muted())
    } else if searching {
        Span::styled(format!("{query}▎"), Style::default().fg(c.fg))
    } else {
        Span::styled(query.to_string(), Style::default().fg(c.fg))
    };

    let icon_style = if searching {
        Style::default().fg(c.highlight)
    } else {
        Styles::muted()
    };
    let line = Line::from(vec![Span::styled(" / ", icon_style), text]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_message(frame: &mut Frame, area: Rect, messages: &[&str]) {
    let mut lines = vec![Line::from("")];
    lines.extend(
        messages
            .iter()
            .map(|m| Line::styled(format!("  {m}"), Styles::muted())),
    );
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_failed(frame: &mut Frame, area: Rect, message: &str) {
    let c = colors();
    let lines = vec![
        Line::from(""),
        Line::styled(
            "  Failed to load resources",
            Style::default().fg(c.error).add_modifier(Modifier::BOLD),
        ),
        Line::styled(format!("  {message}"), Style::default().fg(c.error)),
        Line::from(""),
        Line::styled("  Press r to retry.", Styles::muted()),
    ];
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// 健康状态徽标的颜色
fn health_color(health: ResourceHealth) -> Color {
    let c = colors();
    match health {
        ResourceHealth::Healthy => c.success,
        ResourceHealth::Unhealthy => c.error,
        ResourceHealth::Pending => c.warning,
        ResourceHealth::Unknown => c.muted,
    }
}

fn tls_label(enabled: bool) -> &'static str {
    if enabled {
        "TLS"
    } else {
        "no TLS"
    }
}

fn render_list(app: &App, frame: &mut Frame, area: Rect) {
    let list = &app.resources.list;
    let deleting = list.deleting();

    let items: Vec<ListItem> = list
        .visible()
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let is_selected = i == list.selected_index();
            let line = match entry {
                ResourceEntry::ProxyRule(rule) => {
                    proxy_rule_line(rule, deleting == Some(rule.name()))
                }
                ResourceEntry::Ingress(ingress) => ingress_line(ingress),
            };
            let item = ListItem::new(line);
            if is_selected {
                item.style(Styles::selected())
            } else {
                item
            }
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(list.selected_index()));

    let widget = List::new(items).block(Block::default());
    frame.render_stateful_widget(widget, area, &mut state);
}

fn proxy_rule_line(rule: &ProxyRule, deleting: bool) -> Line<'_> {
    let c = colors();
    let health = classify(rule.conditions()).health;
    let port = rule
        .spec
        .port
        .map_or_else(|| "-".to_string(), |p| p.to_string());

    let mut spans = vec![
        Span::raw("  "),
        Span::styled(format!("{:<24}", rule.name()), Style::default().fg(c.fg)),
        Span::styled("[Proxy Rule] ", Style::default().fg(c.highlight)),
        Span::styled(
            format!("[{}] ", health.label()),
            Style::default().fg(health_color(health)),
        ),
        Span::styled(format!("{} ", rule.domain()), Style::default().fg(c.fg)),
        Span::styled(
            format!(
                "→ {} :{port} {}",
                rule.spec.destinations.join(", "),
                tls_label(rule.spec.tls)
            ),
            Styles::muted(),
        ),
    ];
    if deleting {
        spans.push(Span::styled("  deleting...", Style::default().fg(c.warning)));
    }
    Line::from(spans)
}

fn ingress_line(ingress: &Ingress) -> Line<'_> {
    let c = colors();
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{:<24}", ingress.name()), Style::default().fg(c.fg)),
        Span::styled("[Ingress] ", Style::default().fg(c.warning)),
        Span::styled("[Read Only] ", Styles::muted()),
        Span::styled(
            format!("{} ", ingress.host().unwrap_or("N/A")),
            Style::default().fg(c.fg),
        ),
        Span::styled(
            format!(
                "ns {} class {} {}",
                ingress.namespace().unwrap_or("N/A"),
                ingress.class_name().unwrap_or("N/A"),
                tls_label(ingress.tls_enabled())
            ),
            Styles::muted(),
        ),
    ])
}

/// 选中资源的详情：状态说明、条件列表和创建时间
fn render_detail(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let Some(entry) = app.resources.list.selected() else {
        return;
    };

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(c.border))
        .title(format!(" {} · {} ", entry.kind_label(), entry.name()))
        .title_style(Styles::title());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label = |text: &'static str| Span::styled(format!("  {text:<12}"), Styles::muted());
    let mut lines = Vec::new();

    if let Some(namespace) = entry.namespace() {
        lines.push(Line::from(vec![label("Namespace"), Span::raw(namespace)]));
    }

    let created = match entry {
        ResourceEntry::ProxyRule(rule) => rule.metadata.creation_timestamp,
        ResourceEntry::Ingress(ingress) => ingress.metadata.creation_timestamp,
    };
    let created = created.map_or_else(
        || "N/A".to_string(),
        |ts| {
            ts.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        },
    );
    lines.push(Line::from(vec![label("Created"), Span::raw(created)]));

    match entry.classification() {
        Some(classification) => {
            let health = classification.health;
            lines.push(Line::from(vec![
                label("Status"),
                Span::styled(health.label(), Style::default().fg(health_color(health))),
            ]));
            if let Some(detail) = classification.detail() {
                for text in detail.lines() {
                    lines.push(Line::from(vec![label(""), Span::styled(text.to_string(), Styles::muted())]));
                }
            }
        }
        None => lines.push(Line::from(vec![
            label("Status"),
            Span::styled("Managed outside this console", Styles::muted()),
        ])),
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
