//! 规则表单页面视图
//!
//! 每个字段一行标签、一行输入框；错误只在字段失焦后显示。

use mortar_portal_core::annotations::describe;
use mortar_portal_core::form::{FormPhase, NAME_IMMUTABLE_HINT};
use mortar_portal_core::validation::Field;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::model::state::{FormSlot, RuleFormState};
use crate::model::App;
use crate::view::theme::{colors, Styles};

/// 渲染规则表单页面
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let Some(state) = app.rule_form.as_ref() else {
        return;
    };
    let c = colors();

    match state.form.phase() {
        FormPhase::Loading => {
            let lines = vec![
                Line::from(""),
                Line::styled("  Loading rule...", Styles::muted()),
            ];
            frame.render_widget(Paragraph::new(lines), area);
        }
        FormPhase::LoadFailed(message) => {
            let lines = vec![
                Line::from(""),
                Line::styled(
                    "  Failed to load proxy rule",
                    Style::default().fg(c.error).add_modifier(Modifier::BOLD),
                ),
                Line::styled(format!("  {message}"), Style::default().fg(c.error)),
                Line::from(""),
                Line::styled("  Press r to retry, or Esc to go back.", Styles::muted()),
            ];
            frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
        }
        FormPhase::Ready | FormPhase::Submitting => render_fields(state, frame, area),
    }
}

/// 表单内容构建器，记录光标所在行以便滚动
struct FormLines<'a> {
    state: &'a RuleFormState,
    lines: Vec<Line<'a>>,
    focus_line: usize,
}

impl<'a> FormLines<'a> {
    fn new(state: &'a RuleFormState) -> Self {
        Self {
            state,
            lines: vec![Line::from("")],
            focus_line: 0,
        }
    }

    fn blank(&mut self) {
        self.lines.push(Line::from(""));
    }

    fn label(&mut self, text: &'a str) {
        self.lines.push(Line::styled(format!("  {text}"), Styles::muted()));
    }

    fn note(&mut self, text: impl Into<String>) {
        self.lines
            .push(Line::styled(format!("    {}", text.into()), Styles::muted()));
    }

    fn error(&mut self, field: Field) {
        if let Some(err) = self.state.form.visible_error(field) {
            let c = colors();
            self.lines.push(Line::styled(
                format!("    ⚠ {}", err.message),
                Style::default().fg(c.error),
            ));
        }
    }

    /// 输入框：聚焦时显示光标，空值显示占位文字
    fn input(&mut self, slot: FormSlot, value: &'a str, placeholder: &'a str, prefix: &'a str) {
        let c = colors();
        let focused = self.state.focus == slot && self.state.form.is_editable();
        if focused {
            self.focus_line = self.lines.len();
        }
        let marker = if focused { "▶ " } else { "  " };

        let body = if focused {
            Span::styled(
                format!("{value}▎"),
                Style::default().fg(c.highlight).add_modifier(Modifier::BOLD),
            )
        } else if value.is_empty() {
            Span::styled(placeholder, Styles::muted())
        } else {
            Span::styled(value, Style::default().fg(c.fg))
        };

        self.lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(c.highlight)),
            Span::raw("  "),
            Span::styled(prefix, Styles::muted()),
            body,
        ]));
    }

    /// 非文字项：TLS 开关、添加注解、提交按钮
    fn control(&mut self, slot: FormSlot, text: String) {
        let c = colors();
        let focused = self.state.focus == slot;
        if focused {
            self.focus_line = self.lines.len();
        }
        let style = if focused {
            Styles::selected()
        } else {
            Style::default().fg(c.fg)
        };
        let marker = if focused { "▶ " } else { "  " };
        self.lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(c.highlight)),
            Span::raw("  "),
            Span::styled(text, style),
        ]));
    }
}

fn render_fields(state: &RuleFormState, frame: &mut Frame, area: Rect) {
    let c = colors();
    let form = &state.form;
    let draft = form.draft();
    let mut out = FormLines::new(state);

    // 名称
    out.label("Name");
    if form.mode().is_edit() {
        out.lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled(draft.name.as_str(), Style::default().fg(c.muted)),
        ]));
        if state.focus == FormSlot::Name {
            out.focus_line = out.lines.len() - 1;
        }
        out.note(NAME_IMMUTABLE_HINT);
    } else {
        out.input(FormSlot::Name, &draft.name, "my-proxy-rule", "");
        out.error(Field::Name);
    }
    out.blank();

    // 域名
    out.label("Domain");
    out.input(FormSlot::Domain, &draft.domain, "app.example.com", "");
    out.error(Field::Domain);
    out.blank();

    // 目标地址
    out.label("Destinations");
    for (i, destination) in draft.destinations.iter().enumerate() {
        out.input(
            FormSlot::Destination(i),
            destination,
            "10.0.0.1 or service.namespace",
            "• ",
        );
    }
    out.error(Field::Destinations);
    out.blank();

    // 端口
    out.label("Port");
    out.input(FormSlot::Port, &draft.port, "optional", "");
    out.error(Field::Port);
    out.blank();

    let tls = if draft.tls { "[x] TLS enabled" } else { "[ ] TLS enabled" };
    out.control(FormSlot::Tls, tls.to_string());
    out.blank();

    // 注解
    out.label("Annotations");
    if draft.annotations.is_empty() {
        out.note("None");
    }
    for (i, (key, value)) in draft.annotations.entries().iter().enumerate() {
        out.lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled(key.as_str(), Style::default().fg(c.fg).add_modifier(Modifier::BOLD)),
        ]));
        if let Some(description) = describe(key) {
            out.note(description);
        }
        out.input(FormSlot::Annotation(i), value, "value", "= ");
    }
    out.control(FormSlot::AddAnnotation, "[+ Add annotation]".to_string());
    out.blank();

    // 提交
    let action = if *form.phase() == FormPhase::Submitting {
        "[ Saving... ]".to_string()
    } else {
        format!("[ {} ]", form.mode().action())
    };
    out.control(FormSlot::Submit, action);

    if let Some(err) = form.submit_error() {
        out.blank();
        out.lines.push(Line::styled(
            format!("  ⚠ {err}"),
            Style::default().fg(c.error).add_modifier(Modifier::BOLD),
        ));
    }

    // 光标行保持在可见区域内
    let visible = usize::from(area.height).saturating_sub(2);
    let scroll = out.focus_line.saturating_sub(visible);
    let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);

    let paragraph = Paragraph::new(out.lines).scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}
