//! 底部状态栏组件

use mortar_portal_core::form::FormPhase;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::model::state::FormSlot;
use crate::model::{App, FocusPanel, Page};
use crate::view::theme::{colors, Styles};

/// 渲染状态栏
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let mut spans = Vec::new();

    for (i, (key, desc)) in get_hints(app).iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(c.muted)));
        }
        spans.push(Span::styled(*key, Styles::hint_key()));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(*desc, Styles::hint_desc()));
    }

    // 状态消息显示在提示之后
    if let Some(ref msg) = app.status_message {
        spans.push(Span::styled(" │ ", Style::default().fg(c.muted)));
        spans.push(Span::styled(msg.clone(), Style::default().fg(c.key)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Styles::statusbar());
    frame.render_widget(paragraph, area);
}

/// 根据当前状态生成快捷键提示
fn get_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    let mut hints = Vec::new();

    if app.modal.is_open() {
        hints.push(("Enter", "Confirm"));
        hints.push(("Esc", "Close"));
        return hints;
    }

    match app.focus {
        FocusPanel::Navigation => {
            hints.push(("Tab", "Switch Panels"));
            hints.push(("↑↓", "Navigate"));
            hints.push(("Enter", "Open"));
        }
        FocusPanel::Content => match app.current_page {
            Page::Resources if app.resources.searching => {
                hints.push(("Enter", "Done"));
                hints.push(("Esc", "Clear"));
            }
            Page::Resources => {
                hints.push(("↑↓", "Select"));
                hints.push(("←→", "Filter"));
                hints.push(("/", "Search"));
                hints.push(("n", "New"));
                hints.push(("e", "Edit"));
                hints.push(("d", "Delete"));
                hints.push(("r", "Refresh"));
            }
            Page::RuleForm => form_hints(app, &mut hints),
            Page::Settings => {
                hints.push(("↑↓", "Select"));
                hints.push(("←→", "Change"));
            }
        },
    }

    hints.push(("Alt+h", "Help"));
    hints.push(("Alt+q", "Quit"));
    hints
}

fn form_hints(app: &App, hints: &mut Vec<(&'static str, &'static str)>) {
    let Some(state) = app.rule_form.as_ref() else {
        return;
    };
    match state.form.phase() {
        FormPhase::LoadFailed(_) => hints.push(("r", "Retry")),
        FormPhase::Loading | FormPhase::Submitting => {}
        FormPhase::Ready => {
            hints.push(("Tab", "Next Field"));
            match state.focus {
                FormSlot::Tls => hints.push(("Space", "Toggle")),
                FormSlot::Destination(_) => {
                    hints.push(("Alt+a", "Add Row"));
                    hints.push(("Alt+d", "Remove Row"));
                }
                FormSlot::Annotation(_) | FormSlot::AddAnnotation => {
                    hints.push(("Alt+a", "Add Annotation"));
                    hints.push(("Alt+d", "Remove"));
                }
                _ => {}
            }
            hints.push(("Ctrl+s", "Save"));
        }
    }
    hints.push(("Esc", "Cancel"));
}
