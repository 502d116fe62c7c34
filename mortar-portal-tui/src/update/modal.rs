//! 弹窗更新逻辑

use crate::message::{Command, ModalMessage};
use crate::model::state::{DeleteFocus, FormSlot, Modal};
use crate::model::App;

/// 处理弹窗消息
pub fn update(app: &mut App, msg: ModalMessage) {
    let Some(modal) = app.modal.active.as_mut() else {
        return;
    };

    match msg {
        ModalMessage::Close => close(app),

        ModalMessage::ToggleDeleteFocus => {
            if let Modal::ConfirmDelete { focus, .. } = modal {
                *focus = focus.toggle();
            }
        }

        ModalMessage::SelectPrevious | ModalMessage::SelectNext => {
            if let Modal::AnnotationSearch { query, selected } = modal {
                let count = suggestion_count(app.rule_form.as_ref(), query);
                if count == 0 {
                    *selected = 0;
                } else if msg == ModalMessage::SelectNext {
                    *selected = (*selected + 1) % count;
                } else {
                    *selected = selected.checked_sub(1).unwrap_or(count - 1);
                }
            }
        }

        ModalMessage::Input(c) => {
            if let Modal::AnnotationSearch { query, selected } = modal {
                query.push(c);
                *selected = 0;
            }
        }

        ModalMessage::Backspace => {
            if let Modal::AnnotationSearch { query, selected } = modal {
                query.pop();
                *selected = 0;
            }
        }

        ModalMessage::Confirm => match modal.clone() {
            Modal::ConfirmDelete { focus, .. } => {
                app.modal.close();
                if focus == DeleteFocus::Yes {
                    confirm_delete(app);
                } else {
                    app.resources.list.cancel_delete();
                }
            }
            Modal::AnnotationSearch { query, selected } => {
                app.modal.close();
                add_annotation(app, &query, selected);
            }
            Modal::Error { .. } | Modal::Help => app.modal.close(),
        },
    }
}

fn close(app: &mut App) {
    if matches!(app.modal.active, Some(Modal::ConfirmDelete { .. })) {
        app.resources.list.cancel_delete();
    }
    app.modal.close();
}

fn confirm_delete(app: &mut App) {
    if let Some(name) = app.resources.list.confirm_delete() {
        app.set_status(format!("Deleting \"{name}\"..."));
        app.dispatch(Command::DeleteRule { name });
    }
}

fn suggestion_count(state: Option<&crate::model::state::RuleFormState>, query: &str) -> usize {
    state.map_or(0, |state| {
        state.form.draft().annotations.suggestions(query).len()
    })
}

/// 添加高亮的目录项；没有匹配时把输入本身当作自定义键
fn add_annotation(app: &mut App, query: &str, selected: usize) {
    let Some(state) = app.rule_form.as_mut() else {
        return;
    };
    let key = {
        let suggestions = state.form.draft().annotations.suggestions(query);
        match suggestions.get(selected) {
            Some(info) => info.key.to_string(),
            None if suggestions.is_empty() => query.trim().to_string(),
            None => return,
        }
    };

    let added = match state.form.annotations_mut() {
        Ok(editor) => editor.add(&key, "").then(|| editor.len() - 1),
        Err(e) => {
            app.set_status(e.to_string());
            return;
        }
    };
    match added {
        Some(index) => state.move_focus(FormSlot::Annotation(index)),
        None if key.is_empty() => {}
        None => app.set_status(format!("Annotation \"{key}\" is already added")),
    }
}
