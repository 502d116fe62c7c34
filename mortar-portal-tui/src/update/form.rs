//! 规则表单更新逻辑

use mortar_portal_core::form::{FormMode, FormPhase};
use mortar_portal_core::{CoreError, CoreResult};

use crate::message::{Command, FormMessage};
use crate::model::state::{FormSlot, RuleFormState};
use crate::model::App;

/// 处理规则表单消息
pub fn update(app: &mut App, msg: FormMessage) {
    let Some(state) = app.rule_form.as_mut() else {
        return;
    };

    match state.form.phase() {
        FormPhase::Ready => {}
        FormPhase::LoadFailed(_) => {
            if msg == FormMessage::Retry {
                retry_load(app);
            }
            return;
        }
        FormPhase::Loading => return,
        FormPhase::Submitting => {
            app.set_status("Saving...");
            return;
        }
    }

    let result = match msg {
        FormMessage::NextField => {
            state.focus_next();
            Ok(())
        }
        FormMessage::PrevField => {
            state.focus_prev();
            Ok(())
        }
        FormMessage::Input(c) => state.input_char(c),
        FormMessage::Backspace => state.backspace(),
        FormMessage::ToggleTls => toggle_tls(state),
        FormMessage::Activate => match state.focus {
            FormSlot::Tls => toggle_tls(state),
            FormSlot::AddAnnotation => {
                app.modal.show_annotation_search();
                Ok(())
            }
            FormSlot::Submit => {
                submit(app);
                Ok(())
            }
            _ => {
                state.focus_next();
                Ok(())
            }
        },
        FormMessage::AddRow => match state.focus {
            FormSlot::Destination(_) => state.form.add_destination().map(|index| {
                state.move_focus(FormSlot::Destination(index));
            }),
            FormSlot::Annotation(_) | FormSlot::AddAnnotation => {
                app.modal.show_annotation_search();
                Ok(())
            }
            _ => Ok(()),
        },
        FormMessage::RemoveRow => remove_row(state),
        FormMessage::Submit => {
            submit(app);
            Ok(())
        }
        FormMessage::Retry => Ok(()),
    };

    if let Err(e) = result {
        report(app, &e);
    }
}

fn toggle_tls(state: &mut RuleFormState) -> CoreResult<()> {
    let tls = !state.form.draft().tls;
    state.form.set_tls(tls)
}

fn remove_row(state: &mut RuleFormState) -> CoreResult<()> {
    match state.focus {
        FormSlot::Destination(index) => state.form.remove_destination(index)?,
        FormSlot::Annotation(index) => {
            state.form.annotations_mut()?.remove(index);
        }
        _ => return Ok(()),
    }
    state.clamp_focus();
    Ok(())
}

/// 校验通过才会产生 SubmitRule；否则错误显示在表单内
fn submit(app: &mut App) {
    let Some(state) = app.rule_form.as_mut() else {
        return;
    };
    let form_id = state.id;
    match state.form.begin_submit() {
        Ok(request) => {
            app.dispatch(Command::SubmitRule { form_id, request });
            app.set_status("Saving...");
        }
        Err(e) => report(app, &e),
    }
}

fn retry_load(app: &mut App) {
    let Some(state) = app.rule_form.as_mut() else {
        return;
    };
    let form_id = state.id;
    let FormMode::Edit { name } = state.form.mode().clone() else {
        return;
    };
    if state.form.retry_load() {
        app.dispatch(Command::LoadRule { form_id, name });
        app.set_status("Loading rule...");
    }
}

fn report(app: &mut App, err: &CoreError) {
    let message = match err {
        CoreError::InvalidState(reason) => reason.clone(),
        other => other.to_string(),
    };
    app.set_status(message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{AppMessage, BackendEvent, ModalMessage};
    use crate::model::state::Modal;
    use crate::model::Page;
    use crate::update::test_support::{loaded_app, rule};
    use crate::update::{open_create_form, open_edit_form};
    use mortar_portal_client::{ProxyRuleSpec, RequestError};
    use mortar_portal_core::form::SubmitRequest;
    use mortar_portal_core::validation::{Field, ValidationErrorKind};

    fn send(app: &mut App, msg: FormMessage) {
        crate::update::update(app, AppMessage::Form(msg));
    }

    fn backend(app: &mut App, event: BackendEvent) {
        crate::update::update(app, AppMessage::Backend(event));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            send(app, FormMessage::Input(c));
        }
    }

    fn form_id(app: &App) -> u64 {
        app.rule_form.as_ref().map(|s| s.id).unwrap()
    }

    fn focus(app: &App) -> FormSlot {
        app.rule_form.as_ref().map(|s| s.focus).unwrap()
    }

    /// 依次填写 name / domain / destination / port，光标停在 Port 上
    fn fill(app: &mut App, name: &str, domain: &str, destination: &str, port: &str) {
        type_text(app, name);
        send(app, FormMessage::NextField);
        type_text(app, domain);
        send(app, FormMessage::NextField);
        type_text(app, destination);
        send(app, FormMessage::NextField);
        type_text(app, port);
    }

    #[test]
    fn duplicate_domain_blocks_submission() {
        let mut app = loaded_app();
        open_create_form(&mut app);
        let id = form_id(&app);
        app.take_commands();
        backend(
            &mut app,
            BackendEvent::ExistingRulesLoaded {
                form_id: id,
                rules: Some(vec![rule("other", "a.example.com")]),
            },
        );

        fill(&mut app, "svc-a", "a.example.com", "10.0.0.1", "8080");
        send(&mut app, FormMessage::Submit);

        assert!(app.take_commands().is_empty());
        let form = &app.rule_form.as_ref().unwrap().form;
        let err = form.visible_error(Field::Domain).unwrap();
        assert_eq!(err.kind, ValidationErrorKind::DuplicateDomain);
        assert_eq!(
            form.submit_error(),
            Some("Please fix the validation errors before submitting")
        );
    }

    #[test]
    fn valid_create_is_sent_and_returns_to_list() {
        let mut app = loaded_app();
        open_create_form(&mut app);
        let id = form_id(&app);
        app.take_commands();

        fill(&mut app, "svc-a", "a.example.com", "10.0.0.1", "8080");
        send(&mut app, FormMessage::Submit);

        let commands = app.take_commands();
        let Some(Command::SubmitRule {
            form_id,
            request: SubmitRequest::Create(rule),
        }) = commands.first()
        else {
            panic!("expected a create request, got {commands:?}");
        };
        assert_eq!(*form_id, id);
        assert_eq!(rule.name(), "svc-a");
        assert_eq!(rule.spec.port, Some(8080));
        assert_eq!(rule.spec.destinations, vec!["10.0.0.1"]);

        // 提交中不接受输入
        send(&mut app, FormMessage::Input('x'));
        assert_eq!(app.rule_form.as_ref().unwrap().form.draft().port, "8080");

        let saved = rule.clone();
        backend(
            &mut app,
            BackendEvent::RuleSaved {
                form_id: id,
                result: Ok(saved),
            },
        );
        assert_eq!(app.current_page, Page::Resources);
        assert!(app.rule_form.is_none());
        assert_eq!(app.take_commands(), vec![Command::LoadResources]);
    }

    #[test]
    fn failed_save_keeps_draft() {
        let mut app = loaded_app();
        open_create_form(&mut app);
        let id = form_id(&app);
        fill(&mut app, "svc-a", "a.example.com", "10.0.0.1", "");
        send(&mut app, FormMessage::Submit);
        app.take_commands();

        backend(
            &mut app,
            BackendEvent::RuleSaved {
                form_id: id,
                result: Err(RequestError::from_status(409, "proxyrules \"svc-a\" already exists").into()),
            },
        );
        assert_eq!(app.current_page, Page::RuleForm);
        let form = &app.rule_form.as_ref().unwrap().form;
        assert_eq!(form.phase(), &FormPhase::Ready);
        assert_eq!(form.submit_error(), Some("proxyrules \"svc-a\" already exists"));
        assert_eq!(form.draft().name, "svc-a");
    }

    #[test]
    fn activate_on_text_field_moves_on() {
        let mut app = loaded_app();
        open_create_form(&mut app);
        send(&mut app, FormMessage::Activate);
        assert_eq!(focus(&app), FormSlot::Domain);
    }

    #[test]
    fn destination_rows_can_be_added_and_removed() {
        let mut app = loaded_app();
        open_create_form(&mut app);
        send(&mut app, FormMessage::NextField);
        send(&mut app, FormMessage::NextField);
        assert_eq!(focus(&app), FormSlot::Destination(0));

        send(&mut app, FormMessage::AddRow);
        assert_eq!(focus(&app), FormSlot::Destination(1));
        type_text(&mut app, "backend.svc");
        assert_eq!(
            app.rule_form.as_ref().unwrap().form.draft().destinations,
            vec!["", "backend.svc"]
        );

        send(&mut app, FormMessage::RemoveRow);
        assert_eq!(focus(&app), FormSlot::Destination(0));
        assert_eq!(
            app.rule_form.as_ref().unwrap().form.draft().destinations,
            vec![""]
        );
    }

    #[test]
    fn tls_toggles_on_its_row() {
        let mut app = loaded_app();
        open_create_form(&mut app);
        app.rule_form.as_mut().unwrap().move_focus(FormSlot::Tls);
        send(&mut app, FormMessage::Activate);
        assert!(!app.rule_form.as_ref().unwrap().form.draft().tls);
    }

    #[test]
    fn add_annotation_opens_search() {
        let mut app = loaded_app();
        open_create_form(&mut app);
        app.rule_form
            .as_mut()
            .unwrap()
            .move_focus(FormSlot::AddAnnotation);
        send(&mut app, FormMessage::Activate);
        assert_eq!(
            app.modal.active,
            Some(Modal::AnnotationSearch {
                query: String::new(),
                selected: 0
            })
        );

        for c in "cluster-issuer".chars() {
            crate::update::update(&mut app, AppMessage::Modal(ModalMessage::Input(c)));
        }
        crate::update::update(&mut app, AppMessage::Modal(ModalMessage::Confirm));

        let state = app.rule_form.as_ref().unwrap();
        assert_eq!(
            state.form.draft().annotations.entries()[0].0,
            "cert-manager.io/cluster-issuer"
        );
        assert_eq!(state.focus, FormSlot::Annotation(0));
        assert!(!app.modal.is_open());
    }

    #[test]
    fn edit_name_shows_hint() {
        let mut app = loaded_app();
        open_edit_form(&mut app, "web".to_string());
        let id = form_id(&app);
        let target = mortar_portal_client::ProxyRule::new(
            "web",
            ProxyRuleSpec {
                domain: "web.example.com".to_string(),
                destinations: vec!["10.0.0.1".to_string()],
                ..Default::default()
            },
        );
        backend(
            &mut app,
            BackendEvent::RuleLoaded {
                form_id: id,
                result: Ok(target),
            },
        );
        send(&mut app, FormMessage::PrevField);
        assert_eq!(focus(&app), FormSlot::Name);
        send(&mut app, FormMessage::Input('x'));
        assert_eq!(
            app.status_message.as_deref(),
            Some("Name cannot be changed in edit mode")
        );
    }

    #[test]
    fn input_is_ignored_while_loading() {
        let mut app = loaded_app();
        open_edit_form(&mut app, "web".to_string());
        send(&mut app, FormMessage::Input('x'));
        assert_eq!(app.rule_form.as_ref().unwrap().form.draft().domain, "");
    }
}
