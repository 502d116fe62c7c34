//! 后台请求结果的处理
//!
//! 结果到达时对应的页面可能已经关闭：表单结果按 id 核对，
//! 不匹配的直接丢弃。

use mortar_portal_core::services::DeleteOutcome;

use crate::message::BackendEvent;
use crate::model::App;

pub fn update(app: &mut App, event: BackendEvent) {
    match event {
        BackendEvent::ResourcesLoaded(result) => match result {
            Ok(snapshot) => {
                app.resources.list.loaded(snapshot);
                if app.status_message.as_deref() == Some("Refreshing...") {
                    app.clear_status();
                }
            }
            Err(e) => {
                app.resources.list.load_failed(&e);
                app.clear_status();
            }
        },

        BackendEvent::RuleLoaded { form_id, result } => {
            if !app.is_current_form(form_id) {
                log::debug!("Dropping rule load for closed form {form_id}");
                return;
            }
            if let Some(state) = app.rule_form.as_mut() {
                match result {
                    Ok(rule) => {
                        state.form.hydrate(&rule);
                        state.clamp_focus();
                    }
                    Err(e) => state.form.load_failed(&e),
                }
            }
            app.clear_status();
        }

        BackendEvent::ExistingRulesLoaded { form_id, rules } => {
            if let Some(state) = app.rule_form.as_mut().filter(|s| s.id == form_id) {
                state.form.set_existing(rules);
            }
        }

        BackendEvent::RuleSaved { form_id, result } => {
            if !app.is_current_form(form_id) {
                // 表单已关闭，但保存可能已生效
                if result.is_ok() {
                    super::reload_resources(app);
                }
                return;
            }
            match result {
                Ok(saved) => {
                    if let Some(state) = app.rule_form.as_mut() {
                        state.form.submit_succeeded();
                    }
                    super::open_resources(app);
                    super::reload_resources(app);
                    app.set_status(format!("Saved proxy rule \"{}\"", saved.name()));
                }
                Err(e) => {
                    if let Some(state) = app.rule_form.as_mut() {
                        state.form.submit_failed(&e);
                    }
                    app.clear_status();
                }
            }
        }

        BackendEvent::RuleDeleted { name, result } => match result {
            Ok(DeleteOutcome::Reloaded(snapshot)) => {
                app.resources.list.loaded(snapshot);
                app.set_status(format!("Deleted proxy rule \"{name}\""));
            }
            Ok(DeleteOutcome::ReloadFailed(e)) => {
                app.resources.list.load_failed(&e);
                app.set_status(format!("Deleted proxy rule \"{name}\""));
            }
            Err(e) => {
                let alert = app.resources.list.delete_failed(&e);
                app.clear_status();
                app.modal.show_error("Delete Failed", alert);
            }
        },

        BackendEvent::ConfigSaved(result) => {
            if let Err(e) = result {
                app.set_status(format!("Could not save settings: {e}"));
            }
        }
    }
}
