//!
//! src/update/mod.rs
//! Update 层：状态更新逻辑
//!
//! Update 层负责处理 Message，更新 Model 状态，是唯一可以修改 Model 的地方。
//!
//! 有模块结构：
//!     src/update/mod.rs
//!         mod backend;            // 后台请求结果
//!         mod content;            // 资源列表 / 设置页消息
//!         mod form;               // 规则表单消息
//!         mod modal;              // 弹窗消息
//!         mod navigation;         // 导航栏消息
//!
//! Update 从不等待网络：需要请求时调用 `app.dispatch(Command::...)`，
//! 结果稍后以 `AppMessage::Backend` 回来。
//! 已经离开的页面的结果会被丢弃（表单按 id 区分），请求本身不取消。

mod backend;
mod content;
mod form;
mod modal;
mod navigation;

use mortar_portal_core::form::FormMode;

use crate::message::{AppMessage, Command};
use crate::model::state::RuleFormState;
use crate::model::{App, FocusPanel, NavItemId, Page};
use crate::view::theme;

/// 处理应用消息，更新状态
pub fn update(app: &mut App, msg: AppMessage) {
    match msg {
        AppMessage::Quit => {
            app.should_quit = true;
        }

        AppMessage::ToggleFocus => {
            if !app.modal.is_open() {
                app.focus = app.focus.toggle();
            }
        }

        AppMessage::Navigation(nav_msg) => navigation::update(app, nav_msg),
        AppMessage::Content(content_msg) => content::update(app, content_msg),
        AppMessage::Form(form_msg) => form::update(app, form_msg),
        AppMessage::Modal(modal_msg) => modal::update(app, modal_msg),
        AppMessage::Backend(event) => backend::update(app, event),

        AppMessage::ToggleTheme => toggle_theme(app),

        AppMessage::GoBack => {
            if app.modal.is_open() {
                modal::update(app, crate::message::ModalMessage::Close);
            } else if app.current_page.is_detail_page() {
                open_resources(app);
                app.clear_status();
            } else if app.resources.searching {
                app.resources.searching = false;
            }
        }

        AppMessage::Refresh => refresh(app),

        AppMessage::ShowHelp => app.modal.show_help(),

        AppMessage::Noop => {}
    }
}

/// 回到资源列表；打开中的表单被丢弃
pub(crate) fn open_resources(app: &mut App) {
    app.rule_form = None;
    app.current_page = Page::Resources;
    app.focus = FocusPanel::Content;
    app.navigation.highlight(NavItemId::Resources);
}

pub(crate) fn open_create_form(app: &mut App) {
    let form_id = app.allocate_form_id();
    app.rule_form = Some(RuleFormState::new(form_id, FormMode::Create));
    app.current_page = Page::RuleForm;
    app.focus = FocusPanel::Content;
    app.navigation.highlight(NavItemId::NewRule);
    app.clear_status();
    app.dispatch(Command::LoadExistingRules { form_id });
}

/// 编辑模式：目标规则与已有规则列表同时请求，只有前者阻塞表单
pub(crate) fn open_edit_form(app: &mut App, name: String) {
    let form_id = app.allocate_form_id();
    app.rule_form = Some(RuleFormState::new(
        form_id,
        FormMode::Edit { name: name.clone() },
    ));
    app.current_page = Page::RuleForm;
    app.focus = FocusPanel::Content;
    app.navigation.highlight(NavItemId::Resources);
    app.clear_status();
    app.dispatch(Command::LoadRule { form_id, name });
    app.dispatch(Command::LoadExistingRules { form_id });
}

pub(crate) fn reload_resources(app: &mut App) {
    app.resources.list.begin_load();
    app.dispatch(Command::LoadResources);
}

fn refresh(app: &mut App) {
    match app.current_page {
        Page::Resources => {
            reload_resources(app);
            app.set_status("Refreshing...");
        }
        Page::RuleForm => form::update(app, crate::message::FormMessage::Retry),
        Page::Settings => {}
    }
}

fn toggle_theme(app: &mut App) {
    let theme = app.settings.theme.next();
    app.settings.theme = theme;
    theme::set_theme(theme);
    app.dispatch(Command::SaveConfig { theme });
    app.set_status(format!("Theme: {}", theme.label()));
}
