//! 导航更新逻辑

use crate::message::NavigationMessage;
use crate::model::{App, FocusPanel, NavItemId, Page};

/// 处理导航消息
pub fn update(app: &mut App, msg: NavigationMessage) {
    match msg {
        NavigationMessage::SelectPrevious => app.navigation.select_previous(),
        NavigationMessage::SelectNext => app.navigation.select_next(),
        NavigationMessage::SelectFirst => app.navigation.select_first(),
        NavigationMessage::SelectLast => app.navigation.select_last(),

        NavigationMessage::Confirm => {
            let Some(id) = app.navigation.current_id() else {
                return;
            };
            match id {
                NavItemId::Resources => {
                    super::open_resources(app);
                    app.clear_status();
                }
                NavItemId::NewRule => super::open_create_form(app),
                NavItemId::Settings => {
                    app.rule_form = None;
                    app.current_page = Page::Settings;
                    app.focus = FocusPanel::Content;
                    app.clear_status();
                }
            }
        }
    }
}
