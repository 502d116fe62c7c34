//! 资源列表 / 设置页更新逻辑

use mortar_portal_core::resources::ResourceEntry;

use crate::message::{AppMessage, ContentMessage};
use crate::model::state::SettingItem;
use crate::model::{App, Page};

/// 处理内容面板消息
pub fn update(app: &mut App, msg: ContentMessage) {
    match app.current_page {
        Page::Resources => update_resources(app, msg),
        Page::Settings => update_settings(app, msg),
        Page::RuleForm => {}
    }
}

fn update_resources(app: &mut App, msg: ContentMessage) {
    let list = &mut app.resources.list;
    match msg {
        // ========== 列表导航 ==========
        ContentMessage::SelectPrevious => list.select_prev(),
        ContentMessage::SelectNext => list.select_next(),

        // ========== 筛选标签 ==========
        ContentMessage::PrevFilter => list.prev_filter(),
        ContentMessage::NextFilter => list.next_filter(),

        // ========== 搜索 ==========
        ContentMessage::StartSearch => {
            if list.search_enabled() {
                app.resources.searching = true;
            }
        }
        ContentMessage::FinishSearch => app.resources.searching = false,
        ContentMessage::ClearSearch => {
            list.clear_query();
            app.resources.searching = false;
        }
        ContentMessage::SearchInput(c) => list.push_query_char(c),
        ContentMessage::SearchBackspace => list.pop_query_char(),

        // ========== CRUD 操作 ==========
        ContentMessage::Add => super::open_create_form(app),
        ContentMessage::Edit => handle_edit(app),
        ContentMessage::Delete => handle_delete(app),

        ContentMessage::TogglePrev | ContentMessage::ToggleNext => {}
    }
}

fn handle_edit(app: &mut App) {
    let name = match app.resources.list.selected() {
        Some(ResourceEntry::ProxyRule(rule)) => rule.name().to_string(),
        Some(ResourceEntry::Ingress(ingress)) => {
            let message = format!("Ingress \"{}\" is read-only", ingress.name());
            app.set_status(message);
            return;
        }
        None => return,
    };
    super::open_edit_form(app, name);
}

fn handle_delete(app: &mut App) {
    let list = &mut app.resources.list;
    if let Some(name) = list.deleting() {
        let message = format!("Still deleting \"{name}\"...");
        app.set_status(message);
        return;
    }
    if matches!(list.selected(), Some(ResourceEntry::Ingress(_))) {
        app.set_status("Ingresses are read-only");
        return;
    }
    let Some(name) = list.request_delete().map(str::to_string) else {
        return;
    };
    let prompt = list.confirm_prompt().unwrap_or_default();
    app.modal.show_confirm_delete(name, prompt);
}

fn update_settings(app: &mut App, msg: ContentMessage) {
    match msg {
        ContentMessage::SelectPrevious => app.settings.select_previous(),
        ContentMessage::SelectNext => app.settings.select_next(),
        ContentMessage::TogglePrev | ContentMessage::ToggleNext => {
            match app.settings.current_item() {
                Some(SettingItem::Theme) => super::update(app, AppMessage::ToggleTheme),
                Some(item) if item.is_read_only() => {
                    app.set_status("Set api_base_url in config.json or MORTAR_PORTAL_API_URL");
                }
                _ => {}
            }
        }
        _ => {}
    }
}
