//! 事件处理器

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use mortar_portal_core::form::FormPhase;

use crate::event::keymap::{typed_char, DefaultKeymap};
use crate::message::{AppMessage, ContentMessage, FormMessage, ModalMessage, NavigationMessage};
use crate::model::state::{FormSlot, Modal};
use crate::model::{App, Page};

/// 轮询事件
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// 处理事件，返回对应的消息
pub fn handle_event(event: Event, app: &App) -> AppMessage {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, app),
        // 终端窗口大小改变时下一轮自动重绘
        _ => AppMessage::Noop,
    }
}

/// 处理键盘事件
fn handle_key_event(key: KeyEvent, app: &App) -> AppMessage {
    // 只处理 Press 事件，避免 Windows 终端上的重复按键
    if key.kind != KeyEventKind::Press {
        return AppMessage::Noop;
    }

    if app.modal.is_open() {
        return handle_modal_keys(key, app);
    }

    // 全局快捷键（无论焦点在哪里）
    if DefaultKeymap::FORCE_QUIT.matches(&key) || DefaultKeymap::QUIT.matches(&key) {
        return AppMessage::Quit;
    }
    if DefaultKeymap::HELP.matches(&key) {
        return AppMessage::ShowHelp;
    }
    if DefaultKeymap::TOGGLE_THEME.matches(&key) {
        return AppMessage::ToggleTheme;
    }
    if DefaultKeymap::REFRESH.matches(&key) {
        return AppMessage::Refresh;
    }

    let on_content = app.focus.is_content();
    if on_content && app.current_page == Page::Resources && app.resources.searching {
        return handle_search_keys(key);
    }

    if DefaultKeymap::BACK.matches(&key) {
        return AppMessage::GoBack;
    }

    if on_content {
        match app.current_page {
            Page::Resources => handle_resources_keys(key),
            Page::RuleForm => handle_form_keys(key, app),
            Page::Settings => handle_settings_keys(key),
        }
    } else {
        handle_navigation_keys(key)
    }
}

/// 列表 / 设置 / 导航共用的按键
fn handle_common_keys(key: &KeyEvent) -> Option<AppMessage> {
    match typed_char(key) {
        Some('q') => Some(AppMessage::Quit),
        Some('?') => Some(AppMessage::ShowHelp),
        _ if key.code == KeyCode::Tab => Some(AppMessage::ToggleFocus),
        _ => None,
    }
}

/// 处理导航面板的按键
fn handle_navigation_keys(key: KeyEvent) -> AppMessage {
    if let Some(msg) = handle_common_keys(&key) {
        return msg;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => AppMessage::Navigation(NavigationMessage::SelectPrevious),
        KeyCode::Down | KeyCode::Char('j') => AppMessage::Navigation(NavigationMessage::SelectNext),
        KeyCode::Enter | KeyCode::Right => AppMessage::Navigation(NavigationMessage::Confirm),
        KeyCode::Home => AppMessage::Navigation(NavigationMessage::SelectFirst),
        KeyCode::End => AppMessage::Navigation(NavigationMessage::SelectLast),
        _ => AppMessage::Noop,
    }
}

/// 处理资源列表页的按键
fn handle_resources_keys(key: KeyEvent) -> AppMessage {
    if DefaultKeymap::ACTION_ADD.matches(&key) {
        return AppMessage::Content(ContentMessage::Add);
    }
    if DefaultKeymap::ACTION_EDIT.matches(&key) {
        return AppMessage::Content(ContentMessage::Edit);
    }
    if DefaultKeymap::ACTION_DELETE.matches(&key) {
        return AppMessage::Content(ContentMessage::Delete);
    }
    if let Some(msg) = handle_common_keys(&key) {
        return msg;
    }

    let msg = match key.code {
        KeyCode::Up | KeyCode::Char('k') => ContentMessage::SelectPrevious,
        KeyCode::Down | KeyCode::Char('j') => ContentMessage::SelectNext,
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => ContentMessage::PrevFilter,
        KeyCode::Right | KeyCode::Char('l') => ContentMessage::NextFilter,
        KeyCode::Char('/') => ContentMessage::StartSearch,
        KeyCode::Enter | KeyCode::Char('e') => ContentMessage::Edit,
        KeyCode::Char('n') => ContentMessage::Add,
        KeyCode::Char('d') | KeyCode::Delete => ContentMessage::Delete,
        KeyCode::Char('r') => return AppMessage::Refresh,
        _ => return AppMessage::Noop,
    };
    AppMessage::Content(msg)
}

/// 搜索框输入中
fn handle_search_keys(key: KeyEvent) -> AppMessage {
    let msg = match key.code {
        KeyCode::Esc => ContentMessage::ClearSearch,
        KeyCode::Enter | KeyCode::Down | KeyCode::Tab => ContentMessage::FinishSearch,
        KeyCode::Backspace => ContentMessage::SearchBackspace,
        _ => match typed_char(&key) {
            Some(c) => ContentMessage::SearchInput(c),
            None => return AppMessage::Noop,
        },
    };
    AppMessage::Content(msg)
}

/// 处理规则表单页的按键
fn handle_form_keys(key: KeyEvent, app: &App) -> AppMessage {
    let Some(state) = app.rule_form.as_ref() else {
        return AppMessage::Noop;
    };

    if matches!(state.form.phase(), FormPhase::LoadFailed(_)) {
        return match typed_char(&key) {
            Some('r') => AppMessage::Form(FormMessage::Retry),
            Some('q') => AppMessage::Quit,
            _ => AppMessage::Noop,
        };
    }

    if DefaultKeymap::SUBMIT.matches(&key) || DefaultKeymap::SUBMIT_ALT.matches(&key) {
        return AppMessage::Form(FormMessage::Submit);
    }
    if DefaultKeymap::ACTION_ADD.matches(&key) {
        return AppMessage::Form(FormMessage::AddRow);
    }
    if DefaultKeymap::ACTION_DELETE.matches(&key) {
        return AppMessage::Form(FormMessage::RemoveRow);
    }

    let msg = match key.code {
        KeyCode::Tab | KeyCode::Down => FormMessage::NextField,
        KeyCode::BackTab | KeyCode::Up => FormMessage::PrevField,
        KeyCode::Enter => FormMessage::Activate,
        KeyCode::Backspace => FormMessage::Backspace,
        KeyCode::Char(' ') if state.focus == FormSlot::Tls => FormMessage::ToggleTls,
        _ => match typed_char(&key) {
            Some(c) if state.focus.is_text() => FormMessage::Input(c),
            _ => return AppMessage::Noop,
        },
    };
    AppMessage::Form(msg)
}

/// 处理设置页面的按键
fn handle_settings_keys(key: KeyEvent) -> AppMessage {
    if let Some(msg) = handle_common_keys(&key) {
        return msg;
    }
    let msg = match key.code {
        KeyCode::Up | KeyCode::Char('k') => ContentMessage::SelectPrevious,
        KeyCode::Down | KeyCode::Char('j') => ContentMessage::SelectNext,
        KeyCode::Left => ContentMessage::TogglePrev,
        KeyCode::Right | KeyCode::Enter => ContentMessage::ToggleNext,
        _ => return AppMessage::Noop,
    };
    AppMessage::Content(msg)
}

/// 处理弹窗中的按键
fn handle_modal_keys(key: KeyEvent, app: &App) -> AppMessage {
    // Esc 和 Ctrl+C 始终可以关闭弹窗
    if DefaultKeymap::BACK.matches(&key) || DefaultKeymap::FORCE_QUIT.matches(&key) {
        return AppMessage::Modal(ModalMessage::Close);
    }

    let Some(modal) = app.modal.active.as_ref() else {
        return AppMessage::Noop;
    };

    let msg = match modal {
        Modal::ConfirmDelete { .. } => match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                ModalMessage::ToggleDeleteFocus
            }
            KeyCode::Enter => ModalMessage::Confirm,
            _ => return AppMessage::Noop,
        },
        Modal::AnnotationSearch { .. } => match key.code {
            KeyCode::Up | KeyCode::BackTab => ModalMessage::SelectPrevious,
            KeyCode::Down | KeyCode::Tab => ModalMessage::SelectNext,
            KeyCode::Enter => ModalMessage::Confirm,
            KeyCode::Backspace => ModalMessage::Backspace,
            _ => match typed_char(&key) {
                Some(c) => ModalMessage::Input(c),
                None => return AppMessage::Noop,
            },
        },
        // 帮助和错误弹窗只响应关闭按键
        Modal::Help | Modal::Error { .. } => match key.code {
            KeyCode::Enter => ModalMessage::Close,
            _ => return AppMessage::Noop,
        },
    };
    AppMessage::Modal(msg)
}
