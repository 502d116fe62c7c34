//! 应用主状态结构

use std::mem;

use super::state::{ModalState, ResourcesState, RuleFormState, SettingsState};
use super::{FocusPanel, NavigationState, Page};
use crate::message::Command;

/// 应用主状态
#[derive(Debug)]
pub struct App {
    /// 是否应该退出
    pub should_quit: bool,

    /// 当前焦点面板
    pub focus: FocusPanel,

    /// 导航状态
    pub navigation: NavigationState,

    /// 当前页面
    pub current_page: Page,

    /// 状态栏消息
    pub status_message: Option<String>,

    // === 各页面状态 ===
    /// 资源列表页面状态
    pub resources: ResourcesState,
    /// 规则表单（仅在表单页面打开时存在）
    pub rule_form: Option<RuleFormState>,
    /// 设置页面状态
    pub settings: SettingsState,

    /// 弹窗状态
    pub modal: ModalState,

    /// 等待 Backend 执行的命令
    commands: Vec<Command>,
    next_form_id: u64,
}

impl App {
    /// 创建应用实例，并请求首次加载资源列表
    pub fn new(settings: SettingsState) -> Self {
        let mut app = Self {
            should_quit: false,
            focus: FocusPanel::Content,
            navigation: NavigationState::new(),
            current_page: Page::Resources,
            status_message: None,
            resources: ResourcesState::new(),
            rule_form: None,
            settings,
            modal: ModalState::new(),
            commands: Vec::new(),
            next_form_id: 0,
        };
        app.dispatch(Command::LoadResources);
        app
    }

    /// 设置状态消息
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// 清除状态消息
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// 请求一次 I/O
    pub fn dispatch(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// 取出所有待执行命令
    pub fn take_commands(&mut self) -> Vec<Command> {
        mem::take(&mut self.commands)
    }

    /// 下一个表单 id
    pub fn allocate_form_id(&mut self) -> u64 {
        self.next_form_id += 1;
        self.next_form_id
    }

    /// 表单 id 是否仍对应当前打开的表单
    pub fn is_current_form(&self, form_id: u64) -> bool {
        self.rule_form.as_ref().is_some_and(|state| state.id == form_id)
    }
}
