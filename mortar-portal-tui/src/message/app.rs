//! 应用主消息枚举

use super::{BackendEvent, ContentMessage, FormMessage, ModalMessage, NavigationMessage};

/// 应用主消息
#[derive(Debug)]
pub enum AppMessage {
    /// 退出应用
    Quit,

    /// 切换焦点面板
    ToggleFocus,

    /// 导航相关消息
    Navigation(NavigationMessage),

    /// 资源列表页消息
    Content(ContentMessage),

    /// 规则表单页消息
    Form(FormMessage),

    /// 弹窗相关消息
    Modal(ModalMessage),

    /// 后台请求完成
    Backend(BackendEvent),

    /// 切换深色 / 浅色主题
    ToggleTheme,

    /// 返回上一页
    GoBack,

    /// 重新加载当前页面
    Refresh,

    /// 显示帮助
    ShowHelp,

    /// 无操作（用于忽略未处理的事件）
    Noop,
}
