//! 弹窗消息类型

/// 弹窗相关消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalMessage {
    /// 关闭弹窗
    Close,

    /// 确认/提交
    Confirm,

    /// 在确认删除弹窗中切换焦点
    ToggleDeleteFocus,

    /// 注解搜索：上一条建议
    SelectPrevious,

    /// 注解搜索：下一条建议
    SelectNext,

    /// 输入字符
    Input(char),

    /// 删除字符（Backspace）
    Backspace,
}
