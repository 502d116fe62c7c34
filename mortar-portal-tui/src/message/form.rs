//! 规则表单页消息

/// 规则表单页消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMessage {
    /// 下一个输入项（离开的字段视为失焦）
    NextField,
    /// 上一个输入项
    PrevField,
    /// 输入字符
    Input(char),
    /// 删除字符
    Backspace,
    /// Enter：在按钮上执行，在输入框上前进到下一项
    Activate,
    /// 切换 TLS
    ToggleTls,
    /// 添加一行（目标地址）或打开注解搜索
    AddRow,
    /// 删除当前行（目标地址或注解）
    RemoveRow,
    /// 提交表单
    Submit,
    /// 重新加载（编辑模式加载失败后）
    Retry,
}
