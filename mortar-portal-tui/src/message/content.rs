//! 资源列表页消息
//!
//! 列表选择、筛选标签、搜索以及增删改入口

/// 资源列表页消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentMessage {
    // ========== 列表导航 ==========
    /// 选择上一项
    SelectPrevious,
    /// 选择下一项
    SelectNext,

    // ========== 筛选标签 ==========
    /// 上一个标签（All / Proxy Rules / Ingresses）
    PrevFilter,
    /// 下一个标签
    NextFilter,

    // ========== 搜索 ==========
    /// 进入搜索输入
    StartSearch,
    /// 结束搜索输入，保留查询
    FinishSearch,
    /// 清空查询
    ClearSearch,
    /// 输入字符
    SearchInput(char),
    /// 删除字符
    SearchBackspace,

    // ========== CRUD 操作 ==========
    /// 新建代理规则
    Add,
    /// 编辑当前选中项
    Edit,
    /// 删除当前选中项
    Delete,

    // ========== 设置页面专用 ==========
    /// 切换到上一个值
    TogglePrev,
    /// 切换到下一个值
    ToggleNext,
}
