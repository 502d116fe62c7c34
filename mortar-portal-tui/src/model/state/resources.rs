//! 资源列表页面状态

use mortar_portal_core::resources::ResourceList;

/// 资源列表页面状态
#[derive(Debug, Default)]
pub struct ResourcesState {
    /// 列表、搜索、筛选与删除流程
    pub list: ResourceList,
    /// 是否正在输入搜索词（输入时字符键不作为快捷键）
    pub searching: bool,
}

impl ResourcesState {
    pub fn new() -> Self {
        Self::default()
    }
}
