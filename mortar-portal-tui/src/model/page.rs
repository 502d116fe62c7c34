//! 页面状态定义

/// 页面枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// 资源列表（代理规则 + 只读 Ingress）
    #[default]
    Resources,
    /// 新建 / 编辑代理规则
    RuleForm,
    /// 设置
    Settings,
}

impl Page {
    pub fn title(self) -> &'static str {
        match self {
            Page::Resources => "Resources",
            Page::RuleForm => "Proxy Rule",
            Page::Settings => "Settings",
        }
    }

    /// 是否是详情页面（Esc 返回列表）
    pub fn is_detail_page(self) -> bool {
        matches!(self, Page::RuleForm)
    }
}
