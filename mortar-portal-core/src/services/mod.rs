//! 业务逻辑服务层

mod proxy_rule_service;
mod resource_service;

pub use proxy_rule_service::ProxyRuleService;
pub use resource_service::{DeleteOutcome, ResourceService};

use std::sync::Arc;

use mortar_portal_client::ResourceApi;

use crate::error::CoreError;

/// 服务上下文 - 持有所有依赖
///
/// 表现层创建此上下文并注入 API 实现（真实客户端或测试替身）。
pub struct ServiceContext {
    /// Portal API
    pub api: Arc<dyn ResourceApi>,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(api: Arc<dyn ResourceApi>) -> Self {
        Self { api }
    }
}

/// 按错误性质选择日志级别
pub(crate) fn log_failure(action: &str, err: &CoreError) {
    if err.is_expected() {
        log::warn!("{action} failed: {err}");
    } else {
        log::error!("{action} failed: {err}");
    }
}
