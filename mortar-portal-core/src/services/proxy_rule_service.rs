//! Proxy rule 表单服务

use std::sync::Arc;

use mortar_portal_client::ProxyRule;

use crate::error::{CoreError, CoreResult};
use crate::form::SubmitRequest;
use crate::services::{log_failure, ServiceContext};

/// Network side of the proxy rule form.
pub struct ProxyRuleService {
    ctx: Arc<ServiceContext>,
}

impl ProxyRuleService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Rule to edit.
    pub async fn fetch_rule(&self, name: &str) -> CoreResult<ProxyRule> {
        self.ctx.api.get_proxy_rule(name).await.map_err(|e| {
            let err = CoreError::from(e);
            log_failure(&format!("Loading proxy rule {name}"), &err);
            err
        })
    }

    /// Snapshot for uniqueness hints. Best effort: a failure only disables
    /// the hints, so it is logged and mapped to `None`.
    pub async fn fetch_existing(&self) -> Option<Vec<ProxyRule>> {
        match self.ctx.api.list_proxy_rules().await {
            Ok(rules) => Some(rules),
            Err(e) => {
                log::warn!("Existing rules unavailable, uniqueness checks disabled: {e}");
                None
            }
        }
    }

    pub async fn submit(&self, request: SubmitRequest) -> CoreResult<ProxyRule> {
        let result = match &request {
            SubmitRequest::Create(rule) => self.ctx.api.create_proxy_rule(rule).await,
            SubmitRequest::Update { name, rule } => {
                self.ctx.api.update_proxy_rule(name, rule).await
            }
        };

        match result {
            Ok(saved) => {
                log::info!("Saved proxy rule {}", saved.name());
                Ok(saved)
            }
            Err(e) => {
                let err = CoreError::from(e);
                log_failure("Saving proxy rule", &err);
                Err(err)
            }
        }
    }
}
