//! 资源列表服务

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::resources::ResourceSnapshot;
use crate::services::{log_failure, ServiceContext};

/// Result of a successful delete.
#[derive(Debug)]
pub enum DeleteOutcome {
    Reloaded(ResourceSnapshot),
    /// The rule is gone but the list could not be fetched again.
    ReloadFailed(CoreError),
}

/// 资源列表服务
pub struct ResourceService {
    ctx: Arc<ServiceContext>,
}

impl ResourceService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Fetches proxy rules and ingresses concurrently; either failure fails the load.
    pub async fn load_snapshot(&self) -> CoreResult<ResourceSnapshot> {
        let result = futures::future::try_join(
            self.ctx.api.list_proxy_rules(),
            self.ctx.api.list_ingresses(),
        )
        .await;

        match result {
            Ok((proxy_rules, ingresses)) => {
                log::debug!(
                    "Loaded {} proxy rules and {} ingresses",
                    proxy_rules.len(),
                    ingresses.len()
                );
                Ok(ResourceSnapshot {
                    proxy_rules,
                    ingresses,
                })
            }
            Err(e) => {
                let err = CoreError::from(e);
                log_failure("Loading resources", &err);
                Err(err)
            }
        }
    }

    /// Deletes a proxy rule, then re-fetches the whole list.
    ///
    /// A delete failure is returned as `Err` and nothing is reloaded.
    pub async fn delete_and_reload(&self, name: &str) -> CoreResult<DeleteOutcome> {
        if let Err(e) = self.ctx.api.delete_proxy_rule(name).await {
            let err = CoreError::from(e);
            log_failure(&format!("Deleting proxy rule {name}"), &err);
            return Err(err);
        }
        log::info!("Deleted proxy rule {name}");

        Ok(match self.load_snapshot().await {
            Ok(snapshot) => DeleteOutcome::Reloaded(snapshot),
            Err(e) => DeleteOutcome::ReloadFailed(e),
        })
    }
}
