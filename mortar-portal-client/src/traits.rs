use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Ingress, ProxyRule};

/// Operations the portal API offers.
///
/// Proxy rules support full CRUD keyed by name; ingresses are listed only.
/// Implemented by [`PortalClient`](crate::PortalClient) and by in-memory fakes
/// in tests.
#[async_trait]
pub trait ResourceApi: Send + Sync {
    /// `GET /api/proxyrules`
    async fn list_proxy_rules(&self) -> Result<Vec<ProxyRule>>;

    /// `GET /api/proxyrules/{name}`
    async fn get_proxy_rule(&self, name: &str) -> Result<ProxyRule>;

    /// `POST /api/proxyrules`
    async fn create_proxy_rule(&self, rule: &ProxyRule) -> Result<ProxyRule>;

    /// `PUT /api/proxyrules/{name}`
    async fn update_proxy_rule(&self, name: &str, rule: &ProxyRule) -> Result<ProxyRule>;

    /// `DELETE /api/proxyrules/{name}`
    async fn delete_proxy_rule(&self, name: &str) -> Result<()>;

    /// `GET /api/ingresses`
    async fn list_ingresses(&self) -> Result<Vec<Ingress>>;
}
