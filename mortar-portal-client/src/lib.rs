//! # mortar-portal-client
//!
//! Typed client for the Mortar proxy rule API.
//!
//! The API exposes `Proxyrule` custom resources (full CRUD) and ingresses
//! (read only) under an `/api` prefix:
//!
//! | Method | Path | Result |
//! |--------|------|--------|
//! | `GET` | `/api/proxyrules` | `{ "items": [ProxyRule] }` |
//! | `GET` | `/api/proxyrules/{name}` | [`ProxyRule`] |
//! | `POST` | `/api/proxyrules` | created [`ProxyRule`] |
//! | `PUT` | `/api/proxyrules/{name}` | updated [`ProxyRule`] |
//! | `DELETE` | `/api/proxyrules/{name}` | empty body |
//! | `GET` | `/api/ingresses` | `{ "items": [Ingress] }` |
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mortar_portal_client::{PortalClient, ProxyRule, ProxyRuleSpec, ResourceApi};
//!
//! # async fn example() -> mortar_portal_client::Result<()> {
//! let client = PortalClient::new("http://localhost:8080")?;
//!
//! for rule in client.list_proxy_rules().await? {
//!     println!("{} -> {:?}", rule.domain(), rule.spec.destinations);
//! }
//!
//! let spec = ProxyRuleSpec {
//!     domain: "app.example.com".to_string(),
//!     destinations: vec!["10.0.0.1".to_string()],
//!     ..Default::default()
//! };
//! client.create_proxy_rule(&ProxyRule::new("app", spec)).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every call returns [`Result<T, RequestError>`](RequestError). A non-2xx
//! response becomes [`RequestError::Status`] whose message is the response
//! body, so backend validation messages reach the operator unchanged.
//! Requests are never retried.

mod client;
mod error;
mod http_client;
mod traits;
mod types;
mod utils;

pub use client::PortalClient;
pub use error::{RequestError, Result};
pub use traits::ResourceApi;
pub use types::{
    Condition, Ingress, IngressRule, IngressSpec, IngressTls, ItemList, MAX_PORT, MIN_PORT,
    ObjectMeta, PROXY_RULE_API_VERSION, PROXY_RULE_KIND, ProxyRule, ProxyRuleSpec,
    ProxyRuleStatus,
};
