//! reqwest-backed implementation of [`ResourceApi`].

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{RequestError, Result};
use crate::http_client::{HttpUtils, create_http_client};
use crate::traits::ResourceApi;
use crate::types::{Ingress, ItemList, ProxyRule};

const PROXY_RULES: &str = "proxyrules";
const INGRESSES: &str = "ingresses";

/// Client for the portal REST API rooted at `<base>/api`.
#[derive(Debug, Clone)]
pub struct PortalClient {
    client: Client,
    api_base: Url,
}

impl PortalClient {
    /// Creates a client for the API served under `base_url`.
    ///
    /// `base_url` must be an absolute `http` or `https` URL; a trailing path
    /// (for example a reverse-proxy prefix) is kept and `/api` is appended to it.
    pub fn new(base_url: &str) -> Result<Self> {
        let api_base = parse_base_url(base_url)?;
        Ok(Self {
            client: create_http_client()?,
            api_base,
        })
    }

    /// Base URL the client was created with.
    pub fn base_url(&self) -> &Url {
        &self.api_base
    }

    /// `<base>/api/<segments...>`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| RequestError::InvalidUrl {
                url: self.api_base.to_string(),
                detail: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let text =
            HttpUtils::execute_request(self.client.get(url.clone()), "GET", url.as_str()).await?;
        HttpUtils::parse_json(&text)
    }

    async fn send_rule(&self, method: reqwest::Method, url: Url, rule: &ProxyRule) -> Result<ProxyRule> {
        let body = serde_json::to_string(rule).map_err(|e| RequestError::SerializationError {
            detail: e.to_string(),
        })?;
        let method_name = method.to_string();
        let request = self
            .client
            .request(method, url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        let text = HttpUtils::execute_request(request, &method_name, url.as_str()).await?;
        HttpUtils::parse_json(&text)
    }
}

fn parse_base_url(base_url: &str) -> Result<Url> {
    let invalid = |detail: String| RequestError::InvalidUrl {
        url: base_url.to_string(),
        detail,
    };
    let url = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{other}'"))),
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be a base".to_string()));
    }
    Ok(url)
}

#[async_trait]
impl ResourceApi for PortalClient {
    async fn list_proxy_rules(&self) -> Result<Vec<ProxyRule>> {
        let list: ItemList<ProxyRule> = self.get_json(self.endpoint(&[PROXY_RULES])?).await?;
        Ok(list.items)
    }

    async fn get_proxy_rule(&self, name: &str) -> Result<ProxyRule> {
        self.get_json(self.endpoint(&[PROXY_RULES, name])?).await
    }

    async fn create_proxy_rule(&self, rule: &ProxyRule) -> Result<ProxyRule> {
        let url = self.endpoint(&[PROXY_RULES])?;
        self.send_rule(reqwest::Method::POST, url, rule).await
    }

    async fn update_proxy_rule(&self, name: &str, rule: &ProxyRule) -> Result<ProxyRule> {
        let url = self.endpoint(&[PROXY_RULES, name])?;
        self.send_rule(reqwest::Method::PUT, url, rule).await
    }

    async fn delete_proxy_rule(&self, name: &str) -> Result<()> {
        let url = self.endpoint(&[PROXY_RULES, name])?;
        HttpUtils::execute_request(self.client.delete(url.clone()), "DELETE", url.as_str()).await?;
        Ok(())
    }

    async fn list_ingresses(&self) -> Result<Vec<Ingress>> {
        let list: ItemList<Ingress> = self.get_json(self.endpoint(&[INGRESSES])?).await?;
        Ok(list.items)
    }
}
