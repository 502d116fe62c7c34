//! HTTP plumbing shared by every portal endpoint.
//!
//! Sending, logging and status handling live here so that [`PortalClient`]
//! only has to build requests and pick response types.
//!
//! [`PortalClient`]: crate::PortalClient

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::{RequestError, Result};
use crate::utils::log_sanitizer::truncate_for_log;

/// 连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 请求总超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Builds the shared reqwest client.
pub fn create_http_client() -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| RequestError::NetworkError {
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Sends a request and returns the body of a 2xx response.
    ///
    /// Transport failures become [`RequestError::Timeout`] or
    /// [`RequestError::NetworkError`]; any non-2xx status becomes
    /// [`RequestError::Status`] carrying the body text. Each attempt is final.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        method_name: &str,
        url: &str,
    ) -> Result<String> {
        log::debug!("{method_name} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                RequestError::Timeout {
                    detail: e.to_string(),
                }
            } else {
                RequestError::NetworkError {
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        log::debug!("{method_name} {url} -> {}", status.as_u16());

        let body = match response.text().await {
            Ok(body) => body,
            // 错误响应的正文读不出来时退回到状态码提示
            Err(e) if !status.is_success() => {
                log::warn!("{method_name} {url}: unreadable error body: {e}");
                String::new()
            }
            Err(e) => {
                return Err(RequestError::NetworkError {
                    detail: format!("Failed to read response body: {e}"),
                });
            }
        };

        if !status.is_success() {
            let err = RequestError::from_status(status.as_u16(), &body);
            if err.is_expected() {
                log::warn!("{method_name} {url} failed: {}", truncate_for_log(&body));
            } else {
                log::error!("{method_name} {url} failed: {}", truncate_for_log(&body));
            }
            return Err(err);
        }

        log::debug!("Response Body: {}", truncate_for_log(&body));
        Ok(body)
    }

    /// Parse JSON response
    pub fn parse_json<T>(response_text: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("JSON parse failed: {e}");
            log::error!("Raw response: {}", truncate_for_log(response_text));
            RequestError::ParseError {
                detail: e.to_string(),
            }
        })
    }
}
