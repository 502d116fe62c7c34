use serde::{Deserialize, Serialize};

/// Unified error type for every call made against the portal API.
///
/// All variants carry enough context to be shown to an operator as-is and are
/// serializable for structured error reporting.
///
/// # Display
///
/// [`Status`](Self::Status) prints the backend message verbatim, because the
/// API answers failures with a plain-text explanation meant for humans. The
/// remaining variants describe a client-side failure and are prefixed
/// accordingly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum RequestError {
    /// The API answered with a non-2xx status code.
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, or a generic fallback when the body was empty.
        message: String,
    },

    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The request timed out.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// A successful response body could not be parsed.
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Details about the serialization failure.
        detail: String,
    },

    /// The configured API base URL is unusable.
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// Why it was rejected.
        detail: String,
    },
}

impl RequestError {
    /// Builds the error for a non-2xx response.
    ///
    /// The body is used verbatim when it has any non-whitespace content,
    /// otherwise the message falls back to `request failed with status <code>`.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = if body.trim().is_empty() {
            format!("request failed with status {status}")
        } else {
            body.to_string()
        };
        Self::Status { status, message }
    }

    /// HTTP status code, when the error came from a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 是否为预期行为（用户输入、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Status { status, .. } => (400..500).contains(status),
            Self::InvalidUrl { .. } => true,
            Self::NetworkError { .. }
            | Self::Timeout { .. }
            | Self::ParseError { .. }
            | Self::SerializationError { .. } => false,
        }
    }
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status { message, .. } => f.write_str(message),
            Self::NetworkError { detail } => write!(f, "Network error: {detail}"),
            Self::Timeout { detail } => write!(f, "Request timeout: {detail}"),
            Self::ParseError { detail } => write!(f, "Unexpected response from server: {detail}"),
            Self::SerializationError { detail } => write!(f, "Serialization error: {detail}"),
            Self::InvalidUrl { url, detail } => write!(f, "Invalid API URL '{url}': {detail}"),
        }
    }
}

impl std::error::Error for RequestError {}

/// Convenience type alias for `Result<T, RequestError>`.
pub type Result<T> = std::result::Result<T, RequestError>;
