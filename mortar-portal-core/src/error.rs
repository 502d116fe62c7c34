//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

pub use mortar_portal_client::RequestError;

use crate::validation::FieldErrors;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// A call to the portal API failed.
    #[error("{0}")]
    Request(#[from] RequestError),

    /// Local validation rejected the draft; nothing was sent.
    #[error("Please fix the validation errors before submitting")]
    ValidationFailed(FieldErrors),

    /// An operation was attempted in a state that does not allow it.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl CoreError {
    /// 是否为预期行为（用户输入、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ValidationFailed(_) | Self::InvalidState(_) => true,
            Self::Request(e) => e.is_expected(),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
