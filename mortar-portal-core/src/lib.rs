//! Mortar Portal Core Library
//!
//! Presentation-independent logic of the proxy rule console:
//! - field validation and uniqueness hints ([`validation`])
//! - health classification from resource conditions ([`status`])
//! - the resource list and proxy rule form controllers ([`resources`], [`form`])
//! - annotation catalog and fuzzy search ([`annotations`], [`search`])
//! - services that drive the controllers against a [`ResourceApi`]
//!
//! The controllers are plain synchronous state machines; the services run the
//! requests and hand the results back, so a frontend can drive either side.
//!
//! [`ResourceApi`]: mortar_portal_client::ResourceApi

pub mod annotations;
pub mod error;
pub mod form;
pub mod resources;
pub mod search;
pub mod services;
pub mod status;
pub mod validation;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::ServiceContext;
