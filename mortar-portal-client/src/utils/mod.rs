//! Utility modules.

/// Log sanitization so response bodies never flood the log.
pub mod log_sanitizer;
