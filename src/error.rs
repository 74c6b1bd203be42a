//! Error types for Pulsechat
//!
//! This module defines all error types used throughout the assistant engine,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Pulsechat operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, session management, intent routing, collaborator
/// calls, and attachment staging.
#[derive(Error, Debug)]
pub enum PulsechatError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session store errors (unknown session, export failures, etc.)
    #[error("Session error: {0}")]
    Session(String),

    /// Intent handler errors (a collaborator failed or returned bad data)
    #[error("Handler error: {0}")]
    Handler(String),

    /// A routed handler did not complete within the configured timeout
    #[error("Handler timed out after {timeout_secs}s: {handler}")]
    HandlerTimeout {
        /// Name of the route whose handler stalled
        handler: String,
        /// The configured per-route timeout
        timeout_secs: u64,
    },

    /// Attachment exceeds the configured size limit
    #[error("Attachment too large: {name} is {size} bytes (limit {limit})")]
    AttachmentTooLarge {
        /// File name as presented by the user
        name: String,
        /// Actual size in bytes
        size: u64,
        /// Configured maximum in bytes
        limit: u64,
    },

    /// Attachment could not be read or encoded
    #[error("Attachment error: {0}")]
    Attachment(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for Pulsechat operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
