//! Error types for client configuration.
//!
//! This module contains the error type returned when building a
//! [`NexusConfig`](crate::NexusConfig) or reconfiguring a running
//! [`NexusClient`](crate::NexusClient).
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use nexusmods_api::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Nexus Mods personal API key.")]
    EmptyApiKey,

    /// API key contains characters that cannot be sent in a header.
    #[error("Invalid API key. The key must not contain control characters such as line breaks.")]
    InvalidApiKey,

    /// Host name is invalid.
    #[error("Invalid host '{host}'. Expected a bare host name such as 'api.nexusmods.com'.")]
    InvalidHost {
        /// The invalid host that was provided.
        host: String,
    },

    /// Port is invalid.
    #[error("Invalid port {port}. Port must be between 1 and 65535.")]
    InvalidPort {
        /// The invalid port that was provided.
        port: u16,
    },

    /// The API key header name is not a valid HTTP header name.
    #[error("Invalid API key header name '{name}'. Header names must be non-empty HTTP tokens.")]
    InvalidHeaderName {
        /// The invalid header name that was provided.
        name: String,
    },

    /// The user agent is not a valid HTTP header value.
    #[error("Invalid user agent '{user_agent}'. The user agent must not contain control characters such as line breaks.")]
    InvalidUserAgent {
        /// The invalid user agent that was provided.
        user_agent: String,
    },

    /// The request timeout is invalid.
    #[error("Invalid request timeout. The timeout must be at least one second.")]
    InvalidTimeout,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The underlying HTTP client could not be created.
    #[error("Failed to create HTTP client: {reason}")]
    HttpClientBuild {
        /// Description of the failure reported by the HTTP library.
        reason: String,
    },
}
