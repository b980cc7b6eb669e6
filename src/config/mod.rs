//! Configuration types for the Nexus Mods API client.
//!
//! This module provides the configuration used to construct a
//! [`NexusClient`](crate::NexusClient).
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`NexusConfig`]: The configuration struct holding all client settings
//! - [`NexusConfigBuilder`]: A builder for constructing [`NexusConfig`] instances
//! - [`ApiKey`]: A validated API key newtype with masked debug output
//! - [`HostName`]: A validated API host name
//! - [`ApiHeaderName`]: The validated name of the API key header
//! - [`Scheme`]: Whether to talk HTTPS (default) or plain HTTP
//!
//! # Example
//!
//! ```rust
//! use nexusmods_api::{NexusConfig, ApiKey};
//!
//! let config = NexusConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url(), "https://api.nexusmods.com:443");
//! ```

mod newtypes;

pub use newtypes::{ApiHeaderName, ApiKey, HostName};

use std::fmt;
use std::time::Duration;

use reqwest::header::HeaderValue;

use crate::error::ConfigError;

/// Default port for the Nexus Mods API.
pub const DEFAULT_PORT: u16 = 443;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// URL scheme used to reach the API host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scheme {
    /// TLS via rustls.
    #[default]
    Https,
    /// Plain HTTP. Only useful for local test servers and proxies.
    Http,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Https => write!(f, "https"),
            Self::Http => write!(f, "http"),
        }
    }
}

/// Configuration for the Nexus Mods API client.
///
/// `NexusConfig` is `Clone`, `Send`, and `Sync`. The API header name and
/// timeout stored here are only the initial values: both can be changed
/// on a running client.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use nexusmods_api::{NexusConfig, ApiKey, HostName};
///
/// let config = NexusConfig::builder()
///     .api_key(ApiKey::new("your-api-key").unwrap())
///     .host(HostName::new("api.nexusmods.com").unwrap())
///     .user_agent("MyModManager/2.1")
///     .timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.user_agent(), "MyModManager/2.1");
/// ```
#[derive(Clone, Debug)]
pub struct NexusConfig {
    api_key: ApiKey,
    host: HostName,
    port: u16,
    scheme: Scheme,
    user_agent: String,
    api_header_name: ApiHeaderName,
    timeout: Duration,
}

impl NexusConfig {
    /// Creates a new builder for constructing a `NexusConfig`.
    #[must_use]
    pub fn builder() -> NexusConfigBuilder {
        NexusConfigBuilder::new()
    }

    /// Creates a configuration with every default and the given key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        Self::builder().api_key(ApiKey::new(api_key)?).build()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the API host.
    #[must_use]
    pub const fn host(&self) -> &HostName {
        &self.host
    }

    /// Returns the API port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the URL scheme.
    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Returns the `User-Agent` value sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns the initial API key header name.
    #[must_use]
    pub const fn api_header_name(&self) -> &ApiHeaderName {
        &self.api_header_name
    }

    /// Returns the initial per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the base URL requests are resolved against,
    /// e.g. `https://api.nexusmods.com:443`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }

    /// The `User-Agent` used when none is configured.
    #[must_use]
    pub fn default_user_agent() -> String {
        format!("nexusmods-rust/{SDK_VERSION}")
    }
}

// Verify NexusConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<NexusConfig>();
};

/// Builder for constructing [`NexusConfig`] instances.
///
/// The only required field is `api_key`.
///
/// # Defaults
///
/// - `host`: `api.nexusmods.com`
/// - `port`: `443`
/// - `scheme`: [`Scheme::Https`]
/// - `user_agent`: `nexusmods-rust/<version>`
/// - `api_header_name`: `apikey`
/// - `timeout`: 30 seconds
#[derive(Debug, Default)]
pub struct NexusConfigBuilder {
    api_key: Option<ApiKey>,
    host: Option<HostName>,
    port: Option<u16>,
    scheme: Option<Scheme>,
    user_agent: Option<String>,
    api_header_name: Option<ApiHeaderName>,
    timeout: Option<Duration>,
}

impl NexusConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the API host.
    #[must_use]
    pub fn host(mut self, host: HostName) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the API port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the URL scheme.
    #[must_use]
    pub const fn scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = Some(scheme);
        self
    }

    /// Sets the `User-Agent` header value.
    ///
    /// Nexus Mods asks applications to identify themselves; use your
    /// application name and version.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the initial name of the header carrying the API key.
    #[must_use]
    pub fn api_header_name(mut self, name: ApiHeaderName) -> Self {
        self.api_header_name = Some(name);
        self
    }

    /// Sets the initial per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`NexusConfig`], validating it in the process.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingRequiredField`] if `api_key` is not set
    /// - [`ConfigError::InvalidPort`] if the port is `0`
    /// - [`ConfigError::InvalidUserAgent`] if the user agent is not a valid header value
    /// - [`ConfigError::InvalidTimeout`] if the timeout is under one second
    pub fn build(self) -> Result<NexusConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        let port = self.port.unwrap_or(DEFAULT_PORT);
        if port == 0 {
            return Err(ConfigError::InvalidPort { port });
        }

        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        validate_timeout(timeout)?;

        let user_agent = self
            .user_agent
            .unwrap_or_else(NexusConfig::default_user_agent);
        if HeaderValue::from_str(&user_agent).is_err() {
            return Err(ConfigError::InvalidUserAgent { user_agent });
        }

        Ok(NexusConfig {
            api_key,
            host: self.host.unwrap_or_default(),
            port,
            scheme: self.scheme.unwrap_or_default(),
            user_agent,
            api_header_name: self.api_header_name.unwrap_or_default(),
            timeout,
        })
    }
}

/// Rejects timeouts shorter than one second.
pub(crate) const fn validate_timeout(timeout: Duration) -> Result<(), ConfigError> {
    if timeout.as_secs() == 0 {
        return Err(ConfigError::InvalidTimeout);
    }
    Ok(())
}
