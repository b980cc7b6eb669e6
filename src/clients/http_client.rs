//! HTTP client for Nexus Mods API communication.
//!
//! This module provides the [`NexusClient`] type for making authenticated
//! GET requests with rate-limit aware retries.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use serde_json::Value;

use crate::clients::decode::decode_outcome;
use crate::clients::errors::ApiError;
use crate::clients::executor::{execute, BackoffCallback, Outcome, RequestSettings};
use crate::clients::http_request::HttpRequest;
use crate::clients::transport::{ReqwestTransport, Transport};
use crate::config::{validate_timeout, ApiHeaderName, ApiKey, NexusConfig};
use crate::error::ConfigError;

/// Settings that may change while the client is in use.
struct MutableSettings {
    api_header_name: ApiHeaderName,
    timeout: Duration,
    backoff_callback: Option<BackoffCallback>,
}

/// Client for the Nexus Mods REST API.
///
/// The client handles:
/// - Mandatory headers (API key, `User-Agent`, `Accept: application/json`)
/// - Retries for connection failures, 429 responses and exhausted quotas
/// - JSON decoding with uniform [`ApiError`] failures
///
/// # Thread Safety
///
/// `NexusClient` is `Send + Sync`. The API header name, timeout and backoff
/// callback can be changed from any thread; each request takes a snapshot
/// of them when it starts, so changes only affect later requests.
///
/// # Example
///
/// ```rust,ignore
/// use nexusmods_api::{NexusClient, NexusConfig};
///
/// let client = NexusClient::new(NexusConfig::with_api_key("my-key")?)?;
/// client.set_backoff_callback(|secs| eprintln!("[backoff] sleeping {secs}s"));
///
/// match client.get_latest_added("cyberpunk2077").await {
///     Ok(mods) => println!("{mods:#}"),
///     Err(e) => eprintln!("{} ({}): {}", e.code(), e.endpoint(), e),
/// }
/// ```
pub struct NexusClient {
    transport: Arc<dyn Transport>,
    api_key: ApiKey,
    user_agent: String,
    settings: RwLock<MutableSettings>,
}

// Verify NexusClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<NexusClient>();
};

impl fmt::Debug for NexusClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let settings = self.read_settings();
        f.debug_struct("NexusClient")
            .field("transport", &self.transport)
            .field("api_key", &self.api_key)
            .field("user_agent", &self.user_agent)
            .field("api_header_name", &settings.api_header_name)
            .field("timeout", &settings.timeout)
            .field("backoff_callback", &settings.backoff_callback.is_some())
            .finish()
    }
}

impl NexusClient {
    /// Creates a client that talks to the configured host over reqwest.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientBuild`] if the HTTP client cannot be
    /// created.
    pub fn new(config: NexusConfig) -> Result<Self, ConfigError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client over a custom [`Transport`].
    ///
    /// The host, port and scheme in `config` are ignored; the transport
    /// decides where requests go.
    #[must_use]
    pub fn with_transport(config: NexusConfig, transport: Arc<dyn Transport>) -> Self {
        let settings = MutableSettings {
            api_header_name: config.api_header_name().clone(),
            timeout: config.timeout(),
            backoff_callback: None,
        };

        Self {
            transport,
            api_key: config.api_key().clone(),
            user_agent: config.user_agent().to_string(),
            settings: RwLock::new(settings),
        }
    }

    /// Returns the `User-Agent` sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns the current API key header name.
    #[must_use]
    pub fn api_header_name(&self) -> String {
        self.read_settings().api_header_name.as_ref().to_string()
    }

    /// Returns the current per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.read_settings().timeout
    }

    /// Changes the name of the header carrying the API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHeaderName`] if `name` is not a valid
    /// header name; the previous name stays in effect.
    pub fn set_api_header_name(&self, name: impl Into<String>) -> Result<(), ConfigError> {
        let name = ApiHeaderName::new(name)?;
        self.write_settings().api_header_name = name;
        Ok(())
    }

    /// Changes the timeout applied to each individual GET.
    ///
    /// The timeout bounds one transport call, not the whole retry sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeout`] for timeouts under one second.
    pub fn set_timeout(&self, timeout: Duration) -> Result<(), ConfigError> {
        validate_timeout(timeout)?;
        self.write_settings().timeout = timeout;
        Ok(())
    }

    /// Changes the per-request timeout, in whole seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeout`] if `seconds` is zero.
    pub fn set_timeout_seconds(&self, seconds: u64) -> Result<(), ConfigError> {
        self.set_timeout(Duration::from_secs(seconds))
    }

    /// Registers an observer called with the number of seconds about to be
    /// waited, once per backoff, before sleeping.
    ///
    /// Replaces any previous callback. A panicking callback is logged and
    /// does not interrupt the request.
    pub fn set_backoff_callback<F>(&self, callback: F)
    where
        F: Fn(u64) + Send + Sync + 'static,
    {
        self.write_settings().backoff_callback = Some(Arc::new(callback));
    }

    /// Removes the backoff callback.
    pub fn clear_backoff_callback(&self) {
        self.write_settings().backoff_callback = None;
    }

    /// Performs a GET and returns the raw outcome, without JSON decoding.
    ///
    /// Statuses other than 429 are returned as-is in
    /// [`Outcome::Success`], including 4xx and 5xx.
    pub async fn get(&self, request: &HttpRequest) -> Outcome {
        let settings = self.snapshot();
        execute(self.transport.as_ref(), &settings, request).await
    }

    /// Performs a GET and decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] carrying one of the three fixed codes:
    /// 998 when no response was obtained, 997 for a non-2xx status and
    /// 996 when the body is not valid JSON.
    pub async fn get_json(&self, request: &HttpRequest) -> Result<Value, ApiError> {
        let outcome = self.get(request).await;
        decode_outcome(outcome, &request.path)
    }

    fn snapshot(&self) -> RequestSettings {
        let settings = self.read_settings();
        RequestSettings {
            api_key: self.api_key.as_ref().to_string(),
            api_header_name: settings.api_header_name.as_ref().to_string(),
            user_agent: self.user_agent.clone(),
            timeout: settings.timeout,
            backoff_callback: settings.backoff_callback.clone(),
        }
    }

    fn read_settings(&self) -> std::sync::RwLockReadGuard<'_, MutableSettings> {
        self.settings.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_settings(&self) -> std::sync::RwLockWriteGuard<'_, MutableSettings> {
        self.settings.write().unwrap_or_else(PoisonError::into_inner)
    }
}
