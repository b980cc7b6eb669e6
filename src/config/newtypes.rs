//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use reqwest::header::{HeaderName, HeaderValue};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated Nexus Mods personal API key.
///
/// This newtype ensures the key is non-empty and usable as a header value,
/// and masks its value in debug output to prevent accidental exposure in logs.
///
/// # Example
///
/// ```rust
/// use nexusmods_api::ApiKey;
///
/// let key = ApiKey::new("my-api-key").unwrap();
/// assert_eq!(key.as_ref(), "my-api-key");
/// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty or only whitespace,
    /// and [`ConfigError::InvalidApiKey`] if it is not a valid header value.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        if HeaderValue::from_str(&key).is_err() {
            return Err(ConfigError::InvalidApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}

/// A validated API host name, such as `api.nexusmods.com`.
///
/// Host names are trimmed and lower-cased. Schemes, ports and paths are
/// rejected; the port is configured separately.
///
/// # Example
///
/// ```rust
/// use nexusmods_api::HostName;
///
/// let host = HostName::new("API.NexusMods.com").unwrap();
/// assert_eq!(host.as_ref(), "api.nexusmods.com");
///
/// assert!(HostName::new("https://api.nexusmods.com").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostName(String);

impl HostName {
    /// The public Nexus Mods API host.
    pub const DEFAULT: &'static str = "api.nexusmods.com";

    /// Creates a new validated host name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHost`] if the host is empty, has a
    /// leading or trailing dot or hyphen, or contains anything other than
    /// ASCII letters, digits, `-` and `.`.
    pub fn new(host: impl Into<String>) -> Result<Self, ConfigError> {
        let host = host.into();
        let normalized = host.trim().to_ascii_lowercase();

        let valid = !normalized.is_empty()
            && !normalized.starts_with(['.', '-'])
            && !normalized.ends_with(['.', '-'])
            && normalized
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');

        if !valid {
            return Err(ConfigError::InvalidHost { host });
        }
        Ok(Self(normalized))
    }
}

impl Default for HostName {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl AsRef<str> for HostName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HostName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for HostName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for HostName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// The name of the header that carries the API key.
///
/// Nexus Mods expects `apikey`; the name is configurable for proxies that
/// rename it. The name must be a valid HTTP header token.
///
/// # Example
///
/// ```rust
/// use nexusmods_api::ApiHeaderName;
///
/// assert_eq!(ApiHeaderName::default().as_ref(), "apikey");
/// assert!(ApiHeaderName::new("X-Api-Key").is_ok());
/// assert!(ApiHeaderName::new("api key").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiHeaderName(String);

impl ApiHeaderName {
    /// Header name used by the Nexus Mods API.
    pub const DEFAULT: &'static str = "apikey";

    /// Creates a new validated header name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHeaderName`] if the name is not a valid
    /// HTTP header name.
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        if HeaderName::from_bytes(name.as_bytes()).is_err() {
            return Err(ConfigError::InvalidHeaderName { name });
        }
        Ok(Self(name))
    }
}

impl Default for ApiHeaderName {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl AsRef<str> for ApiHeaderName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
