//! The transport seam: one GET in, one response (or failure) out.
//!
//! The retry loop is written against the [`Transport`] trait so it can be
//! driven by any HTTP stack. [`ReqwestTransport`] is the default
//! implementation used by [`NexusClient`](crate::NexusClient).

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::clients::errors::TransportError;
use crate::clients::http_response::RawResponse;
use crate::config::NexusConfig;
use crate::error::ConfigError;

/// A fully prepared GET: path, query and the final header list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportRequest {
    /// The resource path, e.g. `/v1/games/skyrim.json`.
    pub path: String,
    /// Query parameters in order; the transport URL-encodes them.
    pub query: Vec<(String, String)>,
    /// Headers to send, already merged with the mandatory headers.
    pub headers: Vec<(String, String)>,
    /// Timeout for this single call.
    pub timeout: Duration,
}

/// Performs a single GET against the API host.
///
/// Implementations report "no response at all" as a [`TransportError`];
/// any response that has a status, whatever it is, is `Ok`.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends one GET request.
    async fn get(&self, request: &TransportRequest) -> Result<RawResponse, TransportError>;
}

/// [`Transport`] backed by a shared `reqwest` client using rustls.
///
/// Connection pooling and TLS are reqwest's concern; this type only
/// resolves paths against the configured base URL.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Creates a transport for the host, port and scheme in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientBuild`] if the TLS backend cannot be
    /// initialised.
    pub fn new(config: &NexusConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .map_err(|e| ConfigError::HttpClientBuild {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url(),
        })
    }

    /// Returns the base URL paths are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, request: &TransportRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .client
            .get(self.url_for(&request.path))
            .timeout(request.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        let response = builder.send().await?;

        let status = response.status().as_u16();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse::new(status, headers, body))
    }
}
