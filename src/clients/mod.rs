//! HTTP client types for Nexus Mods API communication.
//!
//! This module provides the request/response layer: building authenticated
//! GETs, retrying them around connection failures and rate limits, and
//! decoding JSON bodies into documents or uniform errors.
//!
//! # Overview
//!
//! - [`NexusClient`]: The async client, with runtime-adjustable settings
//! - [`HttpRequest`]: A GET request (path, query, extra headers)
//! - [`RawResponse`]: Status, headers and body as received
//! - [`Outcome`]: What one logical GET produced after retries
//! - [`Transport`]: The seam used to send one GET; [`ReqwestTransport`] by default
//! - [`ApiError`] / [`ErrorCode`]: Failures returned as values
//!
//! # Retry Behavior
//!
//! Up to [`MAX_ATTEMPTS`] attempts are made per request:
//!
//! - **No response** (connection refused, timeout): waits `2^min(attempt, 6)` seconds
//! - **429 (Rate Limited)**: waits `Retry-After` seconds, or `2^attempt` if absent
//! - **`X-RateLimit-Remaining: 0`**: waits `X-RateLimit-Reset` seconds, or `2^attempt`
//! - **Anything else** (including other 4xx/5xx): returned immediately
//!
//! A registered backoff callback is told about every wait before it starts.

mod decode;
mod errors;
mod executor;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use errors::{ApiError, ErrorCode, TransportError, MAX_ERROR_BODY_BYTES};
pub use executor::{BackoffCallback, BackoffReason, Outcome, BASE_BACKOFF_SECS, MAX_ATTEMPTS};
pub use http_client::NexusClient;
pub use http_request::{HttpRequest, HttpRequestBuilder};
pub use http_response::{RawResponse, RATE_LIMIT_REMAINING, RATE_LIMIT_RESET, RETRY_AFTER};
pub use transport::{ReqwestTransport, Transport, TransportRequest};
