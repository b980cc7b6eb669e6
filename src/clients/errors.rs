//! Error types for API calls.
//!
//! Two layers of errors exist:
//!
//! - [`TransportError`]: a single GET produced no response at all. These are
//!   absorbed by the retry loop and never reach callers directly.
//! - [`ApiError`]: the outcome of a whole logical call that did not yield a
//!   JSON document. Every `ApiError` carries exactly one [`ErrorCode`].
//!
//! # Example
//!
//! ```rust,ignore
//! use nexusmods_api::{ApiError, ErrorCode};
//!
//! match client.get_mod("skyrimspecialedition", "266").await {
//!     Ok(document) => println!("{document}"),
//!     Err(e) if e.code() == ErrorCode::HttpFailure => {
//!         println!("server said no: {}", e.message());
//!     }
//!     Err(e) => println!("{} failed with {}: {}", e.endpoint(), e.code(), e),
//! }
//! ```

use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Maximum number of body bytes included in an [`ApiError::Status`] message.
pub const MAX_ERROR_BODY_BYTES: usize = 300;

/// Error returned by a [`Transport`](crate::clients::Transport) when no
/// response was received.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The connection could not be established.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// The request did not complete within the configured timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The response body could not be read.
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// The request could not be built, so nothing was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Any other failure before a status line was received.
    #[error("Request failed: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        let message = error.to_string();
        if error.is_builder() {
            Self::InvalidRequest(message)
        } else if error.is_timeout() {
            Self::Timeout(message)
        } else if error.is_connect() {
            Self::Connect(message)
        } else if error.is_body() || error.is_decode() {
            Self::Body(message)
        } else {
            Self::Other(message)
        }
    }
}

/// The fixed numeric codes carried by [`ApiError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    /// No usable response was obtained within the retry budget.
    TransportExhausted = 998,
    /// A response arrived with a status outside `200..300`.
    HttpFailure = 997,
    /// The response body was not valid JSON.
    DecodeFailure = 996,
}

impl ErrorCode {
    /// Returns the numeric code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u16(self.as_u16())
    }
}

/// A failed API call, returned as a value.
///
/// Callers branch on [`code`](Self::code) before treating a result as a
/// domain document. The `Display` output is the human-readable message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Every attempt failed to produce a usable response.
    #[error("HTTP request failed: no response after {attempts} attempts")]
    NoResponse {
        /// Path of the endpoint that was called.
        endpoint: String,
        /// Number of attempts made.
        attempts: u32,
    },

    /// The server answered with a non-2xx status.
    #[error("HTTP request failed with status {status}{}", body_suffix(.body))]
    Status {
        /// Path of the endpoint that was called.
        endpoint: String,
        /// The HTTP status code.
        status: u16,
        /// At most [`MAX_ERROR_BODY_BYTES`] of the response body.
        body: String,
    },

    /// The server answered 2xx but the body was not JSON.
    #[error("JSON parse failed: {description} (offset {offset})")]
    Parse {
        /// Path of the endpoint that was called.
        endpoint: String,
        /// The parser's description of the problem.
        description: String,
        /// Byte offset of the token where parsing failed.
        offset: usize,
    },
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(" | Body: {body}")
    }
}

impl ApiError {
    /// Returns the fixed code for this failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NoResponse { .. } => ErrorCode::TransportExhausted,
            Self::Status { .. } => ErrorCode::HttpFailure,
            Self::Parse { .. } => ErrorCode::DecodeFailure,
        }
    }

    /// Returns the endpoint path that produced this failure.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        match self {
            Self::NoResponse { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::Parse { endpoint, .. } => endpoint,
        }
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Renders the failure as a flat `{"code", "message", "endpoint"}` record.
    ///
    /// ```rust
    /// use nexusmods_api::ApiError;
    ///
    /// let error = ApiError::NoResponse {
    ///     endpoint: "/v1/games/skyrim.json".to_string(),
    ///     attempts: 6,
    /// };
    /// let record = error.to_json();
    /// assert_eq!(record["code"], 998);
    /// assert_eq!(record["endpoint"], "/v1/games/skyrim.json");
    /// ```
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.code(),
            "message": self.message(),
            "endpoint": self.endpoint(),
        })
    }
}

/// Truncates a body to at most [`MAX_ERROR_BODY_BYTES`] for diagnostics.
///
/// Invalid UTF-8 is replaced lossily and the result is cut back to a
/// character boundary, so it never exceeds the limit.
pub(crate) fn truncate_body(body: &[u8]) -> String {
    let end = body.len().min(MAX_ERROR_BODY_BYTES);
    let text = String::from_utf8_lossy(&body[..end]);
    let mut cut = text.len().min(MAX_ERROR_BODY_BYTES);
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text[..cut].to_string()
}
