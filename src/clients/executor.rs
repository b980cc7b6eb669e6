//! Rate-limit aware GET execution.
//!
//! [`execute`] performs one logical GET, retrying transparently when:
//!
//! - the transport produced no response (connection failure or timeout),
//! - the server answered `429 Too Many Requests`,
//! - the server reported `X-RateLimit-Remaining: 0`, whatever the status.
//!
//! Conditions are checked in that order and the first match decides the
//! wait for the attempt. Any other response, including 4xx and 5xx, is
//! terminal and returned unretried. A request the transport could not
//! even build ([`TransportError::InvalidRequest`]) ends the call at once.
//!
//! # Backoff
//!
//! | Condition          | Wait (seconds)                                   |
//! |--------------------|--------------------------------------------------|
//! | connection failure | `BASE_BACKOFF_SECS * 2^min(attempt, 6)`          |
//! | 429                | `Retry-After`, else `BASE_BACKOFF_SECS * 2^attempt` |
//! | quota exhausted    | `X-RateLimit-Reset`, else `BASE_BACKOFF_SECS * 2^attempt` |
//!
//! Attempts are numbered from 1. At most [`MAX_ATTEMPTS`] are made; every
//! attempt that ends in a retry condition is followed by its wait, the last
//! one included.

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue};

use crate::clients::errors::TransportError;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::RawResponse;
use crate::clients::transport::{Transport, TransportRequest};

/// Maximum number of attempts per logical request.
pub const MAX_ATTEMPTS: u32 = 6;

/// Base unit of the exponential backoff, in seconds.
pub const BASE_BACKOFF_SECS: u64 = 1;

/// Connection-failure backoff stops growing after this exponent.
const MAX_CONNECTION_BACKOFF_EXPONENT: u32 = 6;

/// Observer invoked with the number of seconds about to be waited.
pub type BackoffCallback = Arc<dyn Fn(u64) + Send + Sync>;

/// Result of [`execute`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A terminal response was obtained. Its status may still be an error.
    Success(RawResponse),
    /// No usable response was obtained.
    ExhaustedRetries {
        /// Number of attempts made.
        attempts: u32,
    },
}

/// Why the executor is waiting before the next attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackoffReason {
    /// The transport returned no response.
    ConnectionFailure,
    /// The server answered 429.
    RateLimited,
    /// `X-RateLimit-Remaining` was `0`.
    QuotaExhausted,
}

impl fmt::Display for BackoffReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectionFailure => write!(f, "connection failure"),
            Self::RateLimited => write!(f, "rate limited (429)"),
            Self::QuotaExhausted => write!(f, "rate-limit quota exhausted"),
        }
    }
}

/// What to do after one attempt.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Verdict {
    Done(RawResponse),
    Abort,
    Backoff { seconds: u64, reason: BackoffReason },
}

/// Settings captured once at the start of a request.
///
/// Later reconfiguration of the client never reaches a request that has
/// already taken its snapshot.
#[derive(Clone)]
pub(crate) struct RequestSettings {
    pub api_key: String,
    pub api_header_name: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub backoff_callback: Option<BackoffCallback>,
}

impl fmt::Debug for RequestSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSettings")
            .field("api_key", &"*****")
            .field("api_header_name", &self.api_header_name)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("backoff_callback", &self.backoff_callback.is_some())
            .finish()
    }
}

/// `BASE_BACKOFF_SECS * 2^exponent`, saturating.
pub(crate) fn exponential_backoff(exponent: u32) -> u64 {
    1u64.checked_shl(exponent)
        .map_or(u64::MAX, |factor| BASE_BACKOFF_SECS.saturating_mul(factor))
}

/// Decides whether an attempt is terminal and, if not, how long to wait.
pub(crate) fn classify(result: Result<RawResponse, TransportError>, attempt: u32) -> Verdict {
    if let Err(TransportError::InvalidRequest(_)) = result {
        return Verdict::Abort;
    }
    let Ok(response) = result else {
        return Verdict::Backoff {
            seconds: exponential_backoff(attempt.min(MAX_CONNECTION_BACKOFF_EXPONENT)),
            reason: BackoffReason::ConnectionFailure,
        };
    };

    if response.is_rate_limited() {
        return Verdict::Backoff {
            seconds: response
                .retry_after_secs()
                .unwrap_or_else(|| exponential_backoff(attempt)),
            reason: BackoffReason::RateLimited,
        };
    }

    if response.is_quota_exhausted() {
        return Verdict::Backoff {
            seconds: response
                .rate_limit_reset_secs()
                .unwrap_or_else(|| exponential_backoff(attempt)),
            reason: BackoffReason::QuotaExhausted,
        };
    }

    Verdict::Done(response)
}

/// Merges caller headers with the mandatory ones.
///
/// Mandatory headers always win: a caller header whose name matches the
/// API key header, `User-Agent` or `Accept` (case-insensitively) is
/// dropped, and the mandatory headers are appended after the rest. Caller
/// headers that are not valid HTTP (such as values containing line
/// breaks) are dropped with a warning rather than sent.
pub(crate) fn merge_headers(
    extra: &[(String, String)],
    settings: &RequestSettings,
) -> Vec<(String, String)> {
    let mandatory = [
        (settings.api_header_name.as_str(), settings.api_key.as_str()),
        ("User-Agent", settings.user_agent.as_str()),
        ("Accept", "application/json"),
    ];

    let mut headers: Vec<(String, String)> = extra
        .iter()
        .filter(|(name, _)| {
            !mandatory
                .iter()
                .any(|(required, _)| required.eq_ignore_ascii_case(name))
        })
        .filter(|(name, value)| {
            let valid = HeaderName::from_bytes(name.as_bytes()).is_ok()
                && HeaderValue::from_str(value).is_ok();
            if !valid {
                tracing::warn!(
                    "Dropping caller header '{}': not a valid HTTP header",
                    name.escape_debug()
                );
            }
            valid
        })
        .cloned()
        .collect();

    headers.extend(
        mandatory
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string())),
    );
    headers
}

/// Invokes the backoff callback, if any. A panicking callback is logged
/// and otherwise ignored.
fn notify_backoff(callback: Option<&BackoffCallback>, seconds: u64) {
    let Some(callback) = callback else {
        return;
    };
    if catch_unwind(AssertUnwindSafe(|| callback(seconds))).is_err() {
        tracing::warn!("Backoff callback panicked while notifying a {seconds}s wait; ignoring");
    }
}

/// Performs `request` against `transport`, absorbing transport failures and
/// rate-limit signals.
///
/// Waits happen on the calling task via [`tokio::time::sleep`]. Dropping
/// the returned future abandons the remaining attempts.
pub(crate) async fn execute(
    transport: &dyn Transport,
    settings: &RequestSettings,
    request: &HttpRequest,
) -> Outcome {
    let prepared = TransportRequest {
        path: request.path.clone(),
        query: request.query.clone(),
        headers: merge_headers(&request.extra_headers, settings),
        timeout: settings.timeout,
    };

    for attempt in 1..=MAX_ATTEMPTS {
        tracing::debug!(path = %request.path, attempt, "Sending GET request");

        let result = transport.get(&prepared).await;
        if let Err(error) = &result {
            tracing::debug!(path = %request.path, attempt, %error, "Transport failure");
        }

        let (seconds, reason) = match classify(result, attempt) {
            Verdict::Done(response) => {
                tracing::debug!(path = %request.path, attempt, status = response.status, "Received response");
                return Outcome::Success(response);
            }
            Verdict::Abort => {
                tracing::error!("Request to {} could not be built; not retrying", request.path);
                return Outcome::ExhaustedRetries { attempts: attempt };
            }
            Verdict::Backoff { seconds, reason } => (seconds, reason),
        };

        tracing::warn!(
            "Backing off {}s on {} after attempt {} of {}: {}",
            seconds,
            request.path,
            attempt,
            MAX_ATTEMPTS,
            reason
        );
        notify_backoff(settings.backoff_callback.as_ref(), seconds);
        tokio::time::sleep(Duration::from_secs(seconds)).await;
    }

    tracing::error!(
        "Giving up on {} after {} attempts without a usable response",
        request.path,
        MAX_ATTEMPTS
    );
    Outcome::ExhaustedRetries {
        attempts: MAX_ATTEMPTS,
    }
}
