//! Raw HTTP responses and the rate-limit headers read from them.

use std::collections::HashMap;

/// `Retry-After` header, sent with 429 responses.
pub const RETRY_AFTER: &str = "retry-after";
/// `X-RateLimit-Remaining` header: requests left in the current window.
pub const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
/// `X-RateLimit-Reset` header: seconds until the window resets.
pub const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

/// An HTTP response as returned by a [`Transport`](crate::clients::Transport).
///
/// Header names are stored lower-cased and may carry several values; the
/// first value is the effective one for every accessor here.
///
/// # Example
///
/// ```rust
/// use nexusmods_api::RawResponse;
///
/// let response = RawResponse::new(
///     429,
///     [("Retry-After", "5")],
///     b"{}".to_vec(),
/// );
///
/// assert!(response.is_rate_limited());
/// assert_eq!(response.header("RETRY-AFTER"), Some("5"));
/// assert_eq!(response.retry_after_secs(), Some(5));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawResponse {
    /// The HTTP status code.
    pub status: u16,
    /// Response headers keyed by lower-cased name.
    pub headers: HashMap<String, Vec<String>>,
    /// The undecoded response body.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Creates a response, lower-casing header names.
    #[must_use]
    pub fn new<I, K, V>(status: u16, headers: I, body: Vec<u8>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut map: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            map.entry(name.as_ref().to_ascii_lowercase())
                .or_default()
                .push(value.into());
        }
        Self {
            status,
            headers: map,
            body,
        }
    }

    /// Returns the first value of a header, matching the name case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status >= 200 && self.status <= 299
    }

    /// Returns `true` for `429 Too Many Requests`.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// Returns `true` when `X-RateLimit-Remaining` is exactly `"0"`.
    ///
    /// This is independent of the status: a 200 can still report an
    /// exhausted quota.
    #[must_use]
    pub fn is_quota_exhausted(&self) -> bool {
        self.header(RATE_LIMIT_REMAINING)
            .is_some_and(|remaining| remaining.trim() == "0")
    }

    /// Returns `Retry-After` as whole seconds, if present and an integer.
    #[must_use]
    pub fn retry_after_secs(&self) -> Option<u64> {
        self.header(RETRY_AFTER).and_then(parse_seconds)
    }

    /// Returns `X-RateLimit-Reset` as whole seconds, if present and an integer.
    #[must_use]
    pub fn rate_limit_reset_secs(&self) -> Option<u64> {
        self.header(RATE_LIMIT_RESET).and_then(parse_seconds)
    }
}

/// Parses an integer number of seconds, clamping negatives to zero. Dates
/// and fractions are rejected.
fn parse_seconds(value: &str) -> Option<u64> {
    let seconds = value.trim().parse::<i64>().ok()?;
    Some(u64::try_from(seconds).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_headers(status: u16, headers: &[(&str, &str)]) -> RawResponse {
        RawResponse::new(status, headers.iter().copied(), Vec::new())
    }

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        assert!(with_headers(200, &[]).is_ok());
        assert!(with_headers(204, &[]).is_ok());
        assert!(with_headers(299, &[]).is_ok());
    }

    #[test]
    fn test_is_ok_returns_false_outside_2xx() {
        for status in [199, 300, 404, 429, 500] {
            assert!(!with_headers(status, &[]).is_ok(), "status {status}");
        }
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = with_headers(200, &[("X-RateLimit-Remaining", "10")]);
        assert_eq!(response.header("x-ratelimit-remaining"), Some("10"));
        assert_eq!(response.header("X-RATELIMIT-REMAINING"), Some("10"));
        assert!(response.headers.contains_key("x-ratelimit-remaining"));
    }

    #[test]
    fn test_header_first_value_wins() {
        let response = with_headers(200, &[("Retry-After", "3"), ("retry-after", "9")]);
        assert_eq!(response.retry_after_secs(), Some(3));
        assert_eq!(response.headers["retry-after"].len(), 2);
    }

    #[test]
    fn test_retry_after_parsing() {
        assert_eq!(with_headers(429, &[("Retry-After", "5")]).retry_after_secs(), Some(5));
        assert_eq!(with_headers(429, &[("Retry-After", " 7 ")]).retry_after_secs(), Some(7));
        assert_eq!(with_headers(429, &[("Retry-After", "soon")]).retry_after_secs(), None);
        assert_eq!(with_headers(429, &[("Retry-After", "-1")]).retry_after_secs(), Some(0));
        assert_eq!(with_headers(429, &[("Retry-After", "1.5")]).retry_after_secs(), None);
        assert_eq!(
            with_headers(429, &[("Retry-After", "Wed, 21 Oct 2015 07:28:00 GMT")]).retry_after_secs(),
            None
        );
        assert_eq!(with_headers(429, &[]).retry_after_secs(), None);
    }

    #[test]
    fn test_quota_exhausted_only_for_exact_zero() {
        assert!(with_headers(200, &[("X-RateLimit-Remaining", "0")]).is_quota_exhausted());
        assert!(!with_headers(200, &[("X-RateLimit-Remaining", "1")]).is_quota_exhausted());
        assert!(!with_headers(200, &[("X-RateLimit-Remaining", "00")]).is_quota_exhausted());
        assert!(!with_headers(200, &[]).is_quota_exhausted());
    }

    #[test]
    fn test_rate_limit_reset_parsing() {
        let response = with_headers(
            200,
            &[("X-RateLimit-Remaining", "0"), ("X-RateLimit-Reset", "30")],
        );
        assert_eq!(response.rate_limit_reset_secs(), Some(30));
        assert_eq!(
            with_headers(200, &[("X-RateLimit-Reset", "later")]).rate_limit_reset_secs(),
            None
        );
        assert_eq!(
            with_headers(200, &[("X-RateLimit-Reset", "-30")]).rate_limit_reset_secs(),
            Some(0)
        );
    }

    #[test]
    fn test_is_rate_limited() {
        assert!(with_headers(429, &[]).is_rate_limited());
        assert!(!with_headers(503, &[]).is_rate_limited());
    }
}
