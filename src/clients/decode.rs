//! Turns an executor [`Outcome`] into a JSON document or an [`ApiError`].

use serde_json::Value;

use crate::clients::errors::{truncate_body, ApiError};
use crate::clients::executor::Outcome;

/// Decodes an outcome for `endpoint`.
///
/// - exhausted retries become [`ApiError::NoResponse`] (998)
/// - statuses outside `200..300` become [`ApiError::Status`] (997)
/// - bodies that are not JSON become [`ApiError::Parse`] (996)
pub(crate) fn decode_outcome(outcome: Outcome, endpoint: &str) -> Result<Value, ApiError> {
    let response = match outcome {
        Outcome::Success(response) => response,
        Outcome::ExhaustedRetries { attempts } => {
            return Err(ApiError::NoResponse {
                endpoint: endpoint.to_string(),
                attempts,
            });
        }
    };

    if !response.is_ok() {
        return Err(ApiError::Status {
            endpoint: endpoint.to_string(),
            status: response.status,
            body: truncate_body(&response.body),
        });
    }

    serde_json::from_slice(&response.body).map_err(|error| ApiError::Parse {
        endpoint: endpoint.to_string(),
        offset: error_offset(&response.body, &error),
        description: error.to_string(),
    })
}

/// Byte offset of the token where parsing failed.
///
/// serde_json reports a line and column just past the offending byte; this
/// converts that to a byte offset and backs up to the start of the
/// identifier or number being read, so `not json` reports offset 0.
fn error_offset(body: &[u8], error: &serde_json::Error) -> usize {
    let line_start: usize = body
        .split_inclusive(|byte| *byte == b'\n')
        .take(error.line().saturating_sub(1))
        .map(<[u8]>::len)
        .sum();

    let mut offset = (line_start + error.column())
        .saturating_sub(1)
        .min(body.len());
    while offset > 0 && body[offset - 1].is_ascii_alphanumeric() {
        offset -= 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::errors::{ErrorCode, MAX_ERROR_BODY_BYTES};
    use crate::clients::http_response::RawResponse;
    use serde_json::json;

    const ENDPOINT: &str = "/v1/games/skyrim.json";

    fn success(status: u16, body: &[u8]) -> Outcome {
        Outcome::Success(RawResponse::new(
            status,
            Vec::<(String, String)>::new(),
            body.to_vec(),
        ))
    }

    #[test]
    fn test_valid_json_is_returned() {
        let result = decode_outcome(success(200, br#"{"id":110,"name":"Skyrim"}"#), ENDPOINT);
        assert_eq!(result.unwrap(), json!({"id": 110, "name": "Skyrim"}));
    }

    #[test]
    fn test_exhausted_retries_is_998() {
        let error = decode_outcome(Outcome::ExhaustedRetries { attempts: 6 }, ENDPOINT).unwrap_err();

        assert_eq!(error.code(), ErrorCode::TransportExhausted);
        assert_eq!(error.endpoint(), ENDPOINT);
        assert!(error.message().contains("no response"));
    }

    #[test]
    fn test_404_with_json_body_is_997() {
        let error = decode_outcome(success(404, br#"{"message":"Not Found"}"#), ENDPOINT).unwrap_err();

        assert_eq!(error.code(), ErrorCode::HttpFailure);
        assert!(error.message().contains("404"));
        assert!(error.message().contains(r#"{"message":"Not Found"}"#));
        assert!(matches!(error, ApiError::Status { status: 404, .. }));
    }

    #[test]
    fn test_long_error_body_is_truncated() {
        let body = "x".repeat(1000);
        let error = decode_outcome(success(500, body.as_bytes()), ENDPOINT).unwrap_err();

        match error {
            ApiError::Status { body, .. } => assert_eq!(body.len(), MAX_ERROR_BODY_BYTES),
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[test]
    fn test_redirect_status_is_997() {
        let error = decode_outcome(success(302, b""), ENDPOINT).unwrap_err();
        assert_eq!(error.code(), ErrorCode::HttpFailure);
        assert_eq!(error.message(), "HTTP request failed with status 302");
    }

    #[test]
    fn test_not_json_is_996_at_offset_zero() {
        let error = decode_outcome(success(200, b"not json"), ENDPOINT).unwrap_err();

        assert_eq!(error.code(), ErrorCode::DecodeFailure);
        match &error {
            ApiError::Parse {
                description,
                offset,
                ..
            } => {
                assert!(!description.is_empty());
                assert_eq!(*offset, 0);
            }
            other => panic!("expected Parse, got {other:?}"),
        }
        assert!(error.message().contains("(offset 0)"));
    }

    #[test]
    fn test_parse_offset_points_into_later_lines() {
        let body = b"{\n  \"a\": 1,\n  \"b\": nope\n}";
        let error = decode_outcome(success(200, body), ENDPOINT).unwrap_err();

        match error {
            ApiError::Parse { offset, .. } => {
                let expected = body.windows(4).position(|w| w == b"nope").unwrap();
                assert_eq!(offset, expected);
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_body_on_200_is_996() {
        let error = decode_outcome(success(200, b""), ENDPOINT).unwrap_err();
        assert_eq!(error.code(), ErrorCode::DecodeFailure);
        assert!(matches!(error, ApiError::Parse { offset: 0, .. }));
    }

    #[test]
    fn test_decoding_is_deterministic() {
        let body = br#"[{"mod_id":1},{"mod_id":2}]"#;
        let first = decode_outcome(success(200, body), ENDPOINT).unwrap();
        let second = decode_outcome(success(200, body), ENDPOINT).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }
}
