/*
[INPUT]:  HTTP status codes and raw response bodies
[OUTPUT]: Success bodies or classified TenantError values
[POS]:    HTTP layer - response outcome classification
[UPDATE]: When the server error body format or recognised status set changes
*/

use reqwest::StatusCode;
use serde_json::Value;

use crate::http::TenantError;

/// Fallback key for unrecognised failure statuses
pub const GENERIC_ERROR_KEY: &str = "wom.errorResponse";

/// Successful outcome of a remote call
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteResponse {
    /// 2xx with a decoded body
    Found(RemoteBody),
    /// 404, the resource is absent
    NotFound,
}

/// Body of a successful response
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteBody {
    Json(Value),
    Text(String),
    Empty,
}

impl RemoteResponse {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteResponse::NotFound)
    }

    /// Body as JSON, `None` for 404 or empty bodies
    pub fn into_json(self) -> Option<Value> {
        match self {
            RemoteResponse::Found(RemoteBody::Json(value)) => Some(value),
            RemoteResponse::Found(RemoteBody::Text(text)) => Some(Value::String(text)),
            _ => None,
        }
    }
}

impl RemoteBody {
    pub(crate) fn from_text(text: String) -> Self {
        if text.trim().is_empty() {
            return RemoteBody::Empty;
        }
        match serde_json::from_str(&text) {
            Ok(value) => RemoteBody::Json(value),
            Err(_) => RemoteBody::Text(text),
        }
    }
}

/// Whether the body of a failed response carries a message key
pub fn is_recognized_failure(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED
    )
}

/// Extract the message key from a failed response body.
///
/// A JSON object yields its `message` field unchanged. Any other body is
/// taken as text and only the part before the first colon is kept.
pub fn error_key(body: &str) -> String {
    let key = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => map
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => body.split(':').next().unwrap_or_default().to_string(),
    };

    if key.is_empty() {
        GENERIC_ERROR_KEY.to_string()
    } else {
        key
    }
}

/// Build the error for a non-success, non-404 status.
///
/// `body` is only consulted for recognised statuses. The status itself is
/// not kept in the generic fallback.
pub fn classify_failure(status: StatusCode, body: Option<&str>) -> TenantError {
    if is_recognized_failure(status) {
        TenantError::remote(error_key(body.unwrap_or_default()))
    } else {
        TenantError::GenericRemote
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#"{"message":"tenant.notFound"}"#, "tenant.notFound")]
    #[case("tenant.notFound: detail", "tenant.notFound")]
    #[case(r#"{"message":"wom.unavailable: timeout"}"#, "wom.unavailable: timeout")]
    #[case(r#"{"status":503,"message":"wom.unauthorizedUser:0x12"}"#, "wom.unauthorizedUser:0x12")]
    #[case(r#"{"messageKey":"wom.unauthorizedUser"}"#, GENERIC_ERROR_KEY)]
    #[case(r#"{"message":42}"#, GENERIC_ERROR_KEY)]
    #[case("  wom.emptyDeedId : detail", "  wom.emptyDeedId ")]
    #[case("wom.invalidSignedMessage", "wom.invalidSignedMessage")]
    #[case("", GENERIC_ERROR_KEY)]
    #[case(r#"{"error":"Bad Request"}"#, GENERIC_ERROR_KEY)]
    #[case("[1,2]", "[1,2]")]
    fn test_error_key(#[case] body: &str, #[case] expected: &str) {
        assert_eq!(error_key(body), expected);
    }

    #[rstest]
    #[case(StatusCode::BAD_REQUEST)]
    #[case(StatusCode::UNAUTHORIZED)]
    #[case(StatusCode::SERVICE_UNAVAILABLE)]
    fn test_classify_recognized(#[case] status: StatusCode) {
        match classify_failure(status, Some("wom.emptyDeedId: missing")) {
            TenantError::Remote { key } => assert_eq!(key, "wom.emptyDeedId"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_classify_keeps_json_message_whole() {
        match classify_failure(
            StatusCode::BAD_REQUEST,
            Some(r#"{"message":"wom.unavailable: timeout"}"#),
        ) {
            TenantError::Remote { key } => assert_eq!(key, "wom.unavailable: timeout"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[rstest]
    #[case(StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(StatusCode::FORBIDDEN)]
    #[case(StatusCode::CONFLICT)]
    fn test_classify_unrecognized(#[case] status: StatusCode) {
        let err = classify_failure(status, Some(r#"{"message":"tenant.notFound"}"#));
        assert!(matches!(err, TenantError::GenericRemote));
    }

    #[test]
    fn test_remote_body_from_text() {
        assert_eq!(RemoteBody::from_text(String::new()), RemoteBody::Empty);
        assert_eq!(RemoteBody::from_text("true".to_string()), RemoteBody::Json(Value::Bool(true)));
        assert_eq!(
            RemoteBody::from_text("abc-token".to_string()),
            RemoteBody::Text("abc-token".to_string())
        );
    }
}
