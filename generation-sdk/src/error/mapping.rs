//! Error mapping for provider APIs
//!
//! Turns a non-success HTTP response into a normalized `ServiceError`,
//! recording the provider's error code and type on the context.

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use super::{ErrorContext, ServiceError};

/// Provider error code that arrives as 429 but will not clear by waiting
const INSUFFICIENT_QUOTA: &str = "insufficient_quota";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    /// `{"error": {"message", "type", "code"}}`
    Detailed { error: ErrorDetail },
    /// `{"error": "message"}`, returned by some gateways
    Bare { error: String },
    /// `{"message": "..."}`
    Flat { message: String },
}

#[derive(Debug, Default, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    /// A string for OpenAI; some compatible providers send a number
    #[serde(default)]
    code: Option<Value>,
}

fn code_text(code: Value) -> Option<String> {
    match code {
        Value::Null => None,
        Value::String(code) => Some(code),
        other => Some(other.to_string()),
    }
}

/// Map a status code and message to the matching variant
pub fn error_for_status(status: StatusCode, message: impl Into<String>) -> ServiceError {
    let message = message.into();
    match status.as_u16() {
        401 => ServiceError::authentication(message),
        403 => ServiceError::authorization(message),
        429 => ServiceError::rate_limit(message),
        408 | 504 => ServiceError::timeout(message),
        400 | 422 => ServiceError::bad_request(message),
        404 => ServiceError::provider(format!("endpoint not found: {}", message)),
        _ => ServiceError::provider(message),
    }
}

/// Map an HTTP error body to a `ServiceError`
///
/// JSON bodies are read for a message, `type` and `code`; anything else is
/// quoted (truncated) after the status line.
pub fn map_http_error(status: StatusCode, body: &str, context: &mut ErrorContext) -> ServiceError {
    let trimmed = body.trim();

    let message = match serde_json::from_str::<ErrorBody>(trimmed) {
        Ok(ErrorBody::Detailed { error }) => {
            if let Some(kind) = error.kind {
                context.add("error_type", kind);
            }
            if let Some(code) = error.code.and_then(code_text) {
                context.error_code = Some(code);
            }
            error.message.unwrap_or_else(|| status.to_string())
        }
        Ok(ErrorBody::Bare { error }) => error,
        Ok(ErrorBody::Flat { message }) => message,
        Err(_) if trimmed.is_empty() => status.to_string(),
        Err(_) => format!("{}: {}", status, crate::util::truncate_string(trimmed, 100)),
    };

    if context.error_code.as_deref() == Some(INSUFFICIENT_QUOTA) {
        return ServiceError::authorization(message);
    }

    error_for_status(status, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(status: StatusCode, body: &str) -> (ServiceError, ErrorContext) {
        let mut context = ErrorContext::for_service("openai");
        let err = map_http_error(status, body, &mut context);
        (err, context)
    }

    #[test]
    fn test_detailed_body_records_code_and_type() {
        let (err, context) = map(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"error": {"message": "Rate limit reached for gpt-4o-mini", "type": "requests", "code": "rate_limit_exceeded"}}"#,
        );

        assert!(matches!(err, ServiceError::RateLimit(ref m) if m == "Rate limit reached for gpt-4o-mini"));
        assert_eq!(context.error_code.as_deref(), Some("rate_limit_exceeded"));
        assert_eq!(context.data.get("error_type").map(String::as_str), Some("requests"));
    }

    #[test]
    fn test_insufficient_quota_is_not_rate_limit() {
        let (err, _) = map(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"error": {"message": "quota", "code": "insufficient_quota"}}"#,
        );
        assert!(matches!(err, ServiceError::Authorization(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_plain_text_body() {
        let (err, _) = map(StatusCode::BAD_GATEWAY, "upstream connect error");

        assert!(matches!(err, ServiceError::Provider(_)));
        assert!(err.to_string().contains("upstream connect error"));
    }

    #[test]
    fn test_bare_and_flat_bodies() {
        let (err, _) = map(StatusCode::UNAUTHORIZED, r#"{"error": "bad key"}"#);
        assert!(matches!(err, ServiceError::Authentication(ref m) if m == "bad key"));

        let (err, _) = map(StatusCode::UNPROCESSABLE_ENTITY, r#"{"message": "schema too deep"}"#);
        assert!(matches!(err, ServiceError::BadRequest(ref m) if m == "schema too deep"));
    }

    #[test]
    fn test_numeric_and_null_codes() {
        let (err, context) = map(
            StatusCode::BAD_REQUEST,
            r#"{"error": {"message": "max_tokens is too large", "type": "invalid_request_error", "code": 400}}"#,
        );
        assert!(matches!(err, ServiceError::BadRequest(ref m) if m == "max_tokens is too large"));
        assert_eq!(context.error_code.as_deref(), Some("400"));
        assert_eq!(context.data.get("error_type").map(String::as_str), Some("invalid_request_error"));

        let (err, context) = map(
            StatusCode::SERVICE_UNAVAILABLE,
            r#"{"error": {"message": "overloaded", "type": "server_error", "code": null}}"#,
        );
        assert!(matches!(err, ServiceError::Provider(ref m) if m == "overloaded"));
        assert_eq!(context.error_code, None);
    }

    #[test]
    fn test_empty_body_uses_status_line() {
        let (err, _) = map(StatusCode::GATEWAY_TIMEOUT, "");
        assert!(matches!(err, ServiceError::Timeout(ref m) if m.contains("504")));
    }
}
