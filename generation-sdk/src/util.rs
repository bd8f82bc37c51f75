//! Helpers shared by the SDK and its callers: timing, log hygiene,
//! correlation ids and model-output cleanup

use std::future::Future;
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;
use regex::Regex;

/// Await the future built by `f` and report how long it took
pub async fn measure_time_async<F, T, Fut>(f: F) -> (T, Duration)
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    let started = Instant::now();
    let output = f().await;
    (output, started.elapsed())
}

/// Truncate a string to a maximum number of characters, adding ellipsis if truncated
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

static SENSITIVE_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"Bearer [A-Za-z0-9\-_\.]+", "Bearer [REDACTED]"),
        (r"sk-[A-Za-z0-9\-_]{8,}", "sk-[REDACTED]"),
        (r"(?i)api[_-]?key[=:]\s*[A-Za-z0-9\-_]+", "api_key=[REDACTED]"),
    ]
    .into_iter()
    .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, replacement)))
    .collect()
});

/// Redact bearer tokens and API keys before text reaches a log line
pub fn sanitize_for_logging(s: &str) -> String {
    SENSITIVE_PATTERNS
        .iter()
        .fold(s.to_string(), |text, (re, replacement)| re.replace_all(&text, *replacement).into_owned())
}

/// Fresh correlation id (UUID v4)
pub fn generate_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Extract the JSON document from model output
///
/// Models sometimes wrap JSON in a Markdown code fence even when asked for
/// bare JSON. The fence (with or without a `json` tag) is stripped; any
/// other text is returned trimmed and unchanged.
pub fn extract_json_payload(output: &str) -> &str {
    let trimmed = output.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };

    // Drop the optional language tag on the opening fence line
    let body = match body.find('\n') {
        Some(idx) if body[..idx].trim().chars().all(|c| c.is_ascii_alphanumeric()) => &body[idx + 1..],
        _ => body,
    };
    body.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("hello world", 8), "hello...");
        assert_eq!(truncate_string("hi", 2), "hi");
        assert_eq!(truncate_string("¿Dónde está?", 6), "¿Dó...");
    }

    #[test]
    fn test_sanitize_for_logging() {
        let output = sanitize_for_logging("Authorization: Bearer abc123xyz");
        assert!(output.contains("[REDACTED]"));
        assert!(!output.contains("abc123xyz"));

        let output = sanitize_for_logging("key sk-proj-abcdefghijkl leaked");
        assert!(!output.contains("abcdefghijkl"));
    }

    #[test]
    fn test_extract_json_payload() {
        assert_eq!(extract_json_payload("  {\"a\": 1} "), "{\"a\": 1}");
        assert_eq!(extract_json_payload("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(extract_json_payload("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(extract_json_payload("Sure! {\"a\": 1}"), "Sure! {\"a\": 1}");
    }

    #[tokio::test]
    async fn test_measure_time_async() {
        let (value, elapsed) = measure_time_async(|| async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            42
        })
        .await;
        assert_eq!(value, 42);
        assert!(elapsed >= Duration::from_millis(5));
    }
}
