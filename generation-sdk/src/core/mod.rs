//! Core abstractions for the Generation SDK
//!
//! - `GenerationService`: the seam between the pipeline and any upstream
//!   text-generation provider
//! - `GenerationRequest` / `GenerationResponse`: provider-neutral request
//!   and response records

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// One structured-generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Name of the flow issuing the request, used as the response-format name
    pub flow: String,

    /// Rendered instruction text
    pub instruction: String,

    /// JSON Schema the response must conform to
    pub response_schema: Value,

    /// Model override; providers fall back to their configured model
    pub model: Option<String>,

    /// Correlation id for logs
    pub request_id: String,
}

impl GenerationRequest {
    /// Create a request with a fresh correlation id
    pub fn new(flow: impl Into<String>, instruction: impl Into<String>, response_schema: Value) -> Self {
        Self {
            flow: flow.into(),
            instruction: instruction.into(),
            response_schema,
            model: None,
            request_id: crate::util::generate_request_id(),
        }
    }

    /// Select a model for this request
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Use a caller-supplied correlation id
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }
}

/// Token usage statistics reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Raw outcome of a successful provider call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Generated text; `None` when the provider returned no content
    pub output: Option<String>,

    /// Model that produced the output
    pub model: String,

    /// Token usage, when reported
    pub usage: Option<TokenUsage>,
}

impl GenerationResponse {
    /// Response carrying the given output text
    pub fn with_output(model: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            output: Some(output.into()),
            model: model.into(),
            usage: None,
        }
    }

    /// Response without any content
    pub fn empty(model: impl Into<String>) -> Self {
        Self {
            output: None,
            model: model.into(),
            usage: None,
        }
    }

    /// Output text when present and not blank
    pub fn content(&self) -> Option<&str> {
        self.output.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// An upstream text-generation provider
///
/// Implementations issue exactly one provider call per `generate` and must
/// not retry internally.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// The provider name/identifier
    fn name(&self) -> &str;

    /// Submit one instruction and return the raw generated output
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_builder() {
        let request = GenerationRequest::new("correction", "Fix this", json!({ "type": "object" }))
            .with_model("gpt-4o-mini")
            .with_request_id("req-1");

        assert_eq!(request.flow, "correction");
        assert_eq!(request.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(request.request_id, "req-1");
    }

    #[test]
    fn test_fresh_request_ids_differ() {
        let a = GenerationRequest::new("translation", "a", json!({}));
        let b = GenerationRequest::new("translation", "a", json!({}));
        assert_ne!(a.request_id, b.request_id);
    }

    #[test]
    fn test_blank_content_is_none() {
        assert_eq!(GenerationResponse::with_output("m", "  \n").content(), None);
        assert_eq!(GenerationResponse::empty("m").content(), None);
        assert_eq!(GenerationResponse::with_output("m", " {} ").content(), Some("{}"));
    }
}
