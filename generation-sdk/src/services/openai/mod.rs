//! OpenAI-compatible chat-completions client
//!
//! Requests structured output through the `json_schema` response format and
//! returns the raw message content. One HTTP call per generation, no retries.

mod models;
pub use models::*;

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;

use crate::config::{GenerationConfig, ServiceConfig, DEFAULT_PROVIDER};
use crate::core::{GenerationRequest, GenerationResponse, GenerationService};
use crate::error::{ErrorContext, Result, ServiceError};
use crate::services::common::{build_http_client, error_from_response, UserAgent};
use crate::util::{measure_time_async, sanitize_for_logging, truncate_string};

const SERVICE_NAME: &str = "openai";

const SYSTEM_PROMPT: &str = "You are a language-learning assistant. Respond only with a single JSON object that conforms to the provided JSON Schema. Do not wrap the JSON in Markdown and do not add commentary.";

/// OpenAI API client
#[derive(Debug, Clone)]
pub struct OpenAIClient {
    /// HTTP client
    http_client: Client,

    /// Configuration
    config: GenerationConfig,
}

impl OpenAIClient {
    /// Create a client from an explicit configuration
    pub fn new_with_config(config: GenerationConfig) -> Result<Self> {
        config.validate()?;

        let http_client = build_http_client(
            &UserAgent::default(),
            Duration::from_secs(config.timeout_seconds),
        )?;

        Ok(Self { http_client, config })
    }

    /// Create a new builder for the OpenAI client
    pub fn builder() -> OpenAIClientBuilder {
        OpenAIClientBuilder::default()
    }

    /// Active configuration
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Send a chat completion request
    pub async fn chat_completion(&self, request: &ChatCompletionRequest) -> Result<ChatCompletionResponse> {
        let url = format!("{}/chat/completions", self.config.base_url);
        debug!("Sending request to OpenAI: POST {}", url);

        let mut builder = self
            .http_client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(request);

        if let Some(ref org) = self.config.org_id {
            builder = builder.header("OpenAI-Organization", org);
        }

        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            response
                .json::<ChatCompletionResponse>()
                .await
                .map_err(|e| ServiceError::decode(format!("chat completion envelope: {}", e)))
        } else {
            Err(error_from_response(SERVICE_NAME, response).await)
        }
    }

    /// Build the wire request for a generation
    pub fn completion_request(&self, request: &GenerationRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: request
                .model
                .clone()
                .unwrap_or_else(|| self.config.model.clone()),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(request.instruction.clone()),
            ],
            temperature: Some(self.config.temperature),
            max_tokens: Some(self.config.max_tokens),
            response_format: Some(ResponseFormat::JsonSchema {
                json_schema: JsonSchemaFormat {
                    name: response_format_name(&request.flow),
                    schema: request.response_schema.clone(),
                    strict: None,
                },
            }),
            user: None,
        }
    }
}

/// Response-format names must match `^[a-zA-Z0-9_-]{1,64}$`
fn response_format_name(flow: &str) -> String {
    let name: String = flow
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .take(64)
        .collect();

    if name.is_empty() {
        "response".to_string()
    } else {
        name
    }
}

#[async_trait]
impl GenerationService for OpenAIClient {
    fn name(&self) -> &str {
        SERVICE_NAME
    }

    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        let wire = self.completion_request(&request);
        debug!(
            "[{}] flow={} model={} instruction={}",
            request.request_id,
            request.flow,
            wire.model,
            truncate_string(&sanitize_for_logging(&request.instruction), 120)
        );

        let (result, elapsed) = measure_time_async(|| self.chat_completion(&wire)).await;
        let response = result.map_err(|e| {
            warn!("[{}] OpenAI call failed after {:?}: {}", request.request_id, elapsed, e);
            e.with_context(ErrorContext::new().request_id(request.request_id.as_str()))
        })?;

        info!(
            "[{}] OpenAI responded in {:?} (model {})",
            request.request_id, elapsed, response.model
        );

        let usage = response.usage.map(Into::into);
        let model = if response.model.is_empty() { wire.model } else { response.model };

        let Some(choice) = response.choices.into_iter().next() else {
            return Ok(GenerationResponse { output: None, model, usage });
        };

        if let Some(refusal) = choice.message.refusal.filter(|r| !r.trim().is_empty()) {
            return Err(ServiceError::declined(format!("model refused the request: {}", refusal)));
        }

        match choice.finish_reason.as_deref() {
            Some("content_filter") => {
                return Err(ServiceError::declined("output blocked by the content filter"));
            }
            Some("length") => {
                return Err(ServiceError::declined("output truncated at the token limit"));
            }
            _ => {}
        }

        Ok(GenerationResponse {
            output: choice.message.content,
            model,
            usage,
        })
    }
}

/// Builder for OpenAI client
#[derive(Debug, Default)]
pub struct OpenAIClientBuilder {
    api_key: Option<String>,
    org_id: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    timeout_seconds: Option<u64>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl OpenAIClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the organization ID
    pub fn org_id(mut self, org_id: impl Into<String>) -> Self {
        self.org_id = Some(org_id.into());
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the default model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the timeout in seconds
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the completion token limit
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Build the OpenAI client
    ///
    /// Values come from `POLYGLOT_GENAI_*` first and are overridden by anything
    /// set explicitly on the builder.
    pub fn build(self) -> Result<OpenAIClient> {
        let mut config = GenerationConfig::read_provider(&**DEFAULT_PROVIDER);

        if let Some(api_key) = self.api_key {
            config.api_key = api_key;
        }

        if let Some(org_id) = self.org_id {
            config.org_id = Some(org_id);
        }

        if let Some(base_url) = self.base_url {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Some(model) = self.model {
            config.model = model;
        }

        if let Some(timeout) = self.timeout_seconds {
            config.timeout_seconds = timeout;
        }

        if let Some(temperature) = self.temperature {
            config.temperature = temperature;
        }

        if let Some(max_tokens) = self.max_tokens {
            config.max_tokens = max_tokens;
        }

        OpenAIClient::new_with_config(config)
    }
}
