//! Test doubles shared by the core tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use generation_sdk::{GenerationRequest, GenerationResponse, GenerationService, Result, ServiceError};
use serde_json::Value;

enum Reply {
    Output(Option<String>),
    Computed(Box<dyn Fn(&GenerationRequest) -> Value + Send + Sync>),
    Failure(Box<dyn Fn() -> ServiceError + Send + Sync>),
}

/// Canned `GenerationService` that records every request it receives
pub struct StubGenerationService {
    reply: Reply,
    delay: Option<Duration>,
    calls: AtomicUsize,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl StubGenerationService {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            delay: None,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer with `value` serialized as the output text
    pub fn replying(value: Value) -> Self {
        Self::with_reply(Reply::Output(Some(value.to_string())))
    }

    /// Answer with raw output text
    pub fn replying_text(text: &str) -> Self {
        Self::with_reply(Reply::Output(Some(text.to_string())))
    }

    /// Answer with a value derived from each request
    pub fn responding(reply: impl Fn(&GenerationRequest) -> Value + Send + Sync + 'static) -> Self {
        Self::with_reply(Reply::Computed(Box::new(reply)))
    }

    /// Answer without any content
    pub fn empty() -> Self {
        Self::with_reply(Reply::Output(None))
    }

    pub fn failing(make_error: impl Fn() -> ServiceError + Send + Sync + 'static) -> Self {
        Self::with_reply(Reply::Failure(Box::new(make_error)))
    }

    /// Sleep before answering
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationService for StubGenerationService {
    fn name(&self) -> &str {
        "stub"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let output = match &self.reply {
            Reply::Output(output) => Ok(output.clone()),
            Reply::Computed(reply) => Ok(Some(reply(&request).to_string())),
            Reply::Failure(make_error) => Err(make_error()),
        };
        self.requests.lock().unwrap().push(request);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        output.map(|output| GenerationResponse {
            output,
            model: "stub-model".to_string(),
            usage: None,
        })
    }
}
