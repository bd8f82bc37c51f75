// polyglot-core-rs/src/pipeline.rs
//
// Schema-validated request pipeline
//
// One `execute` runs one flow:
// 1. validate the input record against the flow's input schema
//    (failures never reach the network)
// 2. apply declared defaults and render the instruction text
// 3. make exactly one upstream call, bounded by the configured timeout
// 4. parse the response and validate it against the flow's output schema
//
// There are no retries and no shared mutable state; concurrent calls are
// independent.

use std::any::type_name;
use std::sync::Arc;

use config_rs::get_formatted_service_name;
use generation_sdk::util::{
    extract_json_payload, generate_request_id, measure_time_async, sanitize_for_logging, truncate_string,
};
use generation_sdk::{GenerationRequest, GenerationResponse, GenerationService};
use input_validation_rs::{FieldError, ValidationError};
use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, UpstreamCause};
use crate::flow::FlowDefinition;

pub struct Pipeline {
    service: Arc<dyn GenerationService>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(service: Arc<dyn GenerationService>, config: PipelineConfig) -> Self {
        info!(
            "{} ready: upstream={} timeout={:?} model={}",
            get_formatted_service_name("PIPELINE"),
            service.name(),
            config.timeout,
            config.model.as_deref().unwrap_or("<client default>")
        );
        Self { service, config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run `flow` on an untyped input record
    ///
    /// On success the returned value satisfies `flow.output_schema()`.
    ///
    /// # Panics
    /// If the flow's prompt renderer fails on input that passed its own
    /// input schema.
    pub async fn execute(&self, flow: &FlowDefinition, input: Value) -> Result<Value, PipelineError> {
        let request_id = generate_request_id();

        if let Err(err) = flow.input_schema().validate(&input) {
            warn!("[{}] {} rejected input: {}", request_id, flow.name(), err);
            return Err(PipelineError::InvalidInput(err.into_errors()));
        }

        let input = flow.input_schema().apply_defaults(&input);
        let instruction = flow.render_prompt(&input).unwrap_or_else(|e| {
            panic!("flow '{}' failed to render validated input: {}", flow.name(), e)
        });

        let mut request = GenerationRequest::new(flow.name(), instruction, flow.output_schema().to_json_schema())
            .with_request_id(request_id.clone());
        if let Some(model) = &self.config.model {
            request = request.with_model(model.clone());
        }

        debug!("[{}] {} calling {}", request_id, flow.name(), self.service.name());

        let (outcome, elapsed) =
            measure_time_async(|| tokio::time::timeout(self.config.timeout, self.service.generate(request))).await;

        let response = match outcome {
            Err(_) => {
                warn!(
                    "[{}] {} timed out after {:?}",
                    request_id,
                    flow.name(),
                    self.config.timeout
                );
                return Err(PipelineError::UpstreamFailure(UpstreamCause::Timeout));
            }
            Ok(Err(err)) => {
                let cause = UpstreamCause::from(&err);
                error!(
                    "[{}] {} upstream failure ({}) after {:?}: {}",
                    request_id,
                    flow.name(),
                    cause,
                    elapsed,
                    sanitize_for_logging(&err.to_string())
                );
                if let Some(wait) = err.retry_after() {
                    info!("[{}] provider asked to wait {:?} before retrying", request_id, wait);
                }
                return Err(PipelineError::UpstreamFailure(cause));
            }
            Ok(Ok(response)) => response,
        };

        match parse_output(flow, &response) {
            Ok(output) => {
                info!("[{}] {} completed in {:?}", request_id, flow.name(), elapsed);
                Ok(output)
            }
            Err(err) => {
                warn!("[{}] {} unusable response: {}", request_id, flow.name(), err);
                Err(err)
            }
        }
    }

    /// Typed wrapper around `execute`
    pub async fn execute_typed<I, O>(&self, flow: &FlowDefinition, input: &I) -> Result<O, PipelineError>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        let value = serde_json::to_value(input).map_err(|e| {
            PipelineError::InvalidInput(vec![FieldError::new("$", ValidationError::InvalidType(e.to_string()))])
        })?;

        let output = self.execute(flow, value).await?;

        serde_json::from_value(output).map_err(|e| {
            PipelineError::InvalidOutput(format!("response does not fit {}: {}", type_name::<O>(), e))
        })
    }
}

/// Turn raw provider output into a schema-conformant value
fn parse_output(flow: &FlowDefinition, response: &GenerationResponse) -> Result<Value, PipelineError> {
    let content = response.content().ok_or(PipelineError::EmptyResponse)?;
    let payload = extract_json_payload(content);

    let value: Value = serde_json::from_str(payload).map_err(|e| {
        PipelineError::InvalidOutput(format!(
            "response is not JSON ({}): {}",
            e,
            truncate_string(payload, 80)
        ))
    })?;

    if value.is_null() {
        return Err(PipelineError::EmptyResponse);
    }

    flow.output_schema()
        .validate(&value)
        .map_err(|e| PipelineError::InvalidOutput(e.to_string()))?;

    Ok(value)
}
