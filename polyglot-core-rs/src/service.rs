// polyglot-core-rs/src/service.rs
//
// Typed entry points used by the UI layer.

use std::sync::Arc;

use generation_sdk::GenerationService;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::flows::correction::{self, CorrectionRequest, CorrectionResult};
use crate::flows::summarization::{self, SummarizationRequest, SummarizationResult};
use crate::flows::translation::{self, TranslationRequest, TranslationResult};
use crate::pipeline::Pipeline;
use crate::registry::FlowRegistry;

pub struct PolyglotService {
    registry: Arc<FlowRegistry>,
    pipeline: Pipeline,
}

impl PolyglotService {
    pub fn new(registry: Arc<FlowRegistry>, pipeline: Pipeline) -> Self {
        Self { registry, pipeline }
    }

    /// Service over the built-in flows
    pub fn with_default_flows(service: Arc<dyn GenerationService>, config: PipelineConfig) -> Self {
        Self::new(
            Arc::new(FlowRegistry::with_default_flows()),
            Pipeline::new(service, config),
        )
    }

    pub fn registry(&self) -> &Arc<FlowRegistry> {
        &self.registry
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub async fn correct(&self, request: CorrectionRequest) -> Result<CorrectionResult, PipelineError> {
        self.run(correction::FLOW_NAME, &request).await
    }

    pub async fn translate(&self, request: TranslationRequest) -> Result<TranslationResult, PipelineError> {
        self.run(translation::FLOW_NAME, &request).await
    }

    pub async fn summarize(&self, request: SummarizationRequest) -> Result<SummarizationResult, PipelineError> {
        self.run(summarization::FLOW_NAME, &request).await
    }

    async fn run<I, O>(&self, flow_name: &str, request: &I) -> Result<O, PipelineError>
    where
        I: Serialize + Sync,
        O: DeserializeOwned,
    {
        // A missing built-in flow is a wiring defect, not a runtime condition
        let flow = self
            .registry
            .get(flow_name)
            .unwrap_or_else(|e| panic!("PolyglotService is missing a required flow: {}", e));

        self.pipeline.execute_typed(&flow, request).await
    }
}
