//! # Polyglot Core
//!
//! Structured-output AI request pipeline behind Polyglot Pal.
//!
//! A typed request (correct, translate, summarize) is validated against its
//! flow's input schema, rendered into one instruction, sent to the external
//! generation service exactly once, and the response is validated against
//! the flow's output schema before it is returned. Every failure is one
//! [`PipelineError`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use polyglot_core_rs::{CorrectionRequest, PipelineConfig, PolyglotService};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = generation_sdk::openai_client().build()?;
//! let service = PolyglotService::with_default_flows(Arc::new(client), PipelineConfig::from_env());
//!
//! let result = service.correct(CorrectionRequest::new("I has a apple.", "English")).await?;
//! println!("{}", result.corrected_text);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod flow;
pub mod flows;
pub mod languages;
pub mod pipeline;
pub mod registry;
pub mod service;
pub mod settings;
pub mod speech;

pub use config::PipelineConfig;
pub use error::{ErrorPresentation, PipelineError, RegistryError, UpstreamCause};
pub use flow::{FlowDefinition, PromptRenderer};
pub use flows::correction::{CorrectionRequest, CorrectionResult, IdiomExplanation, ToneAnalysis, VocabularyItem};
pub use flows::summarization::{SummarizationRequest, SummarizationResult};
pub use flows::translation::{TranslationRequest, TranslationResult};
pub use languages::Language;
pub use pipeline::Pipeline;
pub use registry::FlowRegistry;
pub use service::PolyglotService;
pub use settings::{CorrectionLevel, CorrectionSettings};
pub use speech::{SpeechCapability, SpeechError};

#[cfg(test)]
mod tests;
