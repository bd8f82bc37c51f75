//! # Generation SDK
//!
//! Client SDK for the external text-generation service behind Polyglot Pal.
//!
//! This crate provides:
//!
//! - The `GenerationService` trait: one instruction plus a response-shape
//!   contract in, raw model output (or a classified error) out
//! - An OpenAI-compatible chat-completions client that requests JSON output
//!   conforming to a JSON Schema
//! - A normalized error taxonomy with HTTP error mapping
//! - Configuration providers backed by the environment or memory
//!
//! The SDK performs exactly one HTTP call per `generate` invocation. Retry
//! policy belongs to callers.

pub mod core;
pub use crate::core::{GenerationRequest, GenerationResponse, GenerationService, TokenUsage};

pub mod services;
pub use crate::services::openai;

pub mod error;
pub use crate::error::{ErrorContext, Result, ServiceError};

pub mod config;
pub use crate::config::{ConfigProvider, GenerationConfig, ServiceConfig};

pub mod util;

#[cfg(test)]
mod tests;

/// Create an OpenAI-compatible client builder, seeded from the environment
pub fn openai_client() -> services::openai::OpenAIClientBuilder {
    services::openai::OpenAIClientBuilder::new()
}
