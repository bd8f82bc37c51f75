// polyglot-core-rs/src/flows/translation.rs

use input_validation_rs::{FieldSchema, Schema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{MAX_LANGUAGE_LENGTH, MAX_TEXT_LENGTH};
use crate::flow::FlowDefinition;
use crate::languages;

pub const FLOW_NAME: &str = "translation";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    pub text: String,
    /// Target language as a BCP-47 tag or a name
    pub target_language: String,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target_language: target_language.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub translated_text: String,
}

pub fn input_schema() -> Schema {
    Schema::builder()
        .required_field(
            "text",
            FieldSchema::string()
                .non_blank()
                .with_max_length(MAX_TEXT_LENGTH)
                .describe("Text to translate")
                .build(),
        )
        .required_field(
            "targetLanguage",
            FieldSchema::string()
                .non_blank()
                .with_max_length(MAX_LANGUAGE_LENGTH)
                .describe("Target language, as a BCP-47 tag or a name")
                .build(),
        )
        .build()
}

pub fn output_schema() -> Schema {
    Schema::builder()
        .required_field(
            "translatedText",
            FieldSchema::string().describe("The translation").build(),
        )
        .allow_additional_fields(true)
        .describe("Translation result")
        .build()
}

pub fn render_prompt(input: &Value) -> Result<String, serde_json::Error> {
    let request: TranslationRequest = serde_json::from_value(input.clone())?;
    let target = match languages::find_by_tag(&request.target_language) {
        Some(language) => format!("{} ({})", language.name, language.tag),
        None => request.target_language.trim().to_string(),
    };

    Ok(format!(
        "Translate the text below into {}. Detect the source language yourself. \
         Preserve meaning, tone and formatting, and prefer natural phrasing over word-for-word translation. \
         Return only the translation in translatedText.\n\nText:\n\"\"\"\n{}\n\"\"\"",
        target, request.text
    ))
}

pub fn definition() -> FlowDefinition {
    FlowDefinition::new(FLOW_NAME, input_schema(), output_schema(), render_prompt)
}
