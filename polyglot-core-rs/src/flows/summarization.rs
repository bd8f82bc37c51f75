// polyglot-core-rs/src/flows/summarization.rs

use input_validation_rs::{FieldSchema, Schema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{MAX_LANGUAGE_LENGTH, MAX_TEXT_LENGTH};
use crate::flow::FlowDefinition;
use crate::languages;

pub const FLOW_NAME: &str = "summarization";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizationRequest {
    pub text: String,
    /// Language of the summary; the text's own language when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl SummarizationRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: None,
        }
    }

    pub fn in_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizationResult {
    pub summary: String,
}

pub fn input_schema() -> Schema {
    Schema::builder()
        .required_field(
            "text",
            FieldSchema::string()
                .non_blank()
                .with_max_length(MAX_TEXT_LENGTH)
                .describe("Text to summarize")
                .build(),
        )
        .optional_field(
            "language",
            FieldSchema::string()
                .non_blank()
                .with_max_length(MAX_LANGUAGE_LENGTH)
                .describe("Language of the summary")
                .build(),
        )
        .build()
}

pub fn output_schema() -> Schema {
    Schema::builder()
        .required_field("summary", FieldSchema::string().describe("The summary").build())
        .allow_additional_fields(true)
        .describe("Summarization result")
        .build()
}

pub fn render_prompt(input: &Value) -> Result<String, serde_json::Error> {
    let request: SummarizationRequest = serde_json::from_value(input.clone())?;

    let mut prompt = String::from(
        "Summarize the text below in a few sentences for a language learner. Keep the key points and use simple, clear wording.",
    );

    match request.language.as_deref() {
        Some(language) => prompt.push_str(&format!(
            "\nSummary language: write the summary in {}.",
            languages::display_name(language)
        )),
        None => prompt.push_str("\nSummary language: not specified; write the summary in the language of the text."),
    }

    prompt.push_str("\n\nReturn the summary in summary.");
    prompt.push_str(&format!("\n\nText:\n\"\"\"\n{}\n\"\"\"", request.text));

    Ok(prompt)
}

pub fn definition() -> FlowDefinition {
    FlowDefinition::new(FLOW_NAME, input_schema(), output_schema(), render_prompt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prompt_reflects_optional_language() {
        let without = render_prompt(&json!({ "text": "Long text" })).unwrap();
        assert!(without.contains("Summary language: not specified"));

        let with = render_prompt(&json!({ "text": "Long text", "language": "fr-FR" })).unwrap();
        assert!(with.contains("write the summary in French."));
    }

    #[test]
    fn test_null_language_is_allowed() {
        assert!(input_schema().validate(&json!({ "text": "x", "language": null })).is_ok());
        assert!(render_prompt(&json!({ "text": "x", "language": null })).is_ok());
    }
}
