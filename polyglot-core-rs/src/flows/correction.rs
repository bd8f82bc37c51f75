// polyglot-core-rs/src/flows/correction.rs
//
// Grammar and style correction with optional tone, idiom and sentence
// structure analysis.

use input_validation_rs::{FieldSchema, Schema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{push_section, push_toggle, MAX_LANGUAGE_LENGTH, MAX_TEXT_LENGTH};
use crate::flow::FlowDefinition;
use crate::languages;
use crate::settings::{CorrectionLevel, CorrectionSettings};

pub const FLOW_NAME: &str = "correction";

/// Text to correct plus the settings to apply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionRequest {
    pub text: String,
    pub language: String,
    #[serde(flatten)]
    pub settings: CorrectionSettings,
}

impl CorrectionRequest {
    /// Request with default settings
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
            settings: CorrectionSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: CorrectionSettings) -> Self {
        self.settings = settings;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyItem {
    pub term: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneAnalysis {
    pub detected_tone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdiomExplanation {
    pub idiom: String,
    pub meaning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// Structured correction returned by the model
///
/// Optional sections may be absent even when the matching toggle was on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionResult {
    pub corrected_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_vocabulary: Option<Vec<VocabularyItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone_analysis: Option<ToneAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idiom_explanations: Option<Vec<IdiomExplanation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure_suggestions: Option<String>,
}

fn flag(default: bool, description: &str) -> FieldSchema {
    FieldSchema::boolean()
        .with_default(default)
        .describe(description)
        .build()
}

pub fn input_schema() -> Schema {
    let levels: Vec<&str> = CorrectionLevel::ALL.iter().map(CorrectionLevel::as_str).collect();

    Schema::builder()
        .required_field(
            "text",
            FieldSchema::string()
                .non_blank()
                .with_max_length(MAX_TEXT_LENGTH)
                .describe("Text to correct")
                .build(),
        )
        .required_field(
            "language",
            FieldSchema::string()
                .non_blank()
                .with_max_length(MAX_LANGUAGE_LENGTH)
                .describe("Language of the text, as a name or BCP-47 tag")
                .build(),
        )
        .optional_field(
            "correctionLevel",
            FieldSchema::string()
                .one_of(&levels)
                .with_default(CorrectionLevel::default().as_str())
                .build(),
        )
        .optional_field("flagGrammar", flag(true, "Correct grammar"))
        .optional_field("flagSpelling", flag(true, "Correct spelling"))
        .optional_field("flagPunctuation", flag(true, "Correct punctuation"))
        .optional_field("flagStyle", flag(false, "Improve style"))
        .optional_field("analyzeTone", flag(false, "Include tone analysis"))
        .optional_field("explainIdioms", flag(false, "Explain idioms"))
        .optional_field(
            "suggestStructureVariations",
            flag(false, "Suggest sentence structure variations"),
        )
        .build()
}

pub fn output_schema() -> Schema {
    let vocabulary_item = Schema::builder()
        .required_field("term", FieldSchema::string().build())
        .required_field("explanation", FieldSchema::string().build())
        .allow_additional_fields(true)
        .build();

    let tone = Schema::builder()
        .required_field("detectedTone", FieldSchema::string().build())
        .optional_field("suggestions", FieldSchema::string().build())
        .allow_additional_fields(true)
        .build();

    let idiom = Schema::builder()
        .required_field("idiom", FieldSchema::string().build())
        .required_field("meaning", FieldSchema::string().build())
        .optional_field("example", FieldSchema::string().build())
        .allow_additional_fields(true)
        .build();

    Schema::builder()
        .required_field(
            "correctedText",
            FieldSchema::string().describe("The fully corrected text").build(),
        )
        .optional_field(
            "explanation",
            FieldSchema::string().describe("Short explanation of the main corrections").build(),
        )
        .optional_field(
            "keyVocabulary",
            FieldSchema::array(FieldSchema::object(vocabulary_item).build())
                .describe("3-5 useful terms from the text")
                .build(),
        )
        .optional_field("toneAnalysis", FieldSchema::object(tone).build())
        .optional_field(
            "idiomExplanations",
            FieldSchema::array(FieldSchema::object(idiom).build()).build(),
        )
        .optional_field("structureSuggestions", FieldSchema::string().build())
        .allow_additional_fields(true)
        .describe("Correction result")
        .build()
}

pub fn render_prompt(input: &Value) -> Result<String, serde_json::Error> {
    let request: CorrectionRequest = serde_json::from_value(input.clone())?;
    let settings = &request.settings;
    let language = languages::display_name(&request.language);

    let mut prompt = format!(
        "You are a patient {} language tutor. Correct the text below, written in {}.",
        language, language
    );

    prompt.push_str(&format!(
        "\n\nCorrection level: {}. {}",
        settings.correction_level,
        settings.correction_level.instruction()
    ));

    push_section(&mut prompt, "Check for");
    push_toggle(&mut prompt, "Grammar", settings.flag_grammar);
    push_toggle(&mut prompt, "Spelling", settings.flag_spelling);
    push_toggle(&mut prompt, "Punctuation", settings.flag_punctuation);
    push_toggle(&mut prompt, "Style", settings.flag_style);

    push_section(&mut prompt, "Additional analysis");
    push_toggle(&mut prompt, "Tone analysis (toneAnalysis)", settings.analyze_tone);
    push_toggle(&mut prompt, "Idiom explanations (idiomExplanations)", settings.explain_idioms);
    push_toggle(
        &mut prompt,
        "Sentence structure variations (structureSuggestions)",
        settings.suggest_structure_variations,
    );

    prompt.push_str(
        "\n\nReturn the corrected text in correctedText. Explain the most important corrections in explanation \
         and list 3-5 useful terms with short explanations in keyVocabulary. \
         Only include an additional analysis section when it is enabled above. \
         Leave disabled categories of mistakes untouched.",
    );

    prompt.push_str(&format!("\n\nText:\n\"\"\"\n{}\n\"\"\"", request.text));

    Ok(prompt)
}

pub fn definition() -> FlowDefinition {
    FlowDefinition::new(FLOW_NAME, input_schema(), output_schema(), render_prompt)
}
