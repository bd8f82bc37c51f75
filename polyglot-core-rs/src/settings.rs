// polyglot-core-rs/src/settings.rs
//
// Caller-held correction settings. The record is passed into every
// correction request explicitly; nothing in the core keeps settings between
// calls.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How aggressively the text should be rewritten
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionLevel {
    /// Fix clear errors only and keep the author's wording
    Gentle,
    /// Fix errors and awkward phrasing
    #[default]
    Standard,
    /// Fix everything and enforce formal, idiomatic usage
    Strict,
}

impl CorrectionLevel {
    pub const ALL: [CorrectionLevel; 3] = [
        CorrectionLevel::Gentle,
        CorrectionLevel::Standard,
        CorrectionLevel::Strict,
    ];

    /// Wire literal
    pub fn as_str(&self) -> &'static str {
        match self {
            CorrectionLevel::Gentle => "gentle",
            CorrectionLevel::Standard => "standard",
            CorrectionLevel::Strict => "strict",
        }
    }

    /// Instruction text describing the level to the model
    pub fn instruction(&self) -> &'static str {
        match self {
            CorrectionLevel::Gentle => {
                "Only fix clear mistakes. Keep the author's wording, tone and sentence structure wherever possible."
            }
            CorrectionLevel::Standard => {
                "Fix all mistakes and smooth out awkward phrasing while keeping the author's voice."
            }
            CorrectionLevel::Strict => {
                "Fix every mistake and rewrite anything unidiomatic or informal so the text reads as polished, native-level writing."
            }
        }
    }
}

impl fmt::Display for CorrectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn enabled() -> bool {
    true
}

/// Correction level plus the seven independent toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionSettings {
    #[serde(default)]
    pub correction_level: CorrectionLevel,
    #[serde(default = "enabled")]
    pub flag_grammar: bool,
    #[serde(default = "enabled")]
    pub flag_spelling: bool,
    #[serde(default = "enabled")]
    pub flag_punctuation: bool,
    #[serde(default)]
    pub flag_style: bool,
    #[serde(default)]
    pub analyze_tone: bool,
    #[serde(default)]
    pub explain_idioms: bool,
    #[serde(default)]
    pub suggest_structure_variations: bool,
}

impl Default for CorrectionSettings {
    fn default() -> Self {
        Self {
            correction_level: CorrectionLevel::Standard,
            flag_grammar: true,
            flag_spelling: true,
            flag_punctuation: true,
            flag_style: false,
            analyze_tone: false,
            explain_idioms: false,
            suggest_structure_variations: false,
        }
    }
}

impl CorrectionSettings {
    pub fn with_level(mut self, level: CorrectionLevel) -> Self {
        self.correction_level = level;
        self
    }

    /// Enable every optional analysis section
    pub fn with_full_analysis(mut self) -> Self {
        self.analyze_tone = true;
        self.explain_idioms = true;
        self.suggest_structure_variations = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_match_wire_defaults() {
        let parsed: CorrectionSettings = serde_json::from_value(json!({})).unwrap();
        assert_eq!(parsed, CorrectionSettings::default());
        assert_eq!(parsed.correction_level, CorrectionLevel::Standard);
        assert!(parsed.flag_grammar && parsed.flag_spelling && parsed.flag_punctuation);
        assert!(!parsed.flag_style);
    }

    #[test]
    fn test_camel_case_wire_names() {
        let value = serde_json::to_value(CorrectionSettings::default().with_level(CorrectionLevel::Strict)).unwrap();
        assert_eq!(value["correctionLevel"], "strict");
        assert_eq!(value["suggestStructureVariations"], false);
    }

    #[test]
    fn test_level_literals() {
        let literals: Vec<&str> = CorrectionLevel::ALL.iter().map(CorrectionLevel::as_str).collect();
        assert_eq!(literals, ["gentle", "standard", "strict"]);
    }
}
