// polyglot-core-rs/src/languages.rs
//
// Fixed catalog of the languages offered to users, keyed by BCP-47 tag.
// The same tags are used for speech capture and synthesis.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

/// One selectable language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Language {
    /// BCP-47 tag, e.g. `es-ES`
    pub tag: &'static str,
    /// Display name, e.g. `Spanish (Spain)`
    pub name: &'static str,
}

pub static LANGUAGES: &[Language] = &[
    Language { tag: "en-US", name: "English (US)" },
    Language { tag: "en-GB", name: "English (UK)" },
    Language { tag: "es-ES", name: "Spanish (Spain)" },
    Language { tag: "es-MX", name: "Spanish (Mexico)" },
    Language { tag: "fr-FR", name: "French" },
    Language { tag: "de-DE", name: "German" },
    Language { tag: "it-IT", name: "Italian" },
    Language { tag: "pt-BR", name: "Portuguese (Brazil)" },
    Language { tag: "pt-PT", name: "Portuguese (Portugal)" },
    Language { tag: "nl-NL", name: "Dutch" },
    Language { tag: "ru-RU", name: "Russian" },
    Language { tag: "ja-JP", name: "Japanese" },
    Language { tag: "ko-KR", name: "Korean" },
    Language { tag: "zh-CN", name: "Chinese (Simplified)" },
    Language { tag: "ar-SA", name: "Arabic" },
    Language { tag: "hi-IN", name: "Hindi" },
];

static BY_TAG: Lazy<HashMap<String, &'static Language>> = Lazy::new(|| {
    LANGUAGES
        .iter()
        .map(|language| (language.tag.to_ascii_lowercase(), language))
        .collect()
});

/// Look up a language by BCP-47 tag, ignoring case and `_` vs `-`
pub fn find_by_tag(tag: &str) -> Option<&'static Language> {
    let key = tag.trim().replace('_', "-").to_ascii_lowercase();
    BY_TAG.get(&key).copied()
}

/// Look up a language by display name, ignoring case
///
/// A bare name such as `Spanish` matches the first regional variant.
pub fn find_by_name(name: &str) -> Option<&'static Language> {
    let wanted = name.trim();
    LANGUAGES
        .iter()
        .find(|language| language.name.eq_ignore_ascii_case(wanted))
        .or_else(|| {
            LANGUAGES.iter().find(|language| {
                language
                    .name
                    .split(" (")
                    .next()
                    .is_some_and(|base| base.eq_ignore_ascii_case(wanted))
            })
        })
}

/// Human-readable name for a tag or free-form language name
///
/// Known tags resolve to their display name; anything else is returned
/// trimmed and unchanged so prompts still carry what the user chose.
pub fn display_name(language: &str) -> String {
    match find_by_tag(language) {
        Some(found) => found.name.to_string(),
        None => language.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_unique() {
        assert_eq!(BY_TAG.len(), LANGUAGES.len());
    }

    #[test]
    fn test_find_by_tag() {
        assert_eq!(find_by_tag("es-ES").map(|l| l.name), Some("Spanish (Spain)"));
        assert_eq!(find_by_tag("PT_br").map(|l| l.name), Some("Portuguese (Brazil)"));
        assert!(find_by_tag("xx-XX").is_none());
    }

    #[test]
    fn test_find_by_name() {
        assert_eq!(find_by_name("german").map(|l| l.tag), Some("de-DE"));
        assert_eq!(find_by_name("Spanish").map(|l| l.tag), Some("es-ES"));
        assert_eq!(find_by_name("Spanish (Mexico)").map(|l| l.tag), Some("es-MX"));
        assert!(find_by_name("Klingon").is_none());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("es-ES"), "Spanish (Spain)");
        assert_eq!(display_name(" Esperanto "), "Esperanto");
    }
}
