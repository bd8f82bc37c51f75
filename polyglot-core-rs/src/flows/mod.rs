// polyglot-core-rs/src/flows/mod.rs
//
// Built-in flows. Each submodule owns its typed request/result records,
// both schemas and its prompt template.

pub mod correction;
pub mod summarization;
pub mod translation;

use crate::flow::FlowDefinition;

/// Upper bound on user text, in characters
pub const MAX_TEXT_LENGTH: usize = 10_000;

/// Upper bound on a language name or tag, in characters
pub const MAX_LANGUAGE_LENGTH: usize = 64;

/// Every built-in flow, freshly constructed
pub fn default_flows() -> Vec<FlowDefinition> {
    vec![
        correction::definition(),
        translation::definition(),
        summarization::definition(),
    ]
}

fn push_section(prompt: &mut String, title: &str) {
    prompt.push_str("\n\n");
    prompt.push_str(title);
    prompt.push(':');
}

fn push_toggle(prompt: &mut String, label: &str, enabled: bool) {
    let state = if enabled { "enabled" } else { "disabled" };
    prompt.push_str(&format!("\n- {}: {}", label, state));
}
