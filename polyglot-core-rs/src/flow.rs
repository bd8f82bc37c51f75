// polyglot-core-rs/src/flow.rs
//
// A flow is a named (input schema, output schema, prompt template) triple
// describing one AI-backed operation.

use std::fmt;

use input_validation_rs::Schema;
use serde_json::Value;

/// Renders the instruction text for an input that already passed validation
/// and had its defaults applied
pub type PromptRenderer = fn(&Value) -> Result<String, serde_json::Error>;

/// Immutable description of one AI-backed operation
pub struct FlowDefinition {
    name: String,
    input_schema: Schema,
    output_schema: Schema,
    render_prompt: PromptRenderer,
}

impl FlowDefinition {
    pub fn new(
        name: impl Into<String>,
        input_schema: Schema,
        output_schema: Schema,
        render_prompt: PromptRenderer,
    ) -> Self {
        Self {
            name: name.into(),
            input_schema,
            output_schema,
            render_prompt,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input_schema(&self) -> &Schema {
        &self.input_schema
    }

    pub fn output_schema(&self) -> &Schema {
        &self.output_schema
    }

    /// Render the instruction text for `input`
    ///
    /// Pure: the same input always yields the same text.
    pub fn render_prompt(&self, input: &Value) -> Result<String, serde_json::Error> {
        (self.render_prompt)(input)
    }
}

impl fmt::Debug for FlowDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowDefinition")
            .field("name", &self.name)
            .field("input_fields", &self.input_schema.field_names().collect::<Vec<_>>())
            .field("output_fields", &self.output_schema.field_names().collect::<Vec<_>>())
            .finish()
    }
}
