//! Schema-based validation
//!
//! This module provides structural validation of JSON records, modelled on
//! JSON Schema: typed fields, required/optional, string and array bounds,
//! enumerated literals, boolean defaults and nested objects/arrays.
//! A schema can also be rendered as a JSON Schema document so it can be
//! handed to a model as a response-shape contract.

use std::collections::BTreeMap;
use serde_json::{json, Map, Value};
use crate::errors::{CompositeError, FieldError, ValidationError, ValidationResult};
use crate::limits::Limits;

/// Path used for errors about the record itself
const ROOT_PATH: &str = "$";

/// Schema for validating JSON objects
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    /// Field definitions, ordered by name
    fields: BTreeMap<String, FieldSchema>,
    /// Whether to allow additional fields not in the schema
    allow_additional_fields: bool,
    /// Human-readable description emitted into the JSON Schema
    description: Option<String>,
    /// Global caps applied on top of per-field bounds
    limits: Limits,
}

/// Schema for a single field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    /// Field type
    field_type: FieldType,
    /// Whether field is required
    required: bool,
    /// Description emitted into the JSON Schema
    description: Option<String>,
    /// Child schema for objects
    object_schema: Option<Box<Schema>>,
    /// Item schema for arrays
    array_item_schema: Option<Box<FieldSchema>>,
    /// Allowed values (enum)
    enum_values: Option<Vec<Value>>,
    /// Value filled in when the field is absent
    default: Option<Value>,
    /// Minimum length for string (chars) / array validation
    min_length: Option<usize>,
    /// Maximum length for string (chars) / array validation
    max_length: Option<usize>,
    /// Reject strings that are empty after trimming
    non_blank: bool,
}

/// Supported field types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// String type
    String,
    /// Boolean type
    Boolean,
    /// Object type (with schema)
    Object,
    /// Array type
    Array,
}

impl FieldType {
    fn as_json_type(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Boolean => "boolean",
            FieldType::Object => "object",
            FieldType::Array => "array",
        }
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn child_path(parent: &str, field: &str) -> String {
    if parent == ROOT_PATH {
        field.to_string()
    } else {
        format!("{}.{}", parent, field)
    }
}

impl Schema {
    /// Create a new, empty schema
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
            allow_additional_fields: false,
            description: None,
            limits: Limits::default(),
        }
    }

    /// Create a builder for this schema
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Names of the declared fields, in order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Look up a declared field
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.get(name)
    }

    /// Whether fields outside the schema are tolerated
    pub fn allows_additional_fields(&self) -> bool {
        self.allow_additional_fields
    }

    /// Validate a value against this schema, reporting every violation
    pub fn validate(&self, value: &Value) -> ValidationResult<()> {
        let mut errors = Vec::new();
        self.check_object(value, ROOT_PATH, 0, &self.limits, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            log::debug!("Schema validation found {} violation(s)", errors.len());
            Err(CompositeError::new(errors))
        }
    }

    /// Return a copy of `value` with declared defaults filled in for absent fields
    ///
    /// Nested object fields are processed recursively; non-object values are
    /// returned unchanged.
    pub fn apply_defaults(&self, value: &Value) -> Value {
        let Value::Object(obj) = value else {
            return value.clone();
        };

        let mut out = obj.clone();
        for (name, field) in &self.fields {
            let absent = matches!(out.get(name), None | Some(Value::Null));
            if absent {
                if let Some(default) = &field.default {
                    out.insert(name.clone(), default.clone());
                }
            } else if let (Some(child), Some(present)) = (&field.object_schema, out.get_mut(name)) {
                *present = child.apply_defaults(present);
            }
        }
        Value::Object(out)
    }

    /// Render this schema as a JSON Schema document
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for (name, field) in &self.fields {
            properties.insert(name.clone(), field.to_json_schema());
            if field.required {
                required.push(Value::String(name.clone()));
            }
        }

        let mut schema = json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": self.allow_additional_fields,
        });
        if let Some(description) = &self.description {
            schema["description"] = Value::String(description.clone());
        }
        schema
    }

    // Nested schemas are checked under the root schema's limits
    fn check_object(
        &self,
        value: &Value,
        path: &str,
        depth: usize,
        limits: &Limits,
        errors: &mut Vec<FieldError>,
    ) {
        if depth > limits.max_depth {
            errors.push(FieldError::new(
                path,
                ValidationError::ExceededMaxDepth(format!("depth {} > {}", depth, limits.max_depth)),
            ));
            return;
        }

        let Value::Object(obj) = value else {
            errors.push(FieldError::new(
                path,
                ValidationError::InvalidType(format!("expected object, got {}", describe(value))),
            ));
            return;
        };

        for (name, field) in &self.fields {
            let field_path = child_path(path, name);
            match obj.get(name) {
                // Optional fields may be omitted or explicitly null
                None | Some(Value::Null) => {
                    if field.required {
                        errors.push(FieldError::new(field_path, ValidationError::MissingField));
                    }
                }
                Some(field_value) => {
                    field.check(field_value, &field_path, depth + 1, limits, errors);
                }
            }
        }

        if !self.allow_additional_fields {
            for name in obj.keys() {
                if !self.fields.contains_key(name) {
                    errors.push(FieldError::new(child_path(path, name), ValidationError::UnknownField));
                }
            }
        }
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldSchema {
    /// Create a new string field schema
    pub fn string() -> FieldSchemaBuilder {
        FieldSchemaBuilder::new(FieldType::String)
    }

    /// Create a new boolean field schema
    pub fn boolean() -> FieldSchemaBuilder {
        FieldSchemaBuilder::new(FieldType::Boolean)
    }

    /// Create a new object field schema
    pub fn object(schema: Schema) -> FieldSchemaBuilder {
        let mut builder = FieldSchemaBuilder::new(FieldType::Object);
        builder.schema.object_schema = Some(Box::new(schema));
        builder
    }

    /// Create a new array field schema
    pub fn array(item_schema: FieldSchema) -> FieldSchemaBuilder {
        let mut builder = FieldSchemaBuilder::new(FieldType::Array);
        builder.schema.array_item_schema = Some(Box::new(item_schema));
        builder
    }

    /// Field type
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Whether the field must be present
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Default value, if any
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    fn check(
        &self,
        value: &Value,
        path: &str,
        depth: usize,
        limits: &Limits,
        errors: &mut Vec<FieldError>,
    ) {
        match (self.field_type, value) {
            (FieldType::String, Value::String(s)) => {
                let len = s.chars().count();
                let max_len = self.max_length.unwrap_or(limits.max_string_len);

                if self.non_blank && s.trim().is_empty() {
                    errors.push(FieldError::new(
                        path,
                        ValidationError::TooShort("blank".to_string()),
                    ));
                    return;
                }

                if let Some(min_len) = self.min_length {
                    if len < min_len {
                        errors.push(FieldError::new(
                            path,
                            ValidationError::TooShort(format!("length {} < {}", len, min_len)),
                        ));
                        return;
                    }
                }

                if len > max_len {
                    errors.push(FieldError::new(
                        path,
                        ValidationError::TooLong(format!("length {} > {}", len, max_len)),
                    ));
                    return;
                }
            }
            (FieldType::Boolean, Value::Bool(_)) => {}
            (FieldType::Object, Value::Object(_)) => {
                if let Some(schema) = &self.object_schema {
                    schema.check_object(value, path, depth, limits, errors);
                }
                return;
            }
            (FieldType::Array, Value::Array(items)) => {
                let max_len = self.max_length.unwrap_or(limits.max_array_len);

                if let Some(min_len) = self.min_length {
                    if items.len() < min_len {
                        errors.push(FieldError::new(
                            path,
                            ValidationError::TooShort(format!("{} items < {}", items.len(), min_len)),
                        ));
                        return;
                    }
                }

                if items.len() > max_len {
                    errors.push(FieldError::new(
                        path,
                        ValidationError::TooLong(format!("{} items > {}", items.len(), max_len)),
                    ));
                    return;
                }

                if let Some(item_schema) = &self.array_item_schema {
                    for (idx, item) in items.iter().enumerate() {
                        let item_path = format!("{}[{}]", path, idx);
                        if item.is_null() {
                            errors.push(FieldError::new(
                                item_path,
                                ValidationError::InvalidType("expected item, got null".to_string()),
                            ));
                            continue;
                        }
                        item_schema.check(item, &item_path, depth + 1, limits, errors);
                    }
                }
                return;
            }
            _ => {
                errors.push(FieldError::new(
                    path,
                    ValidationError::InvalidType(format!(
                        "expected {}, got {}",
                        self.field_type.as_json_type(),
                        describe(value)
                    )),
                ));
                return;
            }
        }

        // Check enum values if specified
        if let Some(enum_values) = &self.enum_values {
            if !enum_values.contains(value) {
                let allowed = enum_values
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                errors.push(FieldError::new(path, ValidationError::NotAllowed(allowed)));
            }
        }
    }

    fn to_json_schema(&self) -> Value {
        let mut schema = match (&self.object_schema, &self.array_item_schema) {
            (Some(object), _) => object.to_json_schema(),
            (None, Some(items)) => json!({ "type": "array", "items": items.to_json_schema() }),
            (None, None) => json!({ "type": self.field_type.as_json_type() }),
        };

        let length_keys = match self.field_type {
            FieldType::Array => Some(("minItems", "maxItems")),
            FieldType::String => Some(("minLength", "maxLength")),
            _ => None,
        };
        if let Some((min_key, max_key)) = length_keys {
            if let Some(min) = self.min_length {
                schema[min_key] = json!(min);
            }
            if let Some(max) = self.max_length {
                schema[max_key] = json!(max);
            }
        }
        if self.non_blank {
            schema["pattern"] = json!(r"\S");
        }
        if let Some(values) = &self.enum_values {
            schema["enum"] = Value::Array(values.clone());
        }
        if let Some(default) = &self.default {
            schema["default"] = default.clone();
        }
        if let Some(description) = &self.description {
            schema["description"] = Value::String(description.clone());
        }
        schema
    }
}

/// Builder for field schemas
#[derive(Debug)]
pub struct FieldSchemaBuilder {
    schema: FieldSchema,
}

impl FieldSchemaBuilder {
    /// Create a new field schema builder
    fn new(field_type: FieldType) -> Self {
        Self {
            schema: FieldSchema {
                field_type,
                required: false,
                description: None,
                object_schema: None,
                array_item_schema: None,
                enum_values: None,
                default: None,
                min_length: None,
                max_length: None,
                non_blank: false,
            },
        }
    }

    /// Set enum values
    pub fn with_enum(mut self, values: Vec<Value>) -> Self {
        self.schema.enum_values = Some(values);
        self
    }

    /// Restrict a string field to the given literals
    pub fn one_of(self, literals: &[&str]) -> Self {
        self.with_enum(literals.iter().map(|s| Value::String((*s).to_string())).collect())
    }

    /// Set the value used when the field is absent
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.schema.default = Some(default.into());
        self
    }

    /// Set minimum length for strings/arrays
    pub fn with_min_length(mut self, min: usize) -> Self {
        self.schema.min_length = Some(min);
        self
    }

    /// Require at least one non-whitespace character
    pub fn non_blank(mut self) -> Self {
        self.schema.non_blank = true;
        self
    }

    /// Set maximum length for strings/arrays
    pub fn with_max_length(mut self, max: usize) -> Self {
        self.schema.max_length = Some(max);
        self
    }

    /// Attach a description
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.schema.description = Some(description.into());
        self
    }

    /// Build the field schema
    pub fn build(self) -> FieldSchema {
        self.schema
    }
}

/// Schema builder for constructing schemas fluently
#[derive(Debug)]
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    /// Create a new schema builder
    pub fn new() -> Self {
        Self {
            schema: Schema::new(),
        }
    }

    /// Add a required field
    pub fn required_field(mut self, name: &str, field_schema: FieldSchema) -> Self {
        let mut field = field_schema;
        field.required = true;
        self.schema.fields.insert(name.to_string(), field);
        self
    }

    /// Add an optional field
    pub fn optional_field(mut self, name: &str, field_schema: FieldSchema) -> Self {
        let mut field = field_schema;
        field.required = false;
        self.schema.fields.insert(name.to_string(), field);
        self
    }

    /// Allow additional fields not in the schema
    pub fn allow_additional_fields(mut self, allow: bool) -> Self {
        self.schema.allow_additional_fields = allow;
        self
    }

    /// Attach a description
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.schema.description = Some(description.into());
        self
    }

    /// Override the global caps applied to every field
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.schema.limits = limits;
        self
    }

    /// Build the schema
    pub fn build(self) -> Schema {
        self.schema
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
