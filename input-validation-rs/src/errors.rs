//! Error handling for the validation library
//!
//! Individual violations are `ValidationError`s. A schema check reports every
//! violation it finds as a `FieldError` (violation + field path), collected in
//! a `CompositeError`.

use std::fmt;
use serde::Serialize;
use thiserror::Error;

/// Result type for schema validation
pub type ValidationResult<T> = Result<T, CompositeError>;

/// A single structural violation
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ValidationError {
    /// Input is too long (string or array)
    #[error("exceeds maximum length: {0}")]
    TooLong(String),

    /// Input is too short (string or array)
    #[error("is shorter than minimum length: {0}")]
    TooShort(String),

    /// Input type is incorrect
    #[error("invalid type: {0}")]
    InvalidType(String),

    /// A required field is absent or null
    #[error("is required")]
    MissingField,

    /// Field is not declared by the schema
    #[error("is not an allowed field")]
    UnknownField,

    /// Value is not one of the enumerated literals
    #[error("must be one of {0}")]
    NotAllowed(String),

    /// Nested values exceed maximum depth
    #[error("exceeds maximum nesting depth: {0}")]
    ExceededMaxDepth(String),
}

/// A violation located at a field path such as `keyVocabulary[1].term`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Path of the offending field; `$` denotes the record itself
    pub field: String,
    /// The violation
    pub error: ValidationError,
}

impl FieldError {
    /// Create a new field error
    pub fn new<S: Into<String>>(field: S, error: ValidationError) -> Self {
        Self {
            field: field.into(),
            error,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.error)
    }
}

/// Container for every violation found in one check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeError {
    /// Collection of field errors, in schema order
    pub errors: Vec<FieldError>,
}

impl CompositeError {
    /// Wrap a list of field errors
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// Whether any error refers to `field` or one of its children
    pub fn mentions(&self, field: &str) -> bool {
        self.errors.iter().any(|e| {
            e.field == field
                || e.field.starts_with(&format!("{}.", field))
                || e.field.starts_with(&format!("{}[", field))
        })
    }

    /// Consume into the underlying list
    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

impl fmt::Display for CompositeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [single] => write!(f, "{}", single),
            errors => {
                write!(f, "{} validation errors:", errors.len())?;
                for (idx, err) in errors.iter().enumerate() {
                    write!(f, " {}. {};", idx + 1, err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for CompositeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_display() {
        let err = FieldError::new("text", ValidationError::MissingField);
        assert_eq!(err.to_string(), "text is required");
    }

    #[test]
    fn test_composite_error() {
        let composite = CompositeError::new(vec![
            FieldError::new("text", ValidationError::TooShort("length 0 < 1".to_string())),
            FieldError::new("keyVocabulary[0].term", ValidationError::MissingField),
        ]);

        assert!(composite.mentions("text"));
        assert!(composite.mentions("keyVocabulary"));
        assert!(!composite.mentions("language"));
        assert!(composite.to_string().starts_with("2 validation errors:"));

        let single = CompositeError::new(vec![FieldError::new("language", ValidationError::MissingField)]);
        assert_eq!(single.to_string(), "language is required");
    }
}
