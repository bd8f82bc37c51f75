//! Structural validation for the records that cross the Polyglot pipeline
//! boundary: caller input before a flow runs, and model responses before
//! they are trusted.
//!
//! A [`Schema`] is a set of named [`FieldSchema`]s (string, boolean, object,
//! array) with optional bounds, enumerated literals and declared defaults.
//! Validation collects every violation, each tagged with its field path
//! (`keyVocabulary[1].term`), into one [`CompositeError`]. The same schema
//! renders to a JSON Schema document for providers that accept one.

mod errors;
mod limits;
mod schema;

pub use errors::{CompositeError, FieldError, ValidationError, ValidationResult};
pub use limits::{Limits, DEFAULT_MAX_ARRAY_LEN, DEFAULT_MAX_DEPTH, DEFAULT_MAX_STRING_LEN};
pub use schema::{FieldSchema, FieldSchemaBuilder, FieldType, Schema, SchemaBuilder};
