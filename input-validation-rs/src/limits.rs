//! Global caps applied to every field of a schema

/// Cap for strings that declare no `max_length`
pub const DEFAULT_MAX_STRING_LEN: usize = 32_768;

/// Cap for arrays that declare no `max_length`
pub const DEFAULT_MAX_ARRAY_LEN: usize = 1_000;

/// Deepest allowed nesting of objects and arrays below the root
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Caps used where a field schema sets no bound of its own
///
/// Model output is untrusted, so even unbounded fields get a ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_string_len: usize,
    pub max_array_len: usize,
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_string_len: DEFAULT_MAX_STRING_LEN,
            max_array_len: DEFAULT_MAX_ARRAY_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
