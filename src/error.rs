//! Error types with fix suggestions

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// Coarse classification of an [`EbbeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid arguments, detected before any work is done
    Usage,
    /// A requested key is absent (strict pick) or collides (strict index)
    Lookup,
    /// The input document could not be read or decoded
    Input,
}

#[derive(Error, Debug)]
pub enum EbbeError {
    // ─────────────────────────────────────────────────────────────
    // Usage errors (EBBE-010 to EBBE-011)
    // ─────────────────────────────────────────────────────────────
    #[error("EBBE-010: String path '{path}' needs a split character")]
    MissingSplitChar { path: String },

    #[error("EBBE-011: A path getter needs at least one path")]
    NoPaths,

    // ─────────────────────────────────────────────────────────────
    // Lookup errors (EBBE-020 to EBBE-030)
    // ─────────────────────────────────────────────────────────────
    #[error("EBBE-020: Key {key} not found in mapping")]
    MissingKey { key: String },

    #[error("EBBE-030: Duplicate key {key} while indexing")]
    DuplicateKey { key: String },

    // ─────────────────────────────────────────────────────────────
    // Input errors (EBBE-040)
    // ─────────────────────────────────────────────────────────────
    #[error("EBBE-040: Unsupported document: {details}")]
    InvalidDocument { details: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EbbeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EbbeError::MissingSplitChar { .. } | EbbeError::NoPaths => ErrorKind::Usage,
            EbbeError::MissingKey { .. } | EbbeError::DuplicateKey { .. } => ErrorKind::Lookup,
            EbbeError::InvalidDocument { .. }
            | EbbeError::Json(_)
            | EbbeError::Yaml(_)
            | EbbeError::Io(_) => ErrorKind::Input,
        }
    }
}

impl FixSuggestion for EbbeError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            EbbeError::MissingSplitChar { .. } => {
                Some("Pass a split character (e.g. '.') or give the path as a list of segments")
            }
            EbbeError::NoPaths => Some("Declare at least one path when building the getter"),
            EbbeError::MissingKey { .. } => {
                Some("Drop strict mode or make sure every requested key exists")
            }
            EbbeError::DuplicateKey { .. } => {
                Some("Use a key function that yields unique keys, or drop strict mode")
            }
            EbbeError::InvalidDocument { .. } => {
                Some("Mapping keys must be scalars (strings, integers, floats, booleans)")
            }
            EbbeError::Json(_) => Some("Check JSON syntax (try parsing with jq)"),
            EbbeError::Yaml(_) => Some("Check YAML syntax: indentation and quoting"),
            EbbeError::Io(_) => Some("Check file path and permissions"),
        }
    }
}
