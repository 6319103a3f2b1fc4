//! Error types

use std::path::PathBuf;

use kefir_dom::DomError;

/// Failure while populating a single element from its descriptor
///
/// Never aborts a compile; it is reported and the next descriptor runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("missing required field `{field}`")]
    Missing { field: String },

    #[error("field `{field}` must be {expected}, found {found}")]
    WrongType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("`{name}` is not a valid attribute name")]
    InvalidAttributeName { name: String },

    #[error(transparent)]
    Dom(#[from] DomError),
}

impl FieldError {
    pub(crate) fn missing(field: &str) -> Self {
        Self::Missing {
            field: field.to_string(),
        }
    }
}

/// Errors surfaced outside the compiler: reading input, writing output
#[derive(Debug, thiserror::Error)]
pub enum KefirError {
    #[error("invalid UI description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("UI description must be an array, found {found}")]
    NotAnArray { found: &'static str },

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
