//! Compile diagnostics
//!
//! Every problem found while walking a UI description is logged through
//! `tracing` and kept here, tagged with the descriptor's 1-based index.

use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::FieldError;

/// What went wrong with a descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Neither a string nor a record
    NotADescriptor { found: &'static str },
    /// `type` missing, empty or not a string
    MissingType,
    /// A field could not be read or applied
    Field(FieldError),
}

impl DiagnosticKind {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotADescriptor { .. } => "not_a_descriptor",
            Self::MissingType => "missing_type",
            Self::Field(_) => "field_error",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotADescriptor { found } => {
                write!(f, "expected a string or an object, found {found}")
            }
            Self::MissingType => f.write_str("type is not defined or is not a string"),
            Self::Field(err) => fmt::Display::fmt(err, f),
        }
    }
}

/// A non-fatal problem with one descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based position in the UI description
    pub index: usize,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Element {}: {}", self.index, self.kind)
    }
}

impl Serialize for Diagnostic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Diagnostic", 3)?;
        state.serialize_field("index", &self.index)?;
        state.serialize_field("code", self.kind.code())?;
        state.serialize_field("message", &self.kind.to_string())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_index() {
        let diagnostic = Diagnostic {
            index: 3,
            kind: DiagnosticKind::MissingType,
        };
        assert_eq!(
            diagnostic.to_string(),
            "Element 3: type is not defined or is not a string"
        );
    }

    #[test]
    fn test_serialize() {
        let diagnostic = Diagnostic {
            index: 2,
            kind: DiagnosticKind::Field(FieldError::Missing {
                field: "text".into(),
            }),
        };
        let value = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(value["index"], 2);
        assert_eq!(value["code"], "field_error");
        assert_eq!(value["message"], "missing required field `text`");
    }
}
