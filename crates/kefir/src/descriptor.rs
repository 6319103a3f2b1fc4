//! UI descriptors
//!
//! A UI description is an ordered list of descriptors. Each one is either
//! a bare string (`"br"`, `"hr"`, `"css: ..."` or paragraph text) or a
//! record whose `type` field picks the element to build.

use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::{FieldError, KefirError};

/// One item of a UI description
#[derive(Debug, Clone, PartialEq)]
pub enum Descriptor {
    /// Bare string
    Directive(String),
    /// Record selecting an element by its `type` field
    Element(Record),
    /// `null`, numbers and booleans; skipped with a diagnostic
    Invalid(Value),
}

impl Descriptor {
    /// Classify a JSON value
    ///
    /// Arrays are records without fields, so they report a missing `type`.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(s) => Self::Directive(s),
            Value::Object(fields) => Self::Element(Record { fields }),
            Value::Array(_) => Self::Element(Record::default()),
            other => Self::Invalid(other),
        }
    }
}

impl From<Value> for Descriptor {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

impl From<&str> for Descriptor {
    fn from(s: &str) -> Self {
        Self::Directive(s.to_string())
    }
}

impl From<String> for Descriptor {
    fn from(s: String) -> Self {
        Self::Directive(s)
    }
}

impl From<Record> for Descriptor {
    fn from(record: Record) -> Self {
        Self::Element(record)
    }
}

impl<'de> Deserialize<'de> for Descriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// Parse a JSON array of descriptors
pub fn parse_descriptors(json: &str) -> Result<Vec<Descriptor>, KefirError> {
    match serde_json::from_str::<Value>(json)? {
        Value::Array(items) => Ok(items.into_iter().map(Descriptor::from_value).collect()),
        other => Err(KefirError::NotAnArray {
            found: value_kind(&other),
        }),
    }
}

/// Element kinds a record can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Text,
    Button,
    Link,
    Select,
    Image,
    Input,
    Div,
}

impl ElementKind {
    /// Resolve a `type` value, aliases included
    pub fn from_type_name(name: &str) -> Option<Self> {
        Some(match name {
            "text" | "p" => Self::Text,
            "button" | "btn" => Self::Button,
            "link" | "a" => Self::Link,
            "select" => Self::Select,
            "img" | "image" => Self::Image,
            "input" => Self::Input,
            "div" => Self::Div,
            _ => return None,
        })
    }

    /// Tag of the element this kind produces
    pub fn tag(self) -> &'static str {
        match self {
            Self::Text => "p",
            Self::Button => "button",
            Self::Link => "a",
            Self::Select => "select",
            Self::Image => "img",
            Self::Input => "input",
            Self::Div => "div",
        }
    }
}

/// Opaque reference to a UI action
///
/// Carried into an event attribute verbatim and never executed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Handler(String);

impl Handler {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fields of a record descriptor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Start a record with the given `type`
    pub fn new(type_name: &str) -> Self {
        Self::default().with("type", type_name)
    }

    /// Set a field
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    /// Raw field access
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// `type`, when it is a string
    pub fn type_name(&self) -> Option<&str> {
        self.fields.get("type").and_then(Value::as_str)
    }

    /// `id`, when present and not blank
    pub fn id(&self) -> Result<Option<String>, FieldError> {
        Ok(self.scalar("id")?.filter(|id| !id.trim().is_empty()))
    }

    /// Optional scalar field rendered as text
    ///
    /// Absent and `null` both read as `None`.
    pub fn scalar(&self, field: &str) -> Result<Option<String>, FieldError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => scalar_text(field, value).map(Some),
        }
    }

    /// Required scalar field rendered as text
    pub fn required_scalar(&self, field: &str) -> Result<String, FieldError> {
        self.scalar(field)?.ok_or_else(|| FieldError::missing(field))
    }

    /// Required array field
    pub fn array(&self, field: &str) -> Result<&[Value], FieldError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Err(FieldError::missing(field)),
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(FieldError::WrongType {
                field: field.to_string(),
                expected: "an array",
                found: value_kind(other),
            }),
        }
    }

    /// `action` as a handler reference
    pub fn action(&self) -> Result<Option<Handler>, FieldError> {
        match self.fields.get("action") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(reference)) => Ok(Some(Handler::new(reference.as_str()))),
            Some(other) => Err(FieldError::WrongType {
                field: "action".to_string(),
                expected: "a string",
                found: value_kind(other),
            }),
        }
    }

    /// `action_type`, checked to be usable as an attribute name
    pub fn action_type(&self) -> Result<Option<String>, FieldError> {
        let Some(name) = self.scalar("action_type")? else {
            return Ok(None);
        };
        if is_attribute_name(&name) {
            Ok(Some(name))
        } else {
            Err(FieldError::InvalidAttributeName { name })
        }
    }
}

/// Render a scalar JSON value as text
pub(crate) fn scalar_text(field: &str, value: &Value) -> Result<String, FieldError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(FieldError::WrongType {
            field: field.to_string(),
            expected: "a string, number or boolean",
            found: value_kind(other),
        }),
    }
}

fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|c| {
            c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '>' | '<' | '/' | '=')
        })
}

/// Short name of a JSON value's type, for messages
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
