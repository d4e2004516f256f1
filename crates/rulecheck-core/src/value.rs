//! Record and value model
//!
//! Records are kept as the parsed YAML mapping they came from. Rules never
//! inspect a value's Rust type name; they compare [`ValueKind`] tags.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fmt;

/// Kind tag for every value a parsed document can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Integer,
    Float,
    Boolean,
    Null,
    Sequence,
    Mapping,
}

impl ValueKind {
    /// Kind of a parsed YAML value. Tagged values take the kind of their content.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(n) if n.is_f64() => ValueKind::Float,
            Value::Number(_) => ValueKind::Integer,
            Value::String(_) => ValueKind::String,
            Value::Sequence(_) => ValueKind::Sequence,
            Value::Mapping(_) => ValueKind::Mapping,
            Value::Tagged(tagged) => ValueKind::of(&tagged.value),
        }
    }

    /// Canonical tag used in rule documents
    pub fn tag(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Boolean => "boolean",
            ValueKind::Null => "null",
            ValueKind::Sequence => "sequence",
            ValueKind::Mapping => "mapping",
        }
    }

    /// Resolve a tag from a rule document.
    ///
    /// Besides the canonical tags, the names older rule files used
    /// (`str`, `int`, `bool`, `dict`, `list`, `NoneType`) are accepted.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "string" | "str" => Some(ValueKind::String),
            "integer" | "int" => Some(ValueKind::Integer),
            "float" => Some(ValueKind::Float),
            "boolean" | "bool" => Some(ValueKind::Boolean),
            "null" | "none" | "nonetype" => Some(ValueKind::Null),
            "sequence" | "list" | "array" => Some(ValueKind::Sequence),
            "mapping" | "dict" | "map" | "object" => Some(ValueKind::Mapping),
            _ => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Result of looking a field up in a record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldState<'a> {
    /// The key does not exist
    Absent,
    /// The key exists with a null value
    Null,
    /// The key exists with a non-null value
    Present(&'a Value),
}

impl<'a> FieldState<'a> {
    /// True when the field exists and is not null
    pub fn is_set(&self) -> bool {
        matches!(self, FieldState::Present(_))
    }

    pub fn value(&self) -> Option<&'a Value> {
        match self {
            FieldState::Present(value) => Some(value),
            _ => None,
        }
    }
}

/// One validated entity: a field name to value mapping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Mapping,
}

impl Record {
    pub fn new(fields: Mapping) -> Self {
        Self { fields }
    }

    /// Build a record from YAML text holding a single mapping.
    ///
    /// Mostly useful in tests; documents are loaded through
    /// [`crate::SourceDocument`].
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> FieldState<'_> {
        match self.fields.get(name) {
            None => FieldState::Absent,
            Some(value) if is_null(value) => FieldState::Null,
            Some(value) => FieldState::Present(value),
        }
    }

    pub fn fields(&self) -> &Mapping {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Display identifier taken from the `name` field.
    ///
    /// Only scalar names qualify; a missing, null or structured `name`
    /// yields `None` and callers fall back to the record position.
    pub fn name(&self) -> Option<String> {
        self.field("name").value().and_then(scalar_text)
    }
}

impl From<Mapping> for Record {
    fn from(fields: Mapping) -> Self {
        Self::new(fields)
    }
}

fn is_null(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Tagged(tagged) => is_null(&tagged.value),
        _ => false,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        _ => None,
    }
}

/// Truthiness of a dependency trigger value.
///
/// Falsy: `false`, integer zero, float zero, the empty string, empty
/// sequences, empty mappings and null. Everything else is truthy,
/// including the string `"false"`.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i != 0
            } else if let Some(u) = n.as_u64() {
                u != 0
            } else {
                n.as_f64().map(|f| f != 0.0).unwrap_or(true)
            }
        }
        Value::String(s) => !s.is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

/// Boolean a YAML 1.1 parser would read from a plain string.
///
/// YAML 1.2 keeps `yes`, `no`, `on` and `off` as strings, so they are
/// truthy here. Returns the value older parsers would have produced.
pub fn yaml11_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::String(s) => match s.as_str() {
            "yes" | "Yes" | "YES" | "on" | "On" | "ON" => Some(true),
            "no" | "No" | "NO" | "off" | "Off" | "OFF" => Some(false),
            _ => None,
        },
        Value::Tagged(tagged) => yaml11_boolean(&tagged.value),
        _ => None,
    }
}

/// Length used by length rules.
///
/// Strings count Unicode scalar values. Integers count the characters of
/// their base-10 form, a leading minus sign included. Every other kind
/// returns `None` and is not length-checked.
pub fn measured_length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string().len())
            } else {
                n.as_u64().map(|u| u.to_string().len())
            }
        }
        Value::Tagged(tagged) => measured_length(&tagged.value),
        _ => None,
    }
}
