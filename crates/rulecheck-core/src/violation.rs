//! Violation descriptors and their messages
//!
//! Checks emit [`Finding`]s that only know the record-local facts. The
//! engine attaches the file and record identity to build a [`Violation`].
//! Message text lives entirely in the `Display` impls below.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::rules::{LengthBound, RuleCategory};
use crate::value::ValueKind;

/// What went wrong with a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// Mandatory field is absent
    MissingKey,
    /// Mandatory field is present but null
    MissingValue,
    /// Trigger is truthy and a required field is absent or null
    ConditionalMissing { trigger: String },
    /// Trigger is falsy and a governed field is set
    ConditionalUnexpected { trigger: String },
    /// Field value has the wrong kind
    TypeMismatch { expected: String, actual: ValueKind },
    /// Field length is outside its bound
    LengthMismatch { actual: usize, bound: LengthBound },
}

impl ViolationKind {
    /// Short stable code for machine output
    pub fn code(&self) -> &'static str {
        match self {
            ViolationKind::MissingKey => "missing-key",
            ViolationKind::MissingValue => "missing-value",
            ViolationKind::ConditionalMissing { .. } => "conditional-missing",
            ViolationKind::ConditionalUnexpected { .. } => "conditional-unexpected",
            ViolationKind::TypeMismatch { .. } => "type-mismatch",
            ViolationKind::LengthMismatch { .. } => "length-mismatch",
        }
    }
}

/// A record-local violation produced by one check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub category: RuleCategory,
    pub field: String,
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl Finding {
    pub fn new(category: RuleCategory, field: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            category,
            field: field.into(),
            kind,
        }
    }
}

/// How a record is named in messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordId {
    /// Value of the record's `name` field
    Name(String),
    /// 1-based position in the file, used when `name` is unusable
    Position(usize),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Name(name) => f.write_str(name),
            RecordId::Position(position) => write!(f, "#{}", position),
        }
    }
}

/// A finding attributed to a file and a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub file: String,
    pub record: RecordId,
    pub category: RuleCategory,
    pub field: String,
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(file: impl Into<String>, record: RecordId, finding: Finding) -> Self {
        Self {
            file: file.into(),
            record,
            category: finding.category,
            field: finding.field,
            kind: finding.kind,
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Violation {
            file,
            record,
            field,
            kind,
            ..
        } = self;
        match kind {
            ViolationKind::MissingKey => write!(
                f,
                "In the file {file}, the key {field} is not present for the entry {record}."
            ),
            ViolationKind::MissingValue => write!(
                f,
                "In the file {file}, the key {field} is present, but its value is missing for the entry {record}."
            ),
            ViolationKind::ConditionalMissing { trigger } => write!(
                f,
                "In the file {file}, the key {field} is mandatory for the entry {record} when {trigger} is true."
            ),
            ViolationKind::ConditionalUnexpected { trigger } => write!(
                f,
                "In the file {file}, for the entry {record}, {trigger} is false, but the key {field} is present."
            ),
            ViolationKind::TypeMismatch { expected, actual } => write!(
                f,
                "In the file {file}, the data type of {field} is incorrect for the entry {record} (expected {expected}, found {actual})."
            ),
            ViolationKind::LengthMismatch { actual, bound } => write!(
                f,
                "In the file {file}, the length of {field} is incorrect for the entry {record} (length {actual}, expected {bound})."
            ),
        }
    }
}
