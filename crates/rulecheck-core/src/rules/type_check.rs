//! Type conformance rules
//!
//! Compares a field's [`ValueKind`] against the kind named in the rule
//! document. Absent and null fields are not type-checked.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fmt;

use super::{mapping_entries, RuleCategory, RuleWarning};
use crate::value::{Record, ValueKind};
use crate::violation::{Finding, ViolationKind};

/// Kind a field is expected to have
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpectedType {
    Kind(ValueKind),
    /// Tag that names no known kind; nothing matches it
    Unknown(String),
}

impl ExpectedType {
    pub fn from_tag(tag: &str) -> Self {
        match ValueKind::from_tag(tag) {
            Some(kind) => ExpectedType::Kind(kind),
            None => ExpectedType::Unknown(tag.to_string()),
        }
    }

    pub fn matches(&self, actual: ValueKind) -> bool {
        matches!(self, ExpectedType::Kind(kind) if *kind == actual)
    }
}

impl fmt::Display for ExpectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedType::Kind(kind) => f.write_str(kind.tag()),
            ExpectedType::Unknown(tag) => f.write_str(tag),
        }
    }
}

/// Expected kind for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRule {
    pub field: String,
    pub expected: ExpectedType,
}

impl TypeRule {
    pub fn new(field: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            field: field.into(),
            expected: ExpectedType::Kind(kind),
        }
    }
}

pub(crate) fn parse(body: &Value, warnings: &mut Vec<RuleWarning>) -> Vec<TypeRule> {
    let category = RuleCategory::Type;
    let mut rules = Vec::new();

    for (field, tag) in mapping_entries(category, body, warnings) {
        let Some(tag) = tag.as_str() else {
            warnings.push(RuleWarning::new(
                Some(category),
                Some(field),
                format!("type tag must be a string, found {}", ValueKind::of(tag)),
            ));
            continue;
        };

        let expected = ExpectedType::from_tag(tag);
        if let ExpectedType::Unknown(tag) = &expected {
            // Kept: every present value will be reported as a mismatch
            warnings.push(RuleWarning::new(
                Some(category),
                Some(field),
                format!("unknown type tag '{}'", tag),
            ));
        }
        rules.push(TypeRule {
            field: field.to_string(),
            expected,
        });
    }

    rules
}

/// Check field kinds against one record
pub fn check_type(record: &Record, rules: &[TypeRule]) -> Vec<Finding> {
    rules
        .iter()
        .filter_map(|rule| {
            let value = record.field(&rule.field).value()?;
            let actual = ValueKind::of(value);
            if rule.expected.matches(actual) {
                return None;
            }
            Some(Finding::new(
                RuleCategory::Type,
                rule.field.as_str(),
                ViolationKind::TypeMismatch {
                    expected: rule.expected.to_string(),
                    actual,
                },
            ))
        })
        .collect()
}
