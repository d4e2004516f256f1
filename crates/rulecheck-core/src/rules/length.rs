//! Length bound rules
//!
//! Applies to string and integer values only. Other kinds are skipped.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fmt;

use super::{mapping_entries, RuleCategory, RuleWarning};
use crate::value::{measured_length, Record, ValueKind};
use crate::violation::{Finding, ViolationKind};

/// Allowed length of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthBound {
    /// Written as `[n]`
    Exact(usize),
    /// Written as `[min, max]`, both ends inclusive
    Range { min: usize, max: usize },
}

impl LengthBound {
    pub fn contains(&self, length: usize) -> bool {
        match *self {
            LengthBound::Exact(n) => length == n,
            LengthBound::Range { min, max } => (min..=max).contains(&length),
        }
    }

    /// Parse the list form used in rule documents
    fn from_value(value: &Value) -> Result<Self, String> {
        let items = match value {
            Value::Sequence(items) => items,
            Value::Tagged(tagged) => return Self::from_value(&tagged.value),
            other => {
                return Err(format!(
                    "expected a list of one or two lengths, found {}",
                    ValueKind::of(other)
                ))
            }
        };

        let mut lengths = Vec::with_capacity(items.len());
        for item in items {
            let length = item
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| format!("length must be a non-negative integer, found {:?}", item))?;
            lengths.push(length);
        }

        match lengths.as_slice() {
            [n] => Ok(LengthBound::Exact(*n)),
            [min, max] => Ok(LengthBound::Range {
                min: *min,
                max: *max,
            }),
            other => Err(format!(
                "expected a list of one or two lengths, found {} entries",
                other.len()
            )),
        }
    }
}

impl fmt::Display for LengthBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthBound::Exact(n) => write!(f, "exactly {}", n),
            LengthBound::Range { min, max } => write!(f, "between {} and {}", min, max),
        }
    }
}

/// Length bound for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthRule {
    pub field: String,
    pub bound: LengthBound,
}

impl LengthRule {
    pub fn new(field: impl Into<String>, bound: LengthBound) -> Self {
        Self {
            field: field.into(),
            bound,
        }
    }
}

pub(crate) fn parse(body: &Value, warnings: &mut Vec<RuleWarning>) -> Vec<LengthRule> {
    let category = RuleCategory::Length;
    let mut rules = Vec::new();

    for (field, bound) in mapping_entries(category, body, warnings) {
        match LengthBound::from_value(bound) {
            Ok(bound) => {
                if let LengthBound::Range { min, max } = bound {
                    if min > max {
                        warnings.push(RuleWarning::new(
                            Some(category),
                            Some(field),
                            format!("minimum {} exceeds maximum {}; no value can satisfy it", min, max),
                        ));
                    }
                }
                rules.push(LengthRule::new(field, bound));
            }
            Err(message) => warnings.push(RuleWarning::new(Some(category), Some(field), message)),
        }
    }

    rules
}

/// Check length bounds against one record
pub fn check_length(record: &Record, rules: &[LengthRule]) -> Vec<Finding> {
    rules
        .iter()
        .filter_map(|rule| {
            let value = record.field(&rule.field).value()?;
            let actual = measured_length(value)?;
            if rule.bound.contains(actual) {
                return None;
            }
            Some(Finding::new(
                RuleCategory::Length,
                rule.field.as_str(),
                ViolationKind::LengthMismatch {
                    actual,
                    bound: rule.bound,
                },
            ))
        })
        .collect()
}
