//! Mandatory field rules
//!
//! Every listed field must exist on the record and hold a non-null value.

use serde_yaml::Value;

use super::{field_list, RuleCategory, RuleWarning};
use crate::value::{FieldState, Record};
use crate::violation::{Finding, ViolationKind};

pub(crate) fn parse(body: &Value, warnings: &mut Vec<RuleWarning>) -> Vec<String> {
    field_list(RuleCategory::Mandatory, None, body, warnings)
}

/// Check that each field exists and is non-null.
///
/// An absent field yields `MissingKey`, a null one `MissingValue`; a field
/// never produces both.
pub fn check_mandatory<S: AsRef<str>>(record: &Record, fields: &[S]) -> Vec<Finding> {
    fields
        .iter()
        .filter_map(|field| {
            let field = field.as_ref();
            let kind = match record.field(field) {
                FieldState::Absent => ViolationKind::MissingKey,
                FieldState::Null => ViolationKind::MissingValue,
                FieldState::Present(_) => return None,
            };
            Some(Finding::new(RuleCategory::Mandatory, field, kind))
        })
        .collect()
}
