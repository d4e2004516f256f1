//! Dependency (conditional requirement) rules
//!
//! A dependency rule names a trigger field and the fields it governs. When
//! the trigger is truthy the governed fields are required; when it is falsy
//! they must be absent or null. A record without the trigger field is not
//! checked against the rule at all.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use super::{field_list, mapping_entries, RuleCategory, RuleWarning};
use crate::value::{is_truthy, yaml11_boolean, FieldState, Record, ValueKind};
use crate::violation::{Finding, ViolationKind};

/// Fields governed by a trigger field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRule {
    /// Field whose truthiness gates the rule
    pub trigger: String,
    /// Fields required when the trigger is truthy, forbidden when falsy
    pub mandatory: Vec<String>,
}

impl DependencyRule {
    pub fn new<I, S>(trigger: impl Into<String>, mandatory: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            trigger: trigger.into(),
            mandatory: mandatory.into_iter().map(Into::into).collect(),
        }
    }
}

pub(crate) fn parse(body: &Value, warnings: &mut Vec<RuleWarning>) -> Vec<DependencyRule> {
    let category = RuleCategory::Dependency;
    let mut rules = Vec::new();

    for (trigger, rule) in mapping_entries(category, body, warnings) {
        let governed = match rule {
            Value::Mapping(map) => match map.get("mandatory") {
                Some(list) => field_list(category, Some(trigger), list, warnings),
                None => {
                    warnings.push(RuleWarning::new(
                        Some(category),
                        Some(trigger),
                        "missing 'mandatory' list",
                    ));
                    Vec::new()
                }
            },
            other => {
                warnings.push(RuleWarning::new(
                    Some(category),
                    Some(trigger),
                    format!(
                        "expected a mapping with a 'mandatory' list, found {}",
                        ValueKind::of(other)
                    ),
                ));
                Vec::new()
            }
        };

        if !governed.is_empty() {
            rules.push(DependencyRule {
                trigger: trigger.to_string(),
                mandatory: governed,
            });
        }
    }

    rules
}

/// Check conditional requirements against one record
pub fn check_dependency(record: &Record, rules: &[DependencyRule]) -> Vec<Finding> {
    rules
        .iter()
        .flat_map(|rule| check_rule(record, rule))
        .collect()
}

fn check_rule(record: &Record, rule: &DependencyRule) -> Vec<Finding> {
    let trigger_on = match record.field(&rule.trigger) {
        // Absent trigger: the rule does not apply to this record
        FieldState::Absent => return Vec::new(),
        FieldState::Null => false,
        FieldState::Present(value) => {
            if let Some(legacy) = yaml11_boolean(value) {
                tracing::warn!(
                    trigger = %rule.trigger,
                    value = ?value,
                    "Trigger is a string and counts as true; YAML 1.1 parsers would read it as {}",
                    legacy
                );
            }
            is_truthy(value)
        }
    };

    rule.mandatory
        .iter()
        .filter_map(|field| {
            let is_set = record.field(field).is_set();
            let kind = if trigger_on && !is_set {
                ViolationKind::ConditionalMissing {
                    trigger: rule.trigger.clone(),
                }
            } else if !trigger_on && is_set {
                ViolationKind::ConditionalUnexpected {
                    trigger: rule.trigger.clone(),
                }
            } else {
                return None;
            };
            Some(Finding::new(RuleCategory::Dependency, field.as_str(), kind))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port_rule() -> Vec<DependencyRule> {
        vec![DependencyRule::new("enabled", ["port"])]
    }

    #[test]
    fn test_truthy_trigger_requires_fields() {
        let record = Record::from_yaml("name: a\nenabled: true").unwrap();
        let findings = check_dependency(&record, &port_rule());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].field, "port");
        assert_eq!(
            findings[0].kind,
            ViolationKind::ConditionalMissing {
                trigger: "enabled".into()
            }
        );
    }

    #[test]
    fn test_truthy_trigger_rejects_null_field() {
        let record = Record::from_yaml("enabled: true\nport: ~").unwrap();
        assert_eq!(check_dependency(&record, &port_rule()).len(), 1);
    }

    #[test]
    fn test_falsy_trigger_forbids_fields() {
        let record = Record::from_yaml("name: a\nenabled: false\nport: 8080").unwrap();
        let findings = check_dependency(&record, &port_rule());
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].kind,
            ViolationKind::ConditionalUnexpected {
                trigger: "enabled".into()
            }
        );
    }

    #[test]
    fn test_falsy_trigger_allows_null_field() {
        let record = Record::from_yaml("enabled: false\nport: ~").unwrap();
        assert!(check_dependency(&record, &port_rule()).is_empty());
    }

    #[test]
    fn test_null_trigger_is_falsy() {
        let record = Record::from_yaml("enabled: ~\nport: 80").unwrap();
        assert_eq!(check_dependency(&record, &port_rule()).len(), 1);
    }

    #[test]
    fn test_absent_trigger_skips_rule() {
        let with_port = Record::from_yaml("name: a\nport: 8080").unwrap();
        let without_port = Record::from_yaml("name: a").unwrap();
        assert!(check_dependency(&with_port, &port_rule()).is_empty());
        assert!(check_dependency(&without_port, &port_rule()).is_empty());
    }

    #[test]
    fn test_string_false_is_truthy() {
        let record = Record::from_yaml("enabled: 'false'").unwrap();
        let findings = check_dependency(&record, &port_rule());
        assert!(matches!(
            findings[0].kind,
            ViolationKind::ConditionalMissing { .. }
        ));
    }

    #[test]
    fn test_off_string_trigger_is_truthy() {
        let record = Record::from_yaml("enabled: off\nport: 80").unwrap();
        assert!(check_dependency(&record, &port_rule()).is_empty());

        let record = Record::from_yaml("enabled: off").unwrap();
        let findings = check_dependency(&record, &port_rule());
        assert!(matches!(
            findings[0].kind,
            ViolationKind::ConditionalMissing { .. }
        ));
    }

    #[test]
    fn test_one_finding_per_governed_field() {
        let rules = vec![DependencyRule::new("tls", ["cert", "key", "ca"])];
        let record = Record::from_yaml("tls: yes-please\ncert: c.pem").unwrap();
        let fields: Vec<_> = check_dependency(&record, &rules)
            .into_iter()
            .map(|f| f.field)
            .collect();
        assert_eq!(fields, vec!["key", "ca"]);
    }

    #[test]
    fn test_parse_missing_mandatory_sub_list() {
        let value: Value = serde_yaml::from_str("enabled:\n  optional: [port]\nlogging: ~\n").unwrap();
        let mut warnings = Vec::new();
        let rules = parse(&value, &mut warnings);
        assert!(rules.is_empty());
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].key.as_deref(), Some("enabled"));
    }
}
