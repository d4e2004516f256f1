//! Rule set parsed from a rule document
//!
//! A rule document is a YAML mapping with up to four optional categories:
//!
//! ```yaml
//! mandatory: [name, owner]
//! dependency:
//!   enabled:
//!     mandatory: [port]
//! type:
//!   count: integer
//! length:
//!   id: [3, 4]
//! ```
//!
//! Parsing never fails on a malformed entry. The entry is dropped, a
//! [`RuleWarning`] is recorded, and the rest of the document still applies.
//! Declaration order is kept for every category.

pub mod dependency;
pub mod length;
pub mod mandatory;
pub mod type_check;

pub use dependency::{check_dependency, DependencyRule};
pub use length::{check_length, LengthBound, LengthRule};
pub use mandatory::check_mandatory;
pub use type_check::{check_type, ExpectedType, TypeRule};

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fmt;
use std::path::Path;

use crate::error::{Result, SourceError};
use crate::value::ValueKind;

/// The four rule categories, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    /// Fields every record must carry
    Mandatory,
    /// Fields gated by a trigger field's truthiness
    Dependency,
    /// Expected value kinds
    Type,
    /// Length bounds for strings and integers
    Length,
}

impl RuleCategory {
    pub const ALL: [RuleCategory; 4] = [
        RuleCategory::Mandatory,
        RuleCategory::Dependency,
        RuleCategory::Type,
        RuleCategory::Length,
    ];

    /// Key of this category in the rule document
    pub fn key(&self) -> &'static str {
        match self {
            RuleCategory::Mandatory => "mandatory",
            RuleCategory::Dependency => "dependency",
            RuleCategory::Type => "type",
            RuleCategory::Length => "length",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A rule document entry that was ignored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleWarning {
    /// Category the entry belongs to, if it could be determined
    pub category: Option<RuleCategory>,
    /// Field or key the entry was declared under
    pub key: Option<String>,
    pub message: String,
}

impl RuleWarning {
    pub(crate) fn new(
        category: Option<RuleCategory>,
        key: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            key: key.map(str::to_string),
            message: message.into(),
        }
    }
}

impl fmt::Display for RuleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.category, &self.key) {
            (Some(category), Some(key)) => write!(f, "{}.{}: {}", category, key, self.message),
            (Some(category), None) => write!(f, "{}: {}", category, self.message),
            (None, Some(key)) => write!(f, "{}: {}", key, self.message),
            (None, None) => f.write_str(&self.message),
        }
    }
}

/// Full configuration of the four checks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Fields that must exist and be non-null
    pub mandatory: Vec<String>,
    /// Trigger-gated requirements
    pub dependency: Vec<DependencyRule>,
    /// Expected kinds per field
    #[serde(rename = "type")]
    pub types: Vec<TypeRule>,
    /// Length bounds per field
    pub length: Vec<LengthRule>,
    /// Entries dropped while parsing
    #[serde(skip)]
    warnings: Vec<RuleWarning>,
}

impl RuleSet {
    /// An empty rule set; validates every record successfully
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mandatory<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mandatory.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn with_dependency(mut self, rule: DependencyRule) -> Self {
        self.dependency.push(rule);
        self
    }

    pub fn with_type(mut self, rule: TypeRule) -> Self {
        self.types.push(rule);
        self
    }

    pub fn with_length(mut self, rule: LengthRule) -> Self {
        self.length.push(rule);
        self
    }

    /// Parse a rule document held in memory
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Self::parse(Path::new("<inline>"), text)
    }

    /// Read and parse a rule document
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &text)
    }

    fn parse(path: &Path, text: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(text).map_err(|source| SourceError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        let rules = Self::from_value(&value).ok_or_else(|| SourceError::RulesShape {
            path: path.to_path_buf(),
            found: ValueKind::of(&value),
        })?;

        for warning in &rules.warnings {
            tracing::warn!(rules = %path.display(), "Ignoring rule entry: {}", warning);
        }
        tracing::debug!(
            rules = %path.display(),
            mandatory = rules.mandatory.len(),
            dependency = rules.dependency.len(),
            types = rules.types.len(),
            length = rules.length.len(),
            "Loaded rule set"
        );

        Ok(rules)
    }

    /// Build a rule set from an already parsed document.
    ///
    /// Returns `None` only when the document is neither a mapping nor
    /// empty. Malformed entries below the top level become warnings.
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = match value {
            Value::Null => return Some(Self::default()),
            Value::Mapping(map) => map,
            Value::Tagged(tagged) => return Self::from_value(&tagged.value),
            _ => return None,
        };

        let mut rules = Self::default();
        let mut warnings = Vec::new();

        for (key, body) in map {
            let Some(name) = key.as_str() else {
                warnings.push(RuleWarning::new(
                    None,
                    None,
                    format!("rule category key must be a string, found {}", ValueKind::of(key)),
                ));
                continue;
            };
            match RuleCategory::from_key(name) {
                Some(RuleCategory::Mandatory) => {
                    rules.mandatory = mandatory::parse(body, &mut warnings);
                }
                Some(RuleCategory::Dependency) => {
                    rules.dependency = dependency::parse(body, &mut warnings);
                }
                Some(RuleCategory::Type) => {
                    rules.types = type_check::parse(body, &mut warnings);
                }
                Some(RuleCategory::Length) => {
                    rules.length = length::parse(body, &mut warnings);
                }
                None => warnings.push(RuleWarning::new(
                    None,
                    Some(name),
                    "unknown rule category",
                )),
            }
        }

        rules.warnings = warnings;
        Some(rules)
    }

    /// Entries that were dropped while parsing
    pub fn warnings(&self) -> &[RuleWarning] {
        &self.warnings
    }

    /// Number of individual rules across all categories
    pub fn rule_count(&self) -> usize {
        self.mandatory.len() + self.dependency.len() + self.types.len() + self.length.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rule_count() == 0
    }
}

/// Iterate a category body that must be a mapping of field name to rule.
///
/// Non-mapping bodies and non-string keys are reported and skipped.
pub(crate) fn mapping_entries<'a>(
    category: RuleCategory,
    body: &'a Value,
    warnings: &mut Vec<RuleWarning>,
) -> Vec<(&'a str, &'a Value)> {
    let map = match body {
        Value::Null => return Vec::new(),
        Value::Mapping(map) => map,
        Value::Tagged(tagged) => return mapping_entries(category, &tagged.value, warnings),
        other => {
            warnings.push(RuleWarning::new(
                Some(category),
                None,
                format!("expected a mapping, found {}", ValueKind::of(other)),
            ));
            return Vec::new();
        }
    };

    let mut entries = Vec::with_capacity(map.len());
    for (key, rule) in map {
        match key.as_str() {
            Some(field) => entries.push((field, rule)),
            None => warnings.push(RuleWarning::new(
                Some(category),
                None,
                format!("field name must be a string, found {}", ValueKind::of(key)),
            )),
        }
    }
    entries
}

/// Read a list of field names, dropping non-string and repeated entries
pub(crate) fn field_list(
    category: RuleCategory,
    key: Option<&str>,
    body: &Value,
    warnings: &mut Vec<RuleWarning>,
) -> Vec<String> {
    let items = match body {
        Value::Null => return Vec::new(),
        Value::Sequence(items) => items,
        Value::Tagged(tagged) => return field_list(category, key, &tagged.value, warnings),
        other => {
            warnings.push(RuleWarning::new(
                Some(category),
                key,
                format!("expected a list of field names, found {}", ValueKind::of(other)),
            ));
            return Vec::new();
        }
    };

    let mut fields: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str() {
            Some(field) if fields.iter().any(|f| f == field) => warnings.push(RuleWarning::new(
                Some(category),
                key,
                format!("field '{}' listed more than once", field),
            )),
            Some(field) => fields.push(field.to_string()),
            None => warnings.push(RuleWarning::new(
                Some(category),
                key,
                format!("field name must be a string, found {}", ValueKind::of(item)),
            )),
        }
    }
    fields
}
