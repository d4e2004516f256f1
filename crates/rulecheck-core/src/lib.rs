//! rulecheck core
//!
//! Validates YAML resource records against a declarative rule document.
//! Four rule categories are supported:
//!
//! - **mandatory**: fields every record must carry with a non-null value
//! - **dependency**: fields required (or forbidden) depending on a trigger
//!   field's truthiness
//! - **type**: the kind a field's value must have
//! - **length**: exact or inclusive-range length of string and integer values
//!
//! Every violation in every file is collected; validation never stops at
//! the first problem. Unreadable or malformed documents are reported as
//! [`SourceError`]s instead.
//!
//! ## Example
//!
//! ```rust
//! use rulecheck_core::{RuleEngine, RuleSet, SourceDocument};
//!
//! let rules = RuleSet::from_yaml_str("mandatory: [name, owner]").unwrap();
//! let doc = SourceDocument::from_yaml_str("services.yaml", "- name: api\n").unwrap();
//!
//! let report = RuleEngine::new(rules).validate(&[doc]);
//! assert_eq!(
//!     report.messages(),
//!     vec!["In the file services.yaml, the key owner is not present for the entry api."]
//! );
//! ```

pub mod engine;
pub mod error;
pub mod rules;
pub mod source;
pub mod value;
pub mod violation;

pub use engine::{validate, RuleEngine, ValidationReport};
pub use error::{Result, SourceError};
pub use rules::{
    check_dependency, check_length, check_mandatory, check_type, DependencyRule, ExpectedType,
    LengthBound, LengthRule, RuleCategory, RuleSet, RuleWarning, TypeRule,
};
pub use source::SourceDocument;
pub use value::{FieldState, Record, ValueKind};
pub use violation::{Finding, RecordId, Violation, ViolationKind};
