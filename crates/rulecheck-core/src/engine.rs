//! Rule engine
//!
//! Drives the four checks over every record of every document and
//! collects the results into a [`ValidationReport`]. The engine holds no
//! mutable state: each check returns its own findings and the driver
//! concatenates them in canonical order (file, record, category, rule
//! declaration order).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::rules::{
    check_dependency, check_length, check_mandatory, check_type, RuleCategory, RuleSet,
};
use crate::source::SourceDocument;
use crate::value::Record;
use crate::violation::{Finding, RecordId, Violation};

/// Evaluates a rule set against parsed documents
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    rules: RuleSet,
}

impl RuleEngine {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// All findings for one record, in category order.
    ///
    /// Every category is evaluated even when an earlier one already
    /// reported the same field.
    pub fn check_record(&self, record: &Record) -> Vec<Finding> {
        let mut findings = check_mandatory(record, &self.rules.mandatory);
        findings.extend(check_dependency(record, &self.rules.dependency));
        findings.extend(check_type(record, &self.rules.types));
        findings.extend(check_length(record, &self.rules.length));
        findings
    }

    /// Violations for one document, in record order
    pub fn check_document(&self, document: &SourceDocument) -> Vec<Violation> {
        let file = document.display_name();
        let _span = tracing::debug_span!("document", file = %file).entered();

        let violations: Vec<Violation> = document
            .records()
            .iter()
            .enumerate()
            .flat_map(|(index, record)| {
                let id = record_id(record, index);
                self.check_record(record)
                    .into_iter()
                    .map(move |finding| (id.clone(), finding))
            })
            .map(|(id, finding)| Violation::new(file.as_str(), id, finding))
            .collect();

        tracing::debug!(
            records = document.records().len(),
            violations = violations.len(),
            "Checked document"
        );
        violations
    }

    /// Validate documents in the order given
    pub fn validate(&self, documents: &[SourceDocument]) -> ValidationReport {
        let violations = documents
            .iter()
            .flat_map(|document| self.check_document(document))
            .collect();

        ValidationReport {
            violations,
            files_checked: documents.len(),
            records_checked: documents.iter().map(|d| d.records().len()).sum(),
        }
    }
}

/// Validate documents against a rule set
pub fn validate(documents: &[SourceDocument], rules: &RuleSet) -> ValidationReport {
    RuleEngine::new(rules.clone()).validate(documents)
}

fn record_id(record: &Record, index: usize) -> RecordId {
    match record.name() {
        Some(name) => RecordId::Name(name),
        None => RecordId::Position(index + 1),
    }
}

/// Outcome of a validation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Violations in canonical order
    pub violations: Vec<Violation>,
    pub files_checked: usize,
    pub records_checked: usize,
}

impl ValidationReport {
    /// True when no violation was found
    pub fn is_success(&self) -> bool {
        self.violations.is_empty()
    }

    /// One message per violation, in report order
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }

    /// Number of violations per category; categories without any are included
    pub fn counts_by_category(&self) -> BTreeMap<RuleCategory, usize> {
        let mut counts: BTreeMap<RuleCategory, usize> =
            RuleCategory::ALL.into_iter().map(|c| (c, 0)).collect();
        for violation in &self.violations {
            *counts.entry(violation.category).or_default() += 1;
        }
        counts
    }

    /// Violations reported for one file
    pub fn violations_in<'a>(&'a self, file: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations.iter().filter(move |v| v.file == file)
    }
}
