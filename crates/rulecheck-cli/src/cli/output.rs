//! Output formatting for the rulecheck CLI
//!
//! Provides report output in plain, table, JSON and YAML formats. The
//! table format is colored; coloring is switched off globally through
//! `colored::control` when requested.

use clap::ValueEnum;
use colored::Colorize;
use rulecheck_core::{RuleSet, RuleWarning, ValidationReport, Violation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format with colors
    #[default]
    Table,
    /// One message per line, nothing else
    Plain,
    /// JSON format for machine processing
    Json,
    /// YAML format
    Yaml,
}

/// Validation report as rendered by the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOutput {
    /// True when no violation was found
    pub valid: bool,
    pub files_checked: usize,
    pub records_checked: usize,
    pub violation_count: usize,
    /// Violations per rule category
    pub by_category: BTreeMap<String, usize>,
    pub violations: Vec<ViolationOutput>,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

/// Individual violation output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViolationOutput {
    pub file: String,
    pub entry: String,
    pub category: String,
    pub code: String,
    pub field: String,
    pub message: String,
}

impl ViolationOutput {
    pub fn from_violation(violation: &Violation) -> Self {
        Self {
            file: violation.file.clone(),
            entry: violation.record.to_string(),
            category: violation.category.to_string(),
            code: violation.code().to_string(),
            field: violation.field.clone(),
            message: violation.to_string(),
        }
    }
}

impl ReportOutput {
    /// Create output from a validation report
    pub fn from_report(report: &ValidationReport) -> Self {
        let valid = report.is_success();
        let violation_count = report.violations.len();

        let summary = if valid {
            "Validation successful!".to_string()
        } else {
            format!(
                "Found {} violation(s) in {} record(s) across {} file(s)",
                violation_count, report.records_checked, report.files_checked
            )
        };

        Self {
            valid,
            files_checked: report.files_checked,
            records_checked: report.records_checked,
            violation_count,
            by_category: report
                .counts_by_category()
                .into_iter()
                .map(|(category, count)| (category.to_string(), count))
                .collect(),
            violations: report
                .violations
                .iter()
                .map(ViolationOutput::from_violation)
                .collect(),
            summary,
            duration_ms: None,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, ms: u64) -> Self {
        self.duration_ms = Some(ms);
        self
    }

    /// Render output in the specified format
    pub fn render<W: Write>(&self, format: OutputFormat, out: &mut W) -> Result<()> {
        match format {
            OutputFormat::Json => render_json(self, out),
            OutputFormat::Yaml => render_yaml(self, out),
            OutputFormat::Plain => self.render_plain(out),
            OutputFormat::Table => self.render_table(out),
        }
    }

    fn render_plain<W: Write>(&self, out: &mut W) -> Result<()> {
        for violation in &self.violations {
            writeln!(out, "{}", violation.message)?;
        }
        if self.valid {
            writeln!(out, "{}", self.summary)?;
        }
        Ok(())
    }

    fn render_table<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", "Validation Results".cyan().bold())?;
        writeln!(out, "{}", "=".repeat(60))?;
        writeln!(out)?;

        let status = if self.valid { "+".green() } else { "x".red() };
        writeln!(out, "{} {}", status, self.summary)?;
        writeln!(out)?;

        writeln!(out, "{}", "Statistics:".cyan().bold())?;
        writeln!(out, "  Files:   {}", self.files_checked)?;
        writeln!(out, "  Records: {}", self.records_checked)?;
        for (category, count) in &self.by_category {
            let count = if *count > 0 {
                count.to_string().red()
            } else {
                count.to_string().normal()
            };
            writeln!(out, "  {:<10} {}", format!("{}:", category), count)?;
        }

        if !self.violations.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", "Violations:".cyan().bold())?;
            writeln!(out, "{}", "-".repeat(60))?;
            for violation in &self.violations {
                writeln!(
                    out,
                    "{} [{}] {}",
                    "x".red(),
                    violation.code.dimmed(),
                    violation.message
                )?;
            }
        }

        if let Some(duration) = self.duration_ms {
            writeln!(out)?;
            writeln!(out, "Completed in {} ms", duration.to_string().dimmed())?;
        }

        Ok(())
    }
}

/// Rule document summary as rendered by the `rules` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesOutput {
    pub source: String,
    pub rule_count: usize,
    pub rules: RuleSet,
    pub warnings: Vec<RuleWarning>,
}

impl RulesOutput {
    pub fn new(source: &Path, rules: &RuleSet) -> Self {
        Self {
            source: source.display().to_string(),
            rule_count: rules.rule_count(),
            rules: rules.clone(),
            warnings: rules.warnings().to_vec(),
        }
    }

    /// Render output in the specified format
    pub fn render<W: Write>(&self, format: OutputFormat, out: &mut W) -> Result<()> {
        match format {
            OutputFormat::Json => render_json(self, out),
            OutputFormat::Yaml => render_yaml(self, out),
            OutputFormat::Plain => self.render_plain(out),
            OutputFormat::Table => self.render_table(out),
        }
    }

    /// One `category: rule` line per rule, then one line per ignored entry
    fn render_plain<W: Write>(&self, out: &mut W) -> Result<()> {
        let rules = &self.rules;
        for field in &rules.mandatory {
            writeln!(out, "mandatory: {}", field)?;
        }
        for rule in &rules.dependency {
            writeln!(out, "dependency: {} -> {}", rule.trigger, rule.mandatory.join(", "))?;
        }
        for rule in &rules.types {
            writeln!(out, "type: {}: {}", rule.field, rule.expected)?;
        }
        for rule in &rules.length {
            writeln!(out, "length: {}: {}", rule.field, rule.bound)?;
        }
        for warning in &self.warnings {
            writeln!(out, "ignored: {}", warning)?;
        }
        Ok(())
    }

    fn render_table<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(
            out,
            "{}",
            format!("Rules: {} ({} rule(s))", self.source, self.rule_count)
                .green()
                .bold()
        )?;

        let rules = &self.rules;
        if !rules.mandatory.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", "mandatory:".cyan().bold())?;
            for field in &rules.mandatory {
                writeln!(out, "  {} {}", "-".blue(), field)?;
            }
        }
        if !rules.dependency.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", "dependency:".cyan().bold())?;
            for rule in &rules.dependency {
                writeln!(
                    out,
                    "  {} {} -> {}",
                    "-".blue(),
                    rule.trigger.bold(),
                    rule.mandatory.join(", ")
                )?;
            }
        }
        if !rules.types.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", "type:".cyan().bold())?;
            for rule in &rules.types {
                writeln!(out, "  {} {}: {}", "-".blue(), rule.field, rule.expected.to_string().yellow())?;
            }
        }
        if !rules.length.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", "length:".cyan().bold())?;
            for rule in &rules.length {
                writeln!(out, "  {} {}: {}", "-".blue(), rule.field, rule.bound)?;
            }
        }

        if !self.warnings.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", "Ignored entries:".yellow().bold())?;
            for warning in &self.warnings {
                writeln!(out, "  {} {}", "!".yellow(), warning)?;
            }
        }

        Ok(())
    }
}

fn render_json<T: Serialize, W: Write>(value: &T, out: &mut W) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    writeln!(out, "{}", json)?;
    Ok(())
}

fn render_yaml<T: Serialize, W: Write>(value: &T, out: &mut W) -> Result<()> {
    let yaml = serde_yaml::to_string(value)?;
    write!(out, "{}", yaml)?;
    Ok(())
}
