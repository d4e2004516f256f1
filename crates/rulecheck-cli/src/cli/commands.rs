//! CLI command definitions for rulecheck
//!
//! Provides Clap-based command definitions for validating data files and
//! inspecting rule documents.

use clap::{Parser, Subcommand};
use rulecheck_core::{RuleEngine, RuleSet, SourceDocument};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::output::{OutputFormat, ReportOutput, RulesOutput};
use super::ExitCode;
use crate::discovery::{FileDiscovery, MissingRoot};
use crate::error::Result;
use crate::logging::LogFormat;

/// rulecheck CLI
///
/// Validate YAML resource files against mandatory, dependency, type and
/// length rules.
#[derive(Parser, Debug)]
#[command(name = "rulecheck")]
#[command(about = "Validate YAML resource files against a rule document", long_about = None)]
#[command(version)]
pub struct RuleCheckCli {
    /// Output verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Settings file (defaults to ./rulecheck.toml when present)
    #[arg(long, global = true, env = "RULECHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log output format
    #[arg(long, value_enum, global = true, default_value = "text")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate data files against a rule document
    ///
    /// Each path may be a file or a directory searched recursively. Without
    /// paths, the configured search directories are used.
    Validate {
        /// Rule document with mandatory, dependency, type and length rules
        #[arg(short, long, env = "RULECHECK_RULES")]
        rules: PathBuf,

        /// Data files or directories to validate
        paths: Vec<PathBuf>,

        /// Output format for the report
        #[arg(long, value_enum, env = "RULECHECK_FORMAT")]
        format: Option<OutputFormat>,

        /// File extension to pick up from directories (repeatable)
        #[arg(long = "ext", value_name = "EXT")]
        extensions: Vec<String>,
    },

    /// Show the rules a rule document defines
    ///
    /// Prints the normalised rules and any entries that were ignored
    /// because they are malformed.
    Rules {
        /// Rule document to inspect
        #[arg(short, long, env = "RULECHECK_RULES")]
        rules: PathBuf,

        /// Output format
        #[arg(long, value_enum, env = "RULECHECK_FORMAT")]
        format: Option<OutputFormat>,
    },
}

/// Fully resolved inputs of the validate command
#[derive(Debug, Clone)]
pub struct ValidateRequest {
    pub rules: PathBuf,
    pub paths: Vec<PathBuf>,
    pub format: OutputFormat,
    pub extensions: Vec<String>,
    pub search_dirs: Vec<PathBuf>,
}

/// Execute the validate command
pub fn execute_validate<W: Write>(request: &ValidateRequest, out: &mut W) -> Result<ExitCode> {
    let start = Instant::now();

    let rules = RuleSet::load(&request.rules)?;

    let discovery = FileDiscovery::new(&request.extensions);
    let files = if request.paths.is_empty() {
        discovery.discover(&request.search_dirs, MissingRoot::Skip)?
    } else {
        discovery.discover(&request.paths, MissingRoot::Error)?
    };

    if files.is_empty() {
        tracing::info!("No data files found");
        writeln!(out, "No YAML files found to validate.")?;
        return Ok(ExitCode::Success);
    }

    let documents = load_documents(&files)?;
    let report = RuleEngine::new(rules).validate(&documents);

    tracing::info!(
        files = report.files_checked,
        records = report.records_checked,
        violations = report.violations.len(),
        "Validation finished"
    );

    let output = ReportOutput::from_report(&report)
        .with_duration(start.elapsed().as_millis() as u64);
    output.render(request.format, out)?;

    Ok(ExitCode::from_validation_result(!report.is_success()))
}

/// Parse every file; the first unreadable or malformed file aborts the run
fn load_documents(files: &[PathBuf]) -> Result<Vec<SourceDocument>> {
    files
        .iter()
        .map(|file| -> Result<SourceDocument> {
            tracing::info!("Validating {}...", file.display());
            Ok(SourceDocument::load(file)?)
        })
        .collect()
}

/// Execute the rules command
pub fn execute_rules<W: Write>(rules: &Path, format: OutputFormat, out: &mut W) -> Result<ExitCode> {
    let rule_set = RuleSet::load(rules)?;
    RulesOutput::new(rules, &rule_set).render(format, out)?;
    Ok(ExitCode::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        RuleCheckCli::command().debug_assert();
    }

    #[test]
    fn test_parse_validate_args() {
        let cli = RuleCheckCli::try_parse_from([
            "rulecheck",
            "-vv",
            "validate",
            "--rules",
            "rules.yaml",
            "yaml_files",
            "extra.yaml",
            "--format",
            "json",
            "--ext",
            "yml",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Validate {
                rules,
                paths,
                format,
                extensions,
            } => {
                assert_eq!(rules, PathBuf::from("rules.yaml"));
                assert_eq!(paths, vec![PathBuf::from("yaml_files"), PathBuf::from("extra.yaml")]);
                assert_eq!(format, Some(OutputFormat::Json));
                assert_eq!(extensions, vec!["yml"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rules_command() {
        let cli = RuleCheckCli::try_parse_from(["rulecheck", "rules", "-r", "rules.yaml"]).unwrap();
        assert!(matches!(cli.command, Commands::Rules { .. }));
        assert_eq!(cli.log_format, LogFormat::Text);
    }
}
