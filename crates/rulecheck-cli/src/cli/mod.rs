//! CLI module for rulecheck
//!
//! This module provides the command-line interface for validating data
//! files against a rule document and for inspecting a rule document.

pub mod commands;
pub mod output;

pub use commands::{Commands, RuleCheckCli};
pub use output::{OutputFormat, ReportOutput, RulesOutput};

use std::io::Write;
use std::path::Path;

use crate::config::Settings;
use crate::error::Result;

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful execution, all validations passed
    Success = 0,
    /// At least one rule violation was found
    ValidationError = 1,
    /// Invalid input, arguments or settings
    InvalidInput = 3,
    /// Data or rule file not found, unreadable or unparseable
    FileError = 4,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    /// Determine exit code from validation result
    pub fn from_validation_result(has_violations: bool) -> Self {
        if has_violations {
            ExitCode::ValidationError
        } else {
            ExitCode::Success
        }
    }
}

/// Run the CLI with settings resolved from `working_dir`, writing the
/// report to `out`
pub fn run<W: Write>(cli: RuleCheckCli, working_dir: &Path, out: &mut W) -> Result<ExitCode> {
    let settings = Settings::resolve(cli.config.as_deref(), working_dir)?;
    run_with_settings(cli, &settings, out)
}

/// Whether colored output is enabled once flags, settings and `NO_COLOR`
/// are taken into account
pub fn color_enabled(cli: &RuleCheckCli, settings: &Settings) -> bool {
    settings.color && !cli.no_color && std::env::var_os("NO_COLOR").is_none()
}

/// Run the CLI with already resolved settings.
///
/// Flags given on the command line, or through their environment
/// variables, take precedence over the settings file.
pub fn run_with_settings<W: Write>(
    cli: RuleCheckCli,
    settings: &Settings,
    out: &mut W,
) -> Result<ExitCode> {
    colored::control::set_override(color_enabled(&cli, settings));

    match cli.command {
        Commands::Validate {
            rules,
            paths,
            format,
            extensions,
        } => {
            let request = commands::ValidateRequest {
                rules,
                paths,
                format: format.unwrap_or(settings.format),
                extensions: if extensions.is_empty() {
                    settings.extensions.clone()
                } else {
                    extensions
                },
                search_dirs: settings.search_dirs.clone(),
            };
            commands::execute_validate(&request, out)
        }
        Commands::Rules { rules, format } => {
            commands::execute_rules(&rules, format.unwrap_or(settings.format), out)
        }
    }
}
