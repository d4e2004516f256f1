//! rulecheck command-line interface
//!
//! Discovers YAML data files, validates every record against a rule
//! document with [`rulecheck_core`] and reports the violations.
//!
//! ## Layout
//!
//! 1. **CLI** (`cli/`): argument parsing, command execution and report
//!    rendering in table, plain, JSON and YAML formats.
//!
//! 2. **Settings** (`config`): optional `rulecheck.toml` with search
//!    directories, extensions, default output format and coloring.
//!
//! 3. **Discovery** (`discovery`): recursive, sorted data file lookup.
//!
//! 4. **Logging** (`logging`): `tracing` subscriber on stderr.
//!
//! ## CLI Usage
//!
//! ```bash
//! # Validate the default search directories
//! rulecheck validate --rules rules.yaml
//!
//! # Validate explicit files and directories, JSON report
//! rulecheck validate -r rules.yaml yaml_files/ extra.yaml --format json
//!
//! # Show the rules a rule document defines
//! rulecheck rules -r rules.yaml
//! ```

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;

pub use cli::{Commands, ExitCode, OutputFormat, RuleCheckCli};
pub use config::Settings;
pub use discovery::{FileDiscovery, MissingRoot};
pub use error::{CliError, Result};
pub use logging::{init_logging, LogConfig, LogFormat};

/// Run the CLI and return the process exit code.
///
/// Settings are resolved from the working directory before logging starts
/// so the subscriber honours the `color` setting.
pub fn run_cli(cli: RuleCheckCli) -> ExitCode {
    let settings = match std::env::current_dir()
        .map_err(CliError::from)
        .and_then(|dir| Settings::resolve(cli.config.as_deref(), &dir))
    {
        Ok(settings) => settings,
        Err(e) => return report_error(e),
    };

    if let Err(e) = init_logging(&log_config(&cli, &settings)) {
        eprintln!("Warning: {}", e);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli::run_with_settings(cli, &settings, &mut out) {
        Ok(code) => code,
        Err(e) => report_error(e),
    }
}

/// Logging configuration for a run
pub fn log_config(cli: &RuleCheckCli, settings: &Settings) -> LogConfig {
    LogConfig::from_flags(cli.verbose, cli.quiet)
        .with_format(cli.log_format)
        .with_ansi(cli::color_enabled(cli, settings))
}

fn report_error(e: CliError) -> ExitCode {
    if !e.is_user_error() {
        tracing::debug!(error = ?e, "Internal failure");
    }
    eprintln!("Error: {}", e);
    e.exit_code()
}
