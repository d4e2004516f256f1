//! rulecheck CLI
//!
//! # Usage
//!
//! ```bash
//! # Validate the configured search directories
//! rulecheck validate --rules rules.yaml
//!
//! # Validate a single file and print one message per line
//! rulecheck validate -r rules.yaml yaml_files/app.yaml --format plain
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success - no violations
//! - 1: At least one rule violation
//! - 3: Invalid input, arguments or settings
//! - 4: File not found, unreadable or unparseable
//! - 10: Internal error

use clap::error::ErrorKind;
use clap::Parser;
use rulecheck_cli::{run_cli, CliError, RuleCheckCli};

fn main() {
    let cli = match RuleCheckCli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => e.exit(),
            _ => {
                let _ = e.print();
                std::process::exit(CliError::from(e).exit_code().into());
            }
        },
    };

    let exit_code = run_cli(cli);
    std::process::exit(exit_code.into());
}
