//! Settings file support
//!
//! Settings come from an optional TOML file. Command-line flags and their
//! environment variables take precedence over anything set here.
//!
//! ```toml
//! search_dirs = ["resources", "stacks"]
//! extensions = ["yaml", "yml"]
//! format = "plain"
//! color = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;
use crate::error::{CliError, Result};

/// Settings file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "rulecheck.toml";

/// Directories searched when no paths are given on the command line
pub const DEFAULT_SEARCH_DIRS: [&str; 2] = ["yaml_files", "yaml_files2"];

/// Extensions of data files picked up from directories
pub const DEFAULT_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Resolved tool settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directories searched recursively when no paths are given
    pub search_dirs: Vec<PathBuf>,
    /// File extensions treated as data files, without the dot
    pub extensions: Vec<String>,
    /// Report format
    pub format: OutputFormat,
    /// Whether the table format uses colors
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search_dirs: DEFAULT_SEARCH_DIRS.iter().map(PathBuf::from).collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            format: OutputFormat::default(),
            color: true,
        }
    }
}

impl Settings {
    /// Parse settings from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a file that must exist
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!(
                "Failed to read settings file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&text).map_err(|e| match e {
            CliError::ConfigError(msg) => {
                CliError::ConfigError(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })
    }

    /// Resolve settings for a run.
    ///
    /// An explicit path must point at a readable file. Without one, the
    /// default file in `working_dir` is used when present, otherwise the
    /// built-in defaults apply.
    pub fn resolve(explicit: Option<&Path>, working_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!(settings = %path.display(), "Loading settings");
            return Self::from_file(path);
        }

        let candidate = working_dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!(settings = %candidate.display(), "Loading settings");
            Self::from_file(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        if self.extensions.iter().any(|e| e.trim().is_empty()) {
            return Err(CliError::config_error("extensions must not be empty strings"));
        }
        Ok(())
    }

    /// Extensions normalised to lowercase without a leading dot
    pub fn normalized_extensions(&self) -> Vec<String> {
        normalize_extensions(&self.extensions)
    }
}

pub(crate) fn normalize_extensions(extensions: &[String]) -> Vec<String> {
    extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(
            settings.search_dirs,
            vec![PathBuf::from("yaml_files"), PathBuf::from("yaml_files2")]
        );
        assert_eq!(settings.extensions, vec!["yaml", "yml"]);
        assert_eq!(settings.format, OutputFormat::Table);
        assert!(settings.color);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = Settings::from_toml_str("format = \"plain\"\n").unwrap();
        assert_eq!(settings.format, OutputFormat::Plain);
        assert_eq!(settings.extensions, vec!["yaml", "yml"]);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Settings::from_toml_str("colour = false\n").unwrap_err();
        assert!(matches!(err, CliError::ConfigError(_)));
    }

    #[test]
    fn test_empty_extension_is_rejected() {
        assert!(Settings::from_toml_str("extensions = [\"\"]\n").is_err());
    }

    #[test]
    fn test_normalized_extensions() {
        let settings = Settings::from_toml_str("extensions = [\".YAML\", \" yml \"]\n").unwrap();
        assert_eq!(settings.normalized_extensions(), vec!["yaml", "yml"]);
    }

    #[test]
    fn test_resolve_prefers_explicit_then_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Settings::resolve(None, dir.path()).unwrap(), Settings::default());

        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "color = false\n").unwrap();
        assert!(!Settings::resolve(None, dir.path()).unwrap().color);

        let other = dir.path().join("other.toml");
        std::fs::write(&other, "format = \"json\"\n").unwrap();
        let settings = Settings::resolve(Some(&other), dir.path()).unwrap();
        assert_eq!(settings.format, OutputFormat::Json);
        assert!(settings.color);
    }

    #[test]
    fn test_resolve_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::resolve(Some(&dir.path().join("nope.toml")), dir.path()).unwrap_err();
        assert!(matches!(err, CliError::ConfigError(_)));
    }
}
