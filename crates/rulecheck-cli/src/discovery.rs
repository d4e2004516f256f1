//! Data file discovery
//!
//! Roots are visited in the order given. A root that is a file is taken
//! as-is; a directory is walked recursively and files with a matching
//! extension are collected in sorted order. A file reached through more
//! than one root is only returned once.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::normalize_extensions;
use crate::error::{CliError, Result};

/// What to do with a root that does not exist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingRoot {
    /// Fail the run; used for paths named on the command line
    Error,
    /// Skip it; used for configured search directories
    Skip,
}

/// Finds data files under a set of roots
#[derive(Debug, Clone)]
pub struct FileDiscovery {
    extensions: Vec<String>,
}

impl FileDiscovery {
    pub fn new(extensions: &[String]) -> Self {
        Self {
            extensions: normalize_extensions(extensions),
        }
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                let e = e.to_lowercase();
                self.extensions.iter().any(|wanted| *wanted == e)
            })
            .unwrap_or(false)
    }

    /// Collect data files under `roots`
    pub fn discover(&self, roots: &[PathBuf], missing: MissingRoot) -> Result<Vec<PathBuf>> {
        let mut seen = HashSet::new();
        let mut files = Vec::new();

        for root in roots {
            if root.is_file() {
                if seen.insert(root.clone()) {
                    files.push(root.clone());
                }
                continue;
            }

            if !root.is_dir() {
                match missing {
                    MissingRoot::Error => {
                        return Err(CliError::file_error(format!(
                            "Path '{}' does not exist",
                            root.display()
                        )))
                    }
                    MissingRoot::Skip => {
                        tracing::debug!(dir = %root.display(), "Search directory not found, skipping");
                        continue;
                    }
                }
            }

            let found = self.walk(root)?;
            tracing::debug!(dir = %root.display(), files = found.len(), "Scanned directory");
            for path in found {
                if seen.insert(path.clone()) {
                    files.push(path);
                }
            }
        }

        Ok(files)
    }

    fn walk(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                CliError::file_error(format!("Failed to scan '{}': {}", dir.display(), e))
            })?;
            if entry.file_type().is_file() && self.matches_extension(entry.path()) {
                found.push(entry.into_path());
            }
        }
        Ok(found)
    }
}
