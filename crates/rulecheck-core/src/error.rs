//! Error types for loading data and rule documents
//!
//! Only structural faults are errors. Rule violations found in well-formed
//! documents are reported as [`crate::Violation`] values instead.

use std::path::PathBuf;
use thiserror::Error;

use crate::value::ValueKind;

/// A document could not be read or does not have the expected shape
#[derive(Error, Debug)]
pub enum SourceError {
    /// File could not be read
    #[error("Failed to read '{}': {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid YAML
    #[error("Invalid YAML in '{}': {}", .path.display(), .source)]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Data document is not a list of records
    #[error("'{}' must contain a list of records, found {}", .path.display(), .found)]
    DocumentShape { path: PathBuf, found: ValueKind },

    /// A list entry in a data document is not a mapping
    #[error("Entry {} in '{}' must be a mapping, found {}", .position, .path.display(), .found)]
    RecordShape {
        path: PathBuf,
        position: usize,
        found: ValueKind,
    },

    /// Rule document is not a mapping
    #[error("Rule file '{}' must contain a mapping, found {}", .path.display(), .found)]
    RulesShape { path: PathBuf, found: ValueKind },
}

impl SourceError {
    /// Path of the document that failed
    pub fn path(&self) -> &std::path::Path {
        match self {
            SourceError::Io { path, .. }
            | SourceError::Yaml { path, .. }
            | SourceError::DocumentShape { path, .. }
            | SourceError::RecordShape { path, .. }
            | SourceError::RulesShape { path, .. } => path,
        }
    }

    /// True when the file itself could not be read
    pub fn is_io(&self) -> bool {
        matches!(self, SourceError::Io { .. })
    }
}

/// Result type alias for document loading
pub type Result<T> = std::result::Result<T, SourceError>;
