//! Data documents
//!
//! A data document is a YAML list of records. Anything else at the top
//! level is a structural fault and stops the run; it is never treated as
//! a file with zero records.

use serde_yaml::Value;
use std::path::{Path, PathBuf};

use crate::error::{Result, SourceError};
use crate::value::{Record, ValueKind};

/// Records parsed from one file, in file order
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    path: PathBuf,
    records: Vec<Record>,
}

impl SourceDocument {
    pub fn new(path: impl Into<PathBuf>, records: Vec<Record>) -> Self {
        Self {
            path: path.into(),
            records,
        }
    }

    /// Read and parse a data document
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(path, &text)
    }

    /// Parse a data document held in memory
    pub fn from_yaml_str(path: impl Into<PathBuf>, text: &str) -> Result<Self> {
        let path = path.into();
        let value: Value = match serde_yaml::from_str(text) {
            Ok(value) => value,
            Err(source) => return Err(SourceError::Yaml { path, source }),
        };
        Self::from_value(path, value)
    }

    /// Build a document from an already parsed YAML value
    pub fn from_value(path: impl Into<PathBuf>, value: Value) -> Result<Self> {
        let path = path.into();
        let items = match value {
            Value::Null => {
                tracing::warn!(file = %path.display(), "Document is empty");
                Vec::new()
            }
            Value::Sequence(items) => items,
            Value::Tagged(tagged) => return Self::from_value(path, tagged.value),
            other => {
                return Err(SourceError::DocumentShape {
                    path,
                    found: ValueKind::of(&other),
                })
            }
        };

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match item {
                Value::Mapping(fields) => records.push(Record::new(fields)),
                other => {
                    return Err(SourceError::RecordShape {
                        path,
                        position: index + 1,
                        found: ValueKind::of(&other),
                    })
                }
            }
        }

        tracing::debug!(file = %path.display(), records = records.len(), "Parsed document");
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// File name as shown in messages
    pub fn display_name(&self) -> String {
        self.path.display().to_string()
    }
}
