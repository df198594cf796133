use super::adapter::ArchiveSource;
use super::records::ArchiveRecord;
use serde::Deserialize;
use std::collections::HashMap;
use std::convert::Infallible;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DatasetFile {
    #[serde(default)]
    records: HashMap<String, ArchiveRecord>,
}

/// A file-backed archive: a TOML dataset of named records, loaded once and
/// served from memory.
///
/// This stands in for a remote archive service during preparation runs and
/// tests; fetches are infallible and independent per record.
#[derive(Debug, Clone, Default)]
pub struct TomlArchive {
    records: HashMap<String, ArchiveRecord>,
}

impl TomlArchive {
    pub fn load(path: &Path) -> Result<Self, ArchiveLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ArchiveLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let dataset: DatasetFile =
            toml::from_str(&content).map_err(|e| ArchiveLoadError::Toml {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
        Ok(Self {
            records: dataset.records,
        })
    }

    pub fn from_records(records: HashMap<String, ArchiveRecord>) -> Self {
        Self { records }
    }

    /// All record names in the archive, sorted for deterministic iteration.
    pub fn record_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.records.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ArchiveSource for TomlArchive {
    type Error = Infallible;

    fn fetch_record(&self, record_name: &str) -> Result<Option<ArchiveRecord>, Infallible> {
        Ok(self.records.get(record_name).cloned())
    }
}

#[derive(Debug, Error)]
pub enum ArchiveLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}
