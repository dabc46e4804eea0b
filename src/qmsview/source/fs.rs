use super::{validate_records, RecordSource};
use crate::error::{QmsError, Result};
use crate::model::Record;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads records from a JSON array on disk.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `records` as pretty JSON, creating parent directories as needed.
    pub fn save(&self, records: &[Record]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(QmsError::Io)?;
            }
        }
        let content = serde_json::to_string_pretty(records).map_err(QmsError::Serialization)?;
        fs::write(&self.path, content).map_err(QmsError::Io)?;
        Ok(())
    }
}

impl RecordSource for JsonFileSource {
    fn load_records(&self) -> Result<Vec<Record>> {
        let content = fs::read_to_string(&self.path).map_err(QmsError::Io)?;
        let records: Vec<Record> =
            serde_json::from_str(&content).map_err(QmsError::Serialization)?;
        validate_records(&records)?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "loaded records");
        Ok(records)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
