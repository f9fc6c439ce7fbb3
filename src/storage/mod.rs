// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::extractors::TradeRecord;
use crate::report::BatchSummary;
use crate::utils::error::StorageError;

pub struct StorageManager {
    output_path: PathBuf,
}

impl StorageManager {
    /// Creates a StorageManager writing trades to `output_path`, creating its
    /// parent directory if needed.
    pub fn new<P: AsRef<Path>>(output_path: P) -> Result<Self, StorageError> {
        let output_path = output_path.as_ref().to_path_buf();

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(StorageError::IoError)?;
            }
        }

        Ok(Self { output_path })
    }

    /// Writes all records, in extraction order, as a pretty JSON array.
    pub fn save_records(&self, records: &[TradeRecord]) -> Result<PathBuf, StorageError> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&self.output_path, json).map_err(StorageError::IoError)?;

        tracing::info!("Saved {} trade(s) to {}", records.len(), self.output_path.display());
        Ok(self.output_path.clone())
    }

    /// Writes the run summary next to the trade output as `<stem>_summary.json`.
    pub fn save_summary(&self, summary: &BatchSummary) -> Result<PathBuf, StorageError> {
        let path = self.summary_path();
        let json = serde_json::to_string_pretty(summary)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&path, json).map_err(StorageError::IoError)?;

        tracing::info!("Saved run summary to {}", path.display());
        Ok(path)
    }

    fn summary_path(&self) -> PathBuf {
        let stem = self
            .output_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "trades_output".to_string());
        self.output_path.with_file_name(format!("{}_summary.json", stem))
    }
}
