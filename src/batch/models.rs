// src/batch/models.rs
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::extractors::TradeRecord;
use crate::utils::error::ManifestError;

/// The documents to process in one run.
///
/// ```json
/// {
///   "input_dir": "notes",
///   "documents": [
///     { "path": "AXIS.pdf", "trade_date": "18/01/2024", "layout": "axis" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Base directory for relative document paths.
    #[serde(default)]
    pub input_dir: Option<PathBuf>,
    pub documents: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub path: PathBuf,
    /// DD/MM/YYYY; contract notes are not trusted for the date.
    pub trade_date: String,
    /// Broker layout identifier. A missing layout is reported for this
    /// document only.
    #[serde(default)]
    pub layout: Option<String>,
}

impl Manifest {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(raw)?)
    }
}

impl ManifestEntry {
    /// Where the document lives, with relative paths resolved against `base`.
    pub fn resolve_path(&self, base: Option<&Path>) -> PathBuf {
        match base {
            Some(dir) if self.path.is_relative() => dir.join(&self.path),
            _ => self.path.clone(),
        }
    }

    /// File name used as `source_document` on every record.
    pub fn document_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Checks a DD/MM/YYYY trade date, including that the day exists.
pub fn validate_trade_date(value: &str) -> Result<(), ManifestError> {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10 && bytes[2] == b'/' && bytes[5] == b'/';

    if shaped && NaiveDate::parse_from_str(value, "%d/%m/%Y").is_ok() {
        Ok(())
    } else {
        Err(ManifestError::InvalidDate(value.to_string()))
    }
}

/// What happened to one manifest entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentStatus {
    Processed { records: usize },
    Missing,
    NoExtractor,
    InvalidDate { reason: String },
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentOutcome {
    pub document: String,
    pub path: PathBuf,
    pub layout: Option<String>,
    #[serde(flatten)]
    pub status: DocumentStatus,
}

impl DocumentOutcome {
    pub fn is_processed(&self) -> bool {
        matches!(self.status, DocumentStatus::Processed { .. })
    }
}

/// All records of a run, in extraction order, plus per-document outcomes in
/// manifest order.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub records: Vec<TradeRecord>,
    pub outcomes: Vec<DocumentOutcome>,
}
