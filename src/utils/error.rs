// src/utils/error.rs
use thiserror::Error;

/// Failures while turning one regex match into a trade record.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Invalid number '{value}' in field {field}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Unrecognised side indicator: {0}")]
    InvalidSide(String),

    #[error("Missing capture group: {0}")]
    MissingField(&'static str),

    #[error("Invalid trade time '{0}'")]
    InvalidTime(String),
}

/// Failures while pulling page text out of a document.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a valid PDF: {0}")]
    InvalidPdf(String),

    #[error("Text extraction failed: {0}")]
    Extraction(String),
}

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Could not read manifest {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse manifest: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid trade date '{0}', expected DD/MM/YYYY")]
    InvalidDate(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
