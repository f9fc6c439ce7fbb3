// src/source/mod.rs
//! Page text for contract-note documents.
//!
//! PDFs go through `pdf-extract`; plain `.txt` dumps (for example from
//! `pdftotext`) are split into pages on form feeds. Either way the result is
//! one entry per page, `None` where a page produced no text.

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::utils::error::SourceError;

/// PDF magic bytes
const PDF_MAGIC: &[u8] = b"%PDF";
/// Maximum PDF file size (100 MB)
const MAX_PDF_SIZE: usize = 100 * 1024 * 1024;
/// Page separator in plain-text dumps
const PAGE_BREAK: char = '\x0c';

pub trait TextSource {
    /// Ordered page texts of the document at `path`.
    fn pages(&self, path: &Path) -> Result<Vec<Option<String>>, SourceError>;
}

/// Reads PDFs and pre-extracted text dumps from disk.
pub struct DocumentTextSource;

impl TextSource for DocumentTextSource {
    fn pages(&self, path: &Path) -> Result<Vec<Option<String>>, SourceError> {
        let bytes = fs::read(path).map_err(|source| SourceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());

        if is_text_dump(path) {
            return Ok(split_text_dump(&String::from_utf8_lossy(&bytes)));
        }

        validate_pdf(&bytes)?;
        extract_pdf_pages(&bytes)
    }
}

fn is_text_dump(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("txt"))
}

fn split_text_dump(text: &str) -> Vec<Option<String>> {
    text.split(PAGE_BREAK).map(non_blank).collect()
}

fn non_blank(page: &str) -> Option<String> {
    if page.trim().is_empty() {
        None
    } else {
        Some(page.to_string())
    }
}

fn validate_pdf(bytes: &[u8]) -> Result<(), SourceError> {
    if bytes.len() < 8 {
        return Err(SourceError::InvalidPdf("file too small to be a PDF".to_string()));
    }

    if bytes.len() > MAX_PDF_SIZE {
        return Err(SourceError::InvalidPdf(format!(
            "file is {} MB, maximum is {} MB",
            bytes.len() / (1024 * 1024),
            MAX_PDF_SIZE / (1024 * 1024)
        )));
    }

    if !bytes.starts_with(PDF_MAGIC) {
        return Err(SourceError::InvalidPdf("missing %PDF header".to_string()));
    }

    Ok(())
}

/// `pdf-extract` can panic on malformed files; that is reported as an
/// extraction error for this document instead of taking the batch down.
fn extract_pdf_pages(bytes: &[u8]) -> Result<Vec<Option<String>>, SourceError> {
    let pages = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
    .map_err(|_| SourceError::Extraction("PDF parser panicked".to_string()))?
    .map_err(|e| SourceError::Extraction(e.to_string()))?;

    tracing::debug!("Extracted {} page(s) of text", pages.len());
    Ok(pages.iter().map(|page| non_blank(page)).collect())
}
