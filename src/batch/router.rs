// src/batch/router.rs
//! Sends each manifest entry to its broker extractor.
//!
//! Documents are processed one at a time in manifest order. Whatever goes
//! wrong with one document (missing file, unknown layout, bad date,
//! unreadable PDF) is recorded in its outcome and the run moves on.

use std::path::{Path, PathBuf};

use super::models::{validate_trade_date, ManifestEntry};
use super::{BatchResult, DocumentOutcome, DocumentStatus, Manifest};
use crate::extractors::{extract_document, DocumentContext, ExtractorRegistry, TradeRecord};
use crate::source::TextSource;
use crate::utils::text_debug;

pub struct Router<'a> {
    registry: &'a ExtractorRegistry,
    source: &'a dyn TextSource,
    debug_dir: Option<PathBuf>,
}

impl<'a> Router<'a> {
    pub fn new(registry: &'a ExtractorRegistry, source: &'a dyn TextSource) -> Self {
        Self {
            registry,
            source,
            debug_dir: None,
        }
    }

    /// Write annotated page text for every document into `dir`.
    pub fn with_debug_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.debug_dir = Some(dir.into());
        self
    }

    /// Processes every manifest entry. `input_dir` overrides the manifest's
    /// own base directory.
    pub fn run_batch(&self, manifest: &Manifest, input_dir: Option<&Path>) -> BatchResult {
        let base = input_dir.or(manifest.input_dir.as_deref());
        let mut batch = BatchResult::default();

        for entry in &manifest.documents {
            let path = entry.resolve_path(base);
            tracing::info!("Processing: {}", entry.document_name());

            let (outcome, records) = self.process_document(entry, &path);
            match &outcome.status {
                DocumentStatus::Processed { records } => {
                    tracing::info!("Finished {}: {} trade(s)", outcome.document, records)
                }
                DocumentStatus::Missing => {
                    tracing::warn!("File not found, skipping: {}", path.display())
                }
                DocumentStatus::NoExtractor => tracing::error!(
                    "No extractor configured for {} (layout: {:?})",
                    outcome.document,
                    outcome.layout
                ),
                DocumentStatus::InvalidDate { reason } | DocumentStatus::Failed { reason } => {
                    tracing::error!("Failed to process {}: {}", outcome.document, reason)
                }
            }

            batch.records.extend(records);
            batch.outcomes.push(outcome);
        }

        batch
    }

    /// Extracts one document. Never fails; problems end up in the outcome.
    pub fn process_document(
        &self,
        entry: &ManifestEntry,
        path: &Path,
    ) -> (DocumentOutcome, Vec<TradeRecord>) {
        let outcome = |status: DocumentStatus| DocumentOutcome {
            document: entry.document_name(),
            path: path.to_path_buf(),
            layout: entry.layout.clone(),
            status,
        };

        if !path.exists() {
            return (outcome(DocumentStatus::Missing), Vec::new());
        }

        let extractor = match entry.layout.as_deref().and_then(|id| self.registry.get(id)) {
            Some(extractor) => extractor,
            None => return (outcome(DocumentStatus::NoExtractor), Vec::new()),
        };
        tracing::info!("Using parser: {}", extractor.broker_name());

        if let Err(e) = validate_trade_date(&entry.trade_date) {
            let status = DocumentStatus::InvalidDate { reason: e.to_string() };
            return (outcome(status), Vec::new());
        }

        let pages = match self.source.pages(path) {
            Ok(pages) => pages,
            Err(e) => {
                let status = DocumentStatus::Failed { reason: e.to_string() };
                return (outcome(status), Vec::new());
            }
        };

        let ctx = DocumentContext::new(entry.document_name(), entry.trade_date.clone());
        if let Some(dir) = &self.debug_dir {
            let dump_path = dir.join(format!("{}.txt", ctx.source_document));
            if let Err(e) = text_debug::save_debug_text(&pages, extractor, &dump_path) {
                tracing::warn!("Failed to write debug text for {}: {}", ctx.source_document, e);
            }
        }

        let records = extract_document(extractor, &pages, &ctx);
        (outcome(DocumentStatus::Processed { records: records.len() }), records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::SourceError;
    use std::collections::HashMap;
    use std::fs;

    /// Serves page text by file name; the files on disk only need to exist.
    struct FakeSource {
        pages: HashMap<String, Vec<Option<String>>>,
    }

    impl FakeSource {
        fn new(docs: &[(&str, &str)]) -> Self {
            Self {
                pages: docs
                    .iter()
                    .map(|(name, text)| (name.to_string(), vec![Some(text.to_string())]))
                    .collect(),
            }
        }
    }

    impl TextSource for FakeSource {
        fn pages(&self, path: &Path) -> Result<Vec<Option<String>>, SourceError> {
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            self.pages
                .get(&name)
                .cloned()
                .ok_or_else(|| SourceError::Extraction(format!("cannot read {}", name)))
        }
    }

    fn entry(path: &str, layout: Option<&str>) -> ManifestEntry {
        ManifestEntry {
            path: PathBuf::from(path),
            trade_date: "14/12/2023".to_string(),
            layout: layout.map(str::to_string),
        }
    }

    const GRESHMA_TWO: &str = "10:11:12 6060 YES BANK LTD B 50 24.69 0.02 24.71 (1,234.50)\n\
                               10:11:13 6061 YES BANK LTD S 50 24.80 0.02 24.78 1,239.00";
    const ARIHANT_ONE: &str = "11:05:09 3301 HDFC BANK LTD S 20 1650.25 0.10 1650.15 33003.00";

    #[test]
    fn test_missing_document_does_not_stop_batch() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("first.pdf"), b"").unwrap();
        fs::write(dir.path().join("third.pdf"), b"").unwrap();

        let manifest = Manifest {
            input_dir: Some(dir.path().to_path_buf()),
            documents: vec![
                entry("first.pdf", Some("greshma")),
                entry("second.pdf", Some("greshma")),
                entry("third.pdf", Some("arihant")),
            ],
        };
        let registry = ExtractorRegistry::with_defaults();
        let source = FakeSource::new(&[("first.pdf", GRESHMA_TWO), ("third.pdf", ARIHANT_ONE)]);

        let batch = Router::new(&registry, &source).run_batch(&manifest, None);

        let statuses: Vec<&DocumentStatus> = batch.outcomes.iter().map(|o| &o.status).collect();
        assert_eq!(
            statuses,
            vec![
                &DocumentStatus::Processed { records: 2 },
                &DocumentStatus::Missing,
                &DocumentStatus::Processed { records: 1 },
            ]
        );

        let docs: Vec<&str> = batch.records.iter().map(|r| r.source_document.as_str()).collect();
        assert_eq!(docs, vec!["first.pdf", "first.pdf", "third.pdf"]);
        assert_eq!(batch.records[0].trade_number, "6060");
        assert_eq!(batch.records[1].trade_number, "6061");
        assert_eq!(batch.records[0].trade_date, "14/12/2023");
    }

    #[test]
    fn test_configuration_gaps_are_per_document() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["nolayout.pdf", "unknown.pdf", "baddate.pdf", "broken.pdf", "good.pdf"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }

        let mut bad_date = entry("baddate.pdf", Some("arihant"));
        bad_date.trade_date = "2023-12-14".to_string();

        let manifest = Manifest {
            input_dir: None,
            documents: vec![
                entry("nolayout.pdf", None),
                entry("unknown.pdf", Some("icici")),
                bad_date,
                entry("broken.pdf", Some("arihant")),
                entry("good.pdf", Some("arihant")),
            ],
        };
        let registry = ExtractorRegistry::with_defaults();
        let source = FakeSource::new(&[("baddate.pdf", ARIHANT_ONE), ("good.pdf", ARIHANT_ONE)]);

        let batch = Router::new(&registry, &source).run_batch(&manifest, Some(dir.path()));

        assert_eq!(batch.outcomes[0].status, DocumentStatus::NoExtractor);
        assert_eq!(batch.outcomes[1].status, DocumentStatus::NoExtractor);
        assert!(matches!(batch.outcomes[2].status, DocumentStatus::InvalidDate { .. }));
        assert!(matches!(batch.outcomes[3].status, DocumentStatus::Failed { .. }));
        assert_eq!(batch.outcomes[4].status, DocumentStatus::Processed { records: 1 });
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].source_document, "good.pdf");
    }

    #[test]
    fn test_debug_dump_is_written() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("note.pdf"), b"").unwrap();
        let debug_dir = dir.path().join("debug");

        let manifest = Manifest {
            input_dir: Some(dir.path().to_path_buf()),
            documents: vec![entry("note.pdf", Some("arihant"))],
        };
        let registry = ExtractorRegistry::with_defaults();
        let source = FakeSource::new(&[("note.pdf", ARIHANT_ONE)]);

        let batch = Router::new(&registry, &source)
            .with_debug_dir(&debug_dir)
            .run_batch(&manifest, None);

        assert_eq!(batch.records.len(), 1);
        let dump = fs::read_to_string(debug_dir.join("note.pdf.txt")).unwrap();
        assert!(dump.contains("[[11:05:09 3301"));
    }
}
