// src/report/mod.rs
//! Console listing and run summary.

use chrono::Utc;
use serde::Serialize;

use crate::batch::{BatchResult, DocumentOutcome};
use crate::extractors::TradeRecord;

/// Records grouped by source document: documents in first-seen order,
/// records in extraction order within each group.
pub fn group_by_document(records: &[TradeRecord]) -> Vec<(&str, Vec<&TradeRecord>)> {
    let mut groups: Vec<(&str, Vec<&TradeRecord>)> = Vec::new();

    for record in records {
        let document = record.source_document.as_str();
        match groups.iter_mut().find(|(name, _)| *name == document) {
            Some((_, group)) => group.push(record),
            None => groups.push((document, vec![record])),
        }
    }

    groups
}

/// Human-readable listing: every processed document with its trades as JSON
/// (an empty array when nothing matched), then the total.
pub fn render_listing(batch: &BatchResult) -> Result<String, serde_json::Error> {
    let groups = group_by_document(&batch.records);
    let mut listed: Vec<&str> = Vec::new();
    let mut out = String::new();

    let processed = batch
        .outcomes
        .iter()
        .filter(|o| o.is_processed())
        .map(|o| o.document.as_str());
    for document in processed {
        // the same file may appear twice in a manifest
        if listed.contains(&document) {
            continue;
        }
        listed.push(document);

        let trades: &[&TradeRecord] = groups
            .iter()
            .find(|(name, _)| *name == document)
            .map(|(_, group)| group.as_slice())
            .unwrap_or(&[]);

        out.push_str(&format!("\nTrades from: {}\n", document));
        out.push_str(&serde_json::to_string_pretty(trades)?);
        out.push('\n');
    }

    out.push_str(&format!("\nTotal Trades Extracted: {}\n", batch.records.len()));
    Ok(out)
}

/// Sidecar summary written next to the trade output.
#[derive(Debug, Serialize)]
pub struct BatchSummary<'a> {
    pub generated_at: String, // RFC 3339
    pub total_records: usize,
    pub documents_processed: usize,
    pub documents_failed: usize,
    pub documents: &'a [DocumentOutcome],
}

impl<'a> BatchSummary<'a> {
    pub fn from_batch(batch: &'a BatchResult) -> Self {
        let documents_processed = batch.outcomes.iter().filter(|o| o.is_processed()).count();
        Self {
            generated_at: Utc::now().to_rfc3339(),
            total_records: batch.records.len(),
            documents_processed,
            documents_failed: batch.outcomes.len() - documents_processed,
            documents: &batch.outcomes,
        }
    }
}
