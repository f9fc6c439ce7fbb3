// src/extractors/mod.rs
//! Broker-specific trade-line extractors.
//!
//! Every broker prints its contract notes in a fixed layout. Each extractor
//! owns one pattern for that layout and turns every match on a page into a
//! [`TradeRecord`]. A match that cannot be turned into a record is logged and
//! skipped; it never stops the rest of the page.

pub mod record;
pub mod registry;

pub mod arihant;
pub mod arihant_mer;
pub mod axis;
pub mod bp_equities;
pub mod dhan;
pub mod goldmine;
pub mod greshma;
pub mod javeri;
pub mod jm_financial;
pub mod kotak;
pub mod rudra;
pub mod zerodha;

use std::borrow::Cow;

use regex::{Captures, Regex};

use crate::utils::error::ExtractError;
use crate::utils::numeric::is_valid_time;

pub use record::{DocumentContext, Side, TradeRecord};
pub use registry::ExtractorRegistry;

/// One broker contract-note layout.
pub trait BrokerExtractor: Send + Sync {
    /// Human-readable broker name, used in logs.
    fn broker_name(&self) -> &'static str;

    /// The trade-line pattern, also used to highlight matches in debug dumps.
    fn pattern(&self) -> &Regex;

    /// Text the pattern runs over. Layouts whose fields wrap across lines
    /// override this to join the page into one line.
    fn prepare<'t>(&self, text: &'t str) -> Cow<'t, str> {
        Cow::Borrowed(text)
    }

    /// All trade records found on one page, in page order.
    fn extract_page(&self, text: &str, ctx: &DocumentContext) -> Vec<TradeRecord>;
}

/// Runs `extractor` over every page of a document and concatenates the results.
/// Pages without text are skipped.
pub fn extract_document(
    extractor: &dyn BrokerExtractor,
    pages: &[Option<String>],
    ctx: &DocumentContext,
) -> Vec<TradeRecord> {
    let mut records = Vec::new();

    for (index, page) in pages.iter().enumerate() {
        let text = match page.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                tracing::debug!(
                    "{}: page {} has no text, skipping",
                    ctx.source_document,
                    index + 1
                );
                continue;
            }
        };

        let page_records = extractor.extract_page(text, ctx);
        tracing::debug!(
            "{}: page {} yielded {} trade(s) via {}",
            ctx.source_document,
            index + 1,
            page_records.len(),
            extractor.broker_name()
        );
        records.extend(page_records);
    }

    records
}

/// Replaces line breaks with spaces so a pattern can span wrapped fields.
pub(crate) fn flatten(text: &str) -> Cow<'_, str> {
    if text.contains('\n') {
        Cow::Owned(text.replace("\r\n", " ").replace('\n', " "))
    } else {
        Cow::Borrowed(text)
    }
}

/// Scans `text` left to right with `pattern`, building one record per match.
pub(crate) fn scan_matches<F>(
    broker: &str,
    pattern: &Regex,
    text: &str,
    mut build: F,
) -> Vec<TradeRecord>
where
    F: FnMut(&Captures) -> Result<TradeRecord, ExtractError>,
{
    let mut records = Vec::new();
    for caps in pattern.captures_iter(text) {
        let matched = caps.get(0).map_or("", |m| m.as_str());
        accept(broker, matched, build(&caps), &mut records);
    }
    records
}

/// Pushes a built record, or logs why the matched line was dropped.
pub(crate) fn accept(
    broker: &str,
    matched: &str,
    result: Result<TradeRecord, ExtractError>,
    records: &mut Vec<TradeRecord>,
) {
    match result.and_then(check_trade_time) {
        Ok(record) => records.push(record),
        Err(e) => tracing::warn!(broker, line = matched, "Skipping malformed trade line: {}", e),
    }
}

/// Layouts without a trade time leave it empty; anything else must be HH:MM:SS.
fn check_trade_time(record: TradeRecord) -> Result<TradeRecord, ExtractError> {
    if record.trade_time.is_empty() || is_valid_time(&record.trade_time) {
        Ok(record)
    } else {
        Err(ExtractError::InvalidTime(record.trade_time))
    }
}

/// Trimmed text of a named capture group.
pub(crate) fn field<'t>(caps: &Captures<'t>, name: &'static str) -> Result<&'t str, ExtractError> {
    caps.name(name)
        .map(|m| m.as_str().trim())
        .ok_or(ExtractError::MissingField(name))
}

pub(crate) fn side(caps: &Captures, name: &'static str) -> Result<Side, ExtractError> {
    let raw = field(caps, name)?;
    Side::parse(raw).ok_or_else(|| ExtractError::InvalidSide(raw.to_string()))
}
