// src/extractors/rudra.rs
//! Rudra Shares. The trade row (`NSE`, price, amount with a `D` day flag,
//! quantity, total) does not carry the scrip; the name is printed on the
//! line above it. That pairing depends on how the text extractor breaks
//! lines, so a reflowed page can attach the wrong name.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{accept, field, BrokerExtractor, DocumentContext, Side, TradeRecord};
use crate::utils::error::ExtractError;

static TRADE_ROW_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"NSE\s+(?P<price>\d+\.\d+)\s+(?P<amount>\d+\.\d+)D\s+(?P<qty>\d+)\s+(?P<total>\d+\.\d+)",
    )
    .expect("Failed to compile Rudra TRADE_ROW_RE")
});

const UNKNOWN_SECURITY: &str = "UNKNOWN";

pub struct RudraExtractor;

impl RudraExtractor {
    fn build_record(
        &self,
        caps: &regex::Captures,
        security: &str,
        ctx: &DocumentContext,
    ) -> Result<TradeRecord, ExtractError> {
        Ok(TradeRecord {
            source_document: ctx.source_document.clone(),
            trade_time: String::new(),
            trade_number: String::new(),
            trade_date: ctx.trade_date.clone(),
            security_description: security.to_string(),
            side: Side::Sell,
            quantity: field(caps, "qty")?.to_string(),
            price_per_unit: field(caps, "price")?.to_string(),
            net_total: field(caps, "total")?.to_string(),
        })
    }
}

impl BrokerExtractor for RudraExtractor {
    fn broker_name(&self) -> &'static str {
        "Rudra Shares"
    }

    fn pattern(&self) -> &Regex {
        &TRADE_ROW_RE
    }

    fn extract_page(&self, text: &str, ctx: &DocumentContext) -> Vec<TradeRecord> {
        let lines: Vec<&str> = text.lines().collect();
        let mut records = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            if !(line.contains("NSE") && line.contains('D')) {
                continue;
            }
            let Some(caps) = TRADE_ROW_RE.captures(line) else {
                continue;
            };

            let security = if i > 0 { lines[i - 1].trim() } else { UNKNOWN_SECURITY };
            accept(
                self.broker_name(),
                line,
                self.build_record(&caps, security, ctx),
                &mut records,
            );
        }

        records
    }
}
