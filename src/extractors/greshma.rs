// src/extractors/greshma.rs
//! Greshma Shares: single-letter side followed by brokerage, net rate and a
//! net amount that uses parentheses for debits.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{field, scan_matches, side, BrokerExtractor, DocumentContext, TradeRecord};
use crate::utils::numeric::normalize_amount;

static TRADE_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<trade_time>\d{2}:\d{2}:\d{2})\s+(?P<trade_no>\d+)\s+(?P<security>.+?)\s+(?P<side>[BS])\s+(?P<qty>\d+)\s+(?P<price>[\d.]+)\s+(?P<brokerage>[\d.]+)\s+(?P<net_rate>[\d.]+)\s+(?P<net_total>[-\d,.()]+)",
    )
    .expect("Failed to compile Greshma TRADE_LINE_RE")
});

pub struct GreshmaExtractor;

impl BrokerExtractor for GreshmaExtractor {
    fn broker_name(&self) -> &'static str {
        "Greshma Shares"
    }

    fn pattern(&self) -> &Regex {
        &TRADE_LINE_RE
    }

    fn extract_page(&self, text: &str, ctx: &DocumentContext) -> Vec<TradeRecord> {
        scan_matches(self.broker_name(), &TRADE_LINE_RE, text, |caps| {
            Ok(TradeRecord {
                source_document: ctx.source_document.clone(),
                trade_time: field(caps, "trade_time")?.to_string(),
                trade_number: field(caps, "trade_no")?.to_string(),
                trade_date: ctx.trade_date.clone(),
                security_description: field(caps, "security")?.to_string(),
                side: side(caps, "side")?,
                quantity: field(caps, "qty")?.to_string(),
                price_per_unit: field(caps, "price")?.to_string(),
                net_total: normalize_amount(field(caps, "net_total")?),
            })
        })
    }
}
