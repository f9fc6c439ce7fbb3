// src/extractors/goldmine.rs
//! Goldmine contract notes: order number, order time, trade number, trade
//! time, description, `B`/`S`, quantity, price, three charge columns and the
//! signed net amount, all on one line.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{field, scan_matches, side, BrokerExtractor, DocumentContext, TradeRecord};

static TRADE_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<order_no>\d{13,})\s+(?P<order_time>\d{2}:\d{2}:\d{2})\s+(?P<trade_no>\d+)\s+(?P<trade_time>\d{2}:\d{2}:\d{2})\s+(?P<security>.+?)\s+(?P<side>[BS])\s+(?P<qty>\d+)\s+(?P<price>[\d.]+)\s+[\d.]+\s+[\d.]+\s+[\d.]+\s+(?P<net_total>-?\d+\.\d+)",
    )
    .expect("Failed to compile Goldmine TRADE_LINE_RE")
});

pub struct GoldmineExtractor;

impl BrokerExtractor for GoldmineExtractor {
    fn broker_name(&self) -> &'static str {
        "Goldmine"
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
                net_total: field(caps, "net_total")?.to_string(),
            })
        })
    }
}
