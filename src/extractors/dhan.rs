// src/extractors/dhan.rs
//! Dhan order ledger. Only the one scrip traded on these notes is
//! recognised; a `D` delivery flag may trail the name and the quantity, and
//! each line ends with the exchange tag.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{field, scan_matches, side, BrokerExtractor, DocumentContext, TradeRecord};

static TRADE_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<order_no>\d{13,})\s+(?P<order_time>\d{2}:\d{2}:\d{2})\s+(?P<trade_no>\d+)\s+(?P<trade_time>\d{2}:\d{2}:\d{2})\s+(?P<security>SELAN EXPLO\. TECH LT)\s*D?\s+(?P<side>BUY|SELL)\s+(?P<qty>\d+)\s*(?:D)?\s+(?P<price>\d+\.\d+)\s+(?P<brokerage>\d+\.\d+)\s+(?P<net_rate>\d+\.\d+)\s+(?P<closing_rate>\d+\.\d+)\s+(?P<stt>\d+\.\d+)\s+(?P<net_total>-?\d+\.\d+)\s+(?:NSE-M|BSE)",
    )
    .expect("Failed to compile Dhan TRADE_LINE_RE")
});

pub struct DhanExtractor;

impl BrokerExtractor for DhanExtractor {
    fn broker_name(&self) -> &'static str {
        "Dhan"
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
