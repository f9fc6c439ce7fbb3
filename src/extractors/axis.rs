// src/extractors/axis.rs
//! Axis Securities: worded side (`BUY`/`SELL`) and a net amount that may be
//! comma-grouped and printed in parentheses when negative.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{field, scan_matches, side, BrokerExtractor, DocumentContext, TradeRecord};
use crate::utils::numeric::normalize_amount;

static TRADE_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<trade_time>\d{2}:\d{2}:\d{2})\s+(?P<trade_no>\d+)\s+(?P<security>.+?)\s+(?P<side>BUY|SELL)\s+(?P<qty>\d+)\s+(?P<price>[\d.]+)\s+[\d.]+\s+[\d.]+\s+(?P<net_total>[\d,().-]+)",
    )
    .expect("Failed to compile Axis TRADE_LINE_RE")
});

pub struct AxisExtractor;

impl BrokerExtractor for AxisExtractor {
    fn broker_name(&self) -> &'static str {
        "Axis Securities"
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
