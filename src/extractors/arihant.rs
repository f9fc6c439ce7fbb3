// src/extractors/arihant.rs
//! Arihant Capital: compact lines that start at the trade time, with a
//! single-letter side.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{field, scan_matches, side, BrokerExtractor, DocumentContext, TradeRecord};

static TRADE_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<trade_time>\d{2}:\d{2}:\d{2})\s+(?P<trade_no>\d+)\s+(?P<security>.+?)\s+(?P<side>[BS])\s+(?P<qty>\d+)\s+(?P<price>[\d.]+)\s+[\d.]+\s+[\d.]+\s+(?P<net_total>[-\d.]+)",
    )
    .expect("Failed to compile Arihant TRADE_LINE_RE")
});

pub struct ArihantExtractor;

impl BrokerExtractor for ArihantExtractor {
    fn broker_name(&self) -> &'static str {
        "Arihant Capital"
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::test_support::run;
    use crate::extractors::Side;

    #[test]
    fn test_two_lines_in_page_order() {
        let text = "11:05:09 3301 HDFC BANK LTD S 20 1650.25 0.10 1650.15 33003.00\n\
                    11:06:10 3302 INFOSYS LTD B 4 1500.00 0.10 1500.10 -6000.40";
        let records = run(&ArihantExtractor, text);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].security_description, "HDFC BANK LTD");
        assert_eq!(records[0].side, Side::Sell);
        assert_eq!(records[0].net_total, "33003.00");
        assert_eq!(records[1].trade_number, "3302");
        assert_eq!(records[1].side, Side::Buy);
        assert_eq!(records[1].net_total, "-6000.40");
    }

    #[test]
    fn test_no_trade_lines() {
        assert!(run(&ArihantExtractor, "Page 1 of 2\nSummary of charges").is_empty());
    }
}
