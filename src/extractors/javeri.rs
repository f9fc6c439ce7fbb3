// src/extractors/javeri.rs
//! Javeri Fiscal Services: the minimal layout with no charge or total
//! columns. Net total is always quantity times price.
//!
//! The signed common-contract variant of the same note wraps descriptions
//! across lines, so it scans the page as one joined line.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{field, flatten, scan_matches, side, BrokerExtractor, DocumentContext, TradeRecord};
use crate::utils::numeric::{computed_net_total, format_decimal, parse_price, parse_quantity};

static TRADE_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<order_no>\d+)\s+(?P<order_time>\d{2}:\d{2}:\d{2})\s+(?P<trade_no>\d+)\s+(?P<trade_time>\d{2}:\d{2}:\d{2})\s+(?P<security>.+?)\s+(?P<side>Buy|Sell)\s+(?P<qty>\d+)\s+(?P<price>[\d.]+)",
    )
    .expect("Failed to compile Javeri TRADE_LINE_RE")
});

pub struct JaveriExtractor {
    joined_lines: bool,
}

impl JaveriExtractor {
    /// Plain contract notes, scanned line by line.
    pub fn new() -> Self {
        Self { joined_lines: false }
    }

    /// Signed common-contract notes, scanned as one joined line.
    pub fn signed() -> Self {
        Self { joined_lines: true }
    }
}

impl BrokerExtractor for JaveriExtractor {
    fn broker_name(&self) -> &'static str {
        if self.joined_lines {
            "Javeri Fiscal (signed)"
        } else {
            "Javeri Fiscal"
        }
    }

    fn pattern(&self) -> &Regex {
        &TRADE_LINE_RE
    }

    fn prepare<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if self.joined_lines {
            flatten(text)
        } else {
            Cow::Borrowed(text)
        }
    }

    fn extract_page(&self, text: &str, ctx: &DocumentContext) -> Vec<TradeRecord> {
        let text = self.prepare(text);
        scan_matches(self.broker_name(), &TRADE_LINE_RE, &text, |caps| {
            let qty = parse_quantity(field(caps, "qty")?)?;
            let price = parse_price(field(caps, "price")?)?;

            Ok(TradeRecord {
                source_document: ctx.source_document.clone(),
                trade_time: field(caps, "trade_time")?.to_string(),
                trade_number: field(caps, "trade_no")?.to_string(),
                trade_date: ctx.trade_date.clone(),
                security_description: field(caps, "security")?.to_string(),
                side: side(caps, "side")?,
                quantity: qty.to_string(),
                price_per_unit: format_decimal(price),
                net_total: format_decimal(computed_net_total(qty, price)),
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
    fn test_minimal_line() {
        let text = "556677 13:45:00 1122 13:45:01 ITC LTD Buy 100 440.50";
        let records = run(&JaveriExtractor::new(), text);

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.trade_time, "13:45:01");
        assert_eq!(r.trade_number, "1122");
        assert_eq!(r.security_description, "ITC LTD");
        assert_eq!(r.side, Side::Buy);
        assert_eq!(r.quantity, "100");
        assert_eq!(r.price_per_unit, "440.5");
        assert_eq!(r.net_total, "44050.0");
    }

    #[test]
    fn test_wrapped_description_needs_joined_variant() {
        let text = "556677 13:45:00 1122 13:45:01 ITC\nLTD Sell 100 440.50";

        assert!(run(&JaveriExtractor::new(), text).is_empty());

        let records = run(&JaveriExtractor::signed(), text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].security_description, "ITC LTD");
        assert_eq!(records[0].side, Side::Sell);
    }
}
