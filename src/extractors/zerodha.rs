// src/extractors/zerodha.rs
//! Zerodha contract notes (both the 2018 and the older layout). The
//! description ends at `/` followed by the scrip's ISIN, which is the only
//! reliable separator before the side column. Rows wrap, so the page is
//! joined first.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{field, flatten, scan_matches, side, BrokerExtractor, DocumentContext, TradeRecord};
use crate::utils::numeric::normalize_amount;

static TRADE_ROW_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<order_no>\d+)\s+(?P<order_time>\d{2}:\d{2}:\d{2})\s+(?P<trade_no>\d+)\s+(?P<trade_time>\d{2}:\d{2}:\d{2})\s+(?P<security>.+?)\s*/\s+INE\d+[A-Z0-9]*\s+(?P<side>[BS])\s+(?P<qty>\d+)\s+(?P<price>[\d.]+)\s+(?P<net_total>\(?-?[\d.]+\)?)",
    )
    .expect("Failed to compile Zerodha TRADE_ROW_RE")
});

pub struct ZerodhaExtractor;

impl BrokerExtractor for ZerodhaExtractor {
    fn broker_name(&self) -> &'static str {
        "Zerodha"
    }

    fn pattern(&self) -> &Regex {
        &TRADE_ROW_RE
    }

    fn prepare<'t>(&self, text: &'t str) -> Cow<'t, str> {
        flatten(text)
    }

    fn extract_page(&self, text: &str, ctx: &DocumentContext) -> Vec<TradeRecord> {
        let text = self.prepare(text);
        scan_matches(self.broker_name(), &TRADE_ROW_RE, &text, |caps| {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::test_support::run;
    use crate::extractors::Side;

    #[test]
    fn test_isin_terminates_description() {
        let text = "1300000001 10:10:10 55501 10:10:11 TATA MOTORS LTD /\n\
                    INE155A01022 S 25 900.40 (22510.00)";
        let records = run(&ZerodhaExtractor, text);

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.trade_time, "10:10:11");
        assert_eq!(r.trade_number, "55501");
        assert_eq!(r.security_description, "TATA MOTORS LTD");
        assert_eq!(r.side, Side::Sell);
        assert_eq!(r.quantity, "25");
        assert_eq!(r.price_per_unit, "900.40");
        assert_eq!(r.net_total, "-22510.00");
    }

    #[test]
    fn test_plain_net_total() {
        let text = "1300000002 11:00:00 55502 11:00:01 IDEA CELLULAR / \
                    INE669E01016 B 100 60.15 6015.00";
        let records = run(&ZerodhaExtractor, text);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].security_description, "IDEA CELLULAR");
        assert_eq!(records[0].net_total, "6015.00");
    }

    #[test]
    fn test_missing_isin_yields_nothing() {
        let text = "1300000002 11:00:00 55502 11:00:01 IDEA CELLULAR B 100 60.15 6015.00";
        assert!(run(&ZerodhaExtractor, text).is_empty());
    }
}
