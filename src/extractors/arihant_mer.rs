// src/extractors/arihant_mer.rs
//! Arihant derivatives (MER) notes. Columns run right to left: price, a
//! fixed `0.0000`, net rate, brokerage, gross rate, quantity fused with the
//! side letter (`400B`), the `OPTSTK` instrument type, contract description,
//! then trade and order identifiers. Rows wrap, so the page is joined first.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{field, flatten, scan_matches, side, BrokerExtractor, DocumentContext, TradeRecord};
use crate::utils::numeric::{format_decimal, parse_price, parse_quantity, round2};

static TRADE_ROW_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<price>\d+\.\d+)\s+0\.0000\s+(?P<net_rate>\d+\.\d+)\s+(?P<brokerage>\d+\.\d+)\s+(?P<gross_rate>\d+\.\d+)\s+(?P<qty>\d+)(?P<side>[BS])\s+OPTSTK\s+(?P<security>.+?)\s+(?P<trade_time>\d{2}:\d{2}:\d{2})\s+(?P<trade_no>\d+)\s+(?P<order_time>\d{2}:\d{2}:\d{2})\s+(?P<order_no>\d+)",
    )
    .expect("Failed to compile Arihant MER TRADE_ROW_RE")
});

const INSTRUMENT_TYPE: &str = "OPTSTK";

pub struct ArihantMerExtractor;

impl BrokerExtractor for ArihantMerExtractor {
    fn broker_name(&self) -> &'static str {
        "Arihant Capital (MER)"
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
            let raw_qty = field(caps, "qty")?;
            let raw_price = field(caps, "price")?;
            let net_total = round2(parse_price(raw_price)? * parse_quantity(raw_qty)? as f64);

            Ok(TradeRecord {
                source_document: ctx.source_document.clone(),
                trade_time: field(caps, "trade_time")?.to_string(),
                trade_number: field(caps, "trade_no")?.to_string(),
                trade_date: ctx.trade_date.clone(),
                security_description: format!("{} {}", INSTRUMENT_TYPE, field(caps, "security")?),
                side: side(caps, "side")?,
                quantity: raw_qty.to_string(),
                price_per_unit: raw_price.to_string(),
                net_total: format_decimal(net_total),
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
    fn test_wrapped_option_row() {
        let text = "12.50 0.0000 12.45 0.05 12.50 400B OPTSTK\n\
                    RELIANCE 30MAY2024 CE 2900.00 09:45:12 1001 09:45:10 2002";
        let records = run(&ArihantMerExtractor, text);

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.security_description, "OPTSTK RELIANCE 30MAY2024 CE 2900.00");
        assert_eq!(r.side, Side::Buy);
        assert_eq!(r.quantity, "400");
        assert_eq!(r.price_per_unit, "12.50");
        assert_eq!(r.net_total, "5000.0");
        assert_eq!(r.trade_time, "09:45:12");
        assert_eq!(r.trade_number, "1001");
    }

    #[test]
    fn test_other_instrument_type_is_ignored() {
        let text = "12.50 0.0000 12.45 0.05 12.50 400S FUTSTK RELIANCE 09:45:12 1001 09:45:10 2002";
        assert!(run(&ArihantMerExtractor, text).is_empty());
    }
}
