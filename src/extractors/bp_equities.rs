// src/extractors/bp_equities.rs
//! BP Equities: worded side (`Buy`/`Sell`) directly followed by the
//! quantity, which sell lines print with a leading minus. Net total is
//! recomputed from quantity and price.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{field, scan_matches, side, BrokerExtractor, DocumentContext, TradeRecord};
use crate::utils::numeric::{computed_net_total, format_decimal, parse_price, parse_quantity};

static TRADE_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<order_time>\d{2}:\d{2}:\d{2})\s+(?P<trade_no>\d+)\s+(?P<trade_time>\d{2}:\d{2}:\d{2})\s+(?P<security>.+?)\s+(?P<side>Buy|Sell)\s+-?(?P<qty>\d+)\s+(?P<price>[\d.]+)\s+(?P<brokerage>[\d.]+)\s+(?P<net_rate>[\d.]+)\s+(?P<closing_rate>[\d.]+)",
    )
    .expect("Failed to compile BP Equities TRADE_LINE_RE")
});

pub struct BpEquitiesExtractor;

impl BrokerExtractor for BpEquitiesExtractor {
    fn broker_name(&self) -> &'static str {
        "BP Equities"
    }

    fn pattern(&self) -> &Regex {
        &TRADE_LINE_RE
    }

    fn extract_page(&self, text: &str, ctx: &DocumentContext) -> Vec<TradeRecord> {
        scan_matches(self.broker_name(), &TRADE_LINE_RE, text, |caps| {
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
    fn test_sell_with_minus_quantity() {
        let text = "12:00:01 4455 12:00:02 WIPRO LTD Sell -8 410.25 0.41 409.84 410.00";
        let records = run(&BpEquitiesExtractor, text);

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.trade_time, "12:00:02");
        assert_eq!(r.trade_number, "4455");
        assert_eq!(r.security_description, "WIPRO LTD");
        assert_eq!(r.side, Side::Sell);
        assert_eq!(r.quantity, "8");
        assert_eq!(r.price_per_unit, "410.25");
        assert_eq!(r.net_total, "3282.0");
    }

    #[test]
    fn test_buy_line() {
        let text = "12:05:00 4456 12:05:01 WIPRO LTD Buy 5 200.50 0.20 200.70 200.50";
        let records = run(&BpEquitiesExtractor, text);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].side, Side::Buy);
        assert_eq!(records[0].price_per_unit, "200.5");
        assert_eq!(records[0].net_total, "1002.5");
    }

    #[test]
    fn test_recomputed_total_rounds_tie_to_even() {
        let text = "12:10:00 4457 12:10:01 WIPRO LTD Buy 2 10.0625 0.01 10.07 10.06";
        let records = run(&BpEquitiesExtractor, text);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].price_per_unit, "10.0625");
        assert_eq!(records[0].net_total, "20.12");
    }
}
