// src/extractors/jm_financial.rs
//! JM Financial: price and the two trailing amounts are comma-grouped. The
//! printed amounts are not trusted; net total is recomputed from quantity
//! and price.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{field, scan_matches, side, BrokerExtractor, DocumentContext, TradeRecord};
use crate::utils::numeric::{computed_net_total, format_decimal, parse_price, parse_quantity};

static TRADE_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<order_no>\d+)\s+(?P<order_time>\d{2}:\d{2}:\d{2})\s+(?P<trade_no>\d+)\s+(?P<trade_time>\d{2}:\d{2}:\d{2})\s+(?P<security>.+?)\s+(?P<side>BUY|SELL)\s+(?P<qty>\d+)\s+(?P<price>[\d,]+\.\d+)\s+[\d,]+\.\d+\s+[\d,]+\.\d+",
    )
    .expect("Failed to compile JM Financial TRADE_LINE_RE")
});

pub struct JmFinancialExtractor;

impl BrokerExtractor for JmFinancialExtractor {
    fn broker_name(&self) -> &'static str {
        "JM Financial"
    }

    fn pattern(&self) -> &Regex {
        &TRADE_LINE_RE
    }

    fn extract_page(&self, text: &str, ctx: &DocumentContext) -> Vec<TradeRecord> {
        scan_matches(self.broker_name(), &TRADE_LINE_RE, text, |caps| {
            let raw_qty = field(caps, "qty")?;
            let qty = parse_quantity(raw_qty)?;
            let price = parse_price(field(caps, "price")?)?;

            Ok(TradeRecord {
                source_document: ctx.source_document.clone(),
                trade_time: field(caps, "trade_time")?.to_string(),
                trade_number: field(caps, "trade_no")?.to_string(),
                trade_date: ctx.trade_date.clone(),
                security_description: field(caps, "security")?.to_string(),
                side: side(caps, "side")?,
                quantity: raw_qty.to_string(),
                price_per_unit: format_decimal(price),
                net_total: format_decimal(computed_net_total(qty, price)),
            })
        })
    }
}
