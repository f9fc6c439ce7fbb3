// src/extractors/kotak.rs
//! Kotak Securities bills. The bill prints neither trade times nor trade
//! numbers, so only the two scrips on these bills are recognised, by name.
//! Every line on them is a sale.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{field, scan_matches, BrokerExtractor, DocumentContext, Side, TradeRecord};
use crate::utils::numeric::{format_decimal, parse_price, parse_quantity};

static TRADE_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<security>GMDCLTD EQ|SUN RETAIL LIMITED)\s+(?P<qty>\d+)\s+(?P<price>[\d.]+)\s+(?P<amount>[\d,.]+)",
    )
    .expect("Failed to compile Kotak TRADE_LINE_RE")
});

pub struct KotakExtractor;

impl BrokerExtractor for KotakExtractor {
    fn broker_name(&self) -> &'static str {
        "Kotak Securities"
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
                trade_time: String::new(),
                trade_number: String::new(),
                trade_date: ctx.trade_date.clone(),
                security_description: field(caps, "security")?.to_string(),
                side: Side::Sell,
                quantity: qty.to_string(),
                price_per_unit: format_decimal(price),
                net_total: field(caps, "amount")?.replace(',', ""),
            })
        })
    }
}
