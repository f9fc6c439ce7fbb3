// src/extractors/record.rs
use serde::{Deserialize, Serialize};

/// Buy/sell indicator, written as `B` / `S`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "B")]
    Buy,
    #[serde(rename = "S")]
    Sell,
}

impl Side {
    /// Normalizes the spellings brokers use: `B`/`S` and `BUY`/`SELL` in any case.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "B" | "BUY" => Some(Side::Buy),
            "S" | "SELL" => Some(Side::Sell),
            _ => None,
        }
    }
}

/// One executed trade line from a contract note.
///
/// Numeric fields stay as text so the source formatting survives into the
/// output; field order here is the order written to JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub source_document: String,
    pub trade_time: String,   // HH:MM:SS, empty when the layout has none
    pub trade_number: String, // empty when the layout has none
    pub trade_date: String,   // DD/MM/YYYY, from the manifest
    pub security_description: String,
    pub side: Side,
    pub quantity: String,
    pub price_per_unit: String,
    pub net_total: String,
}

/// Per-document values copied into every record an extractor produces.
#[derive(Debug, Clone)]
pub struct DocumentContext {
    pub source_document: String,
    pub trade_date: String,
}

impl DocumentContext {
    pub fn new(source_document: impl Into<String>, trade_date: impl Into<String>) -> Self {
        Self {
            source_document: source_document.into(),
            trade_date: trade_date.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_normalization() {
        for raw in ["BUY", "Buy", "buy", "B"] {
            assert_eq!(Side::parse(raw), Some(Side::Buy), "{}", raw);
        }
        for raw in ["SELL", "Sell", "sell", "S"] {
            assert_eq!(Side::parse(raw), Some(Side::Sell), "{}", raw);
        }
        assert_eq!(Side::parse("X"), None);
    }

    #[test]
    fn test_record_serializes_in_field_order() {
        let record = TradeRecord {
            source_document: "AXIS.pdf".to_string(),
            trade_time: "10:01:02".to_string(),
            trade_number: "42".to_string(),
            trade_date: "18/01/2024".to_string(),
            security_description: "INFY".to_string(),
            side: Side::Sell,
            quantity: "10".to_string(),
            price_per_unit: "1500.00".to_string(),
            net_total: "-15000.00".to_string(),
        };

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"source_document":"AXIS.pdf","trade_time":"10:01:02","trade_number":"42","trade_date":"18/01/2024","security_description":"INFY","side":"S","quantity":"10","price_per_unit":"1500.00","net_total":"-15000.00"}"#
        );
    }
}
