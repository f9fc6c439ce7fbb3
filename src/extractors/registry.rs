// src/extractors/registry.rs
//! Maps broker-layout identifiers to extractors.
//!
//! Manifests name a layout, not a file, so the same extractor serves every
//! contract note a broker issues.

use super::arihant::ArihantExtractor;
use super::arihant_mer::ArihantMerExtractor;
use super::axis::AxisExtractor;
use super::bp_equities::BpEquitiesExtractor;
use super::dhan::DhanExtractor;
use super::goldmine::GoldmineExtractor;
use super::greshma::GreshmaExtractor;
use super::javeri::JaveriExtractor;
use super::jm_financial::JmFinancialExtractor;
use super::kotak::KotakExtractor;
use super::rudra::RudraExtractor;
use super::zerodha::ZerodhaExtractor;
use super::BrokerExtractor;

pub struct ExtractorRegistry {
    entries: Vec<(&'static str, Box<dyn BrokerExtractor>)>,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Registry with every supported broker layout.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("goldmine", Box::new(GoldmineExtractor));
        registry.register("dhan", Box::new(DhanExtractor));
        registry.register("jm-financial", Box::new(JmFinancialExtractor));
        registry.register("arihant", Box::new(ArihantExtractor));
        registry.register("axis", Box::new(AxisExtractor));
        registry.register("greshma", Box::new(GreshmaExtractor));
        registry.register("bp-equities", Box::new(BpEquitiesExtractor));
        registry.register("javeri", Box::new(JaveriExtractor::new()));
        registry.register("javeri-signed", Box::new(JaveriExtractor::signed()));
        registry.register("kotak", Box::new(KotakExtractor));
        registry.register("rudra", Box::new(RudraExtractor));
        registry.register("arihant-mer", Box::new(ArihantMerExtractor));
        registry.register("zerodha", Box::new(ZerodhaExtractor));
        registry.register("zerodha-2018", Box::new(ZerodhaExtractor));
        registry
    }

    /// Adds or replaces the extractor for `layout_id`.
    pub fn register(&mut self, layout_id: &'static str, extractor: Box<dyn BrokerExtractor>) {
        let existing = self
            .entries
            .iter_mut()
            .find(|(id, _)| id.eq_ignore_ascii_case(layout_id));
        if let Some(entry) = existing {
            tracing::debug!("Replacing extractor for layout '{}'", layout_id);
            entry.1 = extractor;
        } else {
            self.entries.push((layout_id, extractor));
        }
    }

    pub fn get(&self, layout_id: &str) -> Option<&dyn BrokerExtractor> {
        self.entries
            .iter()
            .find(|(id, _)| id.eq_ignore_ascii_case(layout_id.trim()))
            .map(|(_, extractor)| extractor.as_ref())
    }

    /// Layout identifiers in registration order.
    pub fn layout_ids(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(id, _)| *id).collect()
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layouts_are_registered() {
        let registry = ExtractorRegistry::with_defaults();
        assert_eq!(registry.layout_ids().len(), 14);
        assert_eq!(registry.get("zerodha").map(|e| e.broker_name()), Some("Zerodha"));
        assert_eq!(registry.get("zerodha-2018").map(|e| e.broker_name()), Some("Zerodha"));
        assert_eq!(registry.get(" JM-Financial ").map(|e| e.broker_name()), Some("JM Financial"));
        assert!(registry.get("icici").is_none());
    }

    #[test]
    fn test_register_replaces_existing_layout() {
        let mut registry = ExtractorRegistry::new();
        registry.register("javeri", Box::new(JaveriExtractor::new()));
        registry.register("javeri", Box::new(JaveriExtractor::signed()));

        assert_eq!(registry.layout_ids(), vec!["javeri"]);
        assert_eq!(
            registry.get("javeri").map(|e| e.broker_name()),
            Some("Javeri Fiscal (signed)")
        );
    }

    #[test]
    fn test_register_replaces_layout_regardless_of_case() {
        let mut registry = ExtractorRegistry::new();
        registry.register("javeri", Box::new(JaveriExtractor::new()));
        registry.register("Javeri", Box::new(JaveriExtractor::signed()));

        assert_eq!(registry.layout_ids().len(), 1);
        assert_eq!(
            registry.get("JAVERI").map(|e| e.broker_name()),
            Some("Javeri Fiscal (signed)")
        );
    }
}
