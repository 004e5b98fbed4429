use serde::{Deserialize, Serialize};

/// What a chat message is asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    DiseaseQuery,
    InventoryQuery,
    Unknown,
}

/// Ordered keyword rules. The first rule with a keyword contained in the
/// lower-cased message wins, so disease keywords take precedence over
/// inventory keywords ("malaria stock" is a disease query).
pub const INTENT_RULES: &[(&[&str], Intent)] = &[
    (&["malaria", "disease"], Intent::DiseaseQuery),
    (&["stock", "inventory"], Intent::InventoryQuery),
];

/// Classify a chat message using keyword containment.
pub fn classify(text: &str) -> Intent {
    let lower = text.to_lowercase();

    INTENT_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, intent)| *intent)
        .unwrap_or(Intent::Unknown)
}
