use serde::{Deserialize, Serialize};

/// Current stock state of one item at one hospital (`inventory_health`).
///
/// `risk_level` is kept exactly as the warehouse stores it; the display tier
/// is derived by [`crate::risk::classify`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub hospital: String,
    pub item: String,
    pub stock_left: i64,
    pub risk_level: String,
}

/// Reorder-list projection of a critical inventory row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderLine {
    pub hospital: String,
    pub item: String,
    pub stock_left: i64,
}

/// Column names of the reorder export, in declaration order.
pub const REORDER_COLUMNS: [&str; 3] = ["hospital", "item", "stock_left"];

impl ReorderLine {
    /// Cell values in [`REORDER_COLUMNS`] order.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.hospital.clone(),
            self.item.clone(),
            self.stock_left.to_string(),
        ]
    }
}
