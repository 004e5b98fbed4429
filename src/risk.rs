use std::str::FromStr;

use serde::Serialize;

use crate::models::enums::RiskTier;

/// Row background for CRITICAL stock.
pub const CRITICAL_COLOR: &str = "#ff4d4d";
/// Row background for WARNING stock.
pub const WARNING_COLOR: &str = "#ffd966";
/// Row background for NORMAL stock and any unrecognized level.
pub const NORMAL_COLOR: &str = "#9fff9f";

/// Display treatment for an inventory risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskDisplay {
    pub tier: RiskTier,
    pub color_token: &'static str,
}

/// Map a stored risk level to its display tier and color.
///
/// Unrecognized values fall back to the NORMAL tier.
pub fn classify(risk_level: &str) -> RiskDisplay {
    let tier = RiskTier::from_str(risk_level).unwrap_or_else(|_| {
        tracing::debug!(risk_level, "Unrecognized risk level, showing as NORMAL");
        RiskTier::Normal
    });

    RiskDisplay {
        tier,
        color_token: color_for(tier),
    }
}

pub fn color_for(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::Critical => CRITICAL_COLOR,
        RiskTier::Warning => WARNING_COLOR,
        RiskTier::Normal => NORMAL_COLOR,
    }
}
