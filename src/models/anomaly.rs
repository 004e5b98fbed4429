use serde::{Deserialize, Serialize};

/// Stored value of `health_anomalies.is_spike` that marks a spike.
pub const SPIKE_FLAG: &str = "YES";

/// One disease-surveillance signal from `health_anomalies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    pub disease: String,
    pub region: String,
    pub is_spike: bool,
}

/// Interpret the warehouse's textual spike flag.
pub fn is_spike_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(SPIKE_FLAG)
}
