use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Completeness of one health-visit record (`public_health_visits`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitQualityRecord {
    /// Parsed visit date; `None` when the stored text is blank or unreadable.
    pub visit_date: Option<NaiveDate>,
    /// Visit date exactly as stored.
    pub visit_date_raw: String,
    pub region: String,
    pub disease: String,
    pub missing_fields: i64,
    pub missing_columns: Vec<String>,
}

impl VisitQualityRecord {
    /// Date as shown in reports: ISO form when parsed, stored text otherwise.
    pub fn display_date(&self) -> String {
        match self.visit_date {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => self.visit_date_raw.clone(),
        }
    }
}

/// Parse a stored visit date: `YYYY-MM-DD`, optionally followed by a time.
pub fn parse_visit_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().split(|c: char| c == ' ' || c == 'T').next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Parse the stored `missing_columns` text.
///
/// Accepts a JSON array (`["age","sex"]`) or a comma-separated list
/// (`age, sex`). Blank entries are dropped.
pub fn parse_missing_columns(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Vec::new();
    };

    if raw.starts_with('[') {
        if let Ok(columns) = serde_json::from_str::<Vec<String>>(raw) {
            return columns
                .into_iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect();
        }
    }

    raw.trim_matches(|c| c == '[' || c == ']')
        .split(',')
        .map(|c| c.trim().trim_matches('"').trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}
