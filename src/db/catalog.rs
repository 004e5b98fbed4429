//! Named read-only queries against the warehouse relations.
//!
//! Every operation issues a single literal SELECT and maps rows into the
//! record types of [`crate::models`]. Nothing here writes or retries;
//! a failing query surfaces as [`DataSourceError`] to the caller.

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use super::DataSourceError;
use crate::models::enums::RiskTier;
use crate::models::*;

/// Points added to the health risk score per active spike.
pub const RISK_POINTS_PER_SPIKE: u32 = 30;

/// Upper bound of the displayed health risk score.
pub const RISK_SCORE_CEILING: u32 = 100;

/// Health risk score derived from the number of active spikes.
///
/// `raw` is `spike_count * 30` without a bound; `value` is the same number
/// capped at [`RISK_SCORE_CEILING`] and is what the dashboard displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskScore {
    pub spike_count: u32,
    pub raw: u32,
    pub value: u32,
}

impl RiskScore {
    pub fn from_spike_count(spike_count: u32) -> Self {
        let raw = spike_count.saturating_mul(RISK_POINTS_PER_SPIKE);
        Self {
            spike_count,
            raw,
            value: raw.min(RISK_SCORE_CEILING),
        }
    }

    /// True when the raw score exceeded the displayed scale.
    pub fn is_capped(&self) -> bool {
        self.raw > self.value
    }
}

/// Read-only query catalog over a borrowed warehouse connection.
pub struct QueryCatalog<'c> {
    conn: &'c Connection,
}

impl<'c> QueryCatalog<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// First spiking anomaly, if any.
    pub fn find_top_disease_spike(&self) -> Result<Option<AnomalyRecord>, DataSourceError> {
        let result = self.conn.query_row(
            "SELECT disease, region, is_spike FROM health_anomalies
             WHERE UPPER(TRIM(is_spike)) = ?1 LIMIT 1",
            params![SPIKE_FLAG],
            |row| {
                Ok(AnomalyRecord {
                    disease: row.get(0)?,
                    region: row.get(1)?,
                    is_spike: is_spike_flag(&row.get::<_, String>(2)?),
                })
            },
        );

        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// First inventory row at the CRITICAL tier, if any.
    pub fn find_top_critical_inventory(
        &self,
    ) -> Result<Option<InventoryRecord>, DataSourceError> {
        let result = self.conn.query_row(
            "SELECT hospital, item, stock_left, risk_level FROM inventory_health
             WHERE risk_level = ?1 LIMIT 1",
            params![RiskTier::Critical.as_str()],
            inventory_from_row,
        );

        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Number of anomaly rows flagged as spikes.
    pub fn count_spikes(&self) -> Result<u32, DataSourceError> {
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM health_anomalies WHERE UPPER(TRIM(is_spike)) = ?1",
            params![SPIKE_FLAG],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Health risk score: 30 points per spike, displayed on a 100-point scale.
    pub fn compute_risk_score(&self) -> Result<RiskScore, DataSourceError> {
        let score = RiskScore::from_spike_count(self.count_spikes()?);
        if score.is_capped() {
            tracing::debug!(raw = score.raw, value = score.value, "Risk score capped");
        }
        Ok(score)
    }

    /// Full inventory snapshot in warehouse order.
    pub fn list_inventory(&self) -> Result<Vec<InventoryRecord>, DataSourceError> {
        let mut stmt = self.conn.prepare(
            "SELECT hospital, item, stock_left, risk_level FROM inventory_health",
        )?;
        let rows = stmt.query_map([], inventory_from_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        tracing::debug!(count = records.len(), "Inventory snapshot loaded");
        Ok(records)
    }

    /// Total missing-field count across all visit records (0 when empty).
    pub fn sum_missing_fields(&self) -> Result<i64, DataSourceError> {
        let total: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(missing_fields), 0) FROM public_health_visits",
            [],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    /// Visit records with at least one missing field.
    pub fn list_records_with_missing_fields(
        &self,
    ) -> Result<Vec<VisitQualityRecord>, DataSourceError> {
        let mut stmt = self.conn.prepare(
            "SELECT visit_date, region, disease, missing_fields, missing_columns
             FROM public_health_visits
             WHERE missing_fields > 0",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(VisitRow {
                visit_date: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                region: row.get(1)?,
                disease: row.get(2)?,
                missing_fields: row.get(3)?,
                missing_columns: row.get(4)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(visit_from_row(row?));
        }
        tracing::debug!(count = records.len(), "Incomplete visit records loaded");
        Ok(records)
    }

    /// CRITICAL inventory rows projected to the reorder columns.
    pub fn list_critical_inventory_for_export(
        &self,
    ) -> Result<Vec<ReorderLine>, DataSourceError> {
        let mut stmt = self.conn.prepare(
            "SELECT hospital, item, stock_left FROM inventory_health
             WHERE risk_level = ?1",
        )?;
        let rows = stmt.query_map(params![RiskTier::Critical.as_str()], |row| {
            Ok(ReorderLine {
                hospital: row.get(0)?,
                item: row.get(1)?,
                stock_left: row.get(2)?,
            })
        })?;

        let mut lines = Vec::new();
        for row in rows {
            lines.push(row?);
        }
        Ok(lines)
    }
}

fn inventory_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<InventoryRecord> {
    Ok(InventoryRecord {
        hospital: row.get(0)?,
        item: row.get(1)?,
        stock_left: row.get(2)?,
        risk_level: row.get(3)?,
    })
}

struct VisitRow {
    visit_date: String,
    region: String,
    disease: String,
    missing_fields: i64,
    missing_columns: Option<String>,
}

fn visit_from_row(row: VisitRow) -> VisitQualityRecord {
    let visit_date = parse_visit_date(&row.visit_date);
    if visit_date.is_none() {
        tracing::warn!(raw = %row.visit_date, "Unreadable visit_date, showing stored text");
    }

    VisitQualityRecord {
        visit_date,
        visit_date_raw: row.visit_date,
        region: row.region,
        disease: row.disease,
        missing_fields: row.missing_fields,
        missing_columns: parse_missing_columns(row.missing_columns.as_deref()),
    }
}
