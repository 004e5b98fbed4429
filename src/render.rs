//! Result rendering: turns query results into displayable panels.
//!
//! Panels are plain serde data so any front end can draw them; the
//! `Display` impl is the plain-text form used by the terminal console.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;
use crate::db::RISK_SCORE_CEILING;
use crate::models::enums::Role;
use crate::models::*;
use crate::risk;

// ═══════════════════════════════════════════
// Panel types
// ═══════════════════════════════════════════

/// Severity of a status notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// One table row with its optional background color token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<String>,
    pub background: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub title: Option<String>,
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

/// A unit of dashboard output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Panel {
    Title { text: String },
    Notice { level: NoticeLevel, text: String },
    Metric { label: String, value: String },
    Table { table: Table },
    Download {
        label: String,
        file_name: String,
        mime: String,
        bytes: Vec<u8>,
    },
    Chat { role: Role, content: String },
}

impl Panel {
    pub fn success(text: impl Into<String>) -> Self {
        Panel::Notice {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Panel::Notice {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Panel::Notice {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// Records that can be laid out as table or CSV rows.
pub trait TabularRow {
    fn cells(&self) -> Vec<String>;
}

impl TabularRow for ReorderLine {
    fn cells(&self) -> Vec<String> {
        ReorderLine::cells(self)
    }
}

impl TabularRow for InventoryRecord {
    fn cells(&self) -> Vec<String> {
        vec![
            self.hospital.clone(),
            self.item.clone(),
            self.stock_left.to_string(),
            self.risk_level.clone(),
        ]
    }
}

impl TabularRow for VisitQualityRecord {
    fn cells(&self) -> Vec<String> {
        vec![
            self.display_date(),
            self.region.clone(),
            self.disease.clone(),
            self.missing_columns.join(", "),
        ]
    }
}

pub const INVENTORY_COLUMNS: [&str; 4] = ["hospital", "item", "stock_left", "risk_level"];
pub const MISSING_DATA_COLUMNS: [&str; 4] = ["visit_date", "region", "disease", "missing_columns"];

// ═══════════════════════════════════════════
// Sentences
// ═══════════════════════════════════════════

/// Chat reply for the disease intent.
pub fn describe_spike(record: Option<&AnomalyRecord>) -> String {
    match record {
        Some(r) => format!("{} cases spiked in {} region.", r.disease, r.region),
        None => "No disease spikes today.".to_string(),
    }
}

/// Chat reply for the inventory intent.
pub fn describe_critical_stock(record: Option<&InventoryRecord>) -> String {
    match record {
        Some(r) => format!("{} stock is critically low at {}.", r.item, r.hospital),
        None => "All inventory looks healthy.".to_string(),
    }
}

/// Chat reply when no intent matched.
pub const FALLBACK_REPLY: &str = "Try asking about disease spikes or inventory stock levels.";

// ═══════════════════════════════════════════
// Button panels
// ═══════════════════════════════════════════

pub fn render_spike_check(record: Option<&AnomalyRecord>) -> Panel {
    match record {
        Some(_) => Panel::error(describe_spike(record)),
        None => Panel::success("No disease spikes."),
    }
}

pub fn render_data_quality(total_missing: i64) -> Panel {
    if total_missing > 0 {
        Panel::error(format!(
            "Warning: {total_missing} missing values found in health records."
        ))
    } else {
        Panel::success("All health records look clean.")
    }
}

pub fn render_missing_data_report(rows: &[VisitQualityRecord]) -> Vec<Panel> {
    if rows.is_empty() {
        return vec![Panel::success("No missing fields found in any record.")];
    }

    vec![
        Panel::error("Missing data found in these records:"),
        Panel::Table {
            table: build_table(None, &MISSING_DATA_COLUMNS, rows, |_| None),
        },
    ]
}

pub fn render_voice_alert(record: Option<&InventoryRecord>) -> Vec<Panel> {
    match record {
        Some(r) => vec![
            Panel::error(format!(
                "Alert! {} stock is critically low at {} hospital.",
                r.item, r.hospital
            )),
            Panel::info("Voice Mode Enabled – This alert is spoken in the browser/mobile version."),
        ],
        None => vec![Panel::success("All stocks are safe today.")],
    }
}

pub fn render_reorder_download(bytes: Vec<u8>) -> Panel {
    Panel::Download {
        label: "Download CSV".into(),
        file_name: config::REORDER_FILE_NAME.into(),
        mime: "text/csv".into(),
        bytes,
    }
}

// ═══════════════════════════════════════════
// Passive displays
// ═══════════════════════════════════════════

pub fn render_risk_score(score: u32) -> Panel {
    Panel::Metric {
        label: "Health Risk Score".into(),
        value: format!("{score} / {RISK_SCORE_CEILING}"),
    }
}

/// Inventory heat-map: each row colored by its risk tier.
pub fn render_inventory_table(rows: &[InventoryRecord]) -> Panel {
    Panel::Table {
        table: build_table(
            Some("Inventory Heat-Map"),
            &INVENTORY_COLUMNS,
            rows,
            |r| Some(risk::classify(&r.risk_level).color_token.to_string()),
        ),
    }
}

pub fn render_conversation(turns: &[ConversationTurn]) -> Vec<Panel> {
    turns
        .iter()
        .map(|turn| Panel::Chat {
            role: turn.role,
            content: turn.content.clone(),
        })
        .collect()
}

fn build_table<T: TabularRow>(
    title: Option<&str>,
    columns: &[&str],
    rows: &[T],
    background: impl Fn(&T) -> Option<String>,
) -> Table {
    Table {
        title: title.map(str::to_string),
        columns: columns.iter().map(|c| c.to_string()).collect(),
        rows: rows
            .iter()
            .map(|r| TableRow {
                cells: r.cells(),
                background: background(r),
            })
            .collect(),
    }
}

// ═══════════════════════════════════════════
// CSV export
// ═══════════════════════════════════════════

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer flush failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Encode rows as CSV: header of `columns`, then one line per record.
pub fn export_csv<T: TabularRow>(rows: &[T], columns: &[&str]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(columns)?;
    for row in rows {
        writer.write_record(row.cells())?;
    }
    writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

// ═══════════════════════════════════════════
// Plain-text rendering
// ═══════════════════════════════════════════

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Panel::Title { text } => write!(f, "== {text} =="),
            Panel::Notice { level, text } => {
                let tag = match level {
                    NoticeLevel::Success => "OK",
                    NoticeLevel::Info => "INFO",
                    NoticeLevel::Error => "ALERT",
                };
                write!(f, "[{tag}] {text}")
            }
            Panel::Metric { label, value } => write!(f, "{label}: {value}"),
            Panel::Table { table } => {
                if let Some(title) = &table.title {
                    writeln!(f, "-- {title} --")?;
                }
                write!(f, "{}", table.columns.join(" | "))?;
                for row in &table.rows {
                    write!(f, "\n{}", row.cells.join(" | "))?;
                    if let Some(bg) = &row.background {
                        write!(f, "  ({bg})")?;
                    }
                }
                Ok(())
            }
            Panel::Download {
                label,
                file_name,
                bytes,
                ..
            } => write!(f, "[{label}] {file_name} ({} bytes)", bytes.len()),
            Panel::Chat { role, content } => write!(f, "{role}: {content}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn inventory(hospital: &str, item: &str, stock_left: i64, risk_level: &str) -> InventoryRecord {
        InventoryRecord {
            hospital: hospital.into(),
            item: item.into(),
            stock_left,
            risk_level: risk_level.into(),
        }
    }

    fn visit(day: u32, missing: &[&str]) -> VisitQualityRecord {
        VisitQualityRecord {
            visit_date: NaiveDate::from_ymd_opt(2024, 3, day),
            visit_date_raw: format!("2024-03-{day:02}"),
            region: "North".into(),
            disease: "Flu".into(),
            missing_fields: missing.len() as i64,
            missing_columns: missing.iter().map(|c| c.to_string()).collect(),
        }
    }

    // ── Sentences ────────────────────────────────────────────

    #[test]
    fn spike_sentence() {
        let record = AnomalyRecord {
            disease: "Malaria".into(),
            region: "Coastal".into(),
            is_spike: true,
        };
        assert_eq!(
            describe_spike(Some(&record)),
            "Malaria cases spiked in Coastal region."
        );
        assert_eq!(describe_spike(None), "No disease spikes today.");
    }

    #[test]
    fn critical_stock_sentence() {
        let record = inventory("GenHosp", "Insulin", 3, "CRITICAL");
        assert_eq!(
            describe_critical_stock(Some(&record)),
            "Insulin stock is critically low at GenHosp."
        );
        assert_eq!(describe_critical_stock(None), "All inventory looks healthy.");
    }

    // ── Panels ───────────────────────────────────────────────

    #[test]
    fn risk_score_metric() {
        assert_eq!(
            render_risk_score(60),
            Panel::Metric {
                label: "Health Risk Score".into(),
                value: "60 / 100".into(),
            }
        );
    }

    #[test]
    fn inventory_rows_colored_by_tier() {
        let rows = vec![
            inventory("GenHosp", "Insulin", 3, "CRITICAL"),
            inventory("GenHosp", "Masks", 40, "WARNING"),
            inventory("CityCare", "Gloves", 400, "NORMAL"),
            inventory("CityCare", "Saline", 90, "???"),
        ];

        let Panel::Table { table } = render_inventory_table(&rows) else {
            panic!("expected a table");
        };
        assert_eq!(table.title.as_deref(), Some("Inventory Heat-Map"));
        assert_eq!(table.columns, INVENTORY_COLUMNS);
        let colors: Vec<_> = table
            .rows
            .iter()
            .map(|r| r.background.as_deref().unwrap())
            .collect();
        assert_eq!(colors, vec!["#ff4d4d", "#ffd966", "#9fff9f", "#9fff9f"]);
        assert_eq!(table.rows[0].cells, vec!["GenHosp", "Insulin", "3", "CRITICAL"]);
    }

    #[test]
    fn data_quality_messages() {
        assert_eq!(
            render_data_quality(3),
            Panel::error("Warning: 3 missing values found in health records.")
        );
        assert_eq!(
            render_data_quality(0),
            Panel::success("All health records look clean.")
        );
    }

    #[test]
    fn missing_data_report_empty_is_success() {
        assert_eq!(
            render_missing_data_report(&[]),
            vec![Panel::success("No missing fields found in any record.")]
        );
    }

    #[test]
    fn missing_data_report_lists_rows() {
        let panels = render_missing_data_report(&[visit(1, &["age", "sex"])]);
        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0], Panel::error("Missing data found in these records:"));
        let Panel::Table { table } = &panels[1] else {
            panic!("expected a table");
        };
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].cells, vec!["2024-03-01", "North", "Flu", "age, sex"]);
        assert!(table.rows[0].background.is_none());
    }

    #[test]
    fn voice_alert_mentions_hospital() {
        let record = inventory("GenHosp", "Insulin", 3, "CRITICAL");
        let panels = render_voice_alert(Some(&record));
        assert_eq!(
            panels[0],
            Panel::error("Alert! Insulin stock is critically low at GenHosp hospital.")
        );
        assert!(matches!(
            panels[1],
            Panel::Notice {
                level: NoticeLevel::Info,
                ..
            }
        ));
        assert_eq!(
            render_voice_alert(None),
            vec![Panel::success("All stocks are safe today.")]
        );
    }

    // ── CSV ──────────────────────────────────────────────────

    #[test]
    fn export_csv_round_trip_preserves_order() {
        let lines = vec![
            ReorderLine {
                hospital: "GenHosp".into(),
                item: "Insulin".into(),
                stock_left: 3,
            },
            ReorderLine {
                hospital: "St. Mary, North".into(),
                item: "Oxygen \"large\"".into(),
                stock_left: 0,
            },
        ];

        let bytes = export_csv(&lines, &REORDER_COLUMNS).unwrap();

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let headers: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(str::to_string)
            .collect();
        assert_eq!(headers, REORDER_COLUMNS);

        let parsed: Vec<ReorderLine> = reader
            .records()
            .map(|r| {
                let r = r.unwrap();
                ReorderLine {
                    hospital: r[0].to_string(),
                    item: r[1].to_string(),
                    stock_left: r[2].parse().unwrap(),
                }
            })
            .collect();
        assert_eq!(parsed, lines);
    }

    #[test]
    fn export_csv_empty_is_header_only() {
        let bytes = export_csv::<ReorderLine>(&[], &REORDER_COLUMNS).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().collect::<Vec<_>>(), vec!["hospital,item,stock_left"]);
    }

    #[test]
    fn export_csv_rejects_column_mismatch() {
        let lines = vec![ReorderLine {
            hospital: "GenHosp".into(),
            item: "Insulin".into(),
            stock_left: 3,
        }];
        assert!(matches!(
            export_csv(&lines, &["hospital", "item"]),
            Err(ExportError::Csv(_))
        ));
    }

    #[test]
    fn download_panel_named_reorder_list() {
        let Panel::Download { file_name, label, mime, .. } = render_reorder_download(Vec::new())
        else {
            panic!("expected a download");
        };
        assert_eq!(file_name, "reorder_list.csv");
        assert_eq!(label, "Download CSV");
        assert_eq!(mime, "text/csv");
    }

    // ── Text form ────────────────────────────────────────────

    #[test]
    fn text_rendering() {
        assert_eq!(
            Panel::error("Insulin low").to_string(),
            "[ALERT] Insulin low"
        );
        assert_eq!(render_risk_score(30).to_string(), "Health Risk Score: 30 / 100");
        assert_eq!(
            Panel::Chat {
                role: Role::User,
                content: "hi".into()
            }
            .to_string(),
            "user: hi"
        );

        let table = render_inventory_table(&[inventory("GenHosp", "Insulin", 3, "CRITICAL")]);
        assert_eq!(
            table.to_string(),
            "-- Inventory Heat-Map --\nhospital | item | stock_left | risk_level\nGenHosp | Insulin | 3 | CRITICAL  (#ff4d4d)"
        );
    }

    #[test]
    fn panels_serialize_with_type_tag() {
        let json = serde_json::to_value(Panel::success("ok")).unwrap();
        assert_eq!(json["type"], "notice");
        assert_eq!(json["level"], "success");
    }
}
