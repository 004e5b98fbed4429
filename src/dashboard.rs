//! Dashboard controller: one synchronous action at a time.
//!
//! Each action runs its catalog queries, renders the result and then
//! refreshes the passive displays (risk score and inventory heat-map).
//! An action either produces a full view or an error; nothing is rendered
//! or recorded for a failed action.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chat::DashboardSession;
use crate::config;
use crate::db::{DataSourceError, QueryCatalog};
use crate::intent::{self, Intent};
use crate::models::REORDER_COLUMNS;
use crate::render::{self, ExportError, Panel};

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Discrete dashboard buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Button {
    DiseaseSpike,
    DataQuality,
    MissingData,
    ExportReorderList,
    VoiceAlert,
}

impl Button {
    pub const ALL: [Button; 5] = [
        Button::DiseaseSpike,
        Button::DataQuality,
        Button::MissingData,
        Button::ExportReorderList,
        Button::VoiceAlert,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Button::DiseaseSpike => "Any Disease Spike?",
            Button::DataQuality => "Is Data Quality OK?",
            Button::MissingData => "Where is data missing?",
            Button::ExportReorderList => "Export Reorder List",
            Button::VoiceAlert => "Voice Alert for Critical Items",
        }
    }
}

/// A user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Chat(String),
    Press(Button),
}

/// Everything shown after one interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardView {
    pub conversation: Vec<Panel>,
    pub risk_score: Panel,
    pub action: Vec<Panel>,
    pub heat_map: Panel,
}

impl DashboardView {
    /// Panels in page order.
    pub fn panels(&self) -> Vec<Panel> {
        let mut panels = vec![Panel::Title {
            text: config::DASHBOARD_TITLE.into(),
        }];
        panels.extend(self.conversation.iter().cloned());
        panels.push(self.risk_score.clone());
        panels.extend(self.action.iter().cloned());
        panels.push(self.heat_map.clone());
        panels
    }
}

pub struct DashboardController<'c> {
    catalog: QueryCatalog<'c>,
    session: DashboardSession,
}

impl<'c> DashboardController<'c> {
    pub fn new(conn: &'c Connection, session: DashboardSession) -> Self {
        Self {
            catalog: QueryCatalog::new(conn),
            session,
        }
    }

    pub fn session(&self) -> &DashboardSession {
        &self.session
    }

    /// Run one action and render the refreshed dashboard.
    ///
    /// A chat exchange is recorded only once every query of the action has
    /// succeeded.
    pub fn handle(&mut self, action: Action) -> Result<DashboardView, DashboardError> {
        let _span =
            tracing::info_span!("dashboard_action", session = %self.session.id()).entered();

        let (action_panels, exchange) = match action {
            Action::Chat(text) => {
                let reply = self.chat_reply(&text)?;
                (Vec::new(), Some((text, reply)))
            }
            Action::Press(button) => (self.press(button)?, None),
        };

        let risk_score = render::render_risk_score(self.catalog.compute_risk_score()?.value);
        let heat_map = render::render_inventory_table(&self.catalog.list_inventory()?);

        if let Some((text, reply)) = exchange {
            self.session.record_exchange(&text, &reply);
        }

        Ok(DashboardView {
            conversation: render::render_conversation(self.session.log().all()),
            risk_score,
            action: action_panels,
            heat_map,
        })
    }

    /// Passive displays without any action (initial page load).
    pub fn refresh(&self) -> Result<DashboardView, DashboardError> {
        Ok(DashboardView {
            conversation: render::render_conversation(self.session.log().all()),
            risk_score: render::render_risk_score(self.catalog.compute_risk_score()?.value),
            action: Vec::new(),
            heat_map: render::render_inventory_table(&self.catalog.list_inventory()?),
        })
    }

    fn chat_reply(&self, text: &str) -> Result<String, DashboardError> {
        let intent = intent::classify(text);
        tracing::info!(?intent, "Chat message received");

        let reply = match intent {
            Intent::DiseaseQuery => {
                render::describe_spike(self.catalog.find_top_disease_spike()?.as_ref())
            }
            Intent::InventoryQuery => render::describe_critical_stock(
                self.catalog.find_top_critical_inventory()?.as_ref(),
            ),
            Intent::Unknown => render::FALLBACK_REPLY.to_string(),
        };
        Ok(reply)
    }

    /// Run a button's queries once and render the outcome.
    pub fn press(&self, button: Button) -> Result<Vec<Panel>, DashboardError> {
        tracing::info!(button = button.label(), "Button pressed");

        let panels = match button {
            Button::DiseaseSpike => {
                let spike = self.catalog.find_top_disease_spike()?;
                vec![render::render_spike_check(spike.as_ref())]
            }
            Button::DataQuality => {
                vec![render::render_data_quality(self.catalog.sum_missing_fields()?)]
            }
            Button::MissingData => render::render_missing_data_report(
                &self.catalog.list_records_with_missing_fields()?,
            ),
            Button::ExportReorderList => {
                let lines = self.catalog.list_critical_inventory_for_export()?;
                tracing::info!(rows = lines.len(), "Reorder list exported");
                let bytes = render::export_csv(&lines, &REORDER_COLUMNS)?;
                vec![render::render_reorder_download(bytes)]
            }
            Button::VoiceAlert => {
                let critical = self.catalog.find_top_critical_inventory()?;
                render::render_voice_alert(critical.as_ref())
            }
        };
        Ok(panels)
    }

    /// End the session, discarding the transcript.
    pub fn finish(self) {
        self.session.end();
    }
}
