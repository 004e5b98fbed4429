//! Session transcript for the chat box.
//!
//! A [`DashboardSession`] is created when a user opens the dashboard and
//! dropped when they leave; its [`ConversationLog`] only ever grows.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::ConversationTurn;

/// Append-only ordered transcript.
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    turns: Vec<ConversationTurn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    /// All turns in the order they were appended.
    pub fn all(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// State owned by one user session.
#[derive(Debug)]
pub struct DashboardSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    log: ConversationLog,
}

impl DashboardSession {
    pub fn start() -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            log: ConversationLog::new(),
        };
        tracing::info!(session = %session.id, "Dashboard session started");
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// Record one chat exchange: the user's message, then the reply.
    pub fn record_exchange(&mut self, user_text: &str, reply: &str) {
        self.log.append(ConversationTurn::user(user_text));
        self.log.append(ConversationTurn::assistant(reply));
    }

    /// End the session, discarding its transcript.
    pub fn end(self) {
        tracing::info!(
            session = %self.id,
            turns = self.log.len(),
            duration_secs = (Utc::now() - self.started_at).num_seconds(),
            "Dashboard session ended"
        );
    }
}
