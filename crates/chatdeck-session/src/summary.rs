//! Session summary shown in the sidebar

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use chatdeck_storage::SessionRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Unique identifier, stable across reorders
    pub id: String,
    /// Conversation topic
    pub title: String,
    /// Time of the last message, only used for the time label
    pub last_activity: DateTime<Utc>,
    /// Number of messages in the conversation
    pub message_count: u32,
}

impl SessionSummary {
    pub const DEFAULT_TITLE: &'static str = "New Conversation";

    /// A fresh, empty conversation
    pub fn empty() -> Self {
        Self::with_title(Self::DEFAULT_TITLE)
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            last_activity: Utc::now(),
            message_count: 0,
        }
    }

    pub fn rename(&mut self, title: String) {
        self.title = title;
    }

    /// Record that the conversation now holds `message_count` messages
    pub fn record_activity(&mut self, message_count: u32) {
        self.message_count = message_count;
        self.last_activity = Utc::now();
    }

    /// Title with fallback for conversations that were never named
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            Self::DEFAULT_TITLE
        } else {
            &self.title
        }
    }
}

impl From<SessionRow> for SessionSummary {
    fn from(row: SessionRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            last_activity: row.last_activity,
            message_count: row.message_count,
        }
    }
}

impl From<&SessionSummary> for SessionRow {
    fn from(session: &SessionSummary) -> Self {
        Self {
            id: session.id.clone(),
            title: session.title.clone(),
            last_activity: session.last_activity,
            message_count: session.message_count,
        }
    }
}
