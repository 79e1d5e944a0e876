//! Per-item view model
//!
//! Each row shows:
//! - Title (truncated by the renderer)
//! - Last activity time, hidden on hover
//! - Message count
//! - Delete affordance on hover

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use chatdeck_navigation::Route;
use chatdeck_session::SessionSummary;

const TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionItemView {
    pub id: String,
    /// Position in the list, also the drag index
    pub index: usize,
    pub title: String,
    pub message_count: u32,
    pub last_activity: DateTime<Utc>,
    /// This row is the store's selected session
    pub selected: bool,
    /// Selected and the current view shows selection
    pub highlighted: bool,
}

impl SessionItemView {
    pub fn new(index: usize, session: &SessionSummary, selected: bool, route: Route) -> Self {
        Self {
            id: session.id.clone(),
            index,
            title: session.display_title().to_string(),
            message_count: session.message_count,
            last_activity: session.last_activity,
            selected,
            highlighted: selected && route.highlights_selection(),
        }
    }

    pub fn count_label(&self) -> String {
        format!("{} messages", self.message_count)
    }

    /// Hover text: title and message count on separate lines
    pub fn tooltip(&self) -> String {
        format!("{}\n{}", self.title, self.count_label())
    }

    pub fn time_label_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        self.last_activity
            .with_timezone(tz)
            .format(TIME_FORMAT)
            .to_string()
    }

    pub fn time_label(&self) -> String {
        self.time_label_in(&Local)
    }
}
