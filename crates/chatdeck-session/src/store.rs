//! Chat Store
//!
//! Single source of truth for the ordered session list.
//! Sessions auto-save on any mutation; subscribers are told afterwards.

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::broadcast;

use chatdeck_storage::{Database, SessionRow};

use crate::error::StoreError;
use crate::order;
use crate::summary::SessionSummary;
use crate::Result;

const EVENT_CAPACITY: usize = 64;

/// Change notifications published after a mutation has been persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Moved { from: usize, to: usize },
    Selected { index: usize },
    Created { id: String },
    Deleted { index: usize, id: String },
    Updated { index: usize },
    Restored,
}

/// The list and its selection, read under one lock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSnapshot {
    pub sessions: Vec<SessionSummary>,
    pub selected: Option<usize>,
}

#[derive(Debug, Default)]
struct StoreState {
    sessions: Vec<SessionSummary>,
    selected: Option<usize>,
    /// State before the most recent delete, for undo
    last_deleted: Option<ListSnapshot>,
}

pub struct ChatStore {
    state: Arc<RwLock<StoreState>>,
    db: Database,
    events: broadcast::Sender<StoreEvent>,
}

impl ChatStore {
    pub fn new(db: Database) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
            db,
            events,
        }
    }

    /// Load the persisted list, creating a default session when empty.
    ///
    /// Fails without touching the database if any stored row is unreadable.
    pub fn initialize(&self) -> Result<()> {
        let mut sessions: Vec<SessionSummary> = self
            .db
            .load_session_list()?
            .into_iter()
            .map(SessionSummary::from)
            .collect();
        let stored_selection = self.db.selected_index()?;

        if sessions.is_empty() {
            sessions.push(SessionSummary::empty());
        }

        let selected = stored_selection
            .filter(|i| *i < sessions.len())
            .or(Some(0));

        self.persist(&sessions, selected)?;

        tracing::info!(
            session_count = sessions.len(),
            selected = ?selected,
            "Initialized chat store"
        );

        let mut state = self.state.write();
        state.sessions = sessions;
        state.selected = selected;
        state.last_deleted = None;

        Ok(())
    }

    /// Rewrite the whole list and the selection in one transaction
    fn persist(&self, sessions: &[SessionSummary], selected: Option<usize>) -> Result<()> {
        let rows: Vec<SessionRow> = sessions.iter().map(SessionRow::from).collect();
        self.db.save_session_list(&rows, selected)?;
        Ok(())
    }

    fn notify(&self, event: StoreEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    /// Subscribe to change events
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Current ordered list
    pub fn sessions(&self) -> Vec<SessionSummary> {
        self.state.read().sessions.clone()
    }

    /// List and selection taken together, so a concurrent mutation
    /// cannot pair one with a stale copy of the other
    pub fn snapshot(&self) -> ListSnapshot {
        let state = self.state.read();
        ListSnapshot {
            sessions: state.sessions.clone(),
            selected: state.selected,
        }
    }

    pub fn len(&self) -> usize {
        self.state.read().sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().sessions.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.state.read().selected
    }

    pub fn selected_session(&self) -> Option<SessionSummary> {
        let state = self.state.read();
        state.selected.and_then(|i| state.sessions.get(i).cloned())
    }

    pub fn get(&self, index: usize) -> Result<SessionSummary> {
        let state = self.state.read();
        check_index("get", index, state.sessions.len())?;
        Ok(state.sessions[index].clone())
    }

    pub fn can_restore(&self) -> bool {
        self.state.read().last_deleted.is_some()
    }

    /// Move the session at `from` to `to`; the selection follows its element
    pub fn move_session(&self, from: usize, to: usize) -> Result<()> {
        let mut state = self.state.write();
        let len = state.sessions.len();
        check_index("move", from, len)?;
        check_index("move", to, len)?;

        if from == to {
            return Ok(());
        }

        let mut sessions = state.sessions.clone();
        order::move_item(&mut sessions, from, to);
        let selected = state.selected.map(|s| order::follow_move(s, from, to));

        self.persist(&sessions, selected)?;
        state.sessions = sessions;
        state.selected = selected;
        state.last_deleted = None;
        drop(state);

        tracing::info!(from, to, "Moved session");
        self.notify(StoreEvent::Moved { from, to });

        Ok(())
    }

    /// Mark the session at `index` as selected
    pub fn select_session(&self, index: usize) -> Result<()> {
        let mut state = self.state.write();
        check_index("select", index, state.sessions.len())?;

        if state.selected == Some(index) {
            return Ok(());
        }

        self.db.set_selected_index(index)?;
        state.selected = Some(index);
        let session_id = state.sessions[index].id.clone();
        drop(state);

        tracing::debug!(index, session_id = %session_id, "Selected session");
        self.notify(StoreEvent::Selected { index });

        Ok(())
    }

    /// Remove the session at `index`.
    ///
    /// Deleting the only session replaces it with a fresh empty one.
    pub fn delete_session(&self, index: usize) -> Result<SessionSummary> {
        let mut state = self.state.write();
        let len = state.sessions.len();
        check_index("delete", index, len)?;

        let before = ListSnapshot {
            sessions: state.sessions.clone(),
            selected: state.selected,
        };

        let mut sessions = state.sessions.clone();
        let removed = sessions.remove(index);
        let mut selected = state
            .selected
            .map(|s| order::follow_delete(s, index, sessions.len()));

        if sessions.is_empty() {
            sessions.push(SessionSummary::empty());
            selected = Some(0);
        }

        self.persist(&sessions, selected)?;
        state.sessions = sessions;
        state.selected = selected;
        state.last_deleted = Some(before);
        drop(state);

        tracing::info!(index, session_id = %removed.id, "Deleted session");
        self.notify(StoreEvent::Deleted {
            index,
            id: removed.id.clone(),
        });

        Ok(removed)
    }

    /// Undo the most recent delete, restoring order and selection.
    ///
    /// Only available until the next mutation of any kind.
    pub fn restore_last_deleted(&self) -> Result<()> {
        let mut state = self.state.write();
        let before = state
            .last_deleted
            .take()
            .ok_or(StoreError::NothingToRestore)?;

        if let Err(e) = self.persist(&before.sessions, before.selected) {
            state.last_deleted = Some(before);
            return Err(e);
        }

        state.sessions = before.sessions;
        state.selected = before.selected;
        drop(state);

        tracing::info!("Restored deleted session");
        self.notify(StoreEvent::Restored);

        Ok(())
    }

    /// Insert a fresh session at the top of the list and select it
    pub fn create_new_session(&self) -> Result<SessionSummary> {
        let session = SessionSummary::empty();

        let mut state = self.state.write();
        let mut sessions = state.sessions.clone();
        sessions.insert(0, session.clone());

        self.persist(&sessions, Some(0))?;
        state.sessions = sessions;
        state.selected = Some(0);
        state.last_deleted = None;
        drop(state);

        tracing::info!(session_id = %session.id, "Created new session");
        self.notify(StoreEvent::Created {
            id: session.id.clone(),
        });

        Ok(session)
    }

    pub fn rename_session(&self, index: usize, title: String) -> Result<SessionSummary> {
        self.update_session(index, |session| session.rename(title))
    }

    pub fn record_activity(&self, index: usize, message_count: u32) -> Result<SessionSummary> {
        self.update_session(index, |session| session.record_activity(message_count))
    }

    fn update_session<F>(&self, index: usize, f: F) -> Result<SessionSummary>
    where
        F: FnOnce(&mut SessionSummary),
    {
        let mut state = self.state.write();
        check_index("update", index, state.sessions.len())?;

        let mut sessions = state.sessions.clone();
        f(&mut sessions[index]);
        let updated = sessions[index].clone();

        self.persist(&sessions, state.selected)?;
        state.sessions = sessions;
        // A restore would roll this edit back
        state.last_deleted = None;
        drop(state);

        self.notify(StoreEvent::Updated { index });

        Ok(updated)
    }
}

fn check_index(op: &'static str, index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        tracing::warn!(op, index, len, "Rejected session request with out-of-range index");
        Err(StoreError::IndexOutOfRange { index, len })
    }
}

impl Clone for ChatStore {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            db: self.db.clone(),
            events: self.events.clone(),
        }
    }
}
