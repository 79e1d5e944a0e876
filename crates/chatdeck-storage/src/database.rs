//! Database connection and the session-list tables

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::migrations::run_migrations;
use crate::Result;

const SELECTED_INDEX_KEY: &str = "current_session_index";

/// One persisted sidebar entry; its position is its index in the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRow {
    pub id: String,
    pub title: String,
    pub last_activity: DateTime<Utc>,
    pub message_count: u32,
}

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Readers never wait on the list rewrite
        let _: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        run_migrations(&conn)?;
        tracing::debug!("Opened session database");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    /// Run `f` inside a transaction; any error rolls the whole batch back.
    pub fn transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }

    // === Session list ===

    /// The stored list in sidebar order.
    ///
    /// A row that cannot be decoded fails the whole load, so a later
    /// [`Database::save_session_list`] never rewrites the table without it.
    pub fn load_session_list(&self) -> Result<Vec<SessionRow>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, last_activity, message_count
                 FROM chat_sessions ORDER BY position ASC",
            )?;

            let rows = stmt
                .query_map([], |row| {
                    let id: String = row.get(0)?;
                    let activity: String = row.get(2)?;
                    let last_activity = match DateTime::parse_from_rfc3339(&activity) {
                        Ok(dt) => dt.with_timezone(&Utc),
                        Err(_) => {
                            tracing::warn!(session_id = %id, raw = %activity, "Unreadable activity time");
                            Utc::now()
                        }
                    };

                    Ok(SessionRow {
                        id,
                        title: row.get(1)?,
                        last_activity,
                        message_count: row.get(3)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(rows)
        })
    }

    /// Replace the stored list and selected index in one transaction
    pub fn save_session_list(&self, rows: &[SessionRow], selected: Option<usize>) -> Result<()> {
        let now = Utc::now().to_rfc3339();

        self.transaction(|conn| {
            conn.execute("DELETE FROM chat_sessions", [])?;

            let mut stmt = conn.prepare(
                "INSERT INTO chat_sessions (id, title, last_activity, message_count, position)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (position, row) in rows.iter().enumerate() {
                stmt.execute(rusqlite::params![
                    row.id,
                    row.title,
                    row.last_activity.to_rfc3339(),
                    row.message_count,
                    position as i64,
                ])?;
            }

            match selected {
                Some(index) => conn.execute(
                    "INSERT OR REPLACE INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)",
                    rusqlite::params![SELECTED_INDEX_KEY, index.to_string(), now],
                )?,
                None => conn.execute("DELETE FROM settings WHERE key = ?1", [SELECTED_INDEX_KEY])?,
            };

            Ok(())
        })
    }

    /// Stored selection; unparsable values read as none
    pub fn selected_index(&self) -> Result<Option<usize>> {
        Ok(self
            .get_setting(SELECTED_INDEX_KEY)?
            .and_then(|v| v.parse().ok()))
    }

    pub fn set_selected_index(&self, index: usize) -> Result<()> {
        self.set_setting(SELECTED_INDEX_KEY, &index.to_string())
    }

    // === Settings ===

    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.with_connection(|conn| {
            let value = conn
                .query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
                    row.get(0)
                })
                .optional()?;
            Ok(value)
        })
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        self.with_connection(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![key, value, updated_at],
            )?;
            Ok(())
        })
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}
