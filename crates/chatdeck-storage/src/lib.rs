//! ChatDeck Storage Layer
//!
//! SQLite persistence for the sidebar's ordered session list, the
//! selected index and user preferences. Writes that touch ordering are
//! transactional so a crash never leaves a half-renumbered list.

mod database;
mod error;
mod migrations;

pub use database::{Database, SessionRow};
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
