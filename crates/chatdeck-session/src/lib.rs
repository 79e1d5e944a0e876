//! ChatDeck Session Store
//!
//! - The store owns the ordered list of chat sessions and the selected index
//! - Every mutation is persisted before it becomes visible
//! - Readers subscribe to change events instead of polling
//! - Out-of-range requests are rejected without touching the list

mod error;
pub mod order;
mod store;
mod summary;

pub use error::StoreError;
pub use store::{ChatStore, ListSnapshot, StoreEvent};
pub use summary::SessionSummary;

pub type Result<T> = std::result::Result<T, StoreError>;
