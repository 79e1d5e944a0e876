//! Sidebar error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SidebarError {
    #[error("Invalid gesture event {event} while {state}")]
    InvalidGesture { state: String, event: &'static str },

    #[error("Store error: {0}")]
    Store(#[from] chatdeck_session::StoreError),
}
