//! ChatDeck Core
//!
//! Wires the session store, router, viewport and sidebar controller
//! together. The store owns all list state; everything else reads it.

mod app;
mod config;
mod error;

pub use app::App;
pub use config::Config;
pub use error::CoreError;

// Re-export core components
pub use chatdeck_navigation::{NavigationError, Navigator, Route, Router};
pub use chatdeck_session::{ChatStore, ListSnapshot, SessionSummary, StoreError, StoreEvent};
pub use chatdeck_sidebar::{
    AddOutcome, ChannelConfirmer, ConfirmRequest, Confirmer, DeleteOutcome, DisplayMode,
    DisplaySignal, DragGesture, DropResult, MoveOutcome, SessionItemView, SessionListController,
    SidebarError, Viewport,
};
pub use chatdeck_storage::{Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
