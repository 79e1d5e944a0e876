//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] chatdeck_storage::StorageError),

    #[error("Store error: {0}")]
    Store(#[from] chatdeck_session::StoreError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] chatdeck_navigation::NavigationError),

    #[error("Sidebar error: {0}")]
    Sidebar(#[from] chatdeck_sidebar::SidebarError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
