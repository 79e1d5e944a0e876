//! ChatDeck Sidebar
//!
//! The list of conversations beside the chat view. Items can be picked up
//! and dropped at a new position, clicked to open, and deleted. The
//! controller only requests changes; the session store applies them.

mod confirm;
mod controller;
mod display;
mod error;
mod gesture;
mod item;
mod scroll;

pub use confirm::{ChannelConfirmer, ConfirmRequest, Confirmer, DELETE_CHAT_PROMPT};
pub use controller::{
    AddOutcome, DeleteOutcome, MoveOutcome, SessionListController, SharedOptions, SidebarOptions,
};
pub use display::{DeletePolicy, DisplayMode, DisplaySignal, Viewport, DEFAULT_COMPACT_MAX_WIDTH};
pub use error::SidebarError;
pub use gesture::{DragGesture, DragState, DropResult};
pub use item::SessionItemView;
pub use scroll::ScrollTracker;

pub type Result<T> = std::result::Result<T, SidebarError>;
