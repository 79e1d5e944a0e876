//! ChatDeck Navigation
//!
//! Views the sidebar can send the user to:
//! - `/` home
//! - `/chat` the selected conversation
//! - `/new-chat` the mask picker shown before a new conversation
//! - `/settings`, `/masks`

mod error;
mod route;
mod router;

pub use error::NavigationError;
pub use route::Route;
pub use router::{Navigator, Router};

pub type Result<T> = std::result::Result<T, NavigationError>;
