//! View transitions

use parking_lot::RwLock;
use std::sync::Arc;

use crate::route::Route;

/// Anything that can move the user to another view
pub trait Navigator: Send + Sync {
    /// Request a transition to `route`
    fn navigate(&self, route: Route);

    /// The view currently shown
    fn current(&self) -> Route;
}

/// In-memory router holding the current view; clones share it
pub struct Router {
    current: Arc<RwLock<Route>>,
}

impl Router {
    pub fn new(initial: Route) -> Self {
        Self {
            current: Arc::new(RwLock::new(initial)),
        }
    }
}

impl Navigator for Router {
    fn navigate(&self, route: Route) {
        let mut current = self.current.write();
        if *current == route {
            return;
        }

        let previous = *current;
        tracing::debug!(from = %previous, to = %route, "Navigated");
        *current = route;
    }

    fn current(&self) -> Route {
        *self.current.read()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl Clone for Router {
    fn clone(&self) -> Self {
        Self {
            current: Arc::clone(&self.current),
        }
    }
}
