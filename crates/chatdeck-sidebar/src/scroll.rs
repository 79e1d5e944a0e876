//! Scroll-into-view requests
//!
//! An item asks to be scrolled into view once, when it becomes the
//! selected item. Staying selected across reorders does not ask again.

#[derive(Debug, Default)]
pub struct ScrollTracker {
    last: Option<String>,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the id of the currently selected item; returns it if it just
    /// became selected.
    pub fn observe(&mut self, selected_id: Option<&str>) -> Option<String> {
        match selected_id {
            Some(id) if self.last.as_deref() != Some(id) => {
                self.last = Some(id.to_string());
                Some(id.to_string())
            }
            Some(_) => None,
            None => {
                self.last = None;
                None
            }
        }
    }
}
