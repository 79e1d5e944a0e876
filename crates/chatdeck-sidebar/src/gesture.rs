//! Drag Gesture State Machine
//!
//! ```text
//! Idle
//!   ↓ press
//! Pressed ──release──▶ Idle        (plain click, no drop)
//!   ↓ motion
//! Dragging ──release──▶ Idle       (drop at hover target, or nowhere)
//!          ──cancel───▶ Idle       (drop nowhere)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SidebarError;
use crate::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "state")]
pub enum DragState {
    #[default]
    Idle,
    /// Pointer is down on an item but has not moved yet
    Pressed { source: usize },
    /// Item is being dragged; `hover` is the slot under the pointer
    Dragging {
        source: usize,
        hover: Option<usize>,
    },
}

impl DragState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DragState::Idle => "idle",
            DragState::Pressed { .. } => "pressed",
            DragState::Dragging { .. } => "dragging",
        }
    }
}

impl std::fmt::Display for DragState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of a finished drag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropResult {
    pub source: usize,
    /// `None` when the item was dropped outside the list or the drag was cancelled
    pub destination: Option<usize>,
}

impl DropResult {
    /// Where the item should go, or `None` when the drop leaves the order as is
    pub fn moves_to(&self) -> Option<usize> {
        self.destination.filter(|d| *d != self.source)
    }
}

/// Pointer-event driven drag tracker for a list of `len` items
#[derive(Debug, Clone, Default)]
pub struct DragGesture {
    state: DragState,
    len: usize,
}

impl DragGesture {
    pub fn new(len: usize) -> Self {
        Self {
            state: DragState::Idle,
            len,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    fn invalid(&self, event: &'static str) -> SidebarError {
        SidebarError::InvalidGesture {
            state: self.state.to_string(),
            event,
        }
    }

    /// Pointer down on item `index`
    pub fn press(&mut self, index: usize) -> Result<()> {
        if self.state != DragState::Idle || index >= self.len {
            return Err(self.invalid("press"));
        }

        self.state = DragState::Pressed { source: index };
        Ok(())
    }

    /// Pointer moved; `hover` is the slot under it, `None` when outside the list
    pub fn motion(&mut self, hover: Option<usize>) -> Result<()> {
        let source = match self.state {
            DragState::Pressed { source } | DragState::Dragging { source, .. } => source,
            DragState::Idle => return Err(self.invalid("motion")),
        };

        let hover = hover.map(|h| h.min(self.len.saturating_sub(1)));

        if let DragState::Pressed { .. } = self.state {
            tracing::debug!(source, "Drag started");
        }
        self.state = DragState::Dragging { source, hover };
        Ok(())
    }

    /// Pointer up. Returns the drop when a drag was in progress.
    pub fn release(&mut self) -> Result<Option<DropResult>> {
        match self.state {
            DragState::Idle => Err(self.invalid("release")),
            DragState::Pressed { .. } => {
                self.state = DragState::Idle;
                Ok(None)
            }
            DragState::Dragging { source, hover } => {
                self.state = DragState::Idle;
                tracing::debug!(source, destination = ?hover, "Drag ended");
                Ok(Some(DropResult {
                    source,
                    destination: hover,
                }))
            }
        }
    }

    /// Abort the gesture (Escape, focus loss)
    pub fn cancel(&mut self) -> Option<DropResult> {
        let previous = std::mem::take(&mut self.state);
        match previous {
            DragState::Dragging { source, .. } => {
                tracing::debug!(source, "Drag cancelled");
                Some(DropResult {
                    source,
                    destination: None,
                })
            }
            _ => None,
        }
    }
}
