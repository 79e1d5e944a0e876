//! Display mode and the delete policy it selects

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Widths at or below this many logical pixels count as compact
pub const DEFAULT_COMPACT_MAX_WIDTH: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Compact,
    Wide,
}

impl DisplayMode {
    pub fn from_width(width: u32, compact_max_width: u32) -> Self {
        if width <= compact_max_width {
            DisplayMode::Compact
        } else {
            DisplayMode::Wide
        }
    }

    pub fn is_compact(&self) -> bool {
        matches!(self, DisplayMode::Compact)
    }
}

/// Source of the compact/wide signal
pub trait DisplaySignal: Send + Sync {
    fn is_compact(&self) -> bool;

    fn mode(&self) -> DisplayMode {
        if self.is_compact() {
            DisplayMode::Compact
        } else {
            DisplayMode::Wide
        }
    }
}

/// Window width tracked by the host, shared with every controller
pub struct Viewport {
    width: Arc<RwLock<u32>>,
    compact_max_width: u32,
}

impl Viewport {
    pub fn new(width: u32, compact_max_width: u32) -> Self {
        Self {
            width: Arc::new(RwLock::new(width)),
            compact_max_width,
        }
    }

    pub fn resize(&self, width: u32) {
        let mut current = self.width.write();
        if *current != width {
            tracing::debug!(from = *current, to = width, "Viewport resized");
            *current = width;
        }
    }

    pub fn width(&self) -> u32 {
        *self.width.read()
    }
}

impl DisplaySignal for Viewport {
    fn is_compact(&self) -> bool {
        DisplayMode::from_width(self.width(), self.compact_max_width).is_compact()
    }
}

impl Clone for Viewport {
    fn clone(&self) -> Self {
        Self {
            width: Arc::clone(&self.width),
            compact_max_width: self.compact_max_width,
        }
    }
}

/// Whether a delete needs an explicit yes first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePolicy {
    Confirm,
    Immediate,
}

impl DeletePolicy {
    pub fn for_mode(mode: DisplayMode) -> Self {
        match mode {
            DisplayMode::Compact => DeletePolicy::Confirm,
            DisplayMode::Wide => DeletePolicy::Immediate,
        }
    }
}
