//! Single-slot, clone-based shape clipboard.
//!
//! Holds at most one shape value, never a live reference into a drawing.
//! Each copy or cut overwrites the slot; there is no merging. A single
//! owner thread drives all access, so no locking is involved.

use crate::model::Shape;

/// The clipboard slot shared by cut, copy, and paste.
#[derive(Debug, Default)]
pub struct Clipboard {
    slot: Option<Shape>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a clone of `shape`, replacing any previous content.
    pub fn set(&mut self, shape: &Shape) {
        self.slot = Some(shape.clone());
    }

    /// Clones the current content out, if any. The slot keeps its value.
    pub fn get(&self) -> Option<Shape> {
        self.slot.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}
