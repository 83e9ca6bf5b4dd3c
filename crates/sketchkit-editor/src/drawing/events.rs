//! Change-event definitions for the drawing.
//!
//! Events are cloneable and serializable so collaborators can log or replay
//! them. The enumeration is closed and shared with the outer view/engine
//! layers: the transform, grid, and selection kinds are never emitted by the
//! drawing itself.

use serde::{Deserialize, Serialize};
use sketchkit_core::ShapeId;

use crate::model::Shape;

/// A change notification emitted by the drawing (or an outer layer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DrawingEvent {
    /// A shape was added to the top level.
    ShapeAdded(Shape),
    /// A shape was removed from the drawing.
    ShapeRemoved(Shape),
    /// A shape's geometry, rotation, color, or text changed in place.
    ShapeModified(Shape),
    /// A shape moved to a different stacking position.
    ZOrderChanged(Shape),
    /// The whole drawing was emptied; carries the removed shapes.
    Cleared(Vec<Shape>),
    /// The drawing was replaced wholesale; carries the new shape list.
    Loaded(Vec<Shape>),
    /// View pan/zoom changed (emitted by the view layer).
    ViewTransformed,
    /// Grid visibility or spacing changed (emitted by the view layer).
    GridChanged,
    /// The selection changed (emitted by the controller layer).
    SelectionChanged(Vec<ShapeId>),
}

/// Event kind for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawingEventKind {
    Add,
    Remove,
    Modify,
    ZOrder,
    Clear,
    Load,
    Transform,
    Grid,
    Selection,
}

impl DrawingEvent {
    /// Get the kind of this event.
    pub fn kind(&self) -> DrawingEventKind {
        match self {
            DrawingEvent::ShapeAdded(_) => DrawingEventKind::Add,
            DrawingEvent::ShapeRemoved(_) => DrawingEventKind::Remove,
            DrawingEvent::ShapeModified(_) => DrawingEventKind::Modify,
            DrawingEvent::ZOrderChanged(_) => DrawingEventKind::ZOrder,
            DrawingEvent::Cleared(_) => DrawingEventKind::Clear,
            DrawingEvent::Loaded(_) => DrawingEventKind::Load,
            DrawingEvent::ViewTransformed => DrawingEventKind::Transform,
            DrawingEvent::GridChanged => DrawingEventKind::Grid,
            DrawingEvent::SelectionChanged(_) => DrawingEventKind::Selection,
        }
    }

    /// Short description for logging.
    pub fn description(&self) -> String {
        match self {
            DrawingEvent::ShapeAdded(s) => format!("added {}", s.id()),
            DrawingEvent::ShapeRemoved(s) => format!("removed {}", s.id()),
            DrawingEvent::ShapeModified(s) => format!("modified {}", s.id()),
            DrawingEvent::ZOrderChanged(s) => format!("restacked {}", s.id()),
            DrawingEvent::Cleared(shapes) => format!("cleared {} shapes", shapes.len()),
            DrawingEvent::Loaded(shapes) => format!("loaded {} shapes", shapes.len()),
            DrawingEvent::ViewTransformed => "view transformed".to_string(),
            DrawingEvent::GridChanged => "grid changed".to_string(),
            DrawingEvent::SelectionChanged(ids) => format!("selection: {} shapes", ids.len()),
        }
    }
}
