//! Error types for the editor core.
//!
//! Only invalid arguments and precondition violations surface as errors.
//! Degenerate geometry (empty drags, zero-size bounds, empty groups) and
//! stale command state are absorbed locally with a diagnostic, since they
//! arise from ordinary interactive editing.

use sketchkit_core::ShapeId;
use thiserror::Error;

use crate::model::ShapeKind;

/// Editor error type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// The target shape is not present at the drawing's top level.
    #[error("shape {0} is not part of the drawing")]
    ShapeNotFound(ShapeId),

    /// An index-addressed operation went past the end of a shape list.
    #[error("index {index} out of range for list of {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The length of the list at the time of the call.
        len: usize,
    },

    /// A composite-only operation was invoked on a leaf shape.
    #[error("{0:?} is not a composite shape")]
    NotComposite(ShapeKind),

    /// A polygon needs at least three vertices.
    #[error("polygon requires at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    /// A group operation needs at least two shapes.
    #[error("grouping requires at least 2 shapes, got {0}")]
    TooFewShapes(usize),

    /// Font sizes must be strictly positive.
    #[error("font size must be positive, got {0}")]
    InvalidFontSize(f64),

    /// A mutator that expects a text shape was aimed at something else.
    #[error("{0:?} is not a text shape")]
    NotText(ShapeKind),
}

/// Result alias for editor operations.
pub type Result<T> = std::result::Result<T, EditorError>;
