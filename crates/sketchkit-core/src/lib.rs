//! # SketchKit Core
//!
//! Fundamental value types for SketchKit.
//! Provides the geometry primitives (points, vectors, rectangles, colors),
//! angle utilities, and the opaque shape identity token shared by every
//! layer of the editor.

pub mod geometry;
pub mod id;

pub use geometry::{
    normalize_angle, rotate_point, Color, Point, Rect, Vector, HIT_TOLERANCE,
};
pub use id::ShapeId;
