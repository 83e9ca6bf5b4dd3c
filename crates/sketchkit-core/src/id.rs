//! Opaque shape identity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identity token for a shape.
///
/// Generated once at construction and never mutated. Identifiers are random
/// 128-bit values, so they are unique within a drawing for the shape's
/// lifetime and are never reused. Cloning a shape preserves its id; a
/// new-identity clone gets a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeId(Uuid);

impl ShapeId {
    /// Create a new unique shape id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Shape({})", &self.0.to_string()[..8])
    }
}
