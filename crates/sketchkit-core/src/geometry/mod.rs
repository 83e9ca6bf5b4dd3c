//! Geometry primitives for the drawing model.
//!
//! All coordinates are `f64` in drawing units. Rotation angles are degrees,
//! normalized to `[0, 360)`; a shape rotates about the center of its
//! unrotated bounds.

mod color;
mod point;
mod rect;

pub use color::Color;
pub use point::{Point, Vector};
pub use rect::Rect;

/// Hit-test tolerance for stroke-only shapes (lines), in drawing units.
/// Independent of display zoom; callers scale it for zoomed views.
pub const HIT_TOLERANCE: f64 = 1.0;

/// Reduces an angle in degrees to `[0, 360)`, mapping `-0` to `0`.
pub fn normalize_angle(degrees: f64) -> f64 {
    let reduced = degrees.rem_euclid(360.0);
    // rem_euclid of a tiny negative value can round up to exactly 360.
    if reduced >= 360.0 {
        0.0
    } else {
        // rem_euclid(-0.0, 360.0) keeps the sign bit; adding 0.0 clears it.
        reduced + 0.0
    }
}

/// Rotates `p` by `angle_deg` degrees counter-clockwise around `pivot`.
pub fn rotate_point(p: Point, pivot: Point, angle_deg: f64) -> Point {
    let angle_rad = angle_deg.to_radians();
    let s = angle_rad.sin();
    let c = angle_rad.cos();
    let dx = p.x - pivot.x;
    let dy = p.y - pivot.y;
    Point {
        x: pivot.x + dx * c - dy * s,
        y: pivot.y + dx * s + dy * c,
    }
}
