use serde::{Deserialize, Serialize};
use sketchkit_core::{
    normalize_angle, rotate_point, Color, Point, Rect, ShapeId, Vector, HIT_TOLERANCE,
};

use super::DrawableShape;

/// A straight segment between two endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub id: ShapeId,
    pub start: Point,
    pub end: Point,
    pub stroke: Color,
    pub fill: Color,
    /// Rotation angle in degrees, applied about the bounds center.
    rotation: f64,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: ShapeId::new(),
            start,
            end,
            stroke: Color::BLACK,
            fill: Color::TRANSPARENT,
            rotation: 0.0,
        }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

impl DrawableShape for Line {
    fn translate(&mut self, v: Vector) {
        self.start = self.start.translated(v);
        self.end = self.end.translated(v);
    }

    /// Re-derives the endpoints from the rectangle's opposite corners.
    /// The original diagonal orientation is lost; this is a documented
    /// limitation of rectangle-driven line resizing.
    fn resize(&mut self, bounds: Rect) {
        self.start = Point::new(bounds.x, bounds.y);
        self.end = Point::new(bounds.x + bounds.width, bounds.y + bounds.height);
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, degrees: f64) {
        self.rotation = normalize_angle(degrees);
    }

    fn stroke_color(&self) -> Color {
        self.stroke
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke = color;
    }

    fn fill_color(&self) -> Color {
        self.fill
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill = color;
    }

    fn contains(&self, p: Point) -> bool {
        let local = rotate_point(p, self.bounds().center(), -self.rotation);
        let len = self.length();
        if len == 0.0 {
            // Degenerate segment: fall back to a point-distance test.
            return local.distance_to(&self.start) < HIT_TOLERANCE;
        }
        let detour = local.distance_to(&self.start) + local.distance_to(&self.end) - len;
        detour.abs() < HIT_TOLERANCE
    }

    fn bounds(&self) -> Rect {
        Rect::from_corners(self.start, self.end)
    }

    fn rotated_bounds(&self) -> Rect {
        let pivot = self.bounds().center();
        let a = rotate_point(self.start, pivot, self.rotation);
        let b = rotate_point(self.end, pivot, self.rotation);
        Rect::from_corners(a, b)
    }

    fn reflect_horizontal(&mut self) {
        let cx = self.bounds().center().x;
        self.start.x = 2.0 * cx - self.start.x;
        self.end.x = 2.0 * cx - self.end.x;
    }

    fn reflect_vertical(&mut self) {
        let cy = self.bounds().center().y;
        self.start.y = 2.0 * cy - self.start.y;
        self.end.y = 2.0 * cy - self.end.y;
    }
}
