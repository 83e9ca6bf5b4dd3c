use serde::{Deserialize, Serialize};
use sketchkit_core::{normalize_angle, rotate_point, Color, Point, Rect, ShapeId, Vector};

use super::DrawableShape;

/// An axis-aligned rectangle; rotation is applied about its center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rectangle {
    pub id: ShapeId,
    /// Unrotated bounds; independent of the rotation angle.
    bounds: Rect,
    pub stroke: Color,
    pub fill: Color,
    rotation: f64,
}

impl Rectangle {
    pub fn new(bounds: Rect) -> Self {
        Self {
            id: ShapeId::new(),
            bounds,
            stroke: Color::BLACK,
            fill: Color::TRANSPARENT,
            rotation: 0.0,
        }
    }
}

impl DrawableShape for Rectangle {
    fn translate(&mut self, v: Vector) {
        self.bounds = self.bounds.translated(v);
    }

    fn resize(&mut self, bounds: Rect) {
        self.bounds = bounds;
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
        let center = self.bounds.center();
        let local = rotate_point(p, center, -self.rotation);
        let half_w = self.bounds.width / 2.0;
        let half_h = self.bounds.height / 2.0;
        (local.x - center.x).abs() <= half_w && (local.y - center.y).abs() <= half_h
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn rotated_bounds(&self) -> Rect {
        let pivot = self.bounds.center();
        let corners: Vec<Point> = self
            .bounds
            .corners()
            .iter()
            .map(|&c| rotate_point(c, pivot, self.rotation))
            .collect();
        Rect::enclosing(&corners)
    }

    /// Inverts orientation through the rotation angle rather than mirroring
    /// coordinates. Visually exact only for shapes symmetric about their own
    /// center; the silhouette and bounds are preserved either way.
    fn reflect_horizontal(&mut self) {
        self.rotation = normalize_angle(180.0 - self.rotation);
    }

    fn reflect_vertical(&mut self) {
        self.rotation = normalize_angle(-self.rotation);
    }
}
