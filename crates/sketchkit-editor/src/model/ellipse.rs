use serde::{Deserialize, Serialize};
use sketchkit_core::{normalize_angle, rotate_point, Color, Point, Rect, ShapeId, Vector};

use super::DrawableShape;

/// Tolerance on the normalized ellipse equation for edge-inclusive hits.
const EDGE_EPSILON: f64 = 1e-9;

/// An ellipse defined by its unrotated axis-aligned bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ellipse {
    pub id: ShapeId,
    bounds: Rect,
    pub stroke: Color,
    pub fill: Color,
    rotation: f64,
}

impl Ellipse {
    pub fn new(bounds: Rect) -> Self {
        Self {
            id: ShapeId::new(),
            bounds,
            stroke: Color::BLACK,
            fill: Color::TRANSPARENT,
            rotation: 0.0,
        }
    }

    /// Semi-axis along x.
    pub fn radius_x(&self) -> f64 {
        self.bounds.width / 2.0
    }

    /// Semi-axis along y.
    pub fn radius_y(&self) -> f64 {
        self.bounds.height / 2.0
    }
}

impl DrawableShape for Ellipse {
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
        let rx = self.radius_x();
        let ry = self.radius_y();
        // A collapsed ellipse contains nothing.
        if rx <= 0.0 || ry <= 0.0 {
            return false;
        }
        let center = self.bounds.center();
        let local = rotate_point(p, center, -self.rotation);
        let nx = (local.x - center.x) / rx;
        let ny = (local.y - center.y) / ry;
        nx * nx + ny * ny <= 1.0 + EDGE_EPSILON
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn rotated_bounds(&self) -> Rect {
        let rx = self.radius_x();
        let ry = self.radius_y();
        let theta = self.rotation.to_radians();
        let (sin, cos) = theta.sin_cos();
        // Semi-axis projection of a rotated ellipse onto the drawing axes.
        let half_w = (rx * rx * cos * cos + ry * ry * sin * sin).sqrt();
        let half_h = (rx * rx * sin * sin + ry * ry * cos * cos).sqrt();
        Rect::from_center(self.bounds.center(), 2.0 * half_w, 2.0 * half_h)
    }

    fn reflect_horizontal(&mut self) {
        self.rotation = normalize_angle(180.0 - self.rotation);
    }

    fn reflect_vertical(&mut self) {
        self.rotation = normalize_angle(-self.rotation);
    }
}
