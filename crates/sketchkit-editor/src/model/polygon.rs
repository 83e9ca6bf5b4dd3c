use serde::{Deserialize, Serialize};
use sketchkit_core::{normalize_angle, rotate_point, Color, Point, Rect, ShapeId, Vector};
use tracing::warn;

use super::DrawableShape;
use crate::error::{EditorError, Result};

/// A closed polygon over an ordered vertex list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polygon {
    pub id: ShapeId,
    vertices: Vec<Point>,
    pub stroke: Color,
    pub fill: Color,
    rotation: f64,
}

impl Polygon {
    /// Builds a polygon from at least three vertices.
    pub fn new(vertices: Vec<Point>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(EditorError::TooFewVertices(vertices.len()));
        }
        Ok(Self {
            id: ShapeId::new(),
            vertices,
            stroke: Color::BLACK,
            fill: Color::TRANSPARENT,
            rotation: 0.0,
        })
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Even-odd ray cast over the unrotated vertex list.
    fn contains_local(&self, p: Point) -> bool {
        let mut inside = false;
        let n = self.vertices.len();
        let mut j = n - 1;
        for i in 0..n {
            let vi = self.vertices[i];
            let vj = self.vertices[j];
            if (vi.y > p.y) != (vj.y > p.y) {
                let x_cross = vi.x + (p.y - vi.y) / (vj.y - vi.y) * (vj.x - vi.x);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

impl DrawableShape for Polygon {
    fn translate(&mut self, v: Vector) {
        for vertex in &mut self.vertices {
            *vertex = vertex.translated(v);
        }
    }

    /// Scales each vertex's offset from the old bounds' top-left by the
    /// new/old extent ratios.
    fn resize(&mut self, bounds: Rect) {
        let old = self.bounds();
        if old.is_degenerate() {
            warn!(shape = %self.id, "resize skipped: polygon bounds are degenerate");
            return;
        }
        let sx = bounds.width / old.width;
        let sy = bounds.height / old.height;
        for vertex in &mut self.vertices {
            vertex.x = bounds.x + (vertex.x - old.x) * sx;
            vertex.y = bounds.y + (vertex.y - old.y) * sy;
        }
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
        self.contains_local(local)
    }

    fn bounds(&self) -> Rect {
        Rect::enclosing(&self.vertices)
    }

    fn rotated_bounds(&self) -> Rect {
        let pivot = self.bounds().center();
        let rotated: Vec<Point> = self
            .vertices
            .iter()
            .map(|&v| rotate_point(v, pivot, self.rotation))
            .collect();
        Rect::enclosing(&rotated)
    }

    fn reflect_horizontal(&mut self) {
        let cx = self.bounds().center().x;
        for vertex in &mut self.vertices {
            vertex.x = 2.0 * cx - vertex.x;
        }
    }

    fn reflect_vertical(&mut self) {
        let cy = self.bounds().center().y;
        for vertex in &mut self.vertices {
            vertex.y = 2.0 * cy - vertex.y;
        }
    }
}
