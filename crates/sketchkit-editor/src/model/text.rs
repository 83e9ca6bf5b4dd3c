use serde::{Deserialize, Serialize};
use sketchkit_core::{normalize_angle, rotate_point, Color, Point, Rect, ShapeId, Vector};

use super::DrawableShape;
use crate::error::{EditorError, Result};

/// A text label laid out into a caller-supplied display rectangle.
///
/// The editor core performs no font measurement; the display rect is the
/// shape's unrotated bounds and a renderer is responsible for fitting the
/// glyphs into it. Reflection is tracked as flip flags for the renderer to
/// honor rather than as a coordinate change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Text {
    pub id: ShapeId,
    content: String,
    font_size: f64,
    pub font_family: String,
    bounds: Rect,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    pub stroke: Color,
    pub fill: Color,
    rotation: f64,
}

impl Text {
    pub fn new(content: impl Into<String>, bounds: Rect, font_size: f64) -> Result<Self> {
        if font_size <= 0.0 {
            return Err(EditorError::InvalidFontSize(font_size));
        }
        Ok(Self {
            id: ShapeId::new(),
            content: content.into(),
            font_size,
            font_family: "Sans".to_string(),
            bounds,
            flip_horizontal: false,
            flip_vertical: false,
            stroke: Color::BLACK,
            fill: Color::BLACK,
            rotation: 0.0,
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn set_font_size(&mut self, size: f64) -> Result<()> {
        if size <= 0.0 {
            return Err(EditorError::InvalidFontSize(size));
        }
        self.font_size = size;
        Ok(())
    }
}

impl DrawableShape for Text {
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

    fn reflect_horizontal(&mut self) {
        self.flip_horizontal = !self.flip_horizontal;
    }

    fn reflect_vertical(&mut self) {
        self.flip_vertical = !self.flip_vertical;
    }
}
