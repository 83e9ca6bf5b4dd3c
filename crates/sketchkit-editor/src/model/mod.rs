//! Shape model: drawable variants and their geometric contract.
//!
//! Five leaf variants (line, rectangle, ellipse, polygon, text) own their
//! geometry plus a rotation angle; the composite `Group` owns only a child
//! list and its own rotation. Rotation is a presentation-time transform
//! applied about the center of a shape's unrotated bounds, so the unrotated
//! bounds of every variant are independent of its angle.

use serde::{Deserialize, Serialize};
use sketchkit_core::{Color, Point, Rect, ShapeId, Vector};

mod ellipse;
mod group;
mod line;
mod polygon;
mod rectangle;
mod text;

pub use ellipse::Ellipse;
pub use group::Group;
pub use line::Line;
pub use polygon::Polygon;
pub use rectangle::Rectangle;
pub use text::Text;

use crate::error::{EditorError, Result};

/// Geometric and visual contract shared by every shape variant.
pub trait DrawableShape {
    /// Displaces the shape by `v`.
    fn translate(&mut self, v: Vector);

    /// Replaces the shape's unrotated bounds. Variant-specific: lines
    /// re-derive endpoints from opposite corners, polygons scale vertex
    /// offsets, groups scale children proportionally.
    fn resize(&mut self, bounds: Rect);

    /// Rotation angle in degrees, always in `[0, 360)`.
    fn rotation(&self) -> f64;

    /// Sets the rotation angle, normalizing into `[0, 360)`.
    fn set_rotation(&mut self, degrees: f64);

    fn stroke_color(&self) -> Color;
    fn set_stroke_color(&mut self, color: Color);
    fn fill_color(&self) -> Color;
    fn set_fill_color(&mut self, color: Color);

    /// Rotation-aware hit test in drawing coordinates.
    fn contains(&self, p: Point) -> bool;

    /// Axis-aligned bounds of the unrotated shape.
    fn bounds(&self) -> Rect;

    /// Axis-aligned box enclosing the shape once its rotation is applied.
    fn rotated_bounds(&self) -> Rect;

    /// Mirror across the vertical axis through the bounds center.
    fn reflect_horizontal(&mut self);

    /// Mirror across the horizontal axis through the bounds center.
    fn reflect_vertical(&mut self);
}

/// Discriminant for the shape variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Line,
    Rectangle,
    Ellipse,
    Polygon,
    Text,
    Group,
}

/// A drawable shape.
///
/// `Clone` produces a value-equal, independently-mutable copy that keeps
/// every identifier (recursively for groups); use [`Shape::clone_with_new_ids`]
/// when a fresh identity is required, e.g. for paste.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Shape {
    Line(Line),
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Polygon(Polygon),
    Text(Text),
    Group(Group),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Line(_) => ShapeKind::Line,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::Polygon(_) => ShapeKind::Polygon,
            Shape::Text(_) => ShapeKind::Text,
            Shape::Group(_) => ShapeKind::Group,
        }
    }

    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Line(s) => s.id,
            Shape::Rectangle(s) => s.id,
            Shape::Ellipse(s) => s.id,
            Shape::Polygon(s) => s.id,
            Shape::Text(s) => s.id,
            Shape::Group(s) => s.id,
        }
    }

    /// True only for the composite variant.
    pub fn is_composite(&self) -> bool {
        matches!(self, Shape::Group(_))
    }

    /// Composite capability access. Leaves reject with a capability error
    /// instead of silently ignoring composite operations.
    pub fn as_group(&self) -> Result<&Group> {
        match self {
            Shape::Group(g) => Ok(g),
            other => Err(EditorError::NotComposite(other.kind())),
        }
    }

    pub fn as_group_mut(&mut self) -> Result<&mut Group> {
        match self {
            Shape::Group(g) => Ok(g),
            other => Err(EditorError::NotComposite(other.kind())),
        }
    }

    pub fn as_text(&self) -> Result<&Text> {
        match self {
            Shape::Text(t) => Ok(t),
            other => Err(EditorError::NotText(other.kind())),
        }
    }

    pub fn as_text_mut(&mut self) -> Result<&mut Text> {
        match self {
            Shape::Text(t) => Ok(t),
            other => Err(EditorError::NotText(other.kind())),
        }
    }

    /// Deep copy with a fresh identifier for this shape and every descendant.
    pub fn clone_with_new_ids(&self) -> Shape {
        let mut copy = self.clone();
        copy.assign_new_ids();
        copy
    }

    fn assign_new_ids(&mut self) {
        match self {
            Shape::Line(s) => s.id = ShapeId::new(),
            Shape::Rectangle(s) => s.id = ShapeId::new(),
            Shape::Ellipse(s) => s.id = ShapeId::new(),
            Shape::Polygon(s) => s.id = ShapeId::new(),
            Shape::Text(s) => s.id = ShapeId::new(),
            Shape::Group(g) => {
                g.id = ShapeId::new();
                for child in g.children_mut() {
                    child.assign_new_ids();
                }
            }
        }
    }

    /// Finds this shape or one of its descendants by id.
    pub fn find_by_id(&self, id: ShapeId) -> Option<&Shape> {
        if self.id() == id {
            return Some(self);
        }
        if let Shape::Group(g) = self {
            for child in g.children() {
                if let Some(found) = child.find_by_id(id) {
                    return Some(found);
                }
            }
        }
        None
    }
}

impl DrawableShape for Shape {
    fn translate(&mut self, v: Vector) {
        match self {
            Shape::Line(s) => s.translate(v),
            Shape::Rectangle(s) => s.translate(v),
            Shape::Ellipse(s) => s.translate(v),
            Shape::Polygon(s) => s.translate(v),
            Shape::Text(s) => s.translate(v),
            Shape::Group(s) => s.translate(v),
        }
    }

    fn resize(&mut self, bounds: Rect) {
        match self {
            Shape::Line(s) => s.resize(bounds),
            Shape::Rectangle(s) => s.resize(bounds),
            Shape::Ellipse(s) => s.resize(bounds),
            Shape::Polygon(s) => s.resize(bounds),
            Shape::Text(s) => s.resize(bounds),
            Shape::Group(s) => s.resize(bounds),
        }
    }

    fn rotation(&self) -> f64 {
        match self {
            Shape::Line(s) => s.rotation(),
            Shape::Rectangle(s) => s.rotation(),
            Shape::Ellipse(s) => s.rotation(),
            Shape::Polygon(s) => s.rotation(),
            Shape::Text(s) => s.rotation(),
            Shape::Group(s) => s.rotation(),
        }
    }

    fn set_rotation(&mut self, degrees: f64) {
        match self {
            Shape::Line(s) => s.set_rotation(degrees),
            Shape::Rectangle(s) => s.set_rotation(degrees),
            Shape::Ellipse(s) => s.set_rotation(degrees),
            Shape::Polygon(s) => s.set_rotation(degrees),
            Shape::Text(s) => s.set_rotation(degrees),
            Shape::Group(s) => s.set_rotation(degrees),
        }
    }

    fn stroke_color(&self) -> Color {
        match self {
            Shape::Line(s) => s.stroke_color(),
            Shape::Rectangle(s) => s.stroke_color(),
            Shape::Ellipse(s) => s.stroke_color(),
            Shape::Polygon(s) => s.stroke_color(),
            Shape::Text(s) => s.stroke_color(),
            Shape::Group(s) => s.stroke_color(),
        }
    }

    fn set_stroke_color(&mut self, color: Color) {
        match self {
            Shape::Line(s) => s.set_stroke_color(color),
            Shape::Rectangle(s) => s.set_stroke_color(color),
            Shape::Ellipse(s) => s.set_stroke_color(color),
            Shape::Polygon(s) => s.set_stroke_color(color),
            Shape::Text(s) => s.set_stroke_color(color),
            Shape::Group(s) => s.set_stroke_color(color),
        }
    }

    fn fill_color(&self) -> Color {
        match self {
            Shape::Line(s) => s.fill_color(),
            Shape::Rectangle(s) => s.fill_color(),
            Shape::Ellipse(s) => s.fill_color(),
            Shape::Polygon(s) => s.fill_color(),
            Shape::Text(s) => s.fill_color(),
            Shape::Group(s) => s.fill_color(),
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        match self {
            Shape::Line(s) => s.set_fill_color(color),
            Shape::Rectangle(s) => s.set_fill_color(color),
            Shape::Ellipse(s) => s.set_fill_color(color),
            Shape::Polygon(s) => s.set_fill_color(color),
            Shape::Text(s) => s.set_fill_color(color),
            Shape::Group(s) => s.set_fill_color(color),
        }
    }

    fn contains(&self, p: Point) -> bool {
        match self {
            Shape::Line(s) => s.contains(p),
            Shape::Rectangle(s) => s.contains(p),
            Shape::Ellipse(s) => s.contains(p),
            Shape::Polygon(s) => s.contains(p),
            Shape::Text(s) => s.contains(p),
            Shape::Group(s) => s.contains(p),
        }
    }

    fn bounds(&self) -> Rect {
        match self {
            Shape::Line(s) => s.bounds(),
            Shape::Rectangle(s) => s.bounds(),
            Shape::Ellipse(s) => s.bounds(),
            Shape::Polygon(s) => s.bounds(),
            Shape::Text(s) => s.bounds(),
            Shape::Group(s) => s.bounds(),
        }
    }

    fn rotated_bounds(&self) -> Rect {
        match self {
            Shape::Line(s) => s.rotated_bounds(),
            Shape::Rectangle(s) => s.rotated_bounds(),
            Shape::Ellipse(s) => s.rotated_bounds(),
            Shape::Polygon(s) => s.rotated_bounds(),
            Shape::Text(s) => s.rotated_bounds(),
            Shape::Group(s) => s.rotated_bounds(),
        }
    }

    fn reflect_horizontal(&mut self) {
        match self {
            Shape::Line(s) => s.reflect_horizontal(),
            Shape::Rectangle(s) => s.reflect_horizontal(),
            Shape::Ellipse(s) => s.reflect_horizontal(),
            Shape::Polygon(s) => s.reflect_horizontal(),
            Shape::Text(s) => s.reflect_horizontal(),
            Shape::Group(s) => s.reflect_horizontal(),
        }
    }

    fn reflect_vertical(&mut self) {
        match self {
            Shape::Line(s) => s.reflect_vertical(),
            Shape::Rectangle(s) => s.reflect_vertical(),
            Shape::Ellipse(s) => s.reflect_vertical(),
            Shape::Polygon(s) => s.reflect_vertical(),
            Shape::Text(s) => s.reflect_vertical(),
            Shape::Group(s) => s.reflect_vertical(),
        }
    }
}

impl From<Line> for Shape {
    fn from(s: Line) -> Shape {
        Shape::Line(s)
    }
}

impl From<Rectangle> for Shape {
    fn from(s: Rectangle) -> Shape {
        Shape::Rectangle(s)
    }
}

impl From<Ellipse> for Shape {
    fn from(s: Ellipse) -> Shape {
        Shape::Ellipse(s)
    }
}

impl From<Polygon> for Shape {
    fn from(s: Polygon) -> Shape {
        Shape::Polygon(s)
    }
}

impl From<Text> for Shape {
    fn from(s: Text) -> Shape {
        Shape::Text(s)
    }
}

impl From<Group> for Shape {
    fn from(s: Group) -> Shape {
        Shape::Group(s)
    }
}
