use serde::{Deserialize, Serialize};
use sketchkit_core::{normalize_angle, rotate_point, Color, Point, Rect, ShapeId, Vector};
use tracing::warn;

use super::{DrawableShape, Shape};
use crate::error::{EditorError, Result};

/// The composite variant: an ordered list of child shapes plus a rotation.
///
/// A group stores no geometry of its own. Its unrotated bounds are always
/// derived from the children, so moving or resizing the children is the only
/// way its bounds change. A group with zero children has zero-sized bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: ShapeId,
    children: Vec<Shape>,
    rotation: f64,
}

impl Group {
    pub fn new(children: Vec<Shape>) -> Self {
        Self {
            id: ShapeId::new(),
            children,
            rotation: 0.0,
        }
    }

    pub fn children(&self) -> &[Shape] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Shape] {
        &mut self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Appends a child at the top of the group's stacking order.
    pub fn add_child(&mut self, shape: Shape) {
        self.children.push(shape);
    }

    /// Removes and returns the direct child with the given id, if present.
    pub fn remove_child(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.children.iter().position(|c| c.id() == id)?;
        Some(self.children.remove(index))
    }

    pub fn child_at(&self, index: usize) -> Result<&Shape> {
        self.children.get(index).ok_or(EditorError::IndexOutOfRange {
            index,
            len: self.children.len(),
        })
    }

    /// Empties the group, handing ownership of every child to the caller.
    pub fn take_children(&mut self) -> Vec<Shape> {
        std::mem::take(&mut self.children)
    }
}

impl DrawableShape for Group {
    fn translate(&mut self, v: Vector) {
        for child in &mut self.children {
            child.translate(v);
        }
    }

    /// Proportionally rescales the children: each child's center offset from
    /// the group center and its own extent are scaled by the new/old bounds
    /// ratios, then the child is re-centered exactly (its own resize may not
    /// land the center, e.g. for lines).
    fn resize(&mut self, bounds: Rect) {
        let old = self.bounds();
        if old.is_degenerate() {
            warn!(shape = %self.id, "resize skipped: group bounds are degenerate");
            return;
        }
        if bounds.is_degenerate() {
            warn!(shape = %self.id, "resize skipped: requested group bounds are degenerate");
            return;
        }
        let sx = bounds.width / old.width;
        let sy = bounds.height / old.height;
        let old_center = old.center();
        let new_center = bounds.center();
        for child in &mut self.children {
            let child_bounds = child.bounds();
            let child_center = child_bounds.center();
            let target = Point::new(
                new_center.x + (child_center.x - old_center.x) * sx,
                new_center.y + (child_center.y - old_center.y) * sy,
            );
            child.resize(Rect::from_center(
                target,
                child_bounds.width * sx,
                child_bounds.height * sy,
            ));
            let landed = child.bounds().center();
            child.translate(Vector::new(target.x - landed.x, target.y - landed.y));
        }
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, degrees: f64) {
        self.rotation = normalize_angle(degrees);
    }

    /// First child's stroke, or transparent for an empty group. An
    /// approximation: not authoritative when children have mixed colors.
    fn stroke_color(&self) -> Color {
        self.children
            .first()
            .map(|c| c.stroke_color())
            .unwrap_or(Color::TRANSPARENT)
    }

    fn set_stroke_color(&mut self, color: Color) {
        for child in &mut self.children {
            child.set_stroke_color(color);
        }
    }

    fn fill_color(&self) -> Color {
        self.children
            .first()
            .map(|c| c.fill_color())
            .unwrap_or(Color::TRANSPARENT)
    }

    fn set_fill_color(&mut self, color: Color) {
        for child in &mut self.children {
            child.set_fill_color(color);
        }
    }

    fn contains(&self, p: Point) -> bool {
        if self.children.is_empty() {
            return false;
        }
        let local = rotate_point(p, self.bounds().center(), -self.rotation);
        self.children.iter().any(|c| c.contains(local))
    }

    /// Union of the children's rotated bounds (child rotation applied, group
    /// rotation not yet applied).
    fn bounds(&self) -> Rect {
        let mut iter = self.children.iter();
        let first = match iter.next() {
            Some(child) => child.rotated_bounds(),
            None => return Rect::default(),
        };
        iter.fold(first, |acc, child| acc.union(&child.rotated_bounds()))
    }

    /// Two-stage rotation: every corner of every child's rotated bounds is
    /// further rotated by the group's own angle about the group's unrotated
    /// bounds center, then enclosed.
    fn rotated_bounds(&self) -> Rect {
        if self.children.is_empty() {
            return Rect::default();
        }
        let pivot = self.bounds().center();
        let mut corners = Vec::with_capacity(self.children.len() * 4);
        for child in &self.children {
            for corner in child.rotated_bounds().corners() {
                corners.push(rotate_point(corner, pivot, self.rotation));
            }
        }
        Rect::enclosing(&corners)
    }

    fn reflect_horizontal(&mut self) {
        let cx = self.bounds().center().x;
        for child in &mut self.children {
            let child_cx = child.bounds().center().x;
            child.translate(Vector::new(2.0 * (cx - child_cx), 0.0));
            child.reflect_horizontal();
        }
        self.rotation = normalize_angle(-self.rotation);
    }

    fn reflect_vertical(&mut self) {
        let cy = self.bounds().center().y;
        for child in &mut self.children {
            let child_cy = child.bounds().center().y;
            child.translate(Vector::new(0.0, 2.0 * (cy - child_cy)));
            child.reflect_vertical();
        }
        self.rotation = normalize_angle(-self.rotation);
    }
}
