//! The drawing: an ordered collection of top-level shapes.
//!
//! List position encodes z-order (index 0 = bottommost). A shape appears at
//! most once at the top level; descendants of a group are reached only
//! through the group. Every structural mutation emits exactly one typed
//! event to the attached observers, synchronously, before the call returns.

mod events;
mod observers;

pub use events::{DrawingEvent, DrawingEventKind};
pub use observers::{EventFilter, ObserverRegistry, SubscriptionId};

use sketchkit_core::{Color, Rect, ShapeId, Vector};

use crate::error::{EditorError, Result};
use crate::model::{DrawableShape, Shape};

/// Ordered shape container with change notification.
#[derive(Debug, Default)]
pub struct Drawing {
    shapes: Vec<Shape>,
    observers: ObserverRegistry,
}

impl Drawing {
    /// Creates an empty drawing.
    pub fn new() -> Self {
        Self::default()
    }

    /// The top-level shapes in z-order, bottom first.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Top-level position of a shape, or `None` if it is not at the top
    /// level (descendants of groups are not listed separately).
    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id() == id)
    }

    /// Borrow a top-level shape by id.
    pub fn shape(&self, id: ShapeId) -> Result<&Shape> {
        self.shapes
            .iter()
            .find(|s| s.id() == id)
            .ok_or(EditorError::ShapeNotFound(id))
    }

    /// Finds a shape by id anywhere in the drawing, descending into groups.
    pub fn find(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find_map(|s| s.find_by_id(id))
    }

    /// Appends a shape at the top of the stacking order.
    pub fn add(&mut self, shape: Shape) {
        let event = DrawingEvent::ShapeAdded(shape.clone());
        self.shapes.push(shape);
        self.observers.notify(&event);
    }

    /// Inserts a shape at a bounds-checked z-order position.
    pub fn insert(&mut self, index: usize, shape: Shape) -> Result<()> {
        if index > self.shapes.len() {
            return Err(EditorError::IndexOutOfRange {
                index,
                len: self.shapes.len(),
            });
        }
        let event = DrawingEvent::ShapeAdded(shape.clone());
        self.shapes.insert(index, shape);
        self.observers.notify(&event);
        Ok(())
    }

    /// Removes a top-level shape, returning ownership to the caller.
    pub fn remove(&mut self, id: ShapeId) -> Result<Shape> {
        let index = self.index_of(id).ok_or(EditorError::ShapeNotFound(id))?;
        let shape = self.shapes.remove(index);
        self.observers.notify(&DrawingEvent::ShapeRemoved(shape.clone()));
        Ok(shape)
    }

    /// Removes a shape by id, searching group children recursively when it
    /// is not at the top level. Returns `None` if the id is unknown.
    pub fn remove_by_id(&mut self, id: ShapeId) -> Option<Shape> {
        if let Some(index) = self.index_of(id) {
            let shape = self.shapes.remove(index);
            self.observers.notify(&DrawingEvent::ShapeRemoved(shape.clone()));
            return Some(shape);
        }
        for top in &mut self.shapes {
            if let Shape::Group(group) = top {
                if let Some(shape) = remove_from_group(group, id) {
                    self.observers.notify(&DrawingEvent::ShapeRemoved(shape.clone()));
                    return Some(shape);
                }
            }
        }
        None
    }

    /// Empties the drawing, emitting the removed set.
    pub fn clear(&mut self) {
        let removed = std::mem::take(&mut self.shapes);
        self.observers.notify(&DrawingEvent::Cleared(removed));
    }

    /// Replaces the whole shape list, emitting a single load event.
    pub fn load(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
        self.observers
            .notify(&DrawingEvent::Loaded(self.shapes.clone()));
    }

    /// Moves a shape to the top of the stacking order.
    pub fn bring_to_front(&mut self, id: ShapeId) -> Result<()> {
        let target = self.shapes.len().saturating_sub(1);
        self.restack(id, target)
    }

    /// Moves a shape to the bottom of the stacking order.
    pub fn send_to_back(&mut self, id: ShapeId) -> Result<()> {
        self.restack(id, 0)
    }

    /// Removes then re-inserts a shape at `index`, clamped to the list end,
    /// emitting a single z-order event.
    pub fn restack(&mut self, id: ShapeId, index: usize) -> Result<()> {
        let current = self.index_of(id).ok_or(EditorError::ShapeNotFound(id))?;
        let shape = self.shapes.remove(current);
        let event = DrawingEvent::ZOrderChanged(shape.clone());
        let index = index.min(self.shapes.len());
        self.shapes.insert(index, shape);
        self.observers.notify(&event);
        Ok(())
    }

    pub fn set_shape_stroke_color(&mut self, id: ShapeId, color: Color) -> Result<()> {
        self.modify(id, |shape| {
            shape.set_stroke_color(color);
            Ok(())
        })
    }

    pub fn set_shape_fill_color(&mut self, id: ShapeId, color: Color) -> Result<()> {
        self.modify(id, |shape| {
            shape.set_fill_color(color);
            Ok(())
        })
    }

    pub fn set_shape_rotation(&mut self, id: ShapeId, degrees: f64) -> Result<()> {
        self.modify(id, |shape| {
            shape.set_rotation(degrees);
            Ok(())
        })
    }

    pub fn move_shape(&mut self, id: ShapeId, v: Vector) -> Result<()> {
        self.modify(id, |shape| {
            shape.translate(v);
            Ok(())
        })
    }

    pub fn resize_shape(&mut self, id: ShapeId, bounds: Rect) -> Result<()> {
        self.modify(id, |shape| {
            shape.resize(bounds);
            Ok(())
        })
    }

    pub fn reflect_shape_horizontal(&mut self, id: ShapeId) -> Result<()> {
        self.modify(id, |shape| {
            shape.reflect_horizontal();
            Ok(())
        })
    }

    pub fn reflect_shape_vertical(&mut self, id: ShapeId) -> Result<()> {
        self.modify(id, |shape| {
            shape.reflect_vertical();
            Ok(())
        })
    }

    /// Replaces the content of a top-level text shape.
    pub fn set_text_content(&mut self, id: ShapeId, content: &str) -> Result<()> {
        self.modify(id, |shape| {
            shape.as_text_mut()?.set_content(content);
            Ok(())
        })
    }

    /// Changes the font size of a top-level text shape.
    pub fn set_font_size(&mut self, id: ShapeId, size: f64) -> Result<()> {
        self.modify(id, |shape| shape.as_text_mut()?.set_font_size(size))
    }

    /// Attaches an observer for every event kind.
    pub fn subscribe(&self, handler: impl Fn(&DrawingEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(handler)
    }

    /// Attaches an observer for the event kinds selected by `filter`.
    pub fn subscribe_filtered(
        &self,
        filter: EventFilter,
        handler: impl Fn(&DrawingEvent) + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe_filtered(filter, handler)
    }

    /// Detaches an observer.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Runs a mutation against a top-level shape, then emits one modify
    /// event carrying the changed shape.
    fn modify(&mut self, id: ShapeId, f: impl FnOnce(&mut Shape) -> Result<()>) -> Result<()> {
        let index = self.index_of(id).ok_or(EditorError::ShapeNotFound(id))?;
        f(&mut self.shapes[index])?;
        self.observers
            .notify(&DrawingEvent::ShapeModified(self.shapes[index].clone()));
        Ok(())
    }
}

/// Depth-first removal of a descendant from a group.
fn remove_from_group(group: &mut crate::model::Group, id: ShapeId) -> Option<Shape> {
    if let Some(shape) = group.remove_child(id) {
        return Some(shape);
    }
    for child in group.children_mut() {
        if let Shape::Group(nested) = child {
            if let Some(shape) = remove_from_group(nested, id) {
                return Some(shape);
            }
        }
    }
    None
}
