//! Reversible editing commands.
//!
//! One command per user-visible edit, following the capture-on-first-apply
//! discipline: the "before" state a command needs for `undo` is recorded
//! exactly once, the first time `apply` runs, and is never overwritten by a
//! later re-apply (redo). Structural commands round-trip shape ownership
//! through the command itself, so undo/redo cycles preserve object identity
//! (including group shells and pasted instances).
//!
//! Stale indices and undo-before-apply are command-state conditions: they
//! degrade to safe defaults (append instead of indexed insert, no-op) with a
//! diagnostic rather than raising an error.

use serde::{Deserialize, Serialize};
use sketchkit_core::{Color, Rect, ShapeId, Vector};
use tracing::{debug, warn};

use crate::clipboard::Clipboard;
use crate::drawing::Drawing;
use crate::error::{EditorError, Result};
use crate::model::{DrawableShape, Group, Shape};

/// Which color slot a recolor command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorTarget {
    Stroke,
    Fill,
}

/// Axis of a reflection command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReflectAxis {
    Horizontal,
    Vertical,
}

/// A reversible drawing edit.
#[derive(Debug, Clone)]
pub enum EditorCommand {
    AddShape(AddShape),
    DeleteShape(DeleteShape),
    MoveShape(MoveShape),
    ResizeShape(ResizeShape),
    RotateShape(RotateShape),
    ReflectShape(ReflectShape),
    RecolorShape(RecolorShape),
    RetextShape(RetextShape),
    SetFontSize(SetFontSize),
    CutShape(CutShape),
    CopyShape(CopyShape),
    PasteShape(PasteShape),
    BringToFront(BringToFront),
    SendToBack(SendToBack),
    GroupShapes(GroupShapes),
    UngroupShapes(UngroupShapes),
}

impl EditorCommand {
    /// Runs the forward edit. Calling this again after an intervening
    /// [`EditorCommand::undo`] reproduces the same effect.
    pub fn apply(&mut self, drawing: &mut Drawing, clipboard: &mut Clipboard) -> Result<()> {
        match self {
            EditorCommand::AddShape(cmd) => cmd.apply(drawing),
            EditorCommand::DeleteShape(cmd) => cmd.apply(drawing),
            EditorCommand::MoveShape(cmd) => cmd.apply(drawing),
            EditorCommand::ResizeShape(cmd) => cmd.apply(drawing),
            EditorCommand::RotateShape(cmd) => cmd.apply(drawing),
            EditorCommand::ReflectShape(cmd) => cmd.apply(drawing),
            EditorCommand::RecolorShape(cmd) => cmd.apply(drawing),
            EditorCommand::RetextShape(cmd) => cmd.apply(drawing),
            EditorCommand::SetFontSize(cmd) => cmd.apply(drawing),
            EditorCommand::CutShape(cmd) => cmd.apply(drawing, clipboard),
            EditorCommand::CopyShape(cmd) => cmd.apply(drawing, clipboard),
            EditorCommand::PasteShape(cmd) => cmd.apply(drawing, clipboard),
            EditorCommand::BringToFront(cmd) => cmd.apply(drawing),
            EditorCommand::SendToBack(cmd) => cmd.apply(drawing),
            EditorCommand::GroupShapes(cmd) => cmd.apply(drawing),
            EditorCommand::UngroupShapes(cmd) => cmd.apply(drawing),
        }
    }

    /// Reverts the forward edit using the state captured on first apply.
    ///
    /// The clipboard parameter mirrors `apply`; no undo touches it (cut and
    /// copy deliberately leave the clipboard as the forward edit set it).
    pub fn undo(&mut self, drawing: &mut Drawing, _clipboard: &mut Clipboard) -> Result<()> {
        match self {
            EditorCommand::AddShape(cmd) => cmd.undo(drawing),
            EditorCommand::DeleteShape(cmd) => cmd.undo(drawing),
            EditorCommand::MoveShape(cmd) => cmd.undo(drawing),
            EditorCommand::ResizeShape(cmd) => cmd.undo(drawing),
            EditorCommand::RotateShape(cmd) => cmd.undo(drawing),
            EditorCommand::ReflectShape(cmd) => cmd.undo(drawing),
            EditorCommand::RecolorShape(cmd) => cmd.undo(drawing),
            EditorCommand::RetextShape(cmd) => cmd.undo(drawing),
            EditorCommand::SetFontSize(cmd) => cmd.undo(drawing),
            EditorCommand::CutShape(cmd) => cmd.undo(drawing),
            EditorCommand::CopyShape(cmd) => cmd.undo(),
            EditorCommand::PasteShape(cmd) => cmd.undo(drawing),
            EditorCommand::BringToFront(cmd) => cmd.undo(drawing),
            EditorCommand::SendToBack(cmd) => cmd.undo(drawing),
            EditorCommand::GroupShapes(cmd) => cmd.undo(drawing),
            EditorCommand::UngroupShapes(cmd) => cmd.undo(drawing),
        }
    }

    /// Command name for display (menus, history panels).
    pub fn name(&self) -> &'static str {
        match self {
            EditorCommand::AddShape(_) => "Add Shape",
            EditorCommand::DeleteShape(_) => "Delete Shape",
            EditorCommand::MoveShape(_) => "Move Shape",
            EditorCommand::ResizeShape(_) => "Resize Shape",
            EditorCommand::RotateShape(_) => "Rotate Shape",
            EditorCommand::ReflectShape(cmd) => match cmd.axis {
                ReflectAxis::Horizontal => "Reflect Horizontal",
                ReflectAxis::Vertical => "Reflect Vertical",
            },
            EditorCommand::RecolorShape(cmd) => match cmd.target {
                ColorTarget::Stroke => "Change Stroke Color",
                ColorTarget::Fill => "Change Fill Color",
            },
            EditorCommand::RetextShape(_) => "Change Text",
            EditorCommand::SetFontSize(_) => "Change Font Size",
            EditorCommand::CutShape(_) => "Cut",
            EditorCommand::CopyShape(_) => "Copy",
            EditorCommand::PasteShape(_) => "Paste",
            EditorCommand::BringToFront(_) => "Bring to Front",
            EditorCommand::SendToBack(_) => "Send to Back",
            EditorCommand::GroupShapes(_) => "Group",
            EditorCommand::UngroupShapes(_) => "Ungroup",
        }
    }
}

/// Re-inserts a shape at a previously captured index, appending when the
/// index has gone stale for the current list size.
fn restore_at(drawing: &mut Drawing, index: Option<usize>, shape: Shape) -> Result<()> {
    match index {
        Some(i) if i <= drawing.len() => drawing.insert(i, shape),
        Some(i) => {
            debug!(index = i, len = drawing.len(), "stale index, appending");
            drawing.add(shape);
            Ok(())
        }
        None => {
            drawing.add(shape);
            Ok(())
        }
    }
}

/// Adds a shape to the top of the drawing.
#[derive(Debug, Clone)]
pub struct AddShape {
    id: ShapeId,
    /// Holds the shape before the first apply and while undone.
    shape: Option<Shape>,
}

impl AddShape {
    pub fn new(shape: Shape) -> Self {
        Self {
            id: shape.id(),
            shape: Some(shape),
        }
    }

    fn apply(&mut self, drawing: &mut Drawing) -> Result<()> {
        match self.shape.take() {
            Some(shape) => {
                drawing.add(shape);
                Ok(())
            }
            None => {
                warn!(shape = %self.id, "add already applied");
                Ok(())
            }
        }
    }

    fn undo(&mut self, drawing: &mut Drawing) -> Result<()> {
        self.shape = Some(drawing.remove(self.id)?);
        Ok(())
    }
}

/// Deletes a top-level shape, remembering its z-order position.
#[derive(Debug, Clone)]
pub struct DeleteShape {
    id: ShapeId,
    index: Option<usize>,
    removed: Option<Shape>,
}

impl DeleteShape {
    pub fn new(id: ShapeId) -> Self {
        Self {
            id,
            index: None,
            removed: None,
        }
    }

    fn apply(&mut self, drawing: &mut Drawing) -> Result<()> {
        // Index captured once; a redo must not clobber the original position.
        if self.index.is_none() {
            self.index = drawing.index_of(self.id);
        }
        self.removed = Some(drawing.remove(self.id)?);
        Ok(())
    }

    fn undo(&mut self, drawing: &mut Drawing) -> Result<()> {
        match self.removed.take() {
            Some(shape) => restore_at(drawing, self.index, shape),
            None => {
                warn!(shape = %self.id, "undo before delete was applied");
                Ok(())
            }
        }
    }
}

/// Moves a shape by a displacement vector.
///
/// The command stores the delta, not the prior absolute position; undo
/// re-applies the inverse delta through the same move primitive.
#[derive(Debug, Clone)]
pub struct MoveShape {
    id: ShapeId,
    delta: Vector,
}

impl MoveShape {
    pub fn new(id: ShapeId, delta: Vector) -> Self {
        Self { id, delta }
    }

    fn apply(&mut self, drawing: &mut Drawing) -> Result<()> {
        drawing.move_shape(self.id, self.delta)
    }

    fn undo(&mut self, drawing: &mut Drawing) -> Result<()> {
        drawing.move_shape(self.id, self.delta.inverse())
    }
}

/// Replaces a shape's unrotated bounds.
#[derive(Debug, Clone)]
pub struct ResizeShape {
    id: ShapeId,
    bounds: Rect,
    previous: Option<Rect>,
}

impl ResizeShape {
    pub fn new(id: ShapeId, bounds: Rect) -> Self {
        Self {
            id,
            bounds,
            previous: None,
        }
    }

    fn apply(&mut self, drawing: &mut Drawing) -> Result<()> {
        if self.previous.is_none() {
            self.previous = Some(drawing.shape(self.id)?.bounds());
        }
        drawing.resize_shape(self.id, self.bounds)
    }

    fn undo(&mut self, drawing: &mut Drawing) -> Result<()> {
        match self.previous {
            Some(bounds) => drawing.resize_shape(self.id, bounds),
            None => {
                warn!(shape = %self.id, "undo before resize was applied");
                Ok(())
            }
        }
    }
}

/// Sets a shape's rotation angle.
#[derive(Debug, Clone)]
pub struct RotateShape {
    id: ShapeId,
    degrees: f64,
    previous: Option<f64>,
}

impl RotateShape {
    pub fn new(id: ShapeId, degrees: f64) -> Self {
        Self {
            id,
            degrees,
            previous: None,
        }
    }

    fn apply(&mut self, drawing: &mut Drawing) -> Result<()> {
        if self.previous.is_none() {
            self.previous = Some(drawing.shape(self.id)?.rotation());
        }
        drawing.set_shape_rotation(self.id, self.degrees)
    }

    fn undo(&mut self, drawing: &mut Drawing) -> Result<()> {
        match self.previous {
            Some(degrees) => drawing.set_shape_rotation(self.id, degrees),
            None => {
                warn!(shape = %self.id, "undo before rotate was applied");
                Ok(())
            }
        }
    }
}

/// Reflects a shape. Reflection is self-inverse, so apply and undo invoke
/// the same primitive.
#[derive(Debug, Clone)]
pub struct ReflectShape {
    id: ShapeId,
    axis: ReflectAxis,
}

impl ReflectShape {
    pub fn new(id: ShapeId, axis: ReflectAxis) -> Self {
        Self { id, axis }
    }

    fn apply(&mut self, drawing: &mut Drawing) -> Result<()> {
        match self.axis {
            ReflectAxis::Horizontal => drawing.reflect_shape_horizontal(self.id),
            ReflectAxis::Vertical => drawing.reflect_shape_vertical(self.id),
        }
    }

    fn undo(&mut self, drawing: &mut Drawing) -> Result<()> {
        self.apply(drawing)
    }
}

/// Changes a shape's stroke or fill color.
#[derive(Debug, Clone)]
pub struct RecolorShape {
    id: ShapeId,
    target: ColorTarget,
    color: Color,
    previous: Option<Color>,
}

impl RecolorShape {
    pub fn new(id: ShapeId, target: ColorTarget, color: Color) -> Self {
        Self {
            id,
            target,
            color,
            previous: None,
        }
    }

    fn set(&self, drawing: &mut Drawing, color: Color) -> Result<()> {
        match self.target {
            ColorTarget::Stroke => drawing.set_shape_stroke_color(self.id, color),
            ColorTarget::Fill => drawing.set_shape_fill_color(self.id, color),
        }
    }

    fn apply(&mut self, drawing: &mut Drawing) -> Result<()> {
        if self.previous.is_none() {
            let shape = drawing.shape(self.id)?;
            self.previous = Some(match self.target {
                ColorTarget::Stroke => shape.stroke_color(),
                ColorTarget::Fill => shape.fill_color(),
            });
        }
        self.set(drawing, self.color)
    }

    fn undo(&mut self, drawing: &mut Drawing) -> Result<()> {
        match self.previous {
            Some(color) => self.set(drawing, color),
            None => {
                warn!(shape = %self.id, "undo before recolor was applied");
                Ok(())
            }
        }
    }
}

/// Replaces the content of a text shape.
#[derive(Debug, Clone)]
pub struct RetextShape {
    id: ShapeId,
    content: String,
    previous: Option<String>,
}

impl RetextShape {
    pub fn new(id: ShapeId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            previous: None,
        }
    }

    fn apply(&mut self, drawing: &mut Drawing) -> Result<()> {
        if self.previous.is_none() {
            self.previous = Some(drawing.shape(self.id)?.as_text()?.content().to_string());
        }
        drawing.set_text_content(self.id, &self.content)
    }

    fn undo(&mut self, drawing: &mut Drawing) -> Result<()> {
        match self.previous.clone() {
            Some(content) => drawing.set_text_content(self.id, &content),
            None => {
                warn!(shape = %self.id, "undo before retext was applied");
                Ok(())
            }
        }
    }
}

/// Changes the base font size of a text shape.
#[derive(Debug, Clone)]
pub struct SetFontSize {
    id: ShapeId,
    size: f64,
    previous: Option<f64>,
}

impl SetFontSize {
    /// Fails fast on a non-positive size.
    pub fn new(id: ShapeId, size: f64) -> Result<Self> {
        if size <= 0.0 {
            return Err(EditorError::InvalidFontSize(size));
        }
        Ok(Self {
            id,
            size,
            previous: None,
        })
    }

    fn apply(&mut self, drawing: &mut Drawing) -> Result<()> {
        if self.previous.is_none() {
            self.previous = Some(drawing.shape(self.id)?.as_text()?.font_size());
        }
        drawing.set_font_size(self.id, self.size)
    }

    fn undo(&mut self, drawing: &mut Drawing) -> Result<()> {
        match self.previous {
            Some(size) => drawing.set_font_size(self.id, size),
            None => {
                warn!(shape = %self.id, "undo before font size was applied");
                Ok(())
            }
        }
    }
}

/// Cuts a shape: a clone goes to the clipboard, then the original leaves
/// the drawing (with its index captured, like delete).
#[derive(Debug, Clone)]
pub struct CutShape {
    id: ShapeId,
    index: Option<usize>,
    removed: Option<Shape>,
}

impl CutShape {
    pub fn new(id: ShapeId) -> Self {
        Self {
            id,
            index: None,
            removed: None,
        }
    }

    fn apply(&mut self, drawing: &mut Drawing, clipboard: &mut Clipboard) -> Result<()> {
        clipboard.set(drawing.shape(self.id)?);
        if self.index.is_none() {
            self.index = drawing.index_of(self.id);
        }
        self.removed = Some(drawing.remove(self.id)?);
        Ok(())
    }

    fn undo(&mut self, drawing: &mut Drawing) -> Result<()> {
        // The clipboard keeps the cut content; only the drawing is restored.
        match self.removed.take() {
            Some(shape) => restore_at(drawing, self.index, shape),
            None => {
                warn!(shape = %self.id, "undo before cut was applied");
                Ok(())
            }
        }
    }
}

/// Copies a shape to the clipboard. No drawing mutation; undo is a no-op.
#[derive(Debug, Clone)]
pub struct CopyShape {
    id: ShapeId,
}

impl CopyShape {
    pub fn new(id: ShapeId) -> Self {
        Self { id }
    }

    fn apply(&mut self, drawing: &mut Drawing, clipboard: &mut Clipboard) -> Result<()> {
        clipboard.set(drawing.shape(self.id)?);
        Ok(())
    }

    fn undo(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Pastes the clipboard content as a new-identity clone, offset by a
/// caller-supplied vector. Undo removes that specific pasted instance.
#[derive(Debug, Clone)]
pub struct PasteShape {
    offset: Vector,
    pasted_id: Option<ShapeId>,
    /// Holds the pasted instance while undone, so redo re-adds the same one.
    pasted: Option<Shape>,
}

impl PasteShape {
    pub fn new(offset: Vector) -> Self {
        Self {
            offset,
            pasted_id: None,
            pasted: None,
        }
    }

    /// Id of the pasted instance, once the command has run.
    pub fn pasted_id(&self) -> Option<ShapeId> {
        self.pasted_id
    }

    fn apply(&mut self, drawing: &mut Drawing, clipboard: &mut Clipboard) -> Result<()> {
        if let Some(shape) = self.pasted.take() {
            drawing.add(shape);
            return Ok(());
        }
        if self.pasted_id.is_some() {
            warn!("paste already applied");
            return Ok(());
        }
        match clipboard.get() {
            Some(content) => {
                let mut shape = content.clone_with_new_ids();
                shape.translate(self.offset);
                self.pasted_id = Some(shape.id());
                drawing.add(shape);
                Ok(())
            }
            None => {
                warn!("paste skipped: clipboard is empty");
                Ok(())
            }
        }
    }

    fn undo(&mut self, drawing: &mut Drawing) -> Result<()> {
        match self.pasted_id {
            Some(id) => {
                self.pasted = Some(drawing.remove(id)?);
                Ok(())
            }
            None => {
                warn!("undo before paste was applied");
                Ok(())
            }
        }
    }
}

/// Raises a shape to the top of the z-order.
#[derive(Debug, Clone)]
pub struct BringToFront {
    id: ShapeId,
    previous_index: Option<usize>,
}

impl BringToFront {
    pub fn new(id: ShapeId) -> Self {
        Self {
            id,
            previous_index: None,
        }
    }

    fn apply(&mut self, drawing: &mut Drawing) -> Result<()> {
        if self.previous_index.is_none() {
            self.previous_index = drawing.index_of(self.id);
        }
        drawing.bring_to_front(self.id)
    }

    fn undo(&mut self, drawing: &mut Drawing) -> Result<()> {
        match self.previous_index {
            Some(index) => drawing.restack(self.id, index),
            None => {
                warn!(shape = %self.id, "undo before bring-to-front was applied");
                Ok(())
            }
        }
    }
}

/// Lowers a shape to the bottom of the z-order.
#[derive(Debug, Clone)]
pub struct SendToBack {
    id: ShapeId,
    previous_index: Option<usize>,
}

impl SendToBack {
    pub fn new(id: ShapeId) -> Self {
        Self {
            id,
            previous_index: None,
        }
    }

    fn apply(&mut self, drawing: &mut Drawing) -> Result<()> {
        if self.previous_index.is_none() {
            self.previous_index = drawing.index_of(self.id);
        }
        drawing.send_to_back(self.id)
    }

    fn undo(&mut self, drawing: &mut Drawing) -> Result<()> {
        match self.previous_index {
            Some(index) => drawing.restack(self.id, index),
            None => {
                warn!(shape = %self.id, "undo before send-to-back was applied");
                Ok(())
            }
        }
    }
}

/// Collects top-level shapes into a newly constructed group.
///
/// The member shapes keep their identifiers; the group shell keeps its own
/// identifier across undo/redo cycles. Shapes missing from the drawing at
/// apply time are silently skipped. Undoing re-appends the members, so their
/// exact original interleaving with unrelated shapes is not restored (known
/// limitation).
#[derive(Debug, Clone)]
pub struct GroupShapes {
    ids: Vec<ShapeId>,
    group_id: ShapeId,
    /// The emptied group shell while undone.
    shell: Option<Shape>,
}

impl GroupShapes {
    /// Fails fast when fewer than two shapes are named. The id of the group
    /// to be created is fixed here, before the command runs.
    pub fn new(ids: Vec<ShapeId>) -> Result<Self> {
        if ids.len() < 2 {
            return Err(EditorError::TooFewShapes(ids.len()));
        }
        Ok(Self {
            ids,
            group_id: ShapeId::new(),
            shell: None,
        })
    }

    /// Id the created group carries.
    pub fn group_id(&self) -> ShapeId {
        self.group_id
    }

    /// Removes the members bottom-up in z-order, descending indices first so
    /// earlier removals cannot shift later ones.
    fn collect_members(&self, drawing: &mut Drawing) -> Vec<Shape> {
        let mut present: Vec<(usize, ShapeId)> = self
            .ids
            .iter()
            .filter_map(|&id| drawing.index_of(id).map(|i| (i, id)))
            .collect();
        for &id in &self.ids {
            if drawing.index_of(id).is_none() {
                debug!(shape = %id, "group skipped missing shape");
            }
        }
        present.sort_by(|a, b| b.0.cmp(&a.0));
        let mut members: Vec<Shape> = present
            .into_iter()
            .filter_map(|(_, id)| drawing.remove(id).ok())
            .collect();
        // Removal ran top-down; children keep bottom-first order.
        members.reverse();
        members
    }

    fn apply(&mut self, drawing: &mut Drawing) -> Result<()> {
        match self.shell.take() {
            Some(mut shell) => {
                // Redo: reassemble the same group shell.
                let members = self.collect_members(drawing);
                let group = shell.as_group_mut()?;
                for member in members {
                    group.add_child(member);
                }
                drawing.add(shell);
                Ok(())
            }
            None => {
                let members = self.collect_members(drawing);
                let mut group = Group::new(members);
                group.id = self.group_id;
                drawing.add(Shape::Group(group));
                Ok(())
            }
        }
    }

    fn undo(&mut self, drawing: &mut Drawing) -> Result<()> {
        let mut shell = drawing.remove(self.group_id)?;
        for child in shell.as_group_mut()?.take_children() {
            drawing.add(child);
        }
        self.shell = Some(shell);
        Ok(())
    }
}

/// Dissolves a group into its children at the top level.
///
/// Undo removes the children again and re-inserts the original group object
/// at its captured index.
#[derive(Debug, Clone)]
pub struct UngroupShapes {
    group_id: ShapeId,
    index: Option<usize>,
    child_ids: Vec<ShapeId>,
    shell: Option<Shape>,
}

impl UngroupShapes {
    pub fn new(group_id: ShapeId) -> Self {
        Self {
            group_id,
            index: None,
            child_ids: Vec::new(),
            shell: None,
        }
    }

    fn apply(&mut self, drawing: &mut Drawing) -> Result<()> {
        // Reject ungrouping a leaf before touching the drawing.
        drawing.shape(self.group_id)?.as_group()?;
        if self.index.is_none() {
            self.index = drawing.index_of(self.group_id);
        }
        let mut shell = drawing.remove(self.group_id)?;
        let children = shell.as_group_mut()?.take_children();
        self.child_ids = children.iter().map(|c| c.id()).collect();
        for child in children {
            drawing.add(child);
        }
        self.shell = Some(shell);
        Ok(())
    }

    fn undo(&mut self, drawing: &mut Drawing) -> Result<()> {
        let Some(mut shell) = self.shell.take() else {
            warn!(shape = %self.group_id, "undo before ungroup was applied");
            return Ok(());
        };
        {
            let group = shell.as_group_mut()?;
            for &id in &self.child_ids {
                match drawing.remove(id) {
                    Ok(child) => group.add_child(child),
                    Err(_) => warn!(shape = %id, "ungroup undo: child no longer present"),
                }
            }
        }
        restore_at(drawing, self.index, shell)
    }
}
