//! Editing session facade.
//!
//! Bundles the three collaborating pieces of state (drawing, history,
//! clipboard) and wires them together so callers drive editing through one
//! object. Every mutation goes through the command path and is therefore
//! undoable; direct drawing mutators are not exposed here.

use sketchkit_core::{Color, Rect, ShapeId, Vector};
use tracing::info;

use crate::clipboard::Clipboard;
use crate::commands::{
    AddShape, BringToFront, ColorTarget, CopyShape, CutShape, DeleteShape, EditorCommand,
    GroupShapes, MoveShape, PasteShape, RecolorShape, ReflectAxis, ReflectShape, ResizeShape,
    RetextShape, RotateShape, SendToBack, SetFontSize, UngroupShapes,
};
use crate::drawing::Drawing;
use crate::error::Result;
use crate::history::CommandManager;
use crate::model::Shape;

/// An interactive editing session over one drawing.
#[derive(Debug, Default)]
pub struct EditorSession {
    drawing: Drawing,
    history: CommandManager,
    clipboard: Clipboard,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session whose history remembers at most `depth` steps (0 = unlimited).
    pub fn with_history_depth(depth: usize) -> Self {
        Self {
            drawing: Drawing::new(),
            history: CommandManager::with_depth_limit(depth),
            clipboard: Clipboard::new(),
        }
    }

    /// The drawing being edited. Read-only: mutations go through commands.
    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn history(&self) -> &CommandManager {
        &self.history
    }

    /// Runs an arbitrary command through the history.
    pub fn execute(&mut self, command: EditorCommand) -> Result<()> {
        self.history
            .execute(command, &mut self.drawing, &mut self.clipboard)
    }

    pub fn undo(&mut self) -> Result<bool> {
        self.history.undo(&mut self.drawing, &mut self.clipboard)
    }

    pub fn redo(&mut self) -> Result<bool> {
        self.history.redo(&mut self.drawing, &mut self.clipboard)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Adds a shape, returning its id.
    pub fn add_shape(&mut self, shape: impl Into<Shape>) -> Result<ShapeId> {
        let shape = shape.into();
        let id = shape.id();
        self.execute(EditorCommand::AddShape(AddShape::new(shape)))?;
        Ok(id)
    }

    pub fn delete_shape(&mut self, id: ShapeId) -> Result<()> {
        self.execute(EditorCommand::DeleteShape(DeleteShape::new(id)))
    }

    pub fn move_shape(&mut self, id: ShapeId, delta: Vector) -> Result<()> {
        self.execute(EditorCommand::MoveShape(MoveShape::new(id, delta)))
    }

    pub fn resize_shape(&mut self, id: ShapeId, bounds: Rect) -> Result<()> {
        self.execute(EditorCommand::ResizeShape(ResizeShape::new(id, bounds)))
    }

    pub fn rotate_shape(&mut self, id: ShapeId, degrees: f64) -> Result<()> {
        self.execute(EditorCommand::RotateShape(RotateShape::new(id, degrees)))
    }

    pub fn reflect_shape(&mut self, id: ShapeId, axis: ReflectAxis) -> Result<()> {
        self.execute(EditorCommand::ReflectShape(ReflectShape::new(id, axis)))
    }

    pub fn set_stroke_color(&mut self, id: ShapeId, color: Color) -> Result<()> {
        self.execute(EditorCommand::RecolorShape(RecolorShape::new(
            id,
            ColorTarget::Stroke,
            color,
        )))
    }

    pub fn set_fill_color(&mut self, id: ShapeId, color: Color) -> Result<()> {
        self.execute(EditorCommand::RecolorShape(RecolorShape::new(
            id,
            ColorTarget::Fill,
            color,
        )))
    }

    pub fn set_text_content(&mut self, id: ShapeId, content: impl Into<String>) -> Result<()> {
        self.execute(EditorCommand::RetextShape(RetextShape::new(id, content)))
    }

    pub fn set_font_size(&mut self, id: ShapeId, size: f64) -> Result<()> {
        self.execute(EditorCommand::SetFontSize(SetFontSize::new(id, size)?))
    }

    pub fn cut(&mut self, id: ShapeId) -> Result<()> {
        self.execute(EditorCommand::CutShape(CutShape::new(id)))
    }

    pub fn copy(&mut self, id: ShapeId) -> Result<()> {
        self.execute(EditorCommand::CopyShape(CopyShape::new(id)))
    }

    /// Pastes the clipboard content offset by `offset`, returning the id of
    /// the pasted instance, or `None` when the clipboard was empty.
    pub fn paste(&mut self, offset: Vector) -> Result<Option<ShapeId>> {
        if self.clipboard.is_empty() {
            return Ok(None);
        }
        self.execute(EditorCommand::PasteShape(PasteShape::new(offset)))?;
        // Paste appends, so the pasted instance is the topmost shape.
        Ok(self.drawing.shapes().last().map(|s| s.id()))
    }

    pub fn bring_to_front(&mut self, id: ShapeId) -> Result<()> {
        self.execute(EditorCommand::BringToFront(BringToFront::new(id)))
    }

    pub fn send_to_back(&mut self, id: ShapeId) -> Result<()> {
        self.execute(EditorCommand::SendToBack(SendToBack::new(id)))
    }

    /// Groups the named top-level shapes, returning the new group's id.
    pub fn group(&mut self, ids: Vec<ShapeId>) -> Result<ShapeId> {
        let command = GroupShapes::new(ids)?;
        let group_id = command.group_id();
        self.execute(EditorCommand::GroupShapes(command))?;
        Ok(group_id)
    }

    pub fn ungroup(&mut self, group_id: ShapeId) -> Result<()> {
        self.execute(EditorCommand::UngroupShapes(UngroupShapes::new(group_id)))
    }

    /// Discards the current drawing and history, starting fresh. The
    /// clipboard survives, so content can be pasted across drawings.
    pub fn new_drawing(&mut self) {
        info!("starting new drawing");
        self.drawing.clear();
        self.history.clear();
    }

    /// Replaces the drawing with an externally produced shape list and
    /// forgets the history, which referred to the old shapes.
    pub fn load(&mut self, shapes: Vec<Shape>) {
        info!(count = shapes.len(), "loading drawing");
        self.drawing.load(shapes);
        self.history.clear();
    }

    /// Serializes the drawing's shapes to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self.drawing.shapes())
    }

    /// Loads a drawing from the JSON produced by [`EditorSession::to_json`].
    pub fn load_json(&mut self, json: &str) -> serde_json::Result<()> {
        let shapes: Vec<Shape> = serde_json::from_str(json)?;
        self.load(shapes);
        Ok(())
    }

    /// Attaches an observer to the drawing for every event kind.
    pub fn subscribe(
        &self,
        handler: impl Fn(&crate::drawing::DrawingEvent) + 'static,
    ) -> crate::drawing::SubscriptionId {
        self.drawing.subscribe(handler)
    }
}
