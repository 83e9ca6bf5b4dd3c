//! Command semantics and the undo/redo engine: state capture, identity
//! preservation, index restoration, and history stack discipline.

use sketchkit_core::{Color, Point, Rect, ShapeId, Vector};
use sketchkit_editor::clipboard::Clipboard;
use sketchkit_editor::commands::{
    AddShape, BringToFront, ColorTarget, CopyShape, CutShape, DeleteShape, EditorCommand,
    GroupShapes, MoveShape, PasteShape, RecolorShape, ReflectAxis, ReflectShape, ResizeShape,
    RetextShape, RotateShape, SendToBack, SetFontSize, UngroupShapes,
};
use sketchkit_editor::drawing::Drawing;
use sketchkit_editor::history::CommandManager;
use sketchkit_editor::model::{DrawableShape, Rectangle, Shape, ShapeKind, Text};

fn rect_shape(x: f64, y: f64) -> Shape {
    Rectangle::new(Rect::new(x, y, 10.0, 10.0)).into()
}

fn text_shape() -> Shape {
    Text::new("hello", Rect::new(0.0, 0.0, 50.0, 12.0), 12.0)
        .unwrap()
        .into()
}

struct Rig {
    drawing: Drawing,
    clipboard: Clipboard,
    history: CommandManager,
}

impl Rig {
    fn new() -> Self {
        Self {
            drawing: Drawing::new(),
            clipboard: Clipboard::new(),
            history: CommandManager::new(),
        }
    }

    fn run(&mut self, command: EditorCommand) {
        self.history
            .execute(command, &mut self.drawing, &mut self.clipboard)
            .unwrap();
    }

    fn undo(&mut self) -> bool {
        self.history
            .undo(&mut self.drawing, &mut self.clipboard)
            .unwrap()
    }

    fn redo(&mut self) -> bool {
        self.history
            .redo(&mut self.drawing, &mut self.clipboard)
            .unwrap()
    }

    fn add(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        self.run(EditorCommand::AddShape(AddShape::new(shape)));
        id
    }
}

#[test]
fn test_add_undo_redo_preserves_identity() {
    let mut rig = Rig::new();
    let id = rig.add(rect_shape(0.0, 0.0));
    assert_eq!(rig.drawing.len(), 1);

    assert!(rig.undo());
    assert!(rig.drawing.is_empty());

    assert!(rig.redo());
    assert_eq!(rig.drawing.shapes()[0].id(), id);
}

#[test]
fn test_delete_undo_restores_zorder_position() {
    let mut rig = Rig::new();
    let _a = rig.add(rect_shape(0.0, 0.0));
    let b = rig.add(rect_shape(1.0, 0.0));
    let _c = rig.add(rect_shape(2.0, 0.0));

    rig.run(EditorCommand::DeleteShape(DeleteShape::new(b)));
    assert_eq!(rig.drawing.len(), 2);

    // A later edit grows the list past the captured index.
    let _d = rig.add(rect_shape(3.0, 0.0));

    assert!(rig.undo()); // un-add d
    assert!(rig.undo()); // un-delete b
    assert_eq!(rig.drawing.index_of(b), Some(1));
}

#[test]
fn test_add_then_delete_then_undo_twice_round_trips() {
    let mut rig = Rig::new();
    let _bottom = rig.add(rect_shape(0.0, 0.0));
    let id = rig.add(rect_shape(1.0, 0.0));
    let _top = rig.add(rect_shape(2.0, 0.0));

    rig.run(EditorCommand::DeleteShape(DeleteShape::new(id)));
    assert!(rig.drawing.index_of(id).is_none());

    // Undo the delete: back at its original index.
    assert!(rig.undo());
    assert_eq!(rig.drawing.index_of(id), Some(1));
    // Undo the add that placed the top shape.
    assert!(rig.undo());
    assert_eq!(rig.drawing.len(), 2);
    assert_eq!(rig.drawing.index_of(id), Some(1));
}

#[test]
fn test_delete_undo_falls_back_to_append_on_stale_index() {
    let mut drawing = Drawing::new();
    let mut clipboard = Clipboard::new();
    let a = rect_shape(0.0, 0.0);
    let b = rect_shape(1.0, 0.0);
    let (a_id, b_id) = (a.id(), b.id());
    drawing.add(a);
    drawing.add(b);

    let mut cmd = EditorCommand::DeleteShape(DeleteShape::new(b_id));
    cmd.apply(&mut drawing, &mut clipboard).unwrap();

    // The drawing shrinks underneath the captured index.
    drawing.remove(a_id).unwrap();
    cmd.undo(&mut drawing, &mut clipboard).unwrap();
    assert_eq!(drawing.index_of(b_id), Some(0));
}

#[test]
fn test_move_undo_restores_position_exactly() {
    let mut rig = Rig::new();
    let id = rig.add(rect_shape(10.0, 20.0));
    rig.run(EditorCommand::MoveShape(MoveShape::new(
        id,
        Vector::new(7.5, -3.25),
    )));
    let moved = rig.drawing.shape(id).unwrap().bounds();
    assert_eq!(moved.x, 17.5);
    assert_eq!(moved.y, 16.75);

    assert!(rig.undo());
    let back = rig.drawing.shape(id).unwrap().bounds();
    assert_eq!(back.x, 10.0);
    assert_eq!(back.y, 20.0);
}

#[test]
fn test_resize_undo_restores_previous_bounds() {
    let mut rig = Rig::new();
    let id = rig.add(rect_shape(0.0, 0.0));
    rig.run(EditorCommand::ResizeShape(ResizeShape::new(
        id,
        Rect::new(5.0, 5.0, 40.0, 20.0),
    )));
    assert_eq!(rig.drawing.shape(id).unwrap().bounds().width, 40.0);

    assert!(rig.undo());
    assert_eq!(
        rig.drawing.shape(id).unwrap().bounds(),
        Rect::new(0.0, 0.0, 10.0, 10.0)
    );
}

#[test]
fn test_rotate_captures_previous_angle_once() {
    let mut rig = Rig::new();
    let id = rig.add(rect_shape(0.0, 0.0));
    rig.drawing.set_shape_rotation(id, 15.0).unwrap();

    rig.run(EditorCommand::RotateShape(RotateShape::new(id, 90.0)));
    assert_eq!(rig.drawing.shape(id).unwrap().rotation(), 90.0);

    // Undo, redo, undo: the captured "before" angle must survive the redo.
    assert!(rig.undo());
    assert_eq!(rig.drawing.shape(id).unwrap().rotation(), 15.0);
    assert!(rig.redo());
    assert_eq!(rig.drawing.shape(id).unwrap().rotation(), 90.0);
    assert!(rig.undo());
    assert_eq!(rig.drawing.shape(id).unwrap().rotation(), 15.0);
}

#[test]
fn test_reflect_is_its_own_inverse() {
    let mut rig = Rig::new();
    let id = rig.add(rect_shape(0.0, 0.0));
    rig.drawing.set_shape_rotation(id, 30.0).unwrap();

    rig.run(EditorCommand::ReflectShape(ReflectShape::new(
        id,
        ReflectAxis::Horizontal,
    )));
    assert_eq!(rig.drawing.shape(id).unwrap().rotation(), 150.0);

    assert!(rig.undo());
    assert_eq!(rig.drawing.shape(id).unwrap().rotation(), 30.0);
}

#[test]
fn test_recolor_undo_restores_both_targets() {
    let mut rig = Rig::new();
    let id = rig.add(rect_shape(0.0, 0.0));
    let original_stroke = rig.drawing.shape(id).unwrap().stroke_color();

    rig.run(EditorCommand::RecolorShape(RecolorShape::new(
        id,
        ColorTarget::Stroke,
        Color::rgb(200, 0, 0),
    )));
    rig.run(EditorCommand::RecolorShape(RecolorShape::new(
        id,
        ColorTarget::Fill,
        Color::rgb(0, 200, 0),
    )));
    assert_eq!(rig.drawing.shape(id).unwrap().fill_color(), Color::rgb(0, 200, 0));

    assert!(rig.undo());
    assert!(rig.undo());
    assert_eq!(rig.drawing.shape(id).unwrap().stroke_color(), original_stroke);
}

#[test]
fn test_retext_and_font_size_undo() {
    let mut rig = Rig::new();
    let id = rig.add(text_shape());

    rig.run(EditorCommand::RetextShape(RetextShape::new(id, "world")));
    rig.run(EditorCommand::SetFontSize(SetFontSize::new(id, 24.0).unwrap()));

    let text = rig.drawing.shape(id).unwrap().as_text().unwrap();
    assert_eq!(text.content(), "world");
    assert_eq!(text.font_size(), 24.0);

    assert!(rig.undo());
    assert!(rig.undo());
    let text = rig.drawing.shape(id).unwrap().as_text().unwrap();
    assert_eq!(text.content(), "hello");
    assert_eq!(text.font_size(), 12.0);
}

#[test]
fn test_font_size_command_rejects_non_positive() {
    assert!(SetFontSize::new(ShapeId::new(), 0.0).is_err());
    assert!(SetFontSize::new(ShapeId::new(), -5.0).is_err());
}

#[test]
fn test_text_command_on_non_text_shape_fails_cleanly() {
    let mut rig = Rig::new();
    let id = rig.add(rect_shape(0.0, 0.0));
    let result = rig.history.execute(
        EditorCommand::RetextShape(RetextShape::new(id, "nope")),
        &mut rig.drawing,
        &mut rig.clipboard,
    );
    assert!(result.is_err());
    // The failed command is not recorded.
    assert_eq!(rig.history.undo_depth(), 1);
}

#[test]
fn test_cut_moves_to_clipboard_and_undo_restores_drawing_only() {
    let mut rig = Rig::new();
    let id = rig.add(rect_shape(0.0, 0.0));

    rig.run(EditorCommand::CutShape(CutShape::new(id)));
    assert!(rig.drawing.is_empty());
    assert!(!rig.clipboard.is_empty());

    assert!(rig.undo());
    assert_eq!(rig.drawing.index_of(id), Some(0));
    // The clipboard deliberately keeps the cut content.
    assert!(!rig.clipboard.is_empty());
}

#[test]
fn test_copy_is_an_undo_noop() {
    let mut rig = Rig::new();
    let id = rig.add(rect_shape(0.0, 0.0));
    rig.run(EditorCommand::CopyShape(CopyShape::new(id)));
    assert!(!rig.clipboard.is_empty());

    assert!(rig.undo());
    assert_eq!(rig.drawing.len(), 1);
    assert!(!rig.clipboard.is_empty());
}

#[test]
fn test_paste_creates_fresh_identity_and_redo_reuses_it() {
    let mut rig = Rig::new();
    let original = rig.add(rect_shape(10.0, 10.0));
    rig.run(EditorCommand::CopyShape(CopyShape::new(original)));

    rig.run(EditorCommand::PasteShape(PasteShape::new(Vector::new(5.0, 5.0))));
    assert_eq!(rig.drawing.len(), 2);
    let pasted = rig.drawing.shapes()[1].id();
    assert_ne!(pasted, original);
    assert_eq!(rig.drawing.shapes()[1].bounds(), Rect::new(15.0, 15.0, 10.0, 10.0));

    assert!(rig.undo());
    assert_eq!(rig.drawing.len(), 1);

    // Redo restores the very same pasted instance, not a new clone.
    assert!(rig.redo());
    assert_eq!(rig.drawing.shapes()[1].id(), pasted);
}

#[test]
fn test_paste_with_empty_clipboard_is_a_noop() {
    let mut rig = Rig::new();
    rig.run(EditorCommand::PasteShape(PasteShape::new(Vector::new(5.0, 5.0))));
    assert!(rig.drawing.is_empty());
    // The no-op still lands on the undo stack and undoes harmlessly.
    assert!(rig.undo());
}

#[test]
fn test_bring_to_front_undo_restores_exact_index() {
    let mut rig = Rig::new();
    let a = rig.add(rect_shape(0.0, 0.0));
    let _b = rig.add(rect_shape(1.0, 0.0));
    let _c = rig.add(rect_shape(2.0, 0.0));

    rig.run(EditorCommand::BringToFront(BringToFront::new(a)));
    assert_eq!(rig.drawing.index_of(a), Some(2));

    assert!(rig.undo());
    assert_eq!(rig.drawing.index_of(a), Some(0));
}

#[test]
fn test_send_to_back_undo_restores_exact_index() {
    let mut rig = Rig::new();
    let _a = rig.add(rect_shape(0.0, 0.0));
    let _b = rig.add(rect_shape(1.0, 0.0));
    let c = rig.add(rect_shape(2.0, 0.0));

    rig.run(EditorCommand::SendToBack(SendToBack::new(c)));
    assert_eq!(rig.drawing.index_of(c), Some(0));

    assert!(rig.undo());
    assert_eq!(rig.drawing.index_of(c), Some(2));
}

#[test]
fn test_group_requires_two_shapes() {
    assert!(GroupShapes::new(Vec::new()).is_err());
    assert!(GroupShapes::new(vec![ShapeId::new()]).is_err());
}

#[test]
fn test_group_undo_redo_preserves_all_identities() {
    let mut rig = Rig::new();
    let a = rig.add(rect_shape(0.0, 0.0));
    let b = rig.add(rect_shape(20.0, 0.0));

    let command = GroupShapes::new(vec![a, b]).unwrap();
    let group_id = command.group_id();
    rig.run(EditorCommand::GroupShapes(command));

    assert_eq!(rig.drawing.len(), 1);
    let group = rig.drawing.shape(group_id).unwrap().as_group().unwrap();
    assert_eq!(group.child_count(), 2);
    assert_eq!(group.children()[0].id(), a);
    assert_eq!(group.children()[1].id(), b);

    assert!(rig.undo());
    assert_eq!(rig.drawing.len(), 2);
    assert!(rig.drawing.index_of(a).is_some());
    assert!(rig.drawing.index_of(b).is_some());

    // Redo rebuilds the group under its original id.
    assert!(rig.redo());
    let group = rig.drawing.shape(group_id).unwrap().as_group().unwrap();
    assert_eq!(group.child_count(), 2);
}

#[test]
fn test_group_skips_missing_members() {
    let mut rig = Rig::new();
    let a = rig.add(rect_shape(0.0, 0.0));
    let b = rig.add(rect_shape(1.0, 0.0));
    let ghost = ShapeId::new();

    let command = GroupShapes::new(vec![a, ghost, b]).unwrap();
    let group_id = command.group_id();
    rig.run(EditorCommand::GroupShapes(command));

    let group = rig.drawing.shape(group_id).unwrap().as_group().unwrap();
    assert_eq!(group.child_count(), 2);
}

#[test]
fn test_ungroup_undo_restores_group_at_its_index() {
    let mut rig = Rig::new();
    let _under = rig.add(rect_shape(50.0, 50.0));
    let a = rig.add(rect_shape(0.0, 0.0));
    let b = rig.add(rect_shape(20.0, 0.0));
    let command = GroupShapes::new(vec![a, b]).unwrap();
    let group_id = command.group_id();
    rig.run(EditorCommand::GroupShapes(command));
    assert_eq!(rig.drawing.index_of(group_id), Some(1));

    rig.run(EditorCommand::UngroupShapes(UngroupShapes::new(group_id)));
    assert_eq!(rig.drawing.len(), 3);
    assert!(rig.drawing.index_of(group_id).is_none());
    assert!(rig.drawing.index_of(a).is_some());

    assert!(rig.undo());
    assert_eq!(rig.drawing.index_of(group_id), Some(1));
    let group = rig.drawing.shape(group_id).unwrap().as_group().unwrap();
    assert_eq!(group.child_count(), 2);
}

#[test]
fn test_ungroup_rejects_leaf_shapes() {
    let mut rig = Rig::new();
    let id = rig.add(rect_shape(0.0, 0.0));
    let result = rig.history.execute(
        EditorCommand::UngroupShapes(UngroupShapes::new(id)),
        &mut rig.drawing,
        &mut rig.clipboard,
    );
    match result {
        Err(sketchkit_editor::error::EditorError::NotComposite(kind)) => {
            assert_eq!(kind, ShapeKind::Rectangle)
        }
        other => panic!("expected NotComposite, got {:?}", other),
    }
    // Nothing changed.
    assert_eq!(rig.drawing.len(), 1);
}

#[test]
fn test_execute_clears_the_redo_stack() {
    let mut rig = Rig::new();
    rig.add(rect_shape(0.0, 0.0));
    rig.add(rect_shape(1.0, 0.0));

    assert!(rig.undo());
    assert!(rig.history.can_redo());

    rig.add(rect_shape(2.0, 0.0));
    assert!(!rig.history.can_redo());
    assert!(!rig.redo());
}

#[test]
fn test_undo_and_redo_on_empty_stacks_report_false() {
    let mut rig = Rig::new();
    assert!(!rig.undo());
    assert!(!rig.redo());
    assert!(!rig.history.can_undo());
    assert!(!rig.history.can_redo());
}

#[test]
fn test_depth_limit_forgets_oldest_commands() {
    let mut drawing = Drawing::new();
    let mut clipboard = Clipboard::new();
    let mut history = CommandManager::with_depth_limit(2);

    for i in 0..3 {
        history
            .execute(
                EditorCommand::AddShape(AddShape::new(rect_shape(i as f64, 0.0))),
                &mut drawing,
                &mut clipboard,
            )
            .unwrap();
    }
    assert_eq!(history.undo_depth(), 2);

    assert!(history.undo(&mut drawing, &mut clipboard).unwrap());
    assert!(history.undo(&mut drawing, &mut clipboard).unwrap());
    assert!(!history.undo(&mut drawing, &mut clipboard).unwrap());
    // The first add can no longer be undone.
    assert_eq!(drawing.len(), 1);
}

#[test]
fn test_zero_depth_limit_means_unlimited() {
    let mut drawing = Drawing::new();
    let mut clipboard = Clipboard::new();
    let mut history = CommandManager::with_depth_limit(0);

    for i in 0..250 {
        history
            .execute(
                EditorCommand::AddShape(AddShape::new(rect_shape(i as f64, 0.0))),
                &mut drawing,
                &mut clipboard,
            )
            .unwrap();
    }
    assert_eq!(history.undo_depth(), 250);
}

#[test]
fn test_failed_undo_keeps_the_command_on_the_stack() {
    let mut rig = Rig::new();
    let id = rig.add(rect_shape(0.0, 0.0));

    // Sabotage: remove the shape behind the history's back.
    rig.drawing.remove(id).unwrap();
    let result = rig.history.undo(&mut rig.drawing, &mut rig.clipboard);
    assert!(result.is_err());
    assert!(rig.history.can_undo());
    assert_eq!(rig.history.undo_depth(), 1);
}

#[test]
fn test_command_names_are_stable() {
    let add = EditorCommand::AddShape(AddShape::new(rect_shape(0.0, 0.0)));
    assert_eq!(add.name(), "Add Shape");
    let reflect = EditorCommand::ReflectShape(ReflectShape::new(
        ShapeId::new(),
        ReflectAxis::Vertical,
    ));
    assert_eq!(reflect.name(), "Reflect Vertical");
}

#[test]
fn test_history_exposes_command_names_for_menus() {
    let mut rig = Rig::new();
    let id = rig.add(rect_shape(0.0, 0.0));
    rig.run(EditorCommand::MoveShape(MoveShape::new(id, Vector::new(1.0, 0.0))));

    assert_eq!(rig.history.undo_name(), Some("Move Shape"));
    assert!(rig.undo());
    assert_eq!(rig.history.redo_name(), Some("Move Shape"));
    assert_eq!(rig.history.undo_name(), Some("Add Shape"));
}

#[test]
fn test_long_session_undo_all_returns_to_empty() {
    let mut rig = Rig::new();
    let a = rig.add(rect_shape(0.0, 0.0));
    let b = rig.add(rect_shape(20.0, 0.0));
    rig.run(EditorCommand::MoveShape(MoveShape::new(a, Vector::new(3.0, 4.0))));
    rig.run(EditorCommand::RotateShape(RotateShape::new(b, 45.0)));
    let command = GroupShapes::new(vec![a, b]).unwrap();
    rig.run(EditorCommand::GroupShapes(command));
    rig.run(EditorCommand::MoveShape(MoveShape::new(
        rig.drawing.shapes()[0].id(),
        Vector::new(-1.0, -1.0),
    )));

    while rig.undo() {}
    assert!(rig.drawing.is_empty());
    assert!(!rig.history.can_undo());

    // And the whole session replays forward.
    while rig.redo() {}
    assert_eq!(rig.drawing.len(), 1);
    assert!(rig.drawing.shapes()[0].is_composite());
    assert!(rig.drawing.shapes()[0].contains(Point::new(8.0, 9.0)));
}
