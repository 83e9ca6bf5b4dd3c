//! Composite (group) behavior: derived bounds, two-stage rotation,
//! proportional resize, reflection, and child management.

use sketchkit_core::{Point, Rect, Vector};
use sketchkit_editor::model::{DrawableShape, Group, Rectangle, Shape};

const EPS: f64 = 1e-9;

fn rect_shape(x: f64, y: f64, w: f64, h: f64) -> Shape {
    Rectangle::new(Rect::new(x, y, w, h)).into()
}

fn assert_rect_close(actual: Rect, expected: Rect) {
    assert!(
        (actual.x - expected.x).abs() < EPS
            && (actual.y - expected.y).abs() < EPS
            && (actual.width - expected.width).abs() < EPS
            && (actual.height - expected.height).abs() < EPS,
        "got {:?}, expected {:?}",
        actual,
        expected
    );
}

#[test]
fn test_group_bounds_is_union_of_children() {
    let group = Group::new(vec![
        rect_shape(0.0, 0.0, 10.0, 10.0),
        rect_shape(20.0, 0.0, 10.0, 10.0),
    ]);
    assert_rect_close(group.bounds(), Rect::new(0.0, 0.0, 30.0, 10.0));
}

#[test]
fn test_empty_group_has_zero_bounds() {
    let group = Group::new(Vec::new());
    assert_rect_close(group.bounds(), Rect::default());
    assert!(!group.contains(Point::new(0.0, 0.0)));
}

#[test]
fn test_group_bounds_respect_child_rotation() {
    let mut child = Rectangle::new(Rect::new(0.0, 0.0, 20.0, 4.0));
    child.set_rotation(90.0);
    let group = Group::new(vec![child.into()]);
    // The child's rotated bounds are 4 wide and 20 tall about (10, 2).
    assert_rect_close(group.bounds(), Rect::new(8.0, -8.0, 4.0, 20.0));
}

#[test]
fn test_group_rotated_bounds_applies_group_angle_on_top() {
    let mut group = Group::new(vec![rect_shape(0.0, 0.0, 30.0, 10.0)]);
    group.set_rotation(90.0);
    // Pivot (15, 5); extents swap around it.
    assert_rect_close(group.rotated_bounds(), Rect::new(10.0, -10.0, 10.0, 30.0));
}

#[test]
fn test_group_translate_moves_all_children() {
    let mut group = Group::new(vec![
        rect_shape(0.0, 0.0, 10.0, 10.0),
        rect_shape(20.0, 0.0, 10.0, 10.0),
    ]);
    group.translate(Vector::new(5.0, -3.0));
    assert_rect_close(group.bounds(), Rect::new(5.0, -3.0, 30.0, 10.0));
    assert_rect_close(group.children()[0].bounds(), Rect::new(5.0, -3.0, 10.0, 10.0));
}

#[test]
fn test_group_resize_scales_children_proportionally() {
    let mut group = Group::new(vec![
        rect_shape(0.0, 0.0, 10.0, 10.0),
        rect_shape(20.0, 0.0, 10.0, 10.0),
    ]);
    group.resize(Rect::new(0.0, 0.0, 60.0, 20.0));
    assert_rect_close(group.bounds(), Rect::new(0.0, 0.0, 60.0, 20.0));
    assert_rect_close(group.children()[0].bounds(), Rect::new(0.0, 0.0, 20.0, 20.0));
    assert_rect_close(group.children()[1].bounds(), Rect::new(40.0, 0.0, 20.0, 20.0));
}

#[test]
fn test_group_resize_to_degenerate_bounds_is_ignored() {
    let mut group = Group::new(vec![rect_shape(0.0, 0.0, 10.0, 10.0)]);
    group.resize(Rect::new(0.0, 0.0, 0.0, 20.0));
    assert_rect_close(group.bounds(), Rect::new(0.0, 0.0, 10.0, 10.0));
}

#[test]
fn test_group_contains_hits_any_child() {
    let group = Group::new(vec![
        rect_shape(0.0, 0.0, 10.0, 10.0),
        rect_shape(20.0, 0.0, 10.0, 10.0),
    ]);
    assert!(group.contains(Point::new(5.0, 5.0)));
    assert!(group.contains(Point::new(25.0, 5.0)));
    // The gap between the children misses.
    assert!(!group.contains(Point::new(15.0, 5.0)));
}

#[test]
fn test_rotated_group_contains_follows_group_angle() {
    let mut group = Group::new(vec![rect_shape(0.0, 0.0, 20.0, 4.0)]);
    group.set_rotation(90.0);
    assert!(group.contains(Point::new(10.0, 10.0)));
    assert!(!group.contains(Point::new(18.0, 2.0)));
}

#[test]
fn test_group_reflect_horizontal_mirrors_child_positions() {
    let mut group = Group::new(vec![
        rect_shape(0.0, 0.0, 10.0, 10.0),
        rect_shape(20.0, 0.0, 10.0, 10.0),
    ]);
    group.reflect_horizontal();
    // The two children trade places across the group's center line x = 15.
    assert_rect_close(group.children()[0].bounds(), Rect::new(20.0, 0.0, 10.0, 10.0));
    assert_rect_close(group.children()[1].bounds(), Rect::new(0.0, 0.0, 10.0, 10.0));
    assert_rect_close(group.bounds(), Rect::new(0.0, 0.0, 30.0, 10.0));
}

#[test]
fn test_group_reflect_inverts_group_rotation() {
    let mut group = Group::new(vec![rect_shape(0.0, 0.0, 10.0, 10.0)]);
    group.set_rotation(30.0);
    group.reflect_horizontal();
    assert_eq!(group.rotation(), 330.0);
}

#[test]
fn test_group_color_setters_broadcast() {
    use sketchkit_core::Color;
    let mut group = Group::new(vec![
        rect_shape(0.0, 0.0, 10.0, 10.0),
        rect_shape(20.0, 0.0, 10.0, 10.0),
    ]);
    group.set_stroke_color(Color::rgb(1, 2, 3));
    assert!(group
        .children()
        .iter()
        .all(|c| c.stroke_color() == Color::rgb(1, 2, 3)));
    assert_eq!(group.stroke_color(), Color::rgb(1, 2, 3));
}

#[test]
fn test_child_management() {
    let a = rect_shape(0.0, 0.0, 10.0, 10.0);
    let b = rect_shape(20.0, 0.0, 10.0, 10.0);
    let a_id = a.id();
    let b_id = b.id();
    let mut group = Group::new(vec![a, b]);
    assert_eq!(group.child_count(), 2);
    assert_eq!(group.child_at(0).unwrap().id(), a_id);
    assert!(group.child_at(5).is_err());

    let removed = group.remove_child(a_id).unwrap();
    assert_eq!(removed.id(), a_id);
    assert_eq!(group.child_count(), 1);
    assert!(group.remove_child(a_id).is_none());

    let children = group.take_children();
    assert!(group.is_empty());
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].id(), b_id);
}

#[test]
fn test_nested_group_bounds() {
    let inner = Group::new(vec![rect_shape(10.0, 10.0, 10.0, 10.0)]);
    let group = Group::new(vec![Shape::Group(inner), rect_shape(0.0, 0.0, 5.0, 5.0)]);
    assert_rect_close(group.bounds(), Rect::new(0.0, 0.0, 20.0, 20.0));
}

#[test]
fn test_find_by_id_descends_into_groups() {
    let leaf = rect_shape(0.0, 0.0, 10.0, 10.0);
    let leaf_id = leaf.id();
    let inner = Group::new(vec![leaf]);
    let outer: Shape = Group::new(vec![Shape::Group(inner)]).into();
    assert!(outer.find_by_id(leaf_id).is_some());
    assert_eq!(outer.find_by_id(leaf_id).unwrap().id(), leaf_id);
}
