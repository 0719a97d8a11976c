#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Point ---

#[test]
fn point_distance() {
    assert!(approx_eq(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0));
}

#[test]
fn polar_follows_screen_convention() {
    let center = Point::new(10.0, 10.0);
    assert!(point_approx_eq(center.polar(5.0, 0.0), Point::new(15.0, 10.0)));
    // 90° is straight down on screen.
    assert!(point_approx_eq(center.polar(5.0, 90.0), Point::new(10.0, 15.0)));
}

// --- Transform ---

#[test]
fn identity_leaves_points_alone() {
    let p = Point::new(12.5, -3.0);
    assert_eq!(Transform::identity().apply(p), p);
}

#[test]
fn rotate_about_pivot_is_clockwise() {
    let pivot = Point::new(100.0, 100.0);
    let t = Transform::identity().rotate_about(90.0, pivot);
    let moved = t.apply(Point::new(110.0, 100.0));
    assert!(point_approx_eq(moved, Point::new(100.0, 110.0)));
    assert!(point_approx_eq(t.apply(pivot), pivot));
}

#[test]
fn translate_happens_in_rotated_frame() {
    let pivot = Point::new(0.0, 0.0);
    let t = Transform::identity().rotate_about(90.0, pivot).translate(0.0, 10.0);
    // Local "down" is screen "left" after a quarter turn clockwise.
    assert!(point_approx_eq(t.apply(Point::new(0.0, 0.0)), Point::new(-10.0, 0.0)));
}

#[test]
fn rotations_accumulate() {
    let pivot = Point::new(50.0, 50.0);
    let t = Transform::identity()
        .rotate_about(30.0, pivot)
        .rotate_about(60.0, pivot);
    assert!(approx_eq(t.rotation_deg(), 90.0));
    let single = Transform::identity().rotate_about(90.0, pivot);
    let p = Point::new(80.0, 20.0);
    assert!(point_approx_eq(t.apply(p), single.apply(p)));
}

#[test]
fn opposite_rotations_cancel() {
    let t = Transform::identity()
        .rotate_about(37.0, Point::new(3.0, 4.0))
        .rotate_about(-37.0, Point::new(3.0, 4.0));
    let p = Point::new(-8.0, 21.0);
    assert!(point_approx_eq(t.apply(p), p));
}

// --- AnchoredText ---

fn text_with(align: Align) -> AnchoredText {
    AnchoredText {
        text: "12.0°".to_string(),
        anchor: Point::new(100.0, 50.0),
        align,
        rotation_deg: 0.0,
        style: Style::LabelText,
        shadow: true,
    }
}

#[test]
fn left_bottom_origin_is_anchor() {
    let text = text_with(Align::new(Align::LEFT, Align::BOTTOM));
    assert_eq!(text.baseline_origin(40.0, 10.0), Point::new(100.0, 50.0));
}

#[test]
fn right_alignment_shifts_by_full_width() {
    let text = text_with(Align::new(Align::RIGHT, Align::BOTTOM));
    assert_eq!(text.baseline_origin(40.0, 10.0), Point::new(60.0, 50.0));
}

#[test]
fn centered_alignment_shifts_half_box() {
    let text = text_with(Align::centered());
    assert_eq!(text.baseline_origin(40.0, 10.0), Point::new(80.0, 55.0));
}

#[test]
fn top_alignment_drops_baseline_by_height() {
    let text = text_with(Align::new(Align::LEFT, Align::TOP));
    assert_eq!(text.baseline_origin(40.0, 10.0), Point::new(100.0, 60.0));
}

#[test]
fn format_degrees_uses_one_decimal() {
    assert_eq!(format_degrees(12.345), "12.3°");
    assert_eq!(format_degrees(-5.0), "-5.0°");
}

// --- Scene ---

#[test]
fn scene_keeps_insertion_order() {
    let mut scene = Scene::new();
    scene.add_line(Point::new(0.0, 0.0), Point::new(1.0, 1.0), Style::GridDark);
    scene.add(Primitive::FilledDisc {
        center: Point::new(0.0, 0.0),
        radius: 2.0,
        style: Style::Spirit,
    });
    scene.add_text(text_with(Align::centered()));

    let styles: Vec<Style> = scene.primitives().iter().map(Primitive::style).collect();
    assert_eq!(styles, vec![Style::GridDark, Style::Spirit, Style::LabelText]);
    assert_eq!(scene.texts().count(), 1);
    assert_eq!(scene.len(), 3);
}

#[test]
fn new_scene_is_empty() {
    assert!(Scene::new().is_empty());
}
