#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// --- Viewport ---

#[test]
fn derived_quantities() {
    let vp = Viewport::new(600, 800);
    assert_eq!(vp.center(), Point::new(300.0, 400.0));
    assert_eq!(vp.min_dim(), 600.0);
    assert!(approx_eq(vp.half_diagonal(), 500.0));
    assert!(!vp.is_degenerate());
}

#[test]
fn with_rotation_keeps_size() {
    let vp = Viewport::new(10, 20).with_rotation(DisplayRotation::Deg180);
    assert_eq!(vp.width, 10);
    assert_eq!(vp.display_rotation, DisplayRotation::Deg180);
}

#[test]
fn zero_width_is_degenerate() {
    assert!(Viewport::new(0, 100).is_degenerate());
}

// --- ScaleModel ---

#[test]
fn square_viewport_scale() {
    let scale = ScaleModel::compute(&Viewport::new(900, 900));
    assert!(approx_eq(scale.ring_pixel_radius, 100.0));
    // 4.5 * 2 * 636.4 / 900 = 6.36
    assert_eq!(scale.ring_count, 7);
    assert!(approx_eq(scale.pixels_per_degree(), 50.0));
}

#[test]
fn portrait_viewport_uses_min_dimension() {
    let scale = ScaleModel::compute(&Viewport::new(600, 800));
    assert!(approx_eq(scale.ring_pixel_radius, 300.0 / 4.5));
    // 9 * 500 / 600 = 7.5
    assert_eq!(scale.ring_count, 8);
}

#[test]
fn any_nonzero_viewport_has_rings() {
    for (w, h) in [(1, 1), (1, 500), (500, 1), (37, 1234), (4096, 2160)] {
        let scale = ScaleModel::compute(&Viewport::new(w, h));
        assert!(scale.ring_count >= 1, "{w}x{h}");
        assert!(scale.ring_pixel_radius > 0.0, "{w}x{h}");
    }
}

#[test]
fn zero_viewport_gives_zero_model() {
    let scale = ScaleModel::compute(&Viewport::new(0, 0));
    assert_eq!(scale.ring_pixel_radius, 0.0);
    assert_eq!(scale.ring_count, 0);
    assert_eq!(scale.pixels_per_degree(), 0.0);
}

#[test]
fn ring_count_is_clamped() {
    let params = ScaleParams {
        max_ring_count: 3,
        ..ScaleParams::default()
    };
    let scale = ScaleModel::compute_with(&Viewport::new(1, 100_000), &params);
    assert_eq!(scale.ring_count, 3);
}

#[test]
fn non_positive_parameters_give_zero_model() {
    let params = ScaleParams {
        degrees_per_ring: 0.0,
        ..ScaleParams::default()
    };
    let scale = ScaleModel::compute_with(&Viewport::new(100, 100), &params);
    assert_eq!(scale.ring_pixel_radius, 0.0);
    assert_eq!(scale.pixels_per_degree(), 0.0);

    let params = ScaleParams {
        rings_fully_visible: -1.0,
        ..ScaleParams::default()
    };
    assert_eq!(ScaleModel::compute_with(&Viewport::new(100, 100), &params).ring_count, 0);
}

#[test]
fn degrees_to_pixels_is_linear() {
    let scale = ScaleModel {
        degrees_per_ring: 2.0,
        ring_pixel_radius: 100.0,
        ring_count: 5,
    };
    assert_eq!(scale.degrees_to_pixels(10.0), 500.0);
    assert_eq!(scale.degrees_to_pixels(-5.0), -250.0);
}
