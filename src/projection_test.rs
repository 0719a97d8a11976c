#![allow(clippy::float_cmp)]

use super::*;
use crate::label_side::LabelSide;

const EPSILON: f64 = 1e-6;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Monospace stand-in for a font: 10px per char, 12px tall.
struct FixedMetrics;

impl TextMetrics for FixedMetrics {
    fn text_size(&self, text: &str) -> (f64, f64) {
        (text.chars().count() as f64 * 10.0, 12.0)
    }
}

fn viewport() -> Viewport {
    Viewport::new(900, 900)
}

fn tilted() -> Orientation {
    Orientation::builder()
        .pitch(4.0)
        .roll(-3.0)
        .tilt(35.0)
        .axis_rotation(20.0)
        .spirit_tilt(90.0)
        .label_compensation(0.0)
        .build()
}

fn project_default(orientation: &Orientation, viewport: &Viewport, state: &ViewState) -> Scene {
    let scale = ScaleModel::compute(viewport);
    project(orientation, viewport, &scale, state, &LayoutParams::default(), &FixedMetrics)
}

// --- Arc specs ---

#[test]
fn arcs_are_supplementary_for_any_rotation() {
    for axis in [RefAxis::Horizontal, RefAxis::Vertical] {
        let mut rotation = -720.0;
        while rotation <= 720.0 {
            let [first, second] = arc_specs(rotation, axis);
            assert!(approx_eq(first.extent_deg + second.extent_deg.abs(), 180.0), "{rotation} {axis:?}");
            assert!(approx_eq(first.extent_deg - second.extent_deg, 180.0), "{rotation} {axis:?}");
            rotation += 7.25;
        }
    }
}

#[test]
fn horizontal_arcs_start_on_horizontal_rays() {
    let [first, second] = arc_specs(30.0, RefAxis::Horizontal);
    assert_eq!(first, ArcSpec { start_deg: 0.0, extent_deg: 30.0 });
    assert_eq!(second, ArcSpec { start_deg: 180.0, extent_deg: -150.0 });
}

#[test]
fn vertical_arcs_measure_from_vertical_axis() {
    let [first, second] = arc_specs(30.0, RefAxis::Vertical);
    assert_eq!(first, ArcSpec { start_deg: 90.0, extent_deg: 120.0 });
    assert_eq!(second, ArcSpec { start_deg: 270.0, extent_deg: -60.0 });
}

#[test]
fn negative_rotation_keeps_dividend_sign() {
    let [first, second] = arc_specs(-30.0, RefAxis::Horizontal);
    assert_eq!(first.extent_deg, -30.0);
    assert_eq!(second.extent_deg, -210.0);
}

#[test]
fn second_midpoint_is_quarter_turn_after_first() {
    let [first, second] = arc_specs(57.0, RefAxis::Horizontal);
    assert!(approx_eq(second.mid_deg(), first.mid_deg() + 90.0));
}

// --- Bubble ---

#[test]
fn bubble_maps_degrees_linearly() {
    let vp = viewport();
    let scale = ScaleModel {
        degrees_per_ring: 2.0,
        ring_pixel_radius: 100.0,
        ring_count: 5,
    };
    let orientation = Orientation::builder().pitch(10.0).roll(-5.0).build();
    let b = bubble_position(&orientation, &vp, &scale);
    let c = vp.center();
    assert_eq!(b, Point::new(c.x + 500.0, c.y + 250.0));
}

// --- Scene structure ---

#[test]
fn degenerate_viewport_gives_empty_scene() {
    let scene = project_default(&tilted(), &Viewport::new(0, 0), &ViewState::default());
    assert!(scene.is_empty());
    let scene = project_default(&tilted(), &Viewport::new(0, 500), &ViewState::default());
    assert!(scene.is_empty());
}

#[test]
fn full_scene_layer_order() {
    let scene = project_default(&tilted(), &viewport(), &ViewState::default());
    let p = scene.primitives();
    // bg + band + 36 spokes + axis + 7 rings + 8 spirit + 6 labels
    assert_eq!(p.len(), 60);

    assert!(matches!(p[0], Primitive::FilledDisc { style: Style::BackgroundGradient, .. }));
    assert!(matches!(p[1], Primitive::Rect { style: Style::HorizonBand, .. }));
    for spoke in &p[2..38] {
        assert!(matches!(spoke, Primitive::Line { style: Style::GridLight | Style::GridDark, .. }));
    }
    assert!(matches!(p[38], Primitive::Line { style: Style::Reference, .. }));
    for ring in &p[39..46] {
        assert!(matches!(ring, Primitive::Circle { style: Style::GridLight, .. }));
    }
    assert!(matches!(p[46], Primitive::Line { style: Style::Reference, .. }));
    assert!(matches!(p[47], Primitive::Line { style: Style::Reference, .. }));
    assert!(matches!(p[50], Primitive::Arc { .. }));
    assert!(matches!(p[51], Primitive::Arc { .. }));
    assert!(matches!(p[52], Primitive::FilledDisc { style: Style::Spirit, .. }));
    assert!(matches!(p[53], Primitive::Line { style: Style::Spirit, .. }));
    assert!(p[54..].iter().all(|prim| matches!(prim, Primitive::Text(_))));
}

#[test]
fn flat_device_drops_band_spirit_horizon_and_secondary_label() {
    let orientation = Orientation {
        is_flat: true,
        ..tilted()
    };
    let scene = project_default(&orientation, &viewport(), &ViewState::default());
    assert_eq!(scene.len(), 57);
    assert!(!scene.primitives().iter().any(|p| matches!(p, Primitive::Rect { .. })));
    assert_eq!(scene.texts().count(), 5);
}

#[test]
fn band_skipped_when_horizon_is_below_the_corners() {
    let orientation = Orientation {
        spirit_tilt: -1000.0,
        ..tilted()
    };
    let scene = project_default(&orientation, &viewport(), &ViewState::default());
    assert!(!scene.primitives().iter().any(|p| matches!(p, Primitive::Rect { .. })));
}

#[test]
fn projection_is_idempotent() {
    let state = ViewState {
        ref_axis: RefAxis::Vertical,
        label_side: LabelSide::Right,
    };
    let a = project_default(&tilted(), &viewport(), &state);
    let b = project_default(&tilted(), &viewport(), &state);
    assert_eq!(a, b);
}

// --- Grid ---

#[test]
fn grid_alternates_light_every_thirty_degrees() {
    let scene = project_default(&tilted(), &viewport(), &ViewState::default());
    let spokes = &scene.primitives()[2..38];
    let light = spokes.iter().filter(|p| p.style() == Style::GridLight).count();
    let dark = spokes.iter().filter(|p| p.style() == Style::GridDark).count();
    assert_eq!(light, 12);
    assert_eq!(dark, 24);
}

#[test]
fn axis_spokes_reach_the_center() {
    let vp = viewport();
    let c = vp.center();
    let scale = ScaleModel::compute(&vp);
    let scene = project_default(&tilted(), &vp, &ViewState::default());
    for (step, spoke) in scene.primitives()[2..38].iter().enumerate() {
        let Primitive::Line { from, to, .. } = spoke else {
            panic!("spoke {step} is not a line");
        };
        assert!(approx_eq(from.distance(c), vp.half_diagonal()));
        let inner = to.distance(c);
        if step % 9 == 0 {
            assert!(approx_eq(inner, 0.0), "spoke {step}");
        } else {
            assert!(approx_eq(inner, scale.ring_pixel_radius), "spoke {step}");
        }
    }
}

// --- Rings and axis ---

#[test]
fn rings_are_multiples_of_first_radius() {
    let vp = viewport();
    let scale = ScaleModel::compute(&vp);
    let scene = project_default(&tilted(), &vp, &ViewState::default());
    let radii: Vec<f64> = scene
        .primitives()
        .iter()
        .filter_map(|p| match p {
            Primitive::Circle { radius, .. } => Some(*radius),
            _ => None,
        })
        .collect();
    assert_eq!(radii.len(), scale.ring_count as usize);
    for (i, radius) in radii.iter().enumerate() {
        assert!(approx_eq(*radius, scale.ring_pixel_radius * (i + 1) as f64));
    }
}

#[test]
fn reference_line_follows_axis() {
    let vp = viewport();
    let horizontal = project_default(&tilted(), &vp, &ViewState::default());
    assert_eq!(
        horizontal.primitives()[38],
        Primitive::Line {
            from: Point::new(0.0, 450.0),
            to: Point::new(900.0, 450.0),
            style: Style::Reference,
        }
    );

    let state = ViewState {
        ref_axis: RefAxis::Vertical,
        ..ViewState::default()
    };
    let vertical = project_default(&tilted(), &vp, &state);
    assert_eq!(
        vertical.primitives()[38],
        Primitive::Line {
            from: Point::new(450.0, 0.0),
            to: Point::new(450.0, 900.0),
            style: Style::Reference,
        }
    );
}

// --- Spirit level ---

#[test]
fn arcs_are_trimmed_and_concentric() {
    let vp = viewport();
    let scale = ScaleModel::compute(&vp);
    let orientation = tilted();
    let scene = project_default(&orientation, &vp, &ViewState::default());
    let [first, second] = arc_specs(orientation.horizon_rotation(), RefAxis::Horizontal);

    let arcs: Vec<&Primitive> = scene.primitives().iter().filter(|p| matches!(p, Primitive::Arc { .. })).collect();
    assert_eq!(arcs.len(), 2);
    let Primitive::Arc { radius, start_deg, sweep_deg, .. } = arcs[0] else { unreachable!() };
    assert!(approx_eq(*radius, 1.9 * scale.ring_pixel_radius));
    assert!(approx_eq(*start_deg, first.start_deg + 2.0));
    assert!(approx_eq(*sweep_deg, first.extent_deg - 4.0));
    let Primitive::Arc { radius, start_deg, sweep_deg, .. } = arcs[1] else { unreachable!() };
    assert!(approx_eq(*radius, 2.1 * scale.ring_pixel_radius));
    assert!(approx_eq(*start_deg, second.start_deg - 2.0));
    assert!(approx_eq(*sweep_deg, second.extent_deg + 4.0));
}

#[test]
fn bubble_disc_and_cross_hair_share_position() {
    let vp = viewport();
    let scale = ScaleModel::compute(&vp);
    let orientation = tilted();
    let scene = project_default(&orientation, &vp, &ViewState::default());
    let b = bubble_position(&orientation, &vp, &scale);

    assert_eq!(
        scene.primitives()[48],
        Primitive::Line {
            from: Point::new(0.0, b.y),
            to: Point::new(900.0, b.y),
            style: Style::Spirit,
        }
    );
    assert_eq!(
        scene.primitives()[49],
        Primitive::Line {
            from: Point::new(b.x, 0.0),
            to: Point::new(b.x, 900.0),
            style: Style::Spirit,
        }
    );
    let Primitive::FilledDisc { center, radius, .. } = scene.primitives()[52] else {
        panic!("expected bubble disc");
    };
    assert_eq!(center, b);
    assert!(approx_eq(radius, scale.ring_pixel_radius / 4.0));
}

#[test]
fn level_horizon_passes_through_center() {
    // spirit_tilt 90 puts the spirit horizon through the centre.
    let vp = viewport();
    let scene = project_default(&tilted(), &vp, &ViewState::default());
    let Primitive::Line { from, to, .. } = scene.primitives()[53] else {
        panic!("expected spirit horizon");
    };
    let mid = Point::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0);
    assert!(approx_eq(mid.x, 450.0));
    assert!(approx_eq(mid.y, 450.0));
}

#[test]
fn max_gradient_line_follows_axis_rotation() {
    let vp = viewport();
    let c = vp.center();
    let orientation = Orientation {
        axis_rotation: 90.0,
        ..tilted()
    };
    let scene = project_default(&orientation, &vp, &ViewState::default());
    let Primitive::Line { from, to, .. } = scene.primitives()[46] else {
        panic!("expected max-gradient line");
    };
    // A quarter turn puts the left-pointing line straight up.
    assert!(approx_eq(from.x, c.x));
    assert!(approx_eq(to.x, c.x));
    assert!(from.y < c.y && to.y < from.y);
}
