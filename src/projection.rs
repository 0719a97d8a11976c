//! Projection engine: one frame of orientation and viewport in, the full
//! ordered primitive list out.
//!
//! Paint order is background, tilt band, grid spokes, reference axis,
//! rings, spirit-level furniture, then labels. Everything is recomputed
//! from scratch each frame; the only inputs carried between frames are in
//! [`ViewState`], which is read here and never written.

#[cfg(test)]
#[path = "projection_test.rs"]
mod projection_test;

use crate::labels;
use crate::orientation::Orientation;
use crate::ref_axis::RefAxis;
use crate::scene::{Point, Primitive, Scene, Style, TextMetrics, Transform};
use crate::state::ViewState;
use crate::viewport::{ScaleModel, Viewport};

/// Widest label the arc-extent labels are spaced for.
pub const ARC_LABEL_REFERENCE: &str = "100.0°";

/// Spacing constants for the spirit-level furniture and labels, in pixels
/// or multiples of the ring radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Gap between readouts and the screen edge or bubble.
    pub label_margin: f64,
    /// Gap between the arcs and their extent labels.
    pub arc_label_margin: f64,
    /// Degrees cut from each end of both arcs.
    pub arc_trim_deg: f64,
    pub inner_arc_factor: f64,
    pub outer_arc_factor: f64,
    pub bubble_factor: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            label_margin: 20.0,
            arc_label_margin: 30.0,
            arc_trim_deg: 2.0,
            inner_arc_factor: 1.9,
            outer_arc_factor: 2.1,
            bubble_factor: 0.25,
        }
    }
}

/// One of the two supplementary angle arcs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpec {
    pub start_deg: f64,
    pub extent_deg: f64,
}

impl ArcSpec {
    pub fn mid_deg(&self) -> f64 {
        self.start_deg + self.extent_deg / 2.0
    }
}

/// The two arcs between the reference axis and the horizon.
///
/// The first starts on the reference axis and sweeps to the horizon, the
/// second starts on the opposite ray and sweeps back, so the two always
/// differ by exactly 180°. `%` keeps the dividend's sign, so a negative
/// horizon rotation gives a negative first extent.
pub fn arc_specs(horizon_rotation: f64, ref_axis: RefAxis) -> [ArcSpec; 2] {
    let base = ref_axis.degrees();
    let extent = (horizon_rotation + base) % 180.0;
    [
        ArcSpec {
            start_deg: base,
            extent_deg: extent,
        },
        ArcSpec {
            start_deg: base + 180.0,
            extent_deg: -(180.0 - extent),
        },
    ]
}

/// Bubble centre: pitch moves it right, roll moves it up.
pub fn bubble_position(orientation: &Orientation, viewport: &Viewport, scale: &ScaleModel) -> Point {
    let c = viewport.center();
    Point::new(
        c.x + scale.degrees_to_pixels(orientation.pitch),
        c.y - scale.degrees_to_pixels(orientation.roll),
    )
}

/// Quantities every layer of the frame derives from.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FrameGeometry {
    pub width: f64,
    pub height: f64,
    pub center: Point,
    pub min_dim: f64,
    pub half_diagonal: f64,
    pub ring_radius: f64,
    pub pixels_per_degree: f64,
    pub bubble: Point,
    pub arcs: [ArcSpec; 2],
    /// Vertical offset of the tilt horizon in the horizon frame.
    pub horizon_offset: f64,
}

impl FrameGeometry {
    fn new(orientation: &Orientation, viewport: &Viewport, scale: &ScaleModel, ref_axis: RefAxis) -> Self {
        Self {
            width: f64::from(viewport.width),
            height: f64::from(viewport.height),
            center: viewport.center(),
            min_dim: viewport.min_dim(),
            half_diagonal: viewport.half_diagonal(),
            ring_radius: scale.ring_pixel_radius,
            pixels_per_degree: scale.pixels_per_degree(),
            bubble: bubble_position(orientation, viewport, scale),
            arcs: arc_specs(orientation.horizon_rotation(), ref_axis),
            horizon_offset: scale.degrees_to_pixels(90.0 - orientation.spirit_tilt),
        }
    }
}

/// Builds the primitive list for one frame.
///
/// A degenerate viewport yields an empty scene.
pub fn project<M: TextMetrics + ?Sized>(
    orientation: &Orientation,
    viewport: &Viewport,
    scale: &ScaleModel,
    state: &ViewState,
    layout: &LayoutParams,
    metrics: &M,
) -> Scene {
    let mut scene = Scene::new();
    if viewport.is_degenerate() || scale.ring_pixel_radius <= 0.0 || !scale.ring_pixel_radius.is_finite() {
        return scene;
    }

    let geo = FrameGeometry::new(orientation, viewport, scale, state.ref_axis);

    add_background(&mut scene, &geo);
    if !orientation.is_flat {
        add_tilt_band(&mut scene, &geo, orientation);
    }
    add_grid(&mut scene, &geo);
    add_reference_axis(&mut scene, &geo, state.ref_axis);
    add_rings(&mut scene, &geo, scale.ring_count);
    add_spirit_level(&mut scene, &geo, orientation, layout);
    labels::add_labels(&mut scene, &geo, orientation, viewport, state, layout, metrics);

    scene
}

// ============================================================================
// LAYERS
// ============================================================================

fn add_background(scene: &mut Scene, geo: &FrameGeometry) {
    scene.add(Primitive::FilledDisc {
        center: geo.center,
        radius: geo.half_diagonal,
        style: Style::BackgroundGradient,
    });
}

fn add_tilt_band(scene: &mut Scene, geo: &FrameGeometry, orientation: &Orientation) {
    let (c, d) = (geo.center, geo.half_diagonal);
    let top = c.y + geo.horizon_offset;
    let bottom = c.y + d;
    // Horizon below every corner: nothing to fill.
    if top >= bottom {
        return;
    }
    let t = Transform::identity().rotate_about(orientation.horizon_rotation(), c);
    scene.add(Primitive::Rect {
        corners: [
            t.apply(Point::new(c.x - d, top)),
            t.apply(Point::new(c.x + d, top)),
            t.apply(Point::new(c.x + d, bottom)),
            t.apply(Point::new(c.x - d, bottom)),
        ],
        style: Style::HorizonBand,
    });
}

fn add_grid(scene: &mut Scene, geo: &FrameGeometry) {
    let c = geo.center;
    for step in 0..36u32 {
        let angle = f64::from(step * 10);
        // Axis spokes reach the centre, the rest stop at the first ring.
        let inner = if step % 9 == 0 { 0.0 } else { geo.ring_radius };
        let style = if step % 3 == 0 {
            Style::GridLight
        } else {
            Style::GridDark
        };
        let (sin, cos) = angle.to_radians().sin_cos();
        scene.add_line(
            Point::new(c.x - geo.half_diagonal * cos, c.y - geo.half_diagonal * sin),
            Point::new(c.x - inner * cos, c.y - inner * sin),
            style,
        );
    }
}

fn add_reference_axis(scene: &mut Scene, geo: &FrameGeometry, ref_axis: RefAxis) {
    let c = geo.center;
    match ref_axis {
        RefAxis::Horizontal => {
            scene.add_line(Point::new(0.0, c.y), Point::new(geo.width, c.y), Style::Reference)
        }
        RefAxis::Vertical => {
            scene.add_line(Point::new(c.x, 0.0), Point::new(c.x, geo.height), Style::Reference)
        }
    }
}

fn add_rings(scene: &mut Scene, geo: &FrameGeometry, ring_count: u32) {
    for i in 1..=ring_count {
        scene.add(Primitive::Circle {
            center: geo.center,
            radius: geo.ring_radius * f64::from(i),
            style: Style::GridLight,
        });
    }
}

fn add_spirit_level(scene: &mut Scene, geo: &FrameGeometry, orientation: &Orientation, layout: &LayoutParams) {
    let c = geo.center;
    let r1 = geo.ring_radius;

    // Max-gradient line, from just inside the outer visible ring off the
    // left edge, then the full horizon a quarter turn further.
    let axis = Transform::identity().rotate_about(orientation.axis_rotation, c);
    scene.add_line(
        axis.apply(Point::new(c.x - geo.min_dim / 2.0 + r1 / 2.0, c.y)),
        axis.apply(Point::new(-geo.half_diagonal, c.y)),
        Style::Reference,
    );
    let horizon = axis.rotate_about(90.0, c);
    let reach = c.x + c.y;
    scene.add_line(
        horizon.apply(Point::new(c.x - reach, c.y)),
        horizon.apply(Point::new(c.x + reach, c.y)),
        Style::Reference,
    );

    // Cross-hair through the bubble.
    let b = geo.bubble;
    scene.add_line(Point::new(0.0, b.y), Point::new(geo.width, b.y), Style::Spirit);
    scene.add_line(Point::new(b.x, 0.0), Point::new(b.x, geo.height), Style::Spirit);

    let [first, second] = geo.arcs;
    let trim = layout.arc_trim_deg;
    scene.add(Primitive::Arc {
        center: c,
        radius: layout.inner_arc_factor * r1,
        start_deg: first.start_deg + trim,
        sweep_deg: first.extent_deg - 2.0 * trim,
        style: Style::ArcStroke,
    });
    scene.add(Primitive::Arc {
        center: c,
        radius: layout.outer_arc_factor * r1,
        start_deg: second.start_deg - trim,
        sweep_deg: second.extent_deg + 2.0 * trim,
        style: Style::ArcStroke,
    });

    scene.add(Primitive::FilledDisc {
        center: b,
        radius: r1 * layout.bubble_factor,
        style: Style::Spirit,
    });

    if !orientation.is_flat {
        let t = Transform::identity().rotate_about(orientation.horizon_rotation(), c);
        let y = c.y + geo.horizon_offset;
        scene.add_line(
            t.apply(Point::new(c.x - geo.half_diagonal, y)),
            t.apply(Point::new(c.x + geo.half_diagonal, y)),
            Style::Spirit,
        );
    }
}
