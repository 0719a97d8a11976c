//! Text label placement.
//!
//! Every label is expressed the same way the canvas would draw it: turn the
//! frame about the screen centre, maybe shift it, then pin the text to a
//! local anchor with its own counter-rotation.

#[cfg(test)]
#[path = "labels_test.rs"]
mod labels_test;

use crate::label_side::LabelSide;
use crate::orientation::{DisplayRotation, Orientation};
use crate::projection::{FrameGeometry, LayoutParams, ARC_LABEL_REFERENCE};
use crate::scene::{format_degrees, Align, AnchoredText, Point, Scene, Style, TextMetrics, Transform};
use crate::state::ViewState;
use crate::viewport::Viewport;

/// Angle driving the secondary label's frame for a display rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameAxis {
    Pitch,
    Roll,
}

/// Where the pitch/roll readouts and the secondary tilt frame go for one
/// display rotation. Signs are multiples of the label margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadoutLayout {
    pub text_rotation_deg: f64,
    /// Pitch label x offset from the bubble.
    pub pitch_dx: f64,
    /// Pitch label sits on the bottom edge rather than the top.
    pub pitch_at_bottom: bool,
    pub pitch_align: f64,
    /// Roll label sits on the left edge rather than the right.
    pub roll_at_left: bool,
    /// Roll label y offset from the bubble.
    pub roll_dy: f64,
    pub roll_align: f64,
    /// Secondary tilt frame rotation is `base + sign * axis angle`.
    pub secondary_base_deg: f64,
    pub secondary_axis: FrameAxis,
    pub secondary_sign: f64,
}

const READOUT_LAYOUTS: [ReadoutLayout; 4] = [
    // 0°
    ReadoutLayout {
        text_rotation_deg: 0.0,
        pitch_dx: -1.0,
        pitch_at_bottom: true,
        pitch_align: Align::RIGHT,
        roll_at_left: true,
        roll_dy: -1.0,
        roll_align: Align::LEFT,
        secondary_base_deg: 0.0,
        secondary_axis: FrameAxis::Pitch,
        secondary_sign: 1.0,
    },
    // 90°
    ReadoutLayout {
        text_rotation_deg: 90.0,
        pitch_dx: 1.0,
        pitch_at_bottom: false,
        pitch_align: Align::LEFT,
        roll_at_left: true,
        roll_dy: -1.0,
        roll_align: Align::RIGHT,
        secondary_base_deg: -270.0,
        secondary_axis: FrameAxis::Roll,
        secondary_sign: -1.0,
    },
    // 180°
    ReadoutLayout {
        text_rotation_deg: 180.0,
        pitch_dx: 1.0,
        pitch_at_bottom: false,
        pitch_align: Align::RIGHT,
        roll_at_left: false,
        roll_dy: 1.0,
        roll_align: Align::LEFT,
        secondary_base_deg: 180.0,
        secondary_axis: FrameAxis::Pitch,
        secondary_sign: -1.0,
    },
    // 270°
    ReadoutLayout {
        text_rotation_deg: 270.0,
        pitch_dx: -1.0,
        pitch_at_bottom: true,
        pitch_align: Align::LEFT,
        roll_at_left: false,
        roll_dy: 1.0,
        roll_align: Align::RIGHT,
        secondary_base_deg: 270.0,
        secondary_axis: FrameAxis::Roll,
        secondary_sign: 1.0,
    },
];

pub fn readout_layout(rotation: DisplayRotation) -> &'static ReadoutLayout {
    &READOUT_LAYOUTS[rotation.index()]
}

impl ReadoutLayout {
    /// Rotation of the frame the secondary tilt label is drawn in.
    pub fn secondary_frame_deg(&self, orientation: &Orientation) -> f64 {
        let angle = match self.secondary_axis {
            FrameAxis::Pitch => orientation.pitch,
            FrameAxis::Roll => orientation.roll,
        };
        self.secondary_base_deg + self.secondary_sign * angle
    }
}

fn placed(
    transform: Transform,
    text: String,
    anchor: Point,
    align: Align,
    rotation_deg: f64,
    style: Style,
) -> AnchoredText {
    AnchoredText {
        text,
        anchor: transform.apply(anchor),
        align,
        rotation_deg: transform.rotation_deg() + rotation_deg,
        style,
        shadow: true,
    }
}

pub(crate) fn add_labels<M: TextMetrics + ?Sized>(
    scene: &mut Scene,
    geo: &FrameGeometry,
    orientation: &Orientation,
    viewport: &Viewport,
    state: &ViewState,
    layout: &LayoutParams,
    metrics: &M,
) {
    add_tilt_label(scene, geo, orientation);
    add_readouts(scene, geo, orientation, viewport.display_rotation, layout);
    if !orientation.is_flat {
        add_secondary_tilt_label(scene, geo, orientation, viewport.display_rotation, state.label_side, layout);
    }
    add_arc_labels(scene, geo, orientation, state, layout, metrics);
}

/// Inclination readout on the far side of the max-gradient axis.
fn add_tilt_label(scene: &mut Scene, geo: &FrameGeometry, orientation: &Orientation) {
    let frame_deg = orientation.axis_rotation + 180.0;
    let t = Transform::identity().rotate_about(frame_deg, geo.center);
    scene.add_text(placed(
        t,
        format_degrees((90.0 - orientation.tilt).abs()),
        Point::new(geo.min_dim - geo.ring_radius, geo.center.y),
        Align::centered(),
        orientation.label_compensation - frame_deg,
        Style::LabelText,
    ));
}

fn add_readouts(
    scene: &mut Scene,
    geo: &FrameGeometry,
    orientation: &Orientation,
    rotation: DisplayRotation,
    layout: &LayoutParams,
) {
    let table = readout_layout(rotation);
    let m = layout.label_margin;
    let b = geo.bubble;

    let pitch_y = if table.pitch_at_bottom { geo.height - m } else { m };
    scene.add_text(placed(
        Transform::identity(),
        format_degrees(orientation.pitch),
        Point::new(b.x + table.pitch_dx * m, pitch_y),
        Align::new(table.pitch_align, Align::BOTTOM),
        table.text_rotation_deg,
        Style::SpiritText,
    ));

    let roll_x = if table.roll_at_left { m } else { geo.width - m };
    scene.add_text(placed(
        Transform::identity(),
        format_degrees(orientation.roll),
        Point::new(roll_x, b.y + table.roll_dy * m),
        Align::new(table.roll_align, Align::BOTTOM),
        table.text_rotation_deg,
        Style::SpiritText,
    ));
}

/// Secondary tilt readout riding along the local roll/pitch frame.
fn add_secondary_tilt_label(
    scene: &mut Scene,
    geo: &FrameGeometry,
    orientation: &Orientation,
    rotation: DisplayRotation,
    side: LabelSide,
    layout: &LayoutParams,
) {
    let table = readout_layout(rotation);
    let m = layout.label_margin;
    let t = Transform::identity()
        .rotate_about(table.secondary_frame_deg(orientation), geo.center)
        .translate(0.0, orientation.tilt * geo.pixels_per_degree);

    let (anchor, horizontal) = match side {
        LabelSide::Left => (Point::new(m, geo.center.y - m), Align::LEFT),
        LabelSide::Right => (Point::new(geo.width - m, geo.center.y - m), Align::RIGHT),
    };
    scene.add_text(placed(
        t,
        format_degrees(orientation.tilt),
        anchor,
        Align::new(horizontal, Align::BOTTOM),
        0.0,
        Style::SpiritText,
    ));
}

/// Extent labels just outside each arc's midpoint, kept horizontal.
fn add_arc_labels<M: TextMetrics + ?Sized>(
    scene: &mut Scene,
    geo: &FrameGeometry,
    orientation: &Orientation,
    state: &ViewState,
    layout: &LayoutParams,
    metrics: &M,
) {
    let [first, second] = geo.arcs;
    let c = geo.center;
    let half_label = metrics.text_size(ARC_LABEL_REFERENCE).0 / 2.0;
    let counter = orientation.label_compensation - state.ref_axis.degrees() - first.extent_deg / 2.0;

    let t = Transform::identity().rotate_about(first.mid_deg(), c);
    scene.add_text(placed(
        t,
        format_degrees(first.extent_deg.abs()),
        Point::new(c.x + geo.ring_radius * 2.0 + layout.arc_label_margin + half_label, c.y),
        Align::centered(),
        counter,
        Style::LabelText,
    ));

    // The second arc's midpoint is a quarter turn past the first's.
    let t = t.rotate_about(90.0, c);
    scene.add_text(placed(
        t,
        format_degrees(second.extent_deg.abs()),
        Point::new(
            c.x + geo.ring_radius * layout.outer_arc_factor + layout.arc_label_margin + half_label,
            c.y,
        ),
        Align::centered(),
        counter - 90.0,
        Style::LabelText,
    ));
}
