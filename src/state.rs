//! View state that survives between frames.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use crate::label_side::{self, LabelSide};
use crate::orientation::{DisplayRotation, Orientation};
use crate::ref_axis::{PointerEvent, RefAxis};
use crate::viewport::{ScaleModel, Viewport};

/// The only mutable state the projection reads. Written by pointer events
/// and by the once-per-frame hysteresis step, never by the projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    pub ref_axis: RefAxis,
    pub label_side: LabelSide,
}

impl ViewState {
    /// Feeds a pointer event to the reference axis machine. Returns true
    /// when the axis changed.
    pub fn handle_pointer(&mut self, event: PointerEvent, viewport: &Viewport, scale: &ScaleModel) -> bool {
        let center = viewport.center();
        if let PointerEvent::PrimaryPress(point) = event {
            tracing::debug!(x = point.x, y = point.y, cx = center.x, cy = center.y, "primary press");
        }

        let next = self.ref_axis.on_pointer(event, center, scale.ring_pixel_radius);
        if next == self.ref_axis {
            return false;
        }
        tracing::info!(from = ?self.ref_axis, to = ?next, "reference axis changed");
        self.ref_axis = next;
        true
    }

    /// Re-decides the secondary label side. Flat devices hide that label,
    /// so the side is frozen while flat.
    pub fn observe(&mut self, orientation: &Orientation, rotation: DisplayRotation, threshold: f64) {
        if orientation.is_flat {
            return;
        }
        let next = label_side::update_side(
            self.label_side,
            orientation.pitch,
            orientation.roll,
            orientation.tilt,
            rotation,
            threshold,
        );
        if next != self.label_side {
            tracing::trace!(side = ?next, "secondary label side switched");
            self.label_side = next;
        }
    }
}
