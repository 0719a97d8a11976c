//! Reference axis selection: which screen axis the white angles are
//! measured from, toggled by pressing near that axis.

#[cfg(test)]
#[path = "ref_axis_test.rs"]
mod ref_axis_test;

use crate::scene::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefAxis {
    /// Angles measured from the 3 o'clock axis.
    #[default]
    Horizontal,
    /// Angles measured from the 6 o'clock axis.
    Vertical,
}

impl RefAxis {
    pub fn degrees(self) -> f64 {
        match self {
            RefAxis::Horizontal => 0.0,
            RefAxis::Vertical => 90.0,
        }
    }

    /// Next state after a pointer event. Only primary presses can switch
    /// the axis; the machine never reverts on its own.
    #[must_use]
    pub fn on_pointer(self, event: PointerEvent, center: Point, ring_pixel_radius: f64) -> Self {
        match event {
            PointerEvent::PrimaryPress(point) => {
                axis_hit(point, center, ring_pixel_radius).unwrap_or(self)
            }
            PointerEvent::Move(_) | PointerEvent::Release(_) => self,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    PrimaryPress(Point),
    Move(Point),
    Release(Point),
}

/// Axis selected by a press at `point`, if any.
///
/// Presses within two rings of the centre are ambiguous and ignored. Past
/// that, a press within one ring of the vertical axis selects `Vertical`,
/// one within a ring of the horizontal axis selects `Horizontal`.
pub fn axis_hit(point: Point, center: Point, ring_pixel_radius: f64) -> Option<RefAxis> {
    if point.distance(center) <= 2.0 * ring_pixel_radius {
        return None;
    }
    if (point.x - center.x).abs() < ring_pixel_radius {
        Some(RefAxis::Vertical)
    } else if (point.y - center.y).abs() < ring_pixel_radius {
        Some(RefAxis::Horizontal)
    } else {
        None
    }
}
