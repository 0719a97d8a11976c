//! Per-frame orientation input.
//!
//! The angles arrive already fused from the motion sensors; nothing here
//! filters or calibrates them.

#[cfg(test)]
#[path = "orientation_test.rs"]
mod orientation_test;

use bon::Builder;

/// How the drawing surface is turned relative to the device's natural
/// orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayRotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl DisplayRotation {
    pub const ALL: [DisplayRotation; 4] = [
        DisplayRotation::Deg0,
        DisplayRotation::Deg90,
        DisplayRotation::Deg180,
        DisplayRotation::Deg270,
    ];

    /// Maps a rotation in degrees onto the four supported cases.
    ///
    /// Anything that is not a multiple of 90 falls back to `Deg0` so a bad
    /// value degrades the frame instead of failing it.
    pub fn from_degrees(degrees: i32) -> Self {
        match degrees.rem_euclid(360) {
            0 => DisplayRotation::Deg0,
            90 => DisplayRotation::Deg90,
            180 => DisplayRotation::Deg180,
            270 => DisplayRotation::Deg270,
            other => {
                tracing::warn!(degrees = other, "unsupported display rotation, using 0");
                DisplayRotation::Deg0
            }
        }
    }

    pub fn degrees(self) -> f64 {
        match self {
            DisplayRotation::Deg0 => 0.0,
            DisplayRotation::Deg90 => 90.0,
            DisplayRotation::Deg180 => 180.0,
            DisplayRotation::Deg270 => 270.0,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            DisplayRotation::Deg0 => 0,
            DisplayRotation::Deg90 => 1,
            DisplayRotation::Deg180 => 2,
            DisplayRotation::Deg270 => 3,
        }
    }

    /// Landscape-style rotations, where roll takes over pitch's role.
    pub fn is_quarter_turn(self) -> bool {
        matches!(self, DisplayRotation::Deg90 | DisplayRotation::Deg270)
    }

    /// Rotations that mirror left and right.
    pub fn is_inverted(self) -> bool {
        matches!(self, DisplayRotation::Deg180 | DisplayRotation::Deg270)
    }
}

/// Orientation angles for one frame, all in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Builder)]
pub struct Orientation {
    /// Rotation about the screen's vertical axis; moves the bubble sideways.
    #[builder(default)]
    pub pitch: f64,
    /// Rotation about the screen's horizontal axis; moves the bubble up/down.
    #[builder(default)]
    pub roll: f64,
    /// Inclination of the screen plane.
    #[builder(default)]
    pub tilt: f64,
    /// Screen-plane angle between 3 o'clock and the max-gradient axis.
    #[builder(default)]
    pub axis_rotation: f64,
    /// Z-angle that offsets the horizon band and the spirit horizon.
    #[builder(default)]
    pub spirit_tilt: f64,
    /// Counter-rotation that keeps text upright.
    #[builder(default)]
    pub label_compensation: f64,
    /// Device lying flat: no horizon band, no spirit horizon.
    #[builder(default)]
    pub is_flat: bool,
}

impl Orientation {
    /// Rotation of the horizon band, perpendicular to the max-gradient axis.
    pub fn horizon_rotation(&self) -> f64 {
        self.axis_rotation + 90.0
    }
}
