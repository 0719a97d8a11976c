//! Left/right placement of the secondary tilt label, with a dead zone so
//! the label does not flicker while the angles hover around zero.

#[cfg(test)]
#[path = "label_side_test.rs"]
mod label_side_test;

use crate::orientation::DisplayRotation;

/// Every angle must leave this band (degrees) before the side is re-decided.
pub const LABEL_SWITCH_THRESHOLD: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelSide {
    #[default]
    Left,
    Right,
}

/// Side for this frame given the previous one.
///
/// Inside the dead zone on any channel the previous side is kept. Outside
/// it, the label goes left when tilt and pitch (roll for quarter-turn
/// rotations) have opposite signs, mirrored for 180° and 270°.
pub fn update_side(
    prev: LabelSide,
    pitch: f64,
    roll: f64,
    tilt: f64,
    rotation: DisplayRotation,
    threshold: f64,
) -> LabelSide {
    let outside = tilt.abs() > threshold && pitch.abs() > threshold && roll.abs() > threshold;
    if !outside {
        return prev;
    }

    let partner = if rotation.is_quarter_turn() { roll } else { pitch };
    let mut left = tilt * partner < 0.0;
    if rotation.is_inverted() {
        left = !left;
    }

    if left {
        LabelSide::Left
    } else {
        LabelSide::Right
    }
}
