//! Drawing surface dimensions and the ring scale derived from them.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::orientation::DisplayRotation;
use crate::scene::Point;

/// Degrees of pitch/roll represented by one ring.
pub const DEGREES_PER_RING: f64 = 2.0;

/// Rings that fit inside the shorter screen dimension.
pub const RINGS_FULLY_VISIBLE: f64 = 4.5;

/// Upper bound on rings drawn, whatever the surface size.
pub const MAX_RING_COUNT: u32 = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub display_rotation: DisplayRotation,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            display_rotation: DisplayRotation::Deg0,
        }
    }

    #[must_use]
    pub fn with_rotation(mut self, display_rotation: DisplayRotation) -> Self {
        self.display_rotation = display_rotation;
        self
    }

    pub fn center(&self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    pub fn min_dim(&self) -> f64 {
        f64::from(self.width.min(self.height))
    }

    /// Distance from the centre to a corner.
    pub fn half_diagonal(&self) -> f64 {
        let c = self.center();
        c.x.hypot(c.y)
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleParams {
    pub degrees_per_ring: f64,
    pub rings_fully_visible: f64,
    pub max_ring_count: u32,
}

impl Default for ScaleParams {
    fn default() -> Self {
        Self {
            degrees_per_ring: DEGREES_PER_RING,
            rings_fully_visible: RINGS_FULLY_VISIBLE,
            max_ring_count: MAX_RING_COUNT,
        }
    }
}

/// Pixel scale of the ring grid for one viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleModel {
    pub degrees_per_ring: f64,
    /// Radius of the first ring; ring `i` has radius `i * ring_pixel_radius`.
    pub ring_pixel_radius: f64,
    /// Rings needed to reach the corners.
    pub ring_count: u32,
}

impl ScaleModel {
    pub fn compute(viewport: &Viewport) -> Self {
        Self::compute_with(viewport, &ScaleParams::default())
    }

    /// Degenerate viewports and non-positive parameters give the zero
    /// model rather than NaN or infinite radii.
    pub fn compute_with(viewport: &Viewport, params: &ScaleParams) -> Self {
        let min_dim = viewport.min_dim();
        let usable = min_dim > 0.0
            && params.rings_fully_visible.is_finite()
            && params.rings_fully_visible > 0.0
            && params.degrees_per_ring.is_finite()
            && params.degrees_per_ring > 0.0;
        if !usable {
            return Self::zero(params.degrees_per_ring);
        }

        let ring_pixel_radius = (min_dim / 2.0) / params.rings_fully_visible;
        let rings = (params.rings_fully_visible * 2.0 * viewport.half_diagonal() / min_dim).ceil();
        let ring_count = if rings.is_finite() && rings > 0.0 {
            (rings as u64).min(u64::from(params.max_ring_count)) as u32
        } else {
            0
        };

        Self {
            degrees_per_ring: params.degrees_per_ring,
            ring_pixel_radius,
            ring_count,
        }
    }

    fn zero(degrees_per_ring: f64) -> Self {
        Self {
            degrees_per_ring,
            ring_pixel_radius: 0.0,
            ring_count: 0,
        }
    }

    /// Pixels per degree of pitch or roll.
    pub fn pixels_per_degree(&self) -> f64 {
        if self.degrees_per_ring > 0.0 && self.degrees_per_ring.is_finite() {
            self.ring_pixel_radius / self.degrees_per_ring
        } else {
            0.0
        }
    }

    pub fn degrees_to_pixels(&self, degrees: f64) -> f64 {
        degrees * self.pixels_per_degree()
    }
}
