#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use bon::Builder;
use rusttype::Font;

use crate::error::ClinometerError;
use crate::label_side::LABEL_SWITCH_THRESHOLD;
use crate::orientation::DisplayRotation;
use crate::projection::LayoutParams;
use crate::viewport::{ScaleParams, DEGREES_PER_RING, MAX_RING_COUNT, RINGS_FULLY_VISIBLE};

/// Color representation for view elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend towards `other`; `t` is clamped to [0, 1].
    pub fn mix(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Color::new(channel(self.r, other.r), channel(self.g, other.g), channel(self.b, other.b))
    }
}

/// Colours for every paint role, plus the horizon band's opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Gradient colour at the centre (and every second gradient radius).
    pub background_dark: Color,
    pub background_light: Color,
    pub horizon_band: Color,
    pub horizon_band_alpha: f32,
    pub grid_light: Color,
    pub grid_dark: Color,
    pub reference: Color,
    pub accent: Color,
    pub shadow: Color,
    pub shadow_alpha: f32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background_dark: Color::new(0x20, 0x22, 0x25),
            background_light: Color::new(0x3a, 0x3d, 0x42),
            horizon_band: Color::new(0x00, 0x00, 0x00),
            horizon_band_alpha: 0.25,
            grid_light: Color::new(0x90, 0x90, 0x90),
            grid_dark: Color::new(0x50, 0x50, 0x50),
            reference: Color::new(0xff, 0xff, 0xff),
            accent: Color::new(0xff, 0xc1, 0x07),
            shadow: Color::new(0x00, 0x00, 0x00),
            shadow_alpha: 0.6,
        }
    }
}

#[derive(Debug, Clone, Builder)]
pub struct ClinometerConfig {
    #[builder(into, default = "Clinometer".to_string())]
    pub title: String,

    // Window configuration
    #[builder(default = 600)]
    pub window_width: usize,
    #[builder(default = 600)]
    pub window_height: usize,
    #[builder(default = 60.0)]
    pub max_framerate: f64,
    #[builder(default)]
    pub initial_display_rotation: DisplayRotation,

    // Scale configuration
    #[builder(default = DEGREES_PER_RING)]
    pub degrees_per_ring: f64,
    #[builder(default = RINGS_FULLY_VISIBLE)]
    pub rings_fully_visible: f64,
    #[builder(default = MAX_RING_COUNT)]
    pub max_ring_count: u32,

    // Label configuration
    #[builder(default = LABEL_SWITCH_THRESHOLD)]
    pub label_switch_threshold: f64,
    #[builder(default = 20.0)]
    pub label_margin: f64,
    #[builder(default = 30.0)]
    pub arc_label_margin: f64,
    #[builder(default = 2.0)]
    pub arc_trim_deg: f64,

    // Text configuration
    #[builder(default = 28.0)]
    pub font_size: f32,
    #[builder(default = 5.0)]
    pub shadow_width: f32,
    pub font_path: Option<PathBuf>,

    #[builder(default)]
    pub palette: Palette,
}

impl Default for ClinometerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ClinometerConfig {
    pub fn scale_params(&self) -> ScaleParams {
        ScaleParams {
            degrees_per_ring: self.degrees_per_ring,
            rings_fully_visible: self.rings_fully_visible,
            max_ring_count: self.max_ring_count,
        }
    }

    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            label_margin: self.label_margin,
            arc_label_margin: self.arc_label_margin,
            arc_trim_deg: self.arc_trim_deg,
            ..LayoutParams::default()
        }
    }

    pub fn validate(&self) -> Result<(), ClinometerError> {
        let positive = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ClinometerError::InvalidConfig(format!("{name} must be positive, got {value}")))
            }
        };
        positive("degrees_per_ring", self.degrees_per_ring)?;
        positive("rings_fully_visible", self.rings_fully_visible)?;
        positive("max_framerate", self.max_framerate)?;
        positive("font_size", f64::from(self.font_size))?;
        if self.max_ring_count == 0 {
            return Err(ClinometerError::InvalidConfig("max_ring_count must be at least 1".into()));
        }
        if self.label_switch_threshold < 0.0 {
            return Err(ClinometerError::InvalidConfig(format!(
                "label_switch_threshold must not be negative, got {}",
                self.label_switch_threshold
            )));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ClinometerError::InvalidConfig("window size must be non-zero".into()));
        }
        Ok(())
    }

    /// Loads the label font, if one is configured.
    pub fn load_font(&self) -> Result<Option<Font<'static>>, ClinometerError> {
        let Some(path) = &self.font_path else {
            return Ok(None);
        };
        let bytes = std::fs::read(path).map_err(|source| ClinometerError::FontRead {
            path: path.clone(),
            source,
        })?;
        let font = Font::try_from_vec(bytes).ok_or_else(|| ClinometerError::InvalidFont(path.clone()))?;
        tracing::info!(path = %path.display(), "loaded label font");
        Ok(Some(font))
    }
}
