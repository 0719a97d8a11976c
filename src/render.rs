//! Pixel render sink: rasterises a [`Scene`] into an RGBA frame.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::config::{ClinometerConfig, Color, Palette};
use crate::scene::{AnchoredText, Point, Primitive, Scene, Style, TextMetrics};

// ============================================================================
// CANVAS
// ============================================================================

pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    /// Wraps an RGBA frame. The height is whatever fits in the buffer, at
    /// most `height`.
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        let fits = if width == 0 { 0 } else { frame.len() / (width * 4) };
        Self {
            frame,
            width,
            height: height.min(fits),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    /// Alpha-blends `color` over the pixel at `(x, y)`. Off-canvas writes
    /// are dropped.
    pub fn blend(&mut self, x: i64, y: i64, color: Color, alpha: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let a = alpha.clamp(0.0, 1.0);
        let idx = (y as usize * self.width + x as usize) * 4;
        let src = [f32::from(color.r), f32::from(color.g), f32::from(color.b)];
        for (channel, value) in src.iter().enumerate() {
            let dst = f32::from(self.frame[idx + channel]);
            self.frame[idx + channel] = (value * a + dst * (1.0 - a)).round() as u8;
        }
        self.frame[idx + 3] = 0xff;
    }

    /// Reads back one pixel as a colour.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        Some(Color::new(self.frame[idx], self.frame[idx + 1], self.frame[idx + 2]))
    }

    /// Inclusive pixel range covering `[lo, hi]`, clipped to the canvas.
    fn clip(&self, lo: Point, hi: Point) -> Option<(i64, i64, i64, i64)> {
        let min_x = (lo.x.floor() as i64).max(0);
        let min_y = (lo.y.floor() as i64).max(0);
        let max_x = (hi.x.ceil() as i64).min(self.width as i64 - 1);
        let max_y = (hi.y.ceil() as i64).min(self.height as i64 - 1);
        if min_x > max_x || min_y > max_y {
            return None;
        }
        Some((min_x, min_y, max_x, max_y))
    }
}

// ============================================================================
// DRAWING PRIMITIVES
// ============================================================================

pub fn draw_thick_line_aa(canvas: &mut Canvas, from: Point, to: Point, thickness: f32, color: Color) {
    if !(from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()) {
        return;
    }
    let pad = f64::from(thickness).ceil() + 1.0;
    let lo = Point::new(from.x.min(to.x) - pad, from.y.min(to.y) - pad);
    let hi = Point::new(from.x.max(to.x) + pad, from.y.max(to.y) + pad);
    let Some((min_x, min_y, max_x, max_y)) = canvas.clip(lo, hi) else {
        return;
    };

    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let len_sq = dx * dx + dy * dy;
    let half = f64::from(thickness) / 2.0;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let px = x as f64 - from.x;
            let py = y as f64 - from.y;
            // Zero-length lines degrade to a dot.
            let t = if len_sq > f64::EPSILON {
                ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let dist = (px - t * dx).hypot(py - t * dy);
            let aa = (1.0 - (dist - half).clamp(0.0, 1.0)) as f32;
            if aa > 0.01 {
                canvas.blend(x, y, color, aa);
            }
        }
    }
}

pub fn draw_ring(canvas: &mut Canvas, center: Point, radius: f64, thickness: f32, color: Color) {
    draw_arc(canvas, center, radius, thickness, 0.0, 360.0, color);
}

/// Stroked arc, degrees clockwise from 3 o'clock. A negative sweep runs
/// the other way round.
pub fn draw_arc(
    canvas: &mut Canvas,
    center: Point,
    radius: f64,
    thickness: f32,
    start_deg: f64,
    sweep_deg: f64,
    color: Color,
) {
    if !(radius.is_finite() && radius > 0.0 && start_deg.is_finite() && sweep_deg.is_finite()) {
        return;
    }
    let (start, sweep) = if sweep_deg < 0.0 {
        (start_deg + sweep_deg, -sweep_deg)
    } else {
        (start_deg, sweep_deg)
    };
    let start = start.rem_euclid(360.0);
    let full = sweep >= 360.0;

    let half = f64::from(thickness) / 2.0;
    let reach = radius + half + 1.0;
    let lo = Point::new(center.x - reach, center.y - reach);
    let hi = Point::new(center.x + reach, center.y + reach);
    let Some((min_x, min_y, max_x, max_y)) = canvas.clip(lo, hi) else {
        return;
    };

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f64 - center.x;
            let dy = y as f64 - center.y;
            let dist = dx.hypot(dy);
            let aa = (1.0 - ((dist - radius).abs() - half).clamp(0.0, 1.0)) as f32;
            if aa <= 0.01 {
                continue;
            }
            if !full {
                let angle = dy.atan2(dx).to_degrees().rem_euclid(360.0);
                if (angle - start).rem_euclid(360.0) > sweep {
                    continue;
                }
            }
            canvas.blend(x, y, color, aa);
        }
    }
}

pub fn fill_disc(canvas: &mut Canvas, center: Point, radius: f64, color: Color, alpha: f32) {
    if !(radius.is_finite() && radius > 0.0) {
        return;
    }
    let reach = radius + 1.0;
    let lo = Point::new(center.x - reach, center.y - reach);
    let hi = Point::new(center.x + reach, center.y + reach);
    let Some((min_x, min_y, max_x, max_y)) = canvas.clip(lo, hi) else {
        return;
    };
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dist = (x as f64 - center.x).hypot(y as f64 - center.y);
            let aa = if dist > radius {
                1.0 - (dist - radius).min(1.0)
            } else {
                1.0
            };
            if aa > 0.0 {
                canvas.blend(x, y, color, alpha * aa as f32);
            }
        }
    }
}

/// Fills a convex quadrilateral given its corners in winding order.
pub fn fill_convex_quad(canvas: &mut Canvas, corners: &[Point; 4], color: Color, alpha: f32) {
    if corners.iter().any(|c| !(c.x.is_finite() && c.y.is_finite())) {
        return;
    }
    let lo = corners.iter().fold(Point::new(f64::MAX, f64::MAX), |acc, c| {
        Point::new(acc.x.min(c.x), acc.y.min(c.y))
    });
    let hi = corners.iter().fold(Point::new(f64::MIN, f64::MIN), |acc, c| {
        Point::new(acc.x.max(c.x), acc.y.max(c.y))
    });
    let Some((min_x, min_y, max_x, max_y)) = canvas.clip(lo, hi) else {
        return;
    };

    let edge = |a: Point, b: Point, p: Point| (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = Point::new(x as f64, y as f64);
            let mut positive = false;
            let mut negative = false;
            for i in 0..4 {
                let side = edge(corners[i], corners[(i + 1) % 4], p);
                positive |= side > 0.0;
                negative |= side < 0.0;
            }
            if !(positive && negative) {
                canvas.blend(x, y, color, alpha);
            }
        }
    }
}

fn draw_antialiased_pixel(canvas: &mut Canvas, x: f64, y: f64, color: Color, alpha: f32) {
    let x_floor = x.floor();
    let y_floor = y.floor();
    let x_frac = x - x_floor;
    let y_frac = y - y_floor;
    let (xi, yi) = (x_floor as i64, y_floor as i64);

    // Spread across the four nearest pixels (bilinear).
    let samples = [
        (xi, yi, (1.0 - x_frac) * (1.0 - y_frac)),
        (xi + 1, yi, x_frac * (1.0 - y_frac)),
        (xi, yi + 1, (1.0 - x_frac) * y_frac),
        (xi + 1, yi + 1, x_frac * y_frac),
    ];
    for (px, py, weight) in samples {
        let final_alpha = alpha * weight as f32;
        if final_alpha > 0.001 {
            canvas.blend(px, py, color, final_alpha);
        }
    }
}

// ============================================================================
// BACKGROUND
// ============================================================================

/// Mirrored radial gradient for one viewport size, kept between frames.
#[derive(Debug, Default)]
struct GradientCache {
    size: (usize, usize),
    pixels: Vec<u8>,
    rebuilds: u32,
}

impl GradientCache {
    fn get(&mut self, width: usize, height: usize, palette: &Palette) -> &[u8] {
        if self.size != (width, height) || self.pixels.len() != width * height * 4 {
            self.rebuild(width, height, palette);
        }
        &self.pixels
    }

    fn rebuild(&mut self, width: usize, height: usize, palette: &Palette) {
        let cx = width as f64 / 2.0;
        let cy = height as f64 / 2.0;
        // Dark at the centre, light at half the half-diagonal, then mirrored.
        let period = cx.hypot(cy) / 2.0;

        self.pixels.clear();
        self.pixels.reserve(width * height * 4);
        for y in 0..height {
            for x in 0..width {
                let t = if period > 0.0 {
                    let phase = ((x as f64 - cx).hypot(y as f64 - cy) / period) % 2.0;
                    if phase > 1.0 {
                        2.0 - phase
                    } else {
                        phase
                    }
                } else {
                    0.0
                };
                let c = palette.background_dark.mix(palette.background_light, t);
                self.pixels.extend_from_slice(&[c.r, c.g, c.b, 0xff]);
            }
        }
        self.size = (width, height);
        self.rebuilds += 1;
        tracing::debug!(width, height, rebuilds = self.rebuilds, "rebuilt background gradient");
    }
}

// ============================================================================
// RENDERER
// ============================================================================

/// Colour, opacity and stroke width a style resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub alpha: f32,
    pub stroke_width: f32,
}

pub struct Renderer {
    palette: Palette,
    font: Option<Font<'static>>,
    scale: Scale,
    shadow_width: f32,
    gradient: GradientCache,
    warned_missing_font: bool,
}

impl Renderer {
    pub fn new(config: &ClinometerConfig, font: Option<Font<'static>>) -> Self {
        Self {
            palette: config.palette,
            font,
            scale: Scale::uniform(config.font_size),
            shadow_width: config.shadow_width,
            gradient: GradientCache::default(),
            warned_missing_font: false,
        }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Times the background gradient has been rebuilt.
    pub fn gradient_rebuilds(&self) -> u32 {
        self.gradient.rebuilds
    }

    pub fn paint(&self, style: Style) -> Paint {
        let p = &self.palette;
        let (color, alpha, stroke_width) = match style {
            Style::BackgroundGradient => (p.background_dark, 1.0, 0.0),
            Style::HorizonBand => (p.horizon_band, p.horizon_band_alpha, 0.0),
            Style::GridLight => (p.grid_light, 1.0, 1.0),
            Style::GridDark => (p.grid_dark, 1.0, 1.0),
            Style::Reference => (p.reference, 1.0, 1.5),
            Style::ArcStroke => (p.reference, 1.0, 3.0),
            Style::Spirit => (p.accent, 1.0, 3.0),
            Style::LabelText => (p.reference, 1.0, 0.0),
            Style::SpiritText => (p.accent, 1.0, 0.0),
        };
        Paint {
            color,
            alpha,
            stroke_width,
        }
    }

    /// Draws the scene front to back over whatever the canvas holds.
    pub fn render(&mut self, scene: &Scene, canvas: &mut Canvas) {
        canvas.clear(self.palette.background_dark);
        for primitive in scene.primitives() {
            let paint = self.paint(primitive.style());
            match primitive {
                Primitive::FilledDisc {
                    style: Style::BackgroundGradient,
                    ..
                } => {
                    // The disc reaches the corners, so it covers the frame.
                    let (w, h) = (canvas.width, canvas.height);
                    let gradient = self.gradient.get(w, h, &self.palette);
                    let len = gradient.len().min(canvas.frame.len());
                    canvas.frame[..len].copy_from_slice(&gradient[..len]);
                }
                Primitive::FilledDisc { center, radius, .. } => {
                    fill_disc(canvas, *center, *radius, paint.color, paint.alpha);
                }
                Primitive::Circle { center, radius, .. } => {
                    draw_ring(canvas, *center, *radius, paint.stroke_width, paint.color);
                }
                Primitive::Line { from, to, .. } => {
                    draw_thick_line_aa(canvas, *from, *to, paint.stroke_width, paint.color);
                }
                Primitive::Arc {
                    center,
                    radius,
                    start_deg,
                    sweep_deg,
                    ..
                } => {
                    draw_arc(
                        canvas,
                        *center,
                        *radius,
                        paint.stroke_width,
                        *start_deg,
                        *sweep_deg,
                        paint.color,
                    );
                }
                Primitive::Rect { corners, .. } => {
                    fill_convex_quad(canvas, corners, paint.color, paint.alpha);
                }
                Primitive::Text(text) => self.draw_text(canvas, text, paint),
            }
        }
    }

    fn draw_text(&mut self, canvas: &mut Canvas, text: &AnchoredText, paint: Paint) {
        let Some(font) = &self.font else {
            if !self.warned_missing_font {
                tracing::warn!("no label font loaded, text is not drawn");
                self.warned_missing_font = true;
            }
            return;
        };

        let (width, height) = measure(font, self.scale, &text.text);
        let origin = text.baseline_origin(width, height);
        let glyphs: Vec<PositionedGlyph> = font
            .layout(&text.text, self.scale, point(origin.x as f32, origin.y as f32))
            .collect();
        let (sin_r, cos_r) = text.rotation_deg.to_radians().sin_cos();
        let anchor = text.anchor;
        let place = |px: f64, py: f64| {
            let lx = px - anchor.x;
            let ly = py - anchor.y;
            (anchor.x + lx * cos_r - ly * sin_r, anchor.y + lx * sin_r + ly * cos_r)
        };

        if text.shadow {
            let offsets = shadow_offsets(self.shadow_width);
            let shadow = self.palette.shadow;
            let shadow_alpha = self.palette.shadow_alpha * paint.alpha;
            for glyph in &glyphs {
                let Some(bb) = glyph.pixel_bounding_box() else { continue };
                glyph.draw(|gx, gy, v| {
                    if v > 0.001 {
                        let (x, y) = place(f64::from(bb.min.x) + f64::from(gx), f64::from(bb.min.y) + f64::from(gy));
                        for (ox, oy) in &offsets {
                            draw_antialiased_pixel(canvas, x + ox, y + oy, shadow, v * shadow_alpha);
                        }
                    }
                });
            }
        }

        for glyph in &glyphs {
            let Some(bb) = glyph.pixel_bounding_box() else { continue };
            glyph.draw(|gx, gy, v| {
                if v > 0.001 {
                    let (x, y) = place(f64::from(bb.min.x) + f64::from(gx), f64::from(bb.min.y) + f64::from(gy));
                    draw_antialiased_pixel(canvas, x, y, paint.color, v * paint.alpha);
                }
            });
        }
    }
}

impl TextMetrics for Renderer {
    fn text_size(&self, text: &str) -> (f64, f64) {
        match &self.font {
            Some(font) => measure(font, self.scale, text),
            // Rough monospace estimate so layout still spaces labels.
            None => (
                text.chars().count() as f64 * f64::from(self.scale.x) * 0.6,
                f64::from(self.scale.y) * 0.7,
            ),
        }
    }
}

/// Pixel bounding box of the laid-out text.
fn measure(font: &Font, scale: Scale, text: &str) -> (f64, f64) {
    let (min_x, max_x, min_y, max_y) = font
        .layout(text, scale, point(0.0, 0.0))
        .filter_map(|g| g.pixel_bounding_box())
        .fold((i32::MAX, i32::MIN, i32::MAX, i32::MIN), |(min_x, max_x, min_y, max_y), bb| {
            (
                min_x.min(bb.min.x),
                max_x.max(bb.max.x),
                min_y.min(bb.min.y),
                max_y.max(bb.max.y),
            )
        });
    let width = if min_x < max_x { max_x - min_x } else { 0 };
    let height = if min_y < max_y { max_y - min_y } else { 0 };
    (f64::from(width), f64::from(height))
}

/// Offsets covering a disc of diameter `width`, used to fatten glyphs for
/// the shadow pass.
fn shadow_offsets(width: f32) -> Vec<(f64, f64)> {
    let radius = f64::from(width.max(0.0)) / 2.0;
    let reach = radius.ceil() as i32;
    let mut offsets = Vec::new();
    for oy in -reach..=reach {
        for ox in -reach..=reach {
            let (x, y) = (f64::from(ox), f64::from(oy));
            if x.hypot(y) <= radius {
                offsets.push((x, y));
            }
        }
    }
    offsets
}
