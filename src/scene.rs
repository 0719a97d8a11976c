//! Retained-mode scene: the ordered primitive list one frame produces.
//!
//! Nothing in here knows about pixels. The projection fills a [`Scene`],
//! the renderer walks it front to back, later primitives covering earlier
//! ones.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

// ============================================================================
// GEOMETRY
// ============================================================================

/// A point in screen space (pixels, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// The point `radius` away from `self` in screen direction `degrees`
    /// (clockwise from 3 o'clock).
    pub fn polar(self, radius: f64, degrees: f64) -> Point {
        let rad = degrees.to_radians();
        Point::new(self.x + radius * rad.cos(), self.y + radius * rad.sin())
    }
}

/// Rigid 2D transform, built up the way a canvas stack is: rotate about a
/// pivot, translate, then draw in local coordinates.
///
/// Positive angles turn clockwise on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    cos: f64,
    sin: f64,
    tx: f64,
    ty: f64,
    rotation_deg: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub const fn identity() -> Self {
        Self {
            cos: 1.0,
            sin: 0.0,
            tx: 0.0,
            ty: 0.0,
            rotation_deg: 0.0,
        }
    }

    /// `self` followed by a rotation of `degrees` about `pivot`, both in
    /// the current local frame.
    #[must_use]
    pub fn rotate_about(self, degrees: f64, pivot: Point) -> Self {
        let rad = degrees.to_radians();
        let (sin, cos) = rad.sin_cos();
        let step = Transform {
            cos,
            sin,
            tx: pivot.x - (cos * pivot.x - sin * pivot.y),
            ty: pivot.y - (sin * pivot.x + cos * pivot.y),
            rotation_deg: degrees,
        };
        self.then(step)
    }

    /// `self` followed by a shift of `(dx, dy)` in the local frame.
    #[must_use]
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        self.then(Transform {
            tx: dx,
            ty: dy,
            ..Transform::identity()
        })
    }

    fn then(self, local: Transform) -> Self {
        let origin = self.apply(Point::new(local.tx, local.ty));
        Self {
            cos: self.cos * local.cos - self.sin * local.sin,
            sin: self.sin * local.cos + self.cos * local.sin,
            tx: origin.x,
            ty: origin.y,
            rotation_deg: self.rotation_deg + local.rotation_deg,
        }
    }

    /// Maps a local point to screen space.
    pub fn apply(&self, point: Point) -> Point {
        Point::new(
            self.cos * point.x - self.sin * point.y + self.tx,
            self.sin * point.x + self.cos * point.y + self.ty,
        )
    }

    /// Total rotation accumulated so far, in degrees.
    pub fn rotation_deg(&self) -> f64 {
        self.rotation_deg
    }
}

// ============================================================================
// STYLES AND TEXT
// ============================================================================

/// Paint role of a primitive. The render sink owns the actual colours and
/// stroke widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// Radial gradient filling the whole surface.
    BackgroundGradient,
    /// Translucent fill below the tilt horizon.
    HorizonBand,
    /// Rings and grid spokes at multiples of 30°.
    GridLight,
    /// The remaining grid spokes.
    GridDark,
    /// Reference axis and horizon lines.
    Reference,
    /// The two angle arcs.
    ArcStroke,
    /// Cross-hair, bubble and spirit horizon.
    Spirit,
    /// Arc-extent and tilt labels.
    LabelText,
    /// Pitch, roll and secondary tilt readouts.
    SpiritText,
}

/// Normalised text alignment: fractions of the measured bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Align {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Align {
    pub const LEFT: f64 = 0.0;
    pub const CENTER: f64 = 0.5;
    pub const RIGHT: f64 = 1.0;
    /// Baseline sits on the anchor.
    pub const BOTTOM: f64 = 0.0;
    /// Top of the text sits on the anchor.
    pub const TOP: f64 = 1.0;

    pub const fn new(horizontal: f64, vertical: f64) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub const fn centered() -> Self {
        Self::new(Self::CENTER, Self::CENTER)
    }
}

/// Text pinned to an anchor point and rotated about it.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchoredText {
    pub text: String,
    pub anchor: Point,
    pub align: Align,
    /// Clockwise rotation about `anchor`, in degrees.
    pub rotation_deg: f64,
    pub style: Style,
    /// Draw a wider dark pass beneath the fill for contrast.
    pub shadow: bool,
}

impl AnchoredText {
    /// Baseline start of the text in its unrotated frame, given the
    /// measured bounding box.
    pub fn baseline_origin(&self, width: f64, height: f64) -> Point {
        Point::new(
            self.anchor.x - width * self.align.horizontal,
            self.anchor.y + height * self.align.vertical,
        )
    }
}

/// Measures rendered text. Implemented by the font engine; the layout only
/// ever asks for sizes.
pub trait TextMetrics {
    /// Width and height of the text's pixel bounding box.
    fn text_size(&self, text: &str) -> (f64, f64);
}

/// Formats an angle the way every label shows it.
pub fn format_degrees(value: f64) -> String {
    format!("{value:.1}°")
}

// ============================================================================
// PRIMITIVES
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Stroked circle outline.
    Circle {
        center: Point,
        radius: f64,
        style: Style,
    },
    Line {
        from: Point,
        to: Point,
        style: Style,
    },
    /// Stroked arc. Angles in degrees clockwise from 3 o'clock; a negative
    /// sweep runs counter-clockwise.
    Arc {
        center: Point,
        radius: f64,
        start_deg: f64,
        sweep_deg: f64,
        style: Style,
    },
    FilledDisc {
        center: Point,
        radius: f64,
        style: Style,
    },
    /// Filled, possibly rotated rectangle given by its corners in order.
    Rect {
        corners: [Point; 4],
        style: Style,
    },
    Text(AnchoredText),
}

impl Primitive {
    pub fn style(&self) -> Style {
        match self {
            Primitive::Circle { style, .. }
            | Primitive::Line { style, .. }
            | Primitive::Arc { style, .. }
            | Primitive::FilledDisc { style, .. }
            | Primitive::Rect { style, .. } => *style,
            Primitive::Text(text) => text.style,
        }
    }
}

/// Ordered primitive list for one frame, bottom layer first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    primitives: Vec<Primitive>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn add_line(&mut self, from: Point, to: Point, style: Style) {
        self.add(Primitive::Line { from, to, style });
    }

    pub fn add_text(&mut self, text: AnchoredText) {
        self.add(Primitive::Text(text));
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Text primitives in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &AnchoredText> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text(text) => Some(text),
            _ => None,
        })
    }
}
