//! Core value types shared by every pipeline stage.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in the document's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

/// A 2D point or offset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Per-side padding values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Padding {
    pub fn uniform(value: f64) -> Self {
        Self { left: value, right: value, top: value, bottom: value }
    }

    pub fn is_uniform(&self) -> bool {
        self.left == self.right && self.left == self.top && self.left == self.bottom
    }
}

/// An RGBA color with components in [0, 1], matching the export format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "default_alpha")]
    pub a: f64,
}

fn default_alpha() -> f64 {
    1.0
}

/// Largest possible Euclidean distance between two colors in 8-bit RGB space.
pub const MAX_RGB_DISTANCE: f64 = 441.6729559300637;

impl Color {
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Create from 8-bit RGB values.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Parse a hex string such as `#FF5733`, `FF5733`, or `#FF5733CC`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Self::from_rgb8(r, g, b))
        } else if hex.len() == 8 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
            Some(Self::rgba(
                r as f64 / 255.0,
                g as f64 / 255.0,
                b as f64 / 255.0,
                a as f64 / 255.0,
            ))
        } else {
            None
        }
    }

    /// Convert to an 8-bit RGBA tuple.
    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        (
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.a.clamp(0.0, 1.0) * 255.0).round() as u8,
        )
    }

    /// Lowercase `#rrggbb` form, ignoring alpha.
    pub fn to_hex(&self) -> String {
        let (r, g, b, _) = self.to_rgba8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// CSS color literal: hex when opaque, `rgba(...)` otherwise.
    pub fn to_css(&self) -> String {
        let (r, g, b, _) = self.to_rgba8();
        if self.a >= 1.0 {
            self.to_hex()
        } else {
            format!("rgba({}, {}, {}, {})", r, g, b, format_scalar(self.a))
        }
    }

    /// Euclidean distance to another color in 8-bit RGB space.
    ///
    /// Alpha is excluded; callers compare opacity separately.
    pub fn rgb_distance(&self, other: &Color) -> f64 {
        let (r1, g1, b1, _) = self.to_rgba8();
        let (r2, g2, b2, _) = other.to_rgba8();
        let dr = r1 as f64 - r2 as f64;
        let dg = g1 as f64 - g2 as f64;
        let db = b1 as f64 - b2 as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

/// Format a scalar without a trailing `.0`, matching hand-written CSS.
pub fn format_scalar(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let s = format!("{:.4}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Layer blend modes as exported by the design tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlendMode {
    #[default]
    Normal,
    PassThrough,
    Darken,
    Multiply,
    LinearBurn,
    ColorBurn,
    Lighten,
    Screen,
    LinearDodge,
    ColorDodge,
    Overlay,
    SoftLight,
    HardLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl BlendMode {
    /// The exact `mix-blend-mode` value, when CSS has one.
    pub fn to_css(&self) -> Option<&'static str> {
        match self {
            Self::Normal | Self::PassThrough => Some("normal"),
            Self::Darken => Some("darken"),
            Self::Multiply => Some("multiply"),
            Self::ColorBurn => Some("color-burn"),
            Self::Lighten => Some("lighten"),
            Self::Screen => Some("screen"),
            Self::ColorDodge => Some("color-dodge"),
            Self::Overlay => Some("overlay"),
            Self::SoftLight => Some("soft-light"),
            Self::HardLight => Some("hard-light"),
            Self::Difference => Some("difference"),
            Self::Exclusion => Some("exclusion"),
            Self::Hue => Some("hue"),
            Self::Saturation => Some("saturation"),
            Self::Color => Some("color"),
            Self::Luminosity => Some("luminosity"),
            // Linear burn/dodge have no CSS equivalent.
            Self::LinearBurn | Self::LinearDodge => None,
        }
    }

    /// Nearest CSS value for modes without an exact equivalent.
    pub fn css_fallback(&self) -> &'static str {
        match self {
            Self::LinearBurn => "multiply",
            Self::LinearDodge => "screen",
            other => other.to_css().unwrap_or("normal"),
        }
    }

    /// Whether a blended layer needs an isolated stacking context.
    pub fn needs_isolation(&self) -> bool {
        !matches!(self, Self::Normal | Self::PassThrough)
    }
}

/// A single paint layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Paint {
    Solid { color: Color, opacity: f64 },
    Gradient(Gradient),
    Image { image_ref: String, scale_mode: ImageScaleMode },
}

impl Paint {
    /// The flat color of a solid layer, if this is one.
    pub fn as_solid(&self) -> Option<&Color> {
        match self {
            Self::Solid { color, .. } => Some(color),
            _ => None,
        }
    }
}

/// A gradient paint with its placement transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub kind: GradientKind,
    pub stops: Vec<GradientStop>,
    /// 2x3 affine transform mapping the unit gradient space into the node.
    pub transform: Option<[[f64; 3]; 2]>,
    /// Reference to a shared gradient style, when the layer aliases one.
    pub style_ref: Option<String>,
}

/// Gradient shape family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientKind {
    Linear,
    Radial,
    Angular,
    Diamond,
}

/// A single gradient color stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub position: f64,
    pub color: Color,
}

/// Scale mode for image paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageScaleMode {
    #[default]
    Fill,
    Fit,
    Crop,
    Tile,
}

/// A stroke layer: a paint plus weight and alignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeLayer {
    pub paint: Paint,
    pub weight: f64,
    pub align: StrokeAlign,
}

/// Stroke alignment relative to the node boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeAlign {
    #[default]
    Inside,
    Center,
    Outside,
}

/// A visual effect attached to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub radius: f64,
    pub color: Option<Color>,
    pub offset: Option<Point>,
    pub spread: Option<f64>,
}

/// Effect family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    DropShadow,
    InnerShadow,
    LayerBlur,
    BackgroundBlur,
}

/// Typography captured from a text node.
///
/// Every field the export omits stays `None`; absence is not an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Typography {
    pub family: Option<String>,
    pub size: Option<f64>,
    pub weight: Option<u16>,
    pub line_height: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub align: Option<TextAlign>,
    pub italic: bool,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justified,
}

impl TextAlign {
    pub fn to_css(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justified => "justify",
        }
    }
}

/// Corner radii, uniform or per-corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CornerRadius {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

impl CornerRadius {
    pub fn uniform(radius: f64) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    pub fn is_uniform(&self) -> bool {
        self.top_left == self.top_right
            && self.top_left == self.bottom_right
            && self.top_left == self.bottom_left
    }

    /// CSS `border-radius` value, collapsed when uniform.
    pub fn to_css(&self) -> String {
        if self.is_uniform() {
            format!("{}px", format_scalar(self.top_left))
        } else {
            format!(
                "{}px {}px {}px {}px",
                format_scalar(self.top_left),
                format_scalar(self.top_right),
                format_scalar(self.bottom_right),
                format_scalar(self.bottom_left)
            )
        }
    }
}
