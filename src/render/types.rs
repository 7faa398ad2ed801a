//! Draw command type definitions
//!
//! A rendered [`Frame`] is a flat list of [`DrawOp`]s in painting order. Every op names
//! the [`Layer`] it belongs to, so hosts can skip or restyle whole layers. Colors
//! serialize as CSS color strings and commands are tagged by `op`, which makes a frame
//! directly replayable on an HTML canvas.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An sRGB color with straight alpha
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Color { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Color { a, ..self }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        match digits.len() {
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok().map(|v| v * 17);
                Some(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)? as f32 / 255.0)),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for String {
    fn from(color: Color) -> String {
        color.to_string()
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(value.trim()).ok_or_else(|| format!("'{}' is not a hex color", value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect { x, y, width, height }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

/// How a rectangle is filled
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Paint {
    Solid { color: Color },
    /// Linear gradient running from `top` to `bottom` (surface y coordinates)
    #[serde(rename_all = "camelCase")]
    VerticalGradient {
        top: f64,
        bottom: f64,
        stops: Vec<GradientStop>,
    },
}

impl Paint {
    pub fn solid(color: Color) -> Self {
        Paint::Solid { color }
    }

    pub fn vertical(top: f64, bottom: f64, from: Color, to: Color) -> Self {
        Paint::VerticalGradient {
            top,
            bottom,
            stops: vec![
                GradientStop { offset: 0.0, color: from },
                GradientStop { offset: 1.0, color: to },
            ],
        }
    }
}

/// Soft glow drawn around a filled shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Shadow {
    pub color: Color,
    pub blur: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCommand {
    /// Clear the whole surface
    Clear { width: f64, height: f64 },
    /// Draw the cached background image stretched over `rect`
    Image { source: String, rect: Rect },
    #[serde(rename_all = "camelCase")]
    FillRect {
        rect: Rect,
        paint: Paint,
        /// Global opacity applied on top of the paint's own alpha
        alpha: f32,
        #[serde(skip_serializing_if = "Option::is_none")]
        shadow: Option<Shadow>,
    },
    #[serde(rename_all = "camelCase")]
    StrokeRect {
        rect: Rect,
        color: Color,
        line_width: f64,
    },
}

/// Painting layers, bottom to top
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Layer {
    Background,
    Notes,
    Glow,
    Keyboard,
    Highlights,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawOp {
    pub layer: Layer,
    #[serde(flatten)]
    pub command: DrawCommand,
}

/// Size of the drawing surface in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

impl Surface {
    pub fn new(width: f64, height: f64) -> Self {
        Surface { width, height }
    }

    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// One rendered frame
///
/// # Fields
/// - `surface`: Dimensions the frame was laid out for
/// - `current_time` / `is_playing`: The playhead it was rendered at
/// - `ops`: Draw operations in painting order
/// - `visible_notes`: Number of note rectangles drawn
/// - `active_pitches`: Sorted, de-duplicated pitches highlighted on the keyboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub surface: Surface,
    pub current_time: f64,
    pub is_playing: bool,
    pub ops: Vec<DrawOp>,
    pub visible_notes: usize,
    pub active_pitches: Vec<u8>,
}

impl Frame {
    /// Draw operations of a single layer, in order.
    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &DrawCommand> {
        self.ops
            .iter()
            .filter(move |op| op.layer == layer)
            .map(|op| &op.command)
    }
}
