//! Fixed colors used by the renderer

use super::types::Color;

/// Per-track note colors, assigned by `track_index % TRACK_COLORS.len()`
pub const TRACK_COLORS: [Color; 8] = [
    Color::rgb(0xf0, 0xab, 0xfc), // fuchsia
    Color::rgb(0xa7, 0x8b, 0xfa), // violet
    Color::rgb(0x7d, 0xd3, 0xfc), // sky
    Color::rgb(0x67, 0xe8, 0xf9), // cyan
    Color::rgb(0x5e, 0xea, 0xd4), // teal
    Color::rgb(0x86, 0xef, 0xac), // green
    Color::rgb(0xfd, 0xe0, 0x47), // yellow
    Color::rgb(0xfd, 0xa4, 0xaf), // rose
];

pub const BACKGROUND_TOP: Color = Color::rgb(0x1e, 0x29, 0x3b);
pub const BACKGROUND_BOTTOM: Color = Color::rgb(0x0f, 0x17, 0x2a);
/// Darkens the background image so notes stay readable
pub const BACKGROUND_OVERLAY: Color = Color::rgba(18, 18, 27, 0.7);

pub const GLOW: Color = Color::rgb(217, 70, 239);
pub const GLOW_PEAK_ALPHA: f32 = 0.4;

pub const WHITE_KEY: Color = Color::WHITE;
pub const WHITE_KEY_OUTLINE: Color = Color::rgb(0x94, 0xa3, 0xb8);
pub const BLACK_KEY: Color = Color::rgb(0x1e, 0x29, 0x3b);
