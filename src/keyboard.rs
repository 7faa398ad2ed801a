//! Static 88-key piano layout.
//!
//! Positions are measured in white-key widths from the left edge of the keyboard.
//! White keys occupy consecutive integer slots; a black key sits 0.3 of a white key to
//! the left of the slot the next white key will take, so it straddles the boundary
//! between its two white neighbours.

use std::sync::LazyLock;

use serde::Serialize;

/// Lowest key on a standard piano (A0)
pub const LOWEST_PITCH: u8 = 21;
/// Highest key on a standard piano (C8)
pub const HIGHEST_PITCH: u8 = 108;

const BLACK_KEY_SHIFT: f64 = 0.3;

static PIANO: LazyLock<KeyboardLayout> = LazyLock::new(KeyboardLayout::build);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyColor {
    White,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeyInfo {
    pub pitch: u8,
    pub color: KeyColor,
    pub slot: f64,
}

/// Pitch classes of the black keys (C#, D#, F#, G#, A#)
pub fn is_black(pitch: u8) -> bool {
    matches!(pitch % 12, 1 | 3 | 6 | 8 | 10)
}

#[derive(Debug, Clone)]
pub struct KeyboardLayout {
    keys: Vec<KeyInfo>,
    white_count: usize,
}

impl KeyboardLayout {
    /// The shared 88-key layout, built on first use.
    pub fn piano() -> &'static KeyboardLayout {
        &PIANO
    }

    fn build() -> Self {
        let mut keys = Vec::with_capacity((HIGHEST_PITCH - LOWEST_PITCH + 1) as usize);
        let mut white_index = 0usize;
        for pitch in LOWEST_PITCH..=HIGHEST_PITCH {
            if is_black(pitch) {
                keys.push(KeyInfo {
                    pitch,
                    color: KeyColor::Black,
                    slot: white_index as f64 - BLACK_KEY_SHIFT,
                });
            } else {
                keys.push(KeyInfo {
                    pitch,
                    color: KeyColor::White,
                    slot: white_index as f64,
                });
                white_index += 1;
            }
        }
        KeyboardLayout {
            keys,
            white_count: white_index,
        }
    }

    /// Layout entry for `pitch`, or `None` outside A0-C8.
    pub fn key(&self, pitch: u8) -> Option<&KeyInfo> {
        if pitch < LOWEST_PITCH {
            return None;
        }
        self.keys.get((pitch - LOWEST_PITCH) as usize)
    }

    pub fn keys(&self) -> &[KeyInfo] {
        &self.keys
    }

    pub fn white_keys(&self) -> impl Iterator<Item = &KeyInfo> {
        self.keys.iter().filter(|k| k.color == KeyColor::White)
    }

    pub fn black_keys(&self) -> impl Iterator<Item = &KeyInfo> {
        self.keys.iter().filter(|k| k.color == KeyColor::Black)
    }

    pub fn white_count(&self) -> usize {
        self.white_count
    }
}
