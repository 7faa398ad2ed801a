//! # Piece Types
//!
//! The note dataset the visualizer plays: a [`Piece`] made of [`Track`]s made of
//! [`Note`]s. A piece is immutable once built; its total duration is computed from the
//! notes, never read from the source, so every note ends at or before it.
//!
//! ## Source Format
//! Pieces are loaded from YAML. Note names are optional and derived from the pitch
//! when absent:
//!
//! ```rust
//! use keyfall::Piece;
//!
//! let source = r#"
//! title: Two Notes
//! tracks:
//!   - name: Melody
//!     channel: 0
//!     notes:
//!       - { pitch: 60, time: 0.0, duration: 0.5, velocity: 0.8 }
//!       - { pitch: 67, name: G4, time: 0.5, duration: 1.0, velocity: 0.8 }
//! "#;
//!
//! let piece = Piece::from_yaml(source).unwrap();
//! assert_eq!(piece.total_duration(), 1.5);
//! assert_eq!(piece.tracks[0].notes[0].name, "C4");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::KeyfallError;
use crate::keyboard::KeyboardLayout;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Scientific pitch name for a MIDI pitch (60 = "C4")
pub fn pitch_name(pitch: u8) -> String {
    let octave = pitch as i16 / 12 - 1;
    format!("{}{}", NOTE_NAMES[pitch as usize % 12], octave)
}

/// A single sounding note
///
/// # Fields
/// - `pitch`: MIDI pitch number (0-127)
/// - `start_time`: Seconds from the start of the piece
/// - `duration`: Seconds, always positive
/// - `velocity`: Loudness in [0, 1]
/// - `name`: Short display label such as "C4"
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub pitch: u8,
    pub start_time: f64,
    pub duration: f64,
    pub velocity: f64,
    pub name: String,
}

impl Note {
    pub fn new(pitch: u8, start_time: f64, duration: f64, velocity: f64) -> Self {
        Note {
            pitch,
            start_time,
            duration,
            velocity,
            name: pitch_name(pitch),
        }
    }

    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Whether the note sounds at `time`: start inclusive, end exclusive.
    pub fn is_active_at(&self, time: f64) -> bool {
        time >= self.start_time && time < self.end_time()
    }

    fn check(&self) -> Result<(), String> {
        if self.pitch > 127 {
            return Err(format!("pitch {} is outside 0-127", self.pitch));
        }
        if !self.start_time.is_finite() || self.start_time < 0.0 {
            return Err(format!("start time {} must be a non-negative number", self.start_time));
        }
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(format!("duration {} must be positive", self.duration));
        }
        if !(0.0..=1.0).contains(&self.velocity) {
            return Err(format!("velocity {} is outside 0-1", self.velocity));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub name: String,
    pub channel: u8,
    pub notes: Vec<Note>,
}

/// A loaded piece: every track plus the derived total duration
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub tracks: Vec<Track>,
    total_duration: f64,
}

impl Piece {
    /// Build a piece, validating every note.
    pub fn new(title: Option<String>, tracks: Vec<Track>) -> Result<Self, KeyfallError> {
        for track in &tracks {
            for (index, note) in track.notes.iter().enumerate() {
                note.check().map_err(|message| KeyfallError::InvalidNote {
                    track: track.name.clone(),
                    index,
                    message,
                })?;
            }
        }

        let total_duration = tracks
            .iter()
            .flat_map(|track| track.notes.iter())
            .fold(0.0_f64, |max, note| max.max(note.end_time()));

        let layout = KeyboardLayout::piano();
        let off_keyboard = tracks
            .iter()
            .flat_map(|track| track.notes.iter())
            .filter(|note| layout.key(note.pitch).is_none())
            .count();
        if off_keyboard > 0 {
            log::warn!("{} notes fall outside the keyboard range and will not be drawn", off_keyboard);
        }

        Ok(Piece {
            title,
            tracks,
            total_duration,
        })
    }

    /// Parse a piece from a YAML document.
    pub fn from_yaml(source: &str) -> Result<Self, KeyfallError> {
        let raw: RawPiece =
            serde_yaml::from_str(source).map_err(|e| KeyfallError::PieceParse(e.to_string()))?;
        let tracks = raw
            .tracks
            .into_iter()
            .map(|track| Track {
                name: track.name,
                channel: track.channel,
                notes: track.notes.into_iter().map(RawNote::into_note).collect(),
            })
            .collect();
        let piece = Piece::new(raw.title, tracks)?;
        log::debug!(
            "loaded piece {:?}: {} tracks, {} notes, {:.3}s",
            piece.title,
            piece.tracks.len(),
            piece.note_count(),
            piece.total_duration
        );
        Ok(piece)
    }

    /// Latest note end in seconds, 0 for an empty piece
    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    pub fn note_count(&self) -> usize {
        self.tracks.iter().map(|track| track.notes.len()).sum()
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPiece {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    tracks: Vec<RawTrack>,
}

#[derive(Deserialize)]
struct RawTrack {
    name: String,
    #[serde(default)]
    channel: u8,
    #[serde(default)]
    notes: Vec<RawNote>,
}

#[derive(Deserialize)]
struct RawNote {
    pitch: u8,
    #[serde(alias = "start-time", alias = "start_time")]
    time: f64,
    duration: f64,
    #[serde(default = "default_velocity")]
    velocity: f64,
    #[serde(default)]
    name: Option<String>,
}

fn default_velocity() -> f64 {
    0.8
}

impl RawNote {
    fn into_note(self) -> Note {
        Note {
            name: self.name.unwrap_or_else(|| pitch_name(self.pitch)),
            pitch: self.pitch,
            start_time: self.time,
            duration: self.duration,
            velocity: self.velocity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(notes: Vec<Note>) -> Track {
        Track {
            name: "Test".to_string(),
            channel: 0,
            notes,
        }
    }

    #[test]
    fn test_pitch_names() {
        assert_eq!(pitch_name(60), "C4");
        assert_eq!(pitch_name(61), "C#4");
        assert_eq!(pitch_name(21), "A0");
        assert_eq!(pitch_name(108), "C8");
        assert_eq!(pitch_name(0), "C-1");
    }

    #[test]
    fn test_total_duration_is_latest_note_end() {
        let piece = Piece::new(
            None,
            vec![
                track(vec![Note::new(60, 0.0, 0.4, 0.8), Note::new(62, 7.0, 0.9, 0.8)]),
                track(vec![Note::new(48, 7.0, 1.0, 0.6)]),
            ],
        )
        .unwrap();
        assert_eq!(piece.total_duration(), 8.0);
        assert_eq!(piece.note_count(), 3);
    }

    #[test]
    fn test_empty_piece_has_zero_duration() {
        let piece = Piece::new(None, vec![]).unwrap();
        assert_eq!(piece.total_duration(), 0.0);

        let piece = Piece::new(None, vec![track(vec![])]).unwrap();
        assert_eq!(piece.total_duration(), 0.0);
    }

    #[test]
    fn test_rejects_non_positive_duration() {
        let result = Piece::new(None, vec![track(vec![Note::new(60, 0.0, 0.0, 0.5)])]);
        match result {
            Err(KeyfallError::InvalidNote { index, .. }) => assert_eq!(index, 0),
            other => panic!("expected InvalidNote, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_negative_start_and_bad_velocity() {
        assert!(Piece::new(None, vec![track(vec![Note::new(60, -1.0, 1.0, 0.5)])]).is_err());
        assert!(Piece::new(None, vec![track(vec![Note::new(60, 0.0, 1.0, 1.5)])]).is_err());
        assert!(Piece::new(None, vec![track(vec![Note::new(128, 0.0, 1.0, 0.5)])]).is_err());
    }

    #[test]
    fn test_pitch_outside_keyboard_is_accepted() {
        // Drawn nowhere, but still part of the piece and its duration
        let piece = Piece::new(None, vec![track(vec![Note::new(10, 0.0, 2.0, 0.5)])]).unwrap();
        assert_eq!(piece.total_duration(), 2.0);
    }

    #[test]
    fn test_from_yaml() {
        let source = r#"
title: Sample
tracks:
  - name: Melody
    channel: 2
    notes:
      - { pitch: 64, time: 1.0, duration: 0.5 }
      - { pitch: 65, name: F4, time: 1.5, duration: 0.5, velocity: 0.3 }
"#;
        let result = Piece::from_yaml(source);
        assert!(result.is_ok());
        let piece = result.unwrap();

        assert_eq!(piece.title.as_deref(), Some("Sample"));
        assert_eq!(piece.tracks[0].channel, 2);
        assert_eq!(piece.tracks[0].notes[0].name, "E4");
        assert_eq!(piece.tracks[0].notes[0].velocity, 0.8);
        assert_eq!(piece.tracks[0].notes[1].velocity, 0.3);
        assert_eq!(piece.total_duration(), 2.0);
    }

    #[test]
    fn test_from_yaml_rejects_garbage() {
        let result = Piece::from_yaml("tracks: 12");
        assert!(matches!(result, Err(KeyfallError::PieceParse(_))));

        let result = Piece::from_yaml("bogus: true");
        assert!(matches!(result, Err(KeyfallError::PieceParse(_))));
    }

    #[test]
    fn test_active_window_is_half_open() {
        let note = Note::new(60, 5.0, 0.5, 0.8);
        assert!(!note.is_active_at(4.99));
        assert!(note.is_active_at(5.0));
        assert!(note.is_active_at(5.25));
        assert!(!note.is_active_at(5.5));
    }
}
