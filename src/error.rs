//! # Error Types
//!
//! This module defines all error types for keyfall.
//!
//! Errors only arise at the edges: loading a piece, loading a render configuration and
//! looking up an embedded demo. The playback clock and the frame renderer never fail;
//! they clamp seeks, skip notes outside the keyboard and fall back to a gradient when
//! the background image is missing.
//!
//! ## Error Types
//! - `PieceParse` - The piece document is not valid YAML or has the wrong shape
//! - `InvalidNote` - A note carries values outside its domain
//! - `ConfigError` - Invalid render configuration
//! - `UnknownPiece` - No embedded demo piece with that name
//!
//! ## Usage
//! ```rust
//! use keyfall::{Piece, KeyfallError};
//!
//! match Piece::from_yaml("tracks: [") {
//!     Ok(piece) => println!("{} tracks", piece.tracks.len()),
//!     Err(e) => eprintln!("{}", e.user_message()),
//! }
//! ```

use thiserror::Error;

/// Message shown to the user whenever a piece cannot be loaded.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to parse MIDI file. Please try another file.";

#[derive(Error, Debug)]
pub enum KeyfallError {
    /// The piece document could not be deserialized.
    ///
    /// # Example
    /// ```
    /// # use keyfall::KeyfallError;
    /// let err = KeyfallError::PieceParse("tracks: invalid type".to_string());
    /// assert_eq!(err.to_string(), "Failed to parse piece: tracks: invalid type");
    /// ```
    #[error("Failed to parse piece: {0}")]
    PieceParse(String),

    /// A note is out of its domain.
    ///
    /// `index` is the 0-based position of the note inside its track.
    ///
    /// # Example
    /// ```
    /// # use keyfall::KeyfallError;
    /// let err = KeyfallError::InvalidNote {
    ///     track: "Melody".to_string(),
    ///     index: 3,
    ///     message: "duration must be positive".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid note 3 in track 'Melody': duration must be positive");
    /// ```
    #[error("Invalid note {index} in track '{track}': {message}")]
    InvalidNote {
        track: String,
        index: usize,
        message: String,
    },

    /// Invalid render configuration.
    #[error("Invalid config: {0}")]
    ConfigError(String),

    /// No embedded piece with this name.
    #[error("Unknown piece: {0}")]
    UnknownPiece(String),
}

impl KeyfallError {
    /// The single message surfaced to the user for this error.
    ///
    /// Every failure to obtain a piece collapses to the same notice; the detailed
    /// `Display` text is meant for logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            KeyfallError::PieceParse(_)
            | KeyfallError::InvalidNote { .. }
            | KeyfallError::UnknownPiece(_) => LOAD_FAILURE_MESSAGE,
            KeyfallError::ConfigError(_) => "Invalid visualizer configuration.",
        }
    }
}
