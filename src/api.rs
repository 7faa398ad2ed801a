//! # Public API
//!
//! One-call entry points for hosts that do not need to hold a [`Renderer`] themselves.
//!
//! ## Functions
//! - [`load_piece()`] - Parse a YAML piece document
//! - [`load_demo()`] - Load one of the embedded demo pieces
//! - [`render_frame()`] - Render a frame with the default configuration
//! - [`render_frame_json()`] - Same, serialized to JSON for canvas hosts
//!
//! ## Typical Usage
//!
//! ```rust
//! use keyfall::{load_demo, render_frame, Surface};
//!
//! let piece = load_demo("twinkle")?;
//! assert_eq!(piece.total_duration(), 8.0);
//!
//! let frame = render_frame(&piece, 0.2, Surface::new(1280.0, 720.0));
//! assert_eq!(frame.active_pitches, vec![48, 60]);
//! # Ok::<(), keyfall::KeyfallError>(())
//! ```

use crate::clock::Playhead;
use crate::piece::Piece;
use crate::render::{Frame, Renderer, Surface};
use crate::KeyfallError;

/// Parse a piece from YAML.
///
/// # Errors
/// Returns [`KeyfallError::PieceParse`] for malformed documents and
/// [`KeyfallError::InvalidNote`] for notes outside their domain.
pub fn load_piece(source: &str) -> Result<Piece, KeyfallError> {
    Piece::from_yaml(source)
}

/// Load an embedded demo piece by name (`"twinkle"`, `"scale"`, ...).
///
/// # Errors
/// Returns [`KeyfallError::UnknownPiece`] when no demo has that name.
pub fn load_demo(name: &str) -> Result<Piece, KeyfallError> {
    let embedded = keyfall_pieces::get_piece(name)
        .ok_or_else(|| KeyfallError::UnknownPiece(name.to_string()))?;
    Piece::from_yaml(&embedded.content)
}

/// Render the paused frame at `current_time` with the default configuration.
pub fn render_frame(piece: &Piece, current_time: f64, surface: Surface) -> Frame {
    Renderer::default().render(piece, Playhead::at(current_time), surface)
}

/// Render with the default configuration and serialize the frame to JSON.
pub fn render_frame_json(piece: &Piece, current_time: f64, surface: Surface) -> Result<String, serde_json::Error> {
    serde_json::to_string(&render_frame(piece, current_time, surface))
}
