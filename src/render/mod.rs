//! # Render Module
//!
//! Produces the waterfall frame: notes falling toward a piano keyboard, with the keys
//! of sounding notes lit up.
//!
//! ## Purpose
//! Rendering is a pure function of the piece, the playhead, the keyboard layout and the
//! surface size. It returns a [`Frame`], a list of draw operations, instead of painting
//! directly, so any host (a canvas, a terminal, a test) can replay it.
//!
//! ## Sub-modules
//! - `types` - Frame, draw commands, colors and geometry primitives
//! - `engine` - The `Renderer`, frame geometry and the visibility rule
//! - `palette` - Track palette and fixed UI colors
//! - `background` - Fill-once slot for the decorative background image
//!
//! ## Time-to-Space Mapping
//! ```text
//! pixels_per_second = fall_height / seconds_in_view
//! time_until        = note.start_time - current_time
//! bottom edge       = fall_height - time_until * pixels_per_second
//! height            = max(1, note.duration * pixels_per_second)
//! ```
//! A note is drawn while `time_until <= seconds_in_view` and its end has not passed.
//!
//! ## Layers (bottom to top)
//! 1. Background image with a dark overlay, or a gradient until the image is ready
//! 2. Notes, colored by track
//! 3. Glow band just above the keyboard
//! 4. Keyboard, white keys then black keys
//! 5. Highlights on the keys of notes sounding right now
//!
//! ## Example
//! ```rust
//! use keyfall::clock::Playhead;
//! use keyfall::render::{Layer, Renderer, Surface};
//! use keyfall::{Note, Piece, Track};
//!
//! let track = Track { name: "Lead".into(), channel: 0, notes: vec![Note::new(60, 0.0, 1.0, 0.8)] };
//! let piece = Piece::new(None, vec![track]).unwrap();
//!
//! let frame = Renderer::default().render(&piece, Playhead::at(0.5), Surface::new(1040.0, 800.0));
//! assert_eq!(frame.visible_notes, 1);
//! assert_eq!(frame.active_pitches, vec![60]);
//! assert_eq!(frame.layer(Layer::Highlights).count(), 1);
//! ```
//!
//! ## Related Modules
//! - `clock` - Supplies the `Playhead`
//! - `keyboard` - Key positions in white-key widths
//! - `config` - Window length, keyboard ratio and palette

pub mod background;
mod engine;
pub mod palette;
mod types;

#[cfg(test)]
mod tests;

pub use background::{BackgroundImage, BackgroundSlot};
pub use engine::{is_visible, FrameGeometry, Renderer};
pub use types::{Color, DrawCommand, DrawOp, Frame, GradientStop, Layer, Paint, Rect, Shadow, Surface};
