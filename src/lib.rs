pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod keyboard;
pub mod piece;
pub mod player;
pub mod render;

pub use api::*;
pub use clock::{ManualTime, MonotonicTime, PlaybackClock, Playhead, TimeSource};
pub use config::RenderConfig;
pub use error::*;
pub use keyboard::KeyboardLayout;
pub use piece::{Note, Piece, Track};
pub use player::{FrameQueue, FrameScheduler, FrameToken, Player};
pub use render::{Frame, Renderer, Surface};
