//! # Clock Module
//!
//! Maps real elapsed time onto logical piece time for the visualizer.
//!
//! ## Purpose
//! The clock owns a single value, `current_time`, in seconds from the start of the
//! piece. While playing it advances with real time; transport controls pause, resume,
//! seek and stop it; it stops on its own when it reaches the end of the piece.
//!
//! ## Sub-modules
//! - `types` - Transport states, the playhead snapshot and update outcomes
//! - `time` - The `TimeSource` trait with a monotonic and a manual implementation
//! - `engine` - The `PlaybackClock` state machine
//!
//! ## Drift Resistance
//! The clock never accumulates per-frame deltas. Each update recomputes
//!
//! ```text
//! current_time = banked_time + (now - resume_instant)
//! ```
//!
//! from two references captured at the last resume or seek, so skipped or uneven
//! frames cannot make it drift.
//!
//! ## Transport States
//! ```text
//!            play                   update reaches end
//! Stopped ---------> Playing ------------------------> Ended
//!    ^               |    ^                              |
//!    |         pause |    | play                         | play (restarts at 0)
//!    |               v    |                              |
//!    +--- stop --- Paused +------------------------------+
//! ```
//! `stop` is accepted from every state.
//!
//! ## Example
//! ```rust
//! use keyfall::clock::{ManualTime, PlaybackClock};
//!
//! let mut clock = PlaybackClock::new(ManualTime::new(), 8.0);
//! clock.play();
//! clock.time_source().advance(1.0);
//! clock.update();
//! assert_eq!(clock.current_time(), 1.0);
//!
//! clock.seek(-5.0);
//! assert_eq!(clock.current_time(), 0.0);
//! ```
//!
//! ## Related Modules
//! - `player` - Runs `update()` once per display frame and cancels pending frames
//! - `render` - Consumes the `Playhead` snapshot

mod engine;
mod time;
mod types;


pub use engine::PlaybackClock;
pub use time::{ManualTime, MonotonicTime, TimeSource};
pub use types::{FrameOutcome, PlaybackState, Playhead, Transport};
