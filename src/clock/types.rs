//! Clock state type definitions

use serde::Serialize;

/// Transport state of the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// At the start, not playing
    Stopped,
    /// Advancing with real time
    Playing,
    /// Holding a position, not playing
    Paused,
    /// Reached the end of the piece on its own; `current_time` equals the duration
    Ended,
}

impl Transport {
    pub fn is_playing(self) -> bool {
        self == Transport::Playing
    }
}

/// Result of one per-frame clock update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Still playing; another update should be scheduled
    Continue,
    /// This update reached the end of the piece and stopped playback
    Finished,
    /// The clock was not playing; nothing changed
    Idle,
}

/// Read-only snapshot of the clock handed to the renderer each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Playhead {
    pub current_time: f64,
    pub is_playing: bool,
}

impl Playhead {
    /// A paused playhead at `current_time`, handy for scrubbing and tests.
    pub fn at(current_time: f64) -> Self {
        Playhead {
            current_time,
            is_playing: false,
        }
    }
}

/// Mutable timing references owned by the clock
///
/// # Fields
/// - `transport`: Current transport state
/// - `current_time`: Logical time last reported, in `[0, duration]`
/// - `resume_instant`: Time-source reading at the last resume (or seek while playing)
/// - `banked_time`: Logical time at `resume_instant`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    pub transport: Transport,
    pub current_time: f64,
    pub resume_instant: f64,
    pub banked_time: f64,
}

impl Default for PlaybackState {
    fn default() -> Self {
        PlaybackState {
            transport: Transport::Stopped,
            current_time: 0.0,
            resume_instant: 0.0,
            banked_time: 0.0,
        }
    }
}
