//! Playback clock state machine
//!
//! All transitions go through the methods on [`PlaybackClock`]; the timing references
//! live in a single [`PlaybackState`] value.

use super::time::TimeSource;
use super::types::{FrameOutcome, PlaybackState, Playhead, Transport};

/// Logical playback clock over a piece of known duration
///
/// Generic over its [`TimeSource`] so that tests and simulations can drive it with
/// [`ManualTime`](super::ManualTime) while real hosts use
/// [`MonotonicTime`](super::MonotonicTime).
#[derive(Debug)]
pub struct PlaybackClock<T: TimeSource> {
    time: T,
    duration: f64,
    state: PlaybackState,
}

impl<T: TimeSource> PlaybackClock<T> {
    /// Create a stopped clock for a piece lasting `duration` seconds.
    ///
    /// Negative or non-finite durations are treated as 0.
    pub fn new(time: T, duration: f64) -> Self {
        PlaybackClock {
            time,
            duration: sanitize_duration(duration),
            state: PlaybackState::default(),
        }
    }

    pub fn time_source(&self) -> &T {
        &self.time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn current_time(&self) -> f64 {
        self.state.current_time
    }

    pub fn is_playing(&self) -> bool {
        self.state.transport.is_playing()
    }

    pub fn transport(&self) -> Transport {
        self.state.transport
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn playhead(&self) -> Playhead {
        Playhead {
            current_time: self.state.current_time,
            is_playing: self.is_playing(),
        }
    }

    /// Start or resume playback.
    ///
    /// Playing from the end restarts the piece from 0. Calling `play` while already
    /// playing changes nothing.
    pub fn play(&mut self) {
        if self.is_playing() {
            return;
        }
        if self.state.current_time >= self.duration {
            self.state.current_time = 0.0;
        }
        self.state.banked_time = self.state.current_time;
        self.state.resume_instant = self.time.now();
        self.state.transport = Transport::Playing;
        log::debug!("play from {:.3}s", self.state.current_time);
    }

    /// Pause playback, keeping the position.
    ///
    /// The banked position is the logical time at the moment of the call, not the one
    /// reported by the last frame, so no elapsed time is lost. Ignored unless playing.
    pub fn pause(&mut self) {
        if !self.is_playing() {
            log::trace!("pause ignored while {:?}", self.state.transport);
            return;
        }
        let live = self.elapsed_position();
        if live >= self.duration {
            self.finish();
            return;
        }
        self.state.current_time = live.max(self.state.current_time);
        self.state.banked_time = self.state.current_time;
        self.state.transport = Transport::Paused;
        log::debug!("pause at {:.3}s", self.state.current_time);
    }

    /// Stop playback and rewind to the start.
    pub fn stop(&mut self) {
        self.state.transport = Transport::Stopped;
        self.state.current_time = 0.0;
        self.state.banked_time = 0.0;
        log::debug!("stop");
    }

    /// Jump to `target` seconds, clamped to the piece.
    ///
    /// Keeps playing if playing. Seeking away from the end after playback ended leaves
    /// the clock paused at the new position so the next `play` resumes there.
    pub fn seek(&mut self, target: f64) {
        let clamped = if target.is_nan() {
            0.0
        } else {
            target.clamp(0.0, self.duration)
        };
        self.state.current_time = clamped;
        self.state.banked_time = clamped;
        if self.is_playing() {
            self.state.resume_instant = self.time.now();
        } else if self.state.transport == Transport::Ended && clamped < self.duration {
            self.state.transport = Transport::Paused;
        }
        log::debug!("seek to {:.3}s (requested {:.3}s)", clamped, target);
    }

    /// Advance the clock for one display frame.
    ///
    /// Returns [`FrameOutcome::Continue`] when another update should be scheduled,
    /// [`FrameOutcome::Finished`] when this update reached the end and stopped
    /// playback, and [`FrameOutcome::Idle`] when the clock was not playing.
    pub fn update(&mut self) -> FrameOutcome {
        if !self.is_playing() {
            return FrameOutcome::Idle;
        }
        let position = self.elapsed_position();
        if position >= self.duration {
            self.finish();
            return FrameOutcome::Finished;
        }
        // A frame update never moves the playhead backward
        self.state.current_time = position.max(self.state.current_time);
        log::trace!("frame at {:.4}s", self.state.current_time);
        FrameOutcome::Continue
    }

    /// Replace the piece duration, as when a new piece is loaded. Forces a stop.
    pub fn load(&mut self, duration: f64) {
        self.duration = sanitize_duration(duration);
        self.stop();
        log::debug!("loaded piece of {:.3}s", self.duration);
    }

    fn elapsed_position(&self) -> f64 {
        let elapsed = (self.time.now() - self.state.resume_instant).max(0.0);
        self.state.banked_time + elapsed
    }

    fn finish(&mut self) {
        self.state.current_time = self.duration;
        self.state.banked_time = self.duration;
        self.state.transport = Transport::Ended;
        log::debug!("reached end at {:.3}s", self.duration);
    }
}

fn sanitize_duration(duration: f64) -> f64 {
    if duration.is_finite() && duration > 0.0 {
        duration
    } else {
        0.0
    }
}
