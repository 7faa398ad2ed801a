//! # Frame Driver
//!
//! The thin loop that runs the playback clock once per display refresh.
//!
//! ## Purpose
//! A host delivers refresh signals; the [`Player`] turns them into clock updates while
//! playback is running and stops asking for frames as soon as it is not. Pending frames
//! are tracked by an explicit [`FrameToken`]: pausing, stopping or loading a new piece
//! cancels the token, and a token that is no longer pending is ignored when it fires.
//!
//! ## Example
//! ```rust
//! use keyfall::clock::{FrameOutcome, ManualTime};
//! use keyfall::player::{FrameQueue, Player};
//!
//! let mut player = Player::new(ManualTime::new(), FrameQueue::new(), 2.0);
//! player.play();
//! player.clock().time_source().advance(0.5);
//!
//! for token in player.scheduler_mut().drain() {
//!     assert_eq!(player.on_frame(token), FrameOutcome::Continue);
//! }
//! assert_eq!(player.clock().current_time(), 0.5);
//! ```

use crate::clock::{FrameOutcome, PlaybackClock, TimeSource};

/// Handle to one requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameToken(u64);

/// Source of display refresh callbacks
pub trait FrameScheduler {
    /// Ask for a callback on the next refresh.
    fn request_frame(&mut self) -> FrameToken;
    /// Withdraw a request. Cancelling a token that already fired is a no-op.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// In-memory scheduler: requests queue up until the host drains them on refresh
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    requested: Vec<FrameToken>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every frame request made since the last refresh.
    pub fn drain(&mut self) -> Vec<FrameToken> {
        std::mem::take(&mut self.requested)
    }

    pub fn pending(&self) -> usize {
        self.requested.len()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameToken {
        let token = FrameToken(self.next_id);
        self.next_id += 1;
        self.requested.push(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.requested.retain(|t| *t != token);
    }
}

/// Playback clock plus the frame loop that drives it
#[derive(Debug)]
pub struct Player<T: TimeSource, S: FrameScheduler> {
    clock: PlaybackClock<T>,
    scheduler: S,
    pending: Option<FrameToken>,
}

impl<T: TimeSource, S: FrameScheduler> Player<T, S> {
    pub fn new(time: T, scheduler: S, duration: f64) -> Self {
        Player {
            clock: PlaybackClock::new(time, duration),
            scheduler,
            pending: None,
        }
    }

    pub fn clock(&self) -> &PlaybackClock<T> {
        &self.clock
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// The frame currently awaited, if any.
    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.pending
    }

    pub fn play(&mut self) {
        self.clock.play();
        if self.clock.is_playing() && self.pending.is_none() {
            self.pending = Some(self.scheduler.request_frame());
        }
    }

    pub fn pause(&mut self) {
        self.clock.pause();
        self.cancel_pending();
    }

    pub fn stop(&mut self) {
        self.clock.stop();
        self.cancel_pending();
    }

    pub fn seek(&mut self, target: f64) {
        self.clock.seek(target);
    }

    /// Switch to a new piece of `duration` seconds. Playback stops.
    pub fn load(&mut self, duration: f64) {
        self.clock.load(duration);
        self.cancel_pending();
    }

    /// Handle a refresh callback for `token`.
    ///
    /// Tokens other than the pending one are stale and ignored (`Idle`). Otherwise the
    /// clock advances and, if it is still playing, the next frame is requested.
    pub fn on_frame(&mut self, token: FrameToken) -> FrameOutcome {
        if self.pending != Some(token) {
            log::trace!("ignoring stale frame {:?}", token);
            return FrameOutcome::Idle;
        }
        self.pending = None;
        let outcome = self.clock.update();
        if outcome == FrameOutcome::Continue {
            self.pending = Some(self.scheduler.request_frame());
        }
        outcome
    }

    fn cancel_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            self.scheduler.cancel_frame(token);
        }
    }
}

impl<T: TimeSource, S: FrameScheduler> Drop for Player<T, S> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
