//! Time sources for the playback clock

use std::cell::Cell;
use std::time::Instant;

/// A monotonic source of real time, in seconds from an arbitrary origin
pub trait TimeSource {
    fn now(&self) -> f64;
}

/// Wall-clock time backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        MonotonicTime {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Time that only moves when told to
///
/// Used for simulated playback and by hosts that receive their own frame timestamps
/// (a browser's `performance.now()`). Readings never go backward: `set` ignores earlier
/// values.
#[derive(Debug, Default)]
pub struct ManualTime {
    now: Cell<f64>,
}

impl ManualTime {
    pub fn new() -> Self {
        Self::starting_at(0.0)
    }

    pub fn starting_at(seconds: f64) -> Self {
        ManualTime {
            now: Cell::new(seconds),
        }
    }

    pub fn advance(&self, seconds: f64) {
        if seconds > 0.0 {
            self.now.set(self.now.get() + seconds);
        }
    }

    pub fn set(&self, seconds: f64) {
        if seconds > self.now.get() {
            self.now.set(seconds);
        }
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> f64 {
        (**self).now()
    }
}
