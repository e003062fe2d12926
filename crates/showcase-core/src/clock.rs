//! Time sources and frame scheduling.

use instant::Instant;
use std::cell::Cell;
use std::time::Duration;

/// Monotonic time since an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock backed by `instant`, which maps to `performance.now()` on wasm.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to.
#[derive(Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new(start: Duration) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, t: Duration) {
        self.now.set(t);
    }

    pub fn advance(&self, dt: Duration) {
        self.now.set(self.now.get() + dt);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Decides when the next frame runs. Returning `None` stops the loop.
pub trait FrameScheduler {
    fn next_frame(&mut self) -> Option<Duration>;
}

/// Deterministic scheduler: ticks a [`ManualClock`] forward by a fixed
/// interval for a fixed number of frames.
pub struct FixedRateScheduler<'c> {
    clock: &'c ManualClock,
    interval: Duration,
    remaining: u64,
}

impl<'c> FixedRateScheduler<'c> {
    pub fn new(clock: &'c ManualClock, interval: Duration, frames: u64) -> Self {
        Self {
            clock,
            interval,
            remaining: frames,
        }
    }
}

impl FrameScheduler for FixedRateScheduler<'_> {
    fn next_frame(&mut self) -> Option<Duration> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.clock.advance(self.interval);
        Some(self.clock.now())
    }
}
