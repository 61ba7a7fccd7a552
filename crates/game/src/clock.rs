//! Frame timing.
//!
//! The loop takes wall-clock deltas between frames and clamps them to
//! `[0, max_frame_time]`. There is no fixed-tick accumulator, so results
//! depend on the frame rate beyond that clamp.

use std::time::Instant;

/// Source of timestamps in seconds.
pub trait Clock {
    fn now(&mut self) -> f64;
}

/// Wall clock measured from creation.
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&mut self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    time: f64,
}

impl ManualClock {
    pub fn new(time: f64) -> Self {
        Self { time }
    }

    pub fn set(&mut self, time: f64) {
        self.time = time;
    }

    pub fn advance(&mut self, seconds: f64) {
        self.time += seconds;
    }
}

impl Clock for ManualClock {
    fn now(&mut self) -> f64 {
        self.time
    }
}

/// A clock that advances by a fixed step every time it is read.
///
/// Used to replay input headlessly at a chosen frame rate.
#[derive(Debug, Clone)]
pub struct SteppedClock {
    time: f64,
    step: f64,
}

impl SteppedClock {
    pub fn new(step: f64) -> Self {
        Self { time: 0.0, step }
    }

    /// A clock running at `rate` frames per second.
    pub fn with_rate(rate: u32) -> Self {
        Self::new(1.0 / rate.max(1) as f64)
    }
}

impl Clock for SteppedClock {
    fn now(&mut self) -> f64 {
        let now = self.time;
        self.time += self.step;
        now
    }
}

/// Turns timestamps into clamped per-frame deltas.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    previous: f64,
    max_frame_time: f32,
}

impl FrameTimer {
    /// A negative or NaN `max_frame_time` is treated as zero.
    pub fn new(start: f64, max_frame_time: f32) -> Self {
        if max_frame_time.is_nan() || max_frame_time < 0.0 {
            log::warn!("max frame time {max_frame_time} is not usable, frames will not advance");
        }
        Self {
            previous: start,
            max_frame_time: max_frame_time.max(0.0),
        }
    }

    /// Seconds since the previous call, clamped to `[0, max_frame_time]`.
    pub fn tick(&mut self, now: f64) -> f32 {
        let elapsed = now - self.previous;
        self.previous = now;
        (elapsed as f32).max(0.0).min(self.max_frame_time)
    }
}
