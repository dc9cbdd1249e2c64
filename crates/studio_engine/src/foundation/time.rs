//! Time management utilities
//!
//! The studio never reads a wall clock directly. Everything time-dependent
//! takes `now` in seconds since session start, sampled once per frame from a
//! [`Clock`]. Tests drive a [`ManualClock`] instead of sleeping.

use std::cell::Cell;
use std::time::Instant;

/// Monotonic time source measured in seconds since the clock was created
pub trait Clock {
    /// Seconds elapsed since session start
    fn now(&self) -> f64;
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Start a clock at zero
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-driven clock for tests and scripted sessions
#[derive(Debug, Default)]
pub struct ManualClock {
    seconds: Cell<f64>,
}

impl ManualClock {
    /// Create a clock reading `start` seconds
    pub fn starting_at(start: f64) -> Self {
        Self { seconds: Cell::new(start) }
    }

    /// Jump to an absolute time
    pub fn set(&self, seconds: f64) {
        self.seconds.set(seconds);
    }

    /// Move forward by `delta` seconds
    pub fn advance(&self, delta: f64) {
        self.seconds.set(self.seconds.get() + delta);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.seconds.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> f64 {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> f64 {
        (**self).now()
    }
}

/// Frame timer fed from clock samples
///
/// The first `tick` establishes the baseline and reports a zero delta.
#[derive(Debug, Clone, Default)]
pub struct Timer {
    last_frame: Option<f64>,
    delta_time: f32,
    total_time: f64,
    frame_count: u64,
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame boundary at `now` (call once per frame)
    pub fn tick(&mut self, now: f64) -> f32 {
        #[allow(clippy::cast_possible_truncation)]
        let delta = self.last_frame.map_or(0.0, |last| (now - last).max(0.0) as f32);
        self.delta_time = delta;
        self.total_time = now;
        self.last_frame = Some(now);
        self.frame_count += 1;
        delta
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the clock reading of the latest frame
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the current FPS (based on last frame time)
    pub fn current_fps(&self) -> f32 {
        if self.delta_time > 0.0 {
            1.0 / self.delta_time
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_tick_has_zero_delta() {
        let mut timer = Timer::new();
        assert_eq!(timer.tick(3.0), 0.0);
        assert_eq!(timer.frame_count(), 1);
    }

    #[test]
    fn test_delta_between_ticks() {
        let clock = ManualClock::starting_at(1.0);
        let mut timer = Timer::new();
        timer.tick(clock.now());
        clock.advance(0.25);
        let dt = timer.tick(clock.now());
        assert_relative_eq!(dt, 0.25, epsilon = 1e-6);
        assert_relative_eq!(timer.current_fps(), 4.0, epsilon = 1e-4);
        assert_relative_eq!(timer.total_time(), 1.25, epsilon = 1e-9);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
