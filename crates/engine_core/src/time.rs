//! Frame clock with a fixed-step accumulator.

use std::time::{Duration, Instant};

/// Longest backlog of fixed steps kept after a stall (window drag, breakpoint).
const MAX_ACCUMULATED: Duration = Duration::from_millis(250);
const FIXED_STEP: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Wall-clock frame timing. Animation that must not depend on frame rate
/// drains `should_fixed_update` once per 1/60 s step.
#[derive(Debug)]
pub struct Time {
    last_frame: Instant,
    delta: Duration,
    elapsed: Duration,
    frame_count: u64,
    accumulator: Duration,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
            accumulator: Duration::ZERO,
        }
    }

    /// Start a frame, measuring from the previous call.
    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.advance(delta);
    }

    /// Start a frame of an explicit length.
    pub fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += delta;
        self.frame_count += 1;
        self.accumulator = (self.accumulator + delta).min(MAX_ACCUMULATED);
    }

    pub fn delta(&self) -> Duration {
        self.delta
    }

    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Drop accumulated fixed-step time, e.g. while the stepped simulation is paused.
    pub fn discard_fixed_steps(&mut self) {
        self.accumulator = Duration::ZERO;
    }

    /// Consume one fixed step if enough time has accumulated.
    pub fn should_fixed_update(&mut self) -> bool {
        match self.accumulator.checked_sub(FIXED_STEP) {
            Some(rest) => {
                self.accumulator = rest;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(time: &mut Time) -> u32 {
        let mut steps = 0;
        while time.should_fixed_update() {
            steps += 1;
        }
        steps
    }

    #[test]
    fn advance_accumulates_elapsed() {
        let mut time = Time::new();
        time.advance(Duration::from_millis(100));
        time.advance(Duration::from_millis(150));
        assert!((time.elapsed_seconds() - 0.25).abs() < 1e-6);
        assert!((time.delta_seconds() - 0.15).abs() < 1e-6);
        assert_eq!(time.frame_count(), 2);
    }

    #[test]
    fn fixed_steps_independent_of_frame_rate() {
        let mut fast = Time::new();
        let mut slow = Time::new();
        let mut fast_steps = 0;
        let mut slow_steps = 0;
        // One second at 120 Hz vs. 30 Hz frames, both at a 60 Hz fixed rate.
        for _ in 0..120 {
            fast.advance(Duration::from_secs_f64(1.0 / 120.0));
            fast_steps += drain(&mut fast);
        }
        for _ in 0..30 {
            slow.advance(Duration::from_secs_f64(1.0 / 30.0));
            slow_steps += drain(&mut slow);
        }
        assert!((fast_steps as i32 - 60).abs() <= 1);
        assert!((slow_steps as i32 - 60).abs() <= 1);
    }

    #[test]
    fn discarded_steps_do_not_burst_later() {
        let mut time = Time::new();
        for _ in 0..300 {
            time.advance(Duration::from_millis(16));
            time.discard_fixed_steps();
        }
        time.advance(Duration::from_millis(16));
        assert!(drain(&mut time) <= 1);
    }

    #[test]
    fn stall_backlog_is_capped() {
        let mut time = Time::new();
        time.advance(Duration::from_secs(5));
        let steps = drain(&mut time);
        assert!(steps <= 15, "backlog should be capped, got {steps}");
    }
}
