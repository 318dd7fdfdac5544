// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stratum Progress: frame-driven animation progress tracking.
//!
//! A [`ProgressTracker`] converts wall-clock frame timestamps into
//! fractional iteration and progress values for a repeating animation.
//! It knows nothing about styling; the animation layer in `stratum_style`
//! owns one tracker per transition or keyframe animation.
//!
//! Timestamps and durations are in microseconds throughout.
//!
//! ## Quick Start
//!
//! ```rust
//! use stratum_progress::{ProgressTracker, State};
//!
//! let mut tracker = ProgressTracker::new();
//! tracker.start(1_000_000, 0, 1.0);
//!
//! // The first frame only establishes the clock baseline.
//! tracker.advance_frame(10_000_000);
//! assert_eq!(tracker.get_progress(false), 0.0);
//!
//! tracker.advance_frame(10_500_000);
//! assert_eq!(tracker.get_state(), State::During);
//! assert_eq!(tracker.get_progress(false), 0.5);
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and does not allocate.

#![no_std]

/// Where a tracker currently is relative to its active interval.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum State {
    /// Started but still inside the delay.
    Before,
    /// Inside the active interval.
    During,
    /// Past the end, or not running at all.
    After,
}

/// Converts frame timestamps into fractional iteration progress.
///
/// The tracker is a plain value type; it is cheap to clone, which the
/// animation layer exploits to probe "what would the state be at a later
/// timestamp" without disturbing the live tracker.
///
/// `iteration` is signed: negative values mean the delay has not yet
/// elapsed. The first [`advance_frame`](Self::advance_frame) after
/// [`start`](Self::start) only records the clock baseline.
#[derive(Clone, Debug)]
pub struct ProgressTracker {
    running: bool,
    last_frame_time: Option<u64>,
    duration: u64,
    iteration: f64,
    iteration_count: f64,
    slowdown: f64,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressTracker {
    /// Creates a tracker that is not running.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            running: false,
            last_frame_time: None,
            duration: 0,
            iteration: 0.0,
            iteration_count: 0.0,
            slowdown: 1.0,
        }
    }

    /// Sets the time-stretch factor applied to every frame delta.
    ///
    /// A factor of 2.0 makes animations run at half speed. This is
    /// per-tracker, explicit configuration; there is no process-wide
    /// setting.
    pub fn set_slowdown(&mut self, slowdown: f64) {
        debug_assert!(slowdown > 0.0, "slowdown factor must be positive");
        self.slowdown = slowdown;
    }

    /// Starts tracking an animation.
    ///
    /// `duration` is the length of one iteration and `delay` the time
    /// before the first iteration begins, both in microseconds.
    /// `iteration_count` may be fractional or infinite.
    pub fn start(&mut self, duration: u64, delay: u64, iteration_count: f64) {
        self.running = true;
        self.last_frame_time = None;
        self.duration = duration;
        self.iteration_count = iteration_count;
        #[expect(clippy::cast_precision_loss, reason = "durations fit f64 comfortably")]
        {
            self.iteration = -(delay as f64) / (duration.max(1) as f64);
        }
    }

    /// Jumps to the end of the animation.
    pub fn finish(&mut self) {
        if self.running {
            self.iteration = self.iteration_count;
        }
    }

    /// Returns `true` if [`start`](Self::start) has been called and the
    /// tracker has not been reset.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Returns the configured iteration duration in microseconds.
    #[must_use]
    pub const fn duration(&self) -> u64 {
        self.duration
    }

    /// Advances the iteration by the time elapsed since the last frame.
    ///
    /// The first call after [`start`](Self::start) only records the clock
    /// baseline. A timestamp earlier than the last observed one is logged
    /// and ignored; progress never moves backward.
    pub fn advance_frame(&mut self, timestamp: u64) {
        if !self.running {
            return;
        }
        let Some(last) = self.last_frame_time else {
            self.last_frame_time = Some(timestamp);
            return;
        };
        if timestamp < last {
            log::warn!("frame clock went backwards: {timestamp} < {last}");
            return;
        }
        #[expect(clippy::cast_precision_loss, reason = "frame deltas fit f64 comfortably")]
        let delta = (timestamp - last) as f64 / self.slowdown / (self.duration.max(1) as f64);
        self.last_frame_time = Some(timestamp);
        self.iteration += delta;
    }

    /// Records the clock baseline without advancing the iteration.
    ///
    /// Used while paused, so a later resume does not see the entire pause
    /// as one giant frame delta.
    pub fn skip_frame(&mut self, timestamp: u64) {
        if !self.running {
            return;
        }
        self.last_frame_time = Some(timestamp);
    }

    /// Returns the tracker's state relative to the active interval.
    #[must_use]
    pub fn get_state(&self) -> State {
        if !self.running {
            State::After
        } else if self.iteration < 0.0 {
            State::Before
        } else if self.iteration <= self.iteration_count {
            State::During
        } else {
            State::After
        }
    }

    /// Returns the iteration clamped to the active range, or `1.0` when
    /// not running.
    #[must_use]
    pub fn get_iteration(&self) -> f64 {
        if self.running {
            self.iteration.clamp(0.0, self.iteration_count)
        } else {
            1.0
        }
    }

    /// Returns the zero-based index of the current iteration cycle.
    ///
    /// An iteration of exactly `k` counts as the end of cycle `k - 1`,
    /// not the start of cycle `k`.
    #[must_use]
    pub fn get_iteration_cycle(&self) -> u64 {
        let iteration = self.get_iteration();
        if iteration == 0.0 {
            return 0;
        }
        #[expect(clippy::cast_possible_truncation, reason = "clamped non-negative cycle index")]
        #[expect(clippy::cast_sign_loss, reason = "clamped non-negative cycle index")]
        {
            (libm::ceil(iteration) - 1.0).max(0.0) as u64
        }
    }

    /// Returns the progress within the current cycle, in `[0, 1]`.
    ///
    /// With `reversed` the progress runs from 1 to 0 instead, which is how
    /// alternating animation directions are realized.
    #[must_use]
    pub fn get_progress(&self, reversed: bool) -> f64 {
        let iteration = self.get_iteration();
        #[expect(clippy::cast_precision_loss, reason = "cycle index is small")]
        let progress = iteration - self.get_iteration_cycle() as f64;
        if reversed { 1.0 - progress } else { progress }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(duration: u64, delay: u64, count: f64) -> ProgressTracker {
        let mut tracker = ProgressTracker::new();
        tracker.start(duration, delay, count);
        tracker
    }

    #[test]
    fn not_running_reads_as_settled() {
        let tracker = ProgressTracker::new();
        assert!(!tracker.is_running());
        assert_eq!(tracker.get_state(), State::After);
        assert_eq!(tracker.get_iteration(), 1.0);
        assert_eq!(tracker.get_progress(false), 1.0);
    }

    #[test]
    fn first_frame_establishes_baseline() {
        let mut tracker = started(1000, 0, 1.0);
        tracker.advance_frame(5000);
        assert_eq!(tracker.get_iteration(), 0.0);
        tracker.advance_frame(5500);
        assert_eq!(tracker.get_iteration(), 0.5);
    }

    #[test]
    fn timestamp_zero_is_a_valid_baseline() {
        let mut tracker = started(1000, 0, 1.0);
        tracker.advance_frame(0);
        tracker.advance_frame(500);
        assert_eq!(tracker.get_iteration(), 0.5);
    }

    #[test]
    fn delay_starts_before_zero() {
        let mut tracker = started(1000, 500, 1.0);
        tracker.advance_frame(1000);
        assert_eq!(tracker.get_state(), State::Before);
        assert_eq!(tracker.get_iteration(), 0.0);
        // 250µs in, still 250µs of delay left.
        tracker.advance_frame(1250);
        assert_eq!(tracker.get_state(), State::Before);
        // Past the delay, a quarter of the way through.
        tracker.advance_frame(1750);
        assert_eq!(tracker.get_state(), State::During);
        assert!((tracker.get_progress(false) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn cycle_boundary_belongs_to_previous_cycle() {
        let mut tracker = started(1000, 0, 2.0);
        tracker.advance_frame(0);
        tracker.advance_frame(1000);
        assert_eq!(tracker.get_iteration(), 1.0);
        assert_eq!(tracker.get_iteration_cycle(), 0);
        assert_eq!(tracker.get_state(), State::During);
        assert_eq!(tracker.get_progress(false), 1.0);

        tracker.advance_frame(1500);
        assert_eq!(tracker.get_iteration_cycle(), 1);

        tracker.advance_frame(2100);
        assert_eq!(tracker.get_state(), State::After);
        assert_eq!(tracker.get_iteration(), 2.0);
    }

    #[test]
    fn zero_iteration_is_cycle_zero() {
        let tracker = started(1000, 0, 2.0);
        assert_eq!(tracker.get_iteration_cycle(), 0);
        assert_eq!(tracker.get_progress(false), 0.0);
        assert_eq!(tracker.get_progress(true), 1.0);
    }

    #[test]
    fn clock_regression_is_ignored() {
        let mut tracker = started(1000, 0, 1.0);
        tracker.advance_frame(2000);
        tracker.advance_frame(2500);
        let before = tracker.get_iteration();
        tracker.advance_frame(2400);
        assert_eq!(tracker.get_iteration(), before);
        // The baseline did not move either; the next valid frame advances
        // from the last accepted timestamp.
        tracker.advance_frame(2600);
        assert!((tracker.get_iteration() - (before + 0.1)).abs() < 1e-9);
    }

    #[test]
    fn skip_frame_freezes_progress() {
        let mut tracker = started(1000, 0, 1.0);
        tracker.advance_frame(1000);
        tracker.advance_frame(1200);
        assert_eq!(tracker.get_iteration(), 0.2);
        // Paused for 10ms of wall clock.
        tracker.skip_frame(6200);
        tracker.skip_frame(11_200);
        assert_eq!(tracker.get_iteration(), 0.2);
        // Resume: only the post-pause delta counts.
        tracker.advance_frame(11_400);
        assert!((tracker.get_iteration() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn slowdown_stretches_time() {
        let mut tracker = started(1000, 0, 1.0);
        tracker.set_slowdown(2.0);
        tracker.advance_frame(1000);
        tracker.advance_frame(2000);
        assert_eq!(tracker.get_iteration(), 0.5);
    }

    #[test]
    fn zero_duration_does_not_divide_by_zero() {
        let mut tracker = started(0, 0, 1.0);
        tracker.advance_frame(100);
        tracker.advance_frame(200);
        assert_eq!(tracker.get_state(), State::After);
    }

    #[test]
    fn finish_jumps_to_the_end() {
        let mut tracker = started(1000, 0, 3.0);
        tracker.finish();
        assert_eq!(tracker.get_iteration(), 3.0);
        assert_eq!(tracker.get_state(), State::During);
        assert_eq!(tracker.get_iteration_cycle(), 2);
    }

    #[test]
    fn infinite_iteration_count_never_ends() {
        let mut tracker = started(1000, 0, f64::INFINITY);
        tracker.advance_frame(0);
        tracker.advance_frame(1_000_000);
        assert_eq!(tracker.get_state(), State::During);
        assert_eq!(tracker.get_iteration_cycle(), 999);
    }

    #[test]
    fn reversed_progress_flips() {
        let mut tracker = started(1000, 0, 2.0);
        tracker.advance_frame(0);
        tracker.advance_frame(1250);
        // Iteration 1.25: cycle 1, progress 0.25 forward, 0.75 reversed.
        assert_eq!(tracker.get_iteration_cycle(), 1);
        assert!((tracker.get_progress(false) - 0.25).abs() < 1e-9);
        assert!((tracker.get_progress(true) - 0.75).abs() < 1e-9);
    }
}
