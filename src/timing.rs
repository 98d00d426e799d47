//! Frame timing
//!
//! Turns a monotonically increasing frame timestamp into bounded simulation
//! steps, and abstracts "request next frame" so the engine can be driven
//! synchronously.

use std::cell::Cell;
use std::rc::Rc;

use crate::consts::MAX_DELTA;

/// Clamp a raw delta (seconds) into `[0, MAX_DELTA]`
#[inline]
pub fn clamp_delta(delta: f32) -> f32 {
    if delta.is_nan() {
        return 0.0;
    }
    delta.clamp(0.0, MAX_DELTA)
}

/// Converts frame timestamps (ms) into clamped deltas (s)
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_timestamp: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous tick. The first tick after a reset yields zero.
    pub fn tick(&mut self, timestamp: f64) -> f32 {
        let last = self.last_timestamp.unwrap_or(timestamp);
        self.last_timestamp = Some(timestamp);
        clamp_delta(((timestamp - last) / 1000.0) as f32)
    }

    /// Forget the reference timestamp so idle time is never integrated
    pub fn reset(&mut self) {
        self.last_timestamp = None;
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }
}

/// Something that can call the engine back on the next display frame
pub trait FrameScheduler {
    fn request_frame(&mut self);
    fn cancel_frame(&mut self);
}

/// Scheduler driven by hand: it only records whether a frame is pending.
///
/// Clones share the same flag, so a driver can keep one while the engine owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    pending: Rc<Cell<bool>>,
    requests: Rc<Cell<u64>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Take the pending frame, returning whether there was one
    pub fn take(&self) -> bool {
        self.pending.replace(false)
    }

    /// Total frames requested so far
    pub fn requests(&self) -> u64 {
        self.requests.get()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.pending.set(true);
        self.requests.set(self.requests.get() + 1);
    }

    fn cancel_frame(&mut self) {
        self.pending.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(5_000.0), 0.0);
        assert!((clock.tick(5_016.0) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_stall_is_clamped() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        assert_eq!(clock.tick(10_000.0), MAX_DELTA);
    }

    #[test]
    fn test_backwards_clock_is_zero() {
        let mut clock = FrameClock::new();
        clock.tick(1_000.0);
        assert_eq!(clock.tick(900.0), 0.0);
    }

    #[test]
    fn test_reset_discards_idle_time() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        clock.tick(16.0);
        clock.reset();
        assert_eq!(clock.last_timestamp(), None);
        assert_eq!(clock.tick(60_000.0), 0.0);
        assert!((clock.tick(60_016.0) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_manual_scheduler_shares_state() {
        let handle = ManualScheduler::new();
        let mut owned = handle.clone();
        owned.request_frame();
        assert!(handle.is_pending());
        assert_eq!(handle.requests(), 1);
        assert!(handle.take());
        assert!(!handle.is_pending());
        owned.request_frame();
        owned.cancel_frame();
        assert!(!handle.take());
    }

    proptest! {
        #[test]
        fn prop_clamp_delta_bounds(delta in -10.0f32..10.0) {
            let d = clamp_delta(delta);
            prop_assert!((0.0..=MAX_DELTA).contains(&d));
        }
    }
}
