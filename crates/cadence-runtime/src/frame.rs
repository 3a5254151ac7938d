//! Per-loop frame state shared with callbacks

use cadence_core::{CadenceError, Result};

/// Counters and flags for one loop instance.
///
/// Every callback receives `&mut FrameState`. Callbacks can read the counters,
/// retune the target rate, or request a stop; only the loop driver advances
/// the frame count and records the measured rate.
#[derive(Debug, Clone)]
pub struct FrameState {
    frame_count: u64,
    frame_rate: f64,
    target_frame_rate: u32,
    running: bool,
}

impl FrameState {
    /// Create frame state for a loop targeting `target_frame_rate` iterations per second
    pub fn new(target_frame_rate: u32) -> Result<Self> {
        validate_frame_rate(target_frame_rate)?;
        Ok(Self {
            frame_count: 0,
            frame_rate: 0.0,
            target_frame_rate,
            running: true,
        })
    }

    /// Number of completed iterations
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Instantaneous rate measured at the most recent gate, 0.0 before the first
    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    pub fn target_frame_rate(&self) -> u32 {
        self.target_frame_rate
    }

    /// Change the pacing target. Takes effect at the next gating check.
    pub fn set_target_frame_rate(&mut self, target_frame_rate: u32) -> Result<()> {
        validate_frame_rate(target_frame_rate)?;
        self.target_frame_rate = target_frame_rate;
        Ok(())
    }

    /// Fixed step in seconds, `1 / target_frame_rate`
    pub fn delta_time(&self) -> f64 {
        1.0 / f64::from(self.target_frame_rate)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Request loop termination once the current iteration's phases finish
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub(crate) fn record_frame_rate(&mut self, frame_rate: f64) {
        self.frame_rate = frame_rate;
    }

    pub(crate) fn advance(&mut self) {
        self.frame_count += 1;
    }
}

pub(crate) fn validate_frame_rate(target_frame_rate: u32) -> Result<()> {
    if target_frame_rate == 0 {
        return Err(CadenceError::InvalidFrameRate(target_frame_rate));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_state_defaults() {
        let frame = FrameState::new(30).unwrap();
        assert_eq!(frame.frame_count(), 0);
        assert_eq!(frame.frame_rate(), 0.0);
        assert_eq!(frame.target_frame_rate(), 30);
        assert!(frame.is_running());
    }

    #[test]
    fn test_zero_rate_rejected() {
        assert!(matches!(
            FrameState::new(0),
            Err(CadenceError::InvalidFrameRate(0))
        ));

        let mut frame = FrameState::new(60).unwrap();
        assert!(frame.set_target_frame_rate(0).is_err());
        assert_eq!(frame.target_frame_rate(), 60);
    }

    #[test]
    fn test_delta_time_follows_target() {
        let mut frame = FrameState::new(10).unwrap();
        assert!((frame.delta_time() - 0.1).abs() < 1e-12);

        frame.set_target_frame_rate(50).unwrap();
        assert!((frame.delta_time() - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_advance_is_monotonic() {
        let mut frame = FrameState::new(30).unwrap();
        let mut last = frame.frame_count();
        for _ in 0..100 {
            frame.advance();
            assert_eq!(frame.frame_count(), last + 1);
            last = frame.frame_count();
        }
    }

    #[test]
    fn test_stop_clears_running() {
        let mut frame = FrameState::new(30).unwrap();
        frame.stop();
        assert!(!frame.is_running());
        frame.stop();
        assert!(!frame.is_running());
    }
}
