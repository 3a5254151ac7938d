//! Frame clock with deadline gating

use crate::config::WaitStrategy;
use std::time::{Duration, Instant};

/// Gating interval for a target rate, rounded up to whole nanoseconds so it
/// is never shorter than `1 / target_frame_rate` seconds.
///
/// `target_frame_rate` must be non-zero; [`crate::FrameState`] guarantees it.
pub fn frame_interval(target_frame_rate: u32) -> Duration {
    const NANOS_PER_SEC: u64 = 1_000_000_000;
    Duration::from_nanos(NANOS_PER_SEC.div_ceil(u64::from(target_frame_rate.max(1))))
}

/// Reciprocal of a single iteration's duration. Infinite for a zero duration.
pub fn instantaneous_rate(elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs == 0.0 {
        f64::INFINITY
    } else {
        1.0 / secs
    }
}

/// Measures time since the last gate and blocks until the next one is due
pub struct FrameClock {
    /// When the current measurement started
    last_reset: Instant,
    strategy: WaitStrategy,
    /// Early wake-up before the deadline when sleeping
    sleep_margin: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(WaitStrategy::default(), Duration::from_millis(1))
    }
}

impl FrameClock {
    pub fn new(strategy: WaitStrategy, sleep_margin: Duration) -> Self {
        Self {
            last_reset: Instant::now(),
            strategy,
            sleep_margin,
        }
    }

    pub fn strategy(&self) -> WaitStrategy {
        self.strategy
    }

    /// Restart the measurement at `now`
    pub fn reset_at(&mut self, now: Instant) {
        self.last_reset = now;
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_reset)
    }

    /// True once at least `interval` has passed since the last reset
    pub fn is_ready_at(&self, now: Instant, interval: Duration) -> bool {
        self.elapsed_at(now) >= interval
    }

    /// Close the measurement at `now`: returns the instantaneous rate and
    /// starts timing the next iteration.
    pub fn complete_at(&mut self, now: Instant) -> f64 {
        let rate = instantaneous_rate(self.elapsed_at(now));
        self.last_reset = now;
        rate
    }

    /// Block until `interval` has elapsed since the last reset, then complete
    /// the measurement. Never returns before the deadline.
    pub fn wait(&mut self, interval: Duration) -> f64 {
        let deadline = self.last_reset + interval;
        loop {
            let now = Instant::now();
            if now >= deadline {
                return self.complete_at(now);
            }

            let remaining = deadline - now;
            match self.strategy {
                WaitStrategy::Spin => std::hint::spin_loop(),
                WaitStrategy::Yield => std::thread::yield_now(),
                WaitStrategy::Sleep => {
                    if remaining > self.sleep_margin {
                        std::thread::sleep(remaining - self.sleep_margin);
                    } else {
                        std::thread::yield_now();
                    }
                }
            }
        }
    }
}
