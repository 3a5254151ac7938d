//! Demo scripts driven by the `cadence` binary

use cadence_core::{CadenceError, Phase, Result};
use cadence_runtime::{FrameState, MethodTable, Script};

/// A marker bouncing between the ends of a one-line track
pub struct Bouncer {
    width: usize,
    position: f64,
    /// Cells per second
    velocity: f64,
}

impl Bouncer {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(2),
            position: 0.0,
            velocity: 0.0,
        }
    }

    fn start(&mut self, _frame: &mut FrameState) -> Result<()> {
        // cross the track in one second
        self.velocity = (self.width - 1) as f64;
        Ok(())
    }

    fn update(&mut self, frame: &mut FrameState) -> Result<()> {
        let max = (self.width - 1) as f64;
        self.position += self.velocity * frame.delta_time();

        if self.position >= max {
            self.position = max - (self.position - max);
            self.velocity = -self.velocity;
        } else if self.position <= 0.0 {
            self.position = -self.position;
            self.velocity = -self.velocity;
        }

        if !(0.0..=max).contains(&self.position) {
            return Err(CadenceError::script(format!(
                "bouncer left the track at {:.2}",
                self.position
            )));
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut FrameState) -> Result<()> {
        if frame.frame_count() % 5 == 0 {
            log::info!("|{}|", self.track());
        }
        Ok(())
    }

    fn track(&self) -> String {
        let cell = self.position.round() as usize;
        (0..self.width)
            .map(|i| if i == cell { 'o' } else { ' ' })
            .collect()
    }
}

impl Script for Bouncer {
    const NAME: &'static str = "Bouncer";

    fn declare(methods: &mut MethodTable<Self>) {
        methods.method("Start", Self::start);
        methods.method("Update", Self::update);
        methods.method("draw", Self::draw).mark(Phase::LateUpdate);
    }
}

/// Logs the measured frame rate once per second of target time
#[derive(Default)]
pub struct FrameReporter {
    samples: u32,
    sum: f64,
}

impl FrameReporter {
    fn sample(&mut self, frame: &mut FrameState) -> Result<()> {
        if frame.frame_rate().is_finite() {
            self.samples += 1;
            self.sum += frame.frame_rate();
        }

        if self.samples >= frame.target_frame_rate() {
            log::info!(
                "frame {}: {:.1} fps (target {})",
                frame.frame_count(),
                self.sum / f64::from(self.samples),
                frame.target_frame_rate()
            );
            self.samples = 0;
            self.sum = 0.0;
        }
        Ok(())
    }
}

impl Script for FrameReporter {
    const NAME: &'static str = "FrameReporter";

    fn declare(methods: &mut MethodTable<Self>) {
        methods.method("sample", Self::sample).mark(Phase::EarlyUpdate);
    }
}

/// Stops the loop after a fixed number of frames
pub struct FrameLimit {
    max_frames: u64,
}

impl FrameLimit {
    pub fn new(max_frames: u64) -> Self {
        Self { max_frames }
    }

    fn early_start(&mut self, frame: &mut FrameState) -> Result<()> {
        if self.max_frames == 0 {
            frame.stop();
        }
        Ok(())
    }

    fn late_update(&mut self, frame: &mut FrameState) -> Result<()> {
        if frame.frame_count() + 1 >= self.max_frames {
            frame.stop();
        }
        Ok(())
    }
}

impl Script for FrameLimit {
    const NAME: &'static str = "FrameLimit";

    fn declare(methods: &mut MethodTable<Self>) {
        methods.method("EarlyStart", Self::early_start);
        methods.method("LateUpdate", Self::late_update);
    }
}
