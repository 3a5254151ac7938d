//! Loop driver — discovery, startup phases, then paced update iterations

use crate::catalog::ScriptCatalog;
use crate::clock::{frame_interval, FrameClock};
use crate::config::LoopConfig;
use crate::frame::{validate_frame_rate, FrameState};
use crate::sequencer::PhaseLists;
use cadence_core::{Phase, Result};
use std::time::{Duration, Instant};

/// Where a loop instance is in its lifecycle. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    NotStarted,
    Initializing,
    Running,
    Stopped,
}

/// What a finished run did
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunSummary {
    /// Completed update iterations
    pub frames: u64,
    /// Wall-clock time from the first startup phase to the stop
    pub elapsed: Duration,
}

impl RunSummary {
    /// Average rate over the whole run, 0.0 when nothing was timed
    pub fn mean_frame_rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.frames as f64 / secs
        }
    }
}

/// One run loop instance, owning its scripts, phase lists, and frame state
pub struct GameLoop {
    catalog: ScriptCatalog,
    phases: PhaseLists,
    frame: FrameState,
    clock: FrameClock,
    state: LoopState,
    initiated: bool,
}

impl GameLoop {
    /// Create a loop over `catalog`. Fails if the config's target rate is zero.
    pub fn new(catalog: ScriptCatalog, config: &LoopConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            catalog,
            phases: PhaseLists::new(),
            frame: FrameState::new(config.target_frame_rate)?,
            clock: FrameClock::new(config.wait, config.sleep_margin()),
            state: LoopState::NotStarted,
            initiated: false,
        })
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn frame(&self) -> &FrameState {
        &self.frame
    }

    /// Adjust frame state (e.g. the target rate) before or between runs
    pub fn frame_mut(&mut self) -> &mut FrameState {
        &mut self.frame
    }

    pub fn phases(&self) -> &PhaseLists {
        &self.phases
    }

    pub fn catalog(&self) -> &ScriptCatalog {
        &self.catalog
    }

    /// Whether discovery has already filled the phase lists
    pub fn is_initiated(&self) -> bool {
        self.initiated
    }

    /// Scan the catalog into phase lists. Returns false if already done.
    pub fn discover(&mut self) -> bool {
        if self.initiated {
            return false;
        }

        self.phases = PhaseLists::classify(&self.catalog);
        self.initiated = true;

        log::debug!(
            "Discovered {} callbacks across {} scripts",
            self.phases.total(),
            self.catalog.len()
        );
        for phase in Phase::ALL {
            log::debug!("  {phase}: {:?}", self.phases.get(phase));
        }
        true
    }

    /// Run the loop until a callback calls [`FrameState::stop`].
    ///
    /// Startup phases run once, then update phases run once per gated
    /// iteration. A callback error aborts immediately and is returned. Only
    /// the first call runs anything; later calls return an empty summary.
    pub fn run(&mut self) -> Result<RunSummary> {
        if self.state != LoopState::NotStarted {
            log::warn!("Run loop already started ({:?}), ignoring", self.state);
            return Ok(RunSummary::default());
        }
        validate_frame_rate(self.frame.target_frame_rate())?;

        self.state = LoopState::Initializing;
        self.discover();

        let started = Instant::now();
        for phase in Phase::STARTUP {
            self.dispatch(phase)?;
        }

        self.state = LoopState::Running;
        log::info!(
            "Run loop started at {} fps ({} wait)",
            self.frame.target_frame_rate(),
            self.clock.strategy()
        );

        self.clock.reset_at(Instant::now());
        while self.frame.is_running() {
            let interval = frame_interval(self.frame.target_frame_rate());
            let rate = self.clock.wait(interval);
            self.frame.record_frame_rate(rate);

            for phase in Phase::UPDATE {
                self.dispatch(phase)?;
            }

            self.frame.advance();
            log::trace!(
                "Frame {} complete ({:.1} fps)",
                self.frame.frame_count(),
                self.frame.frame_rate()
            );
        }

        self.state = LoopState::Stopped;
        let summary = RunSummary {
            frames: self.frame.frame_count(),
            elapsed: started.elapsed(),
        };
        log::info!(
            "Run loop stopped after {} frames ({:.1} fps mean)",
            summary.frames,
            summary.mean_frame_rate()
        );
        Ok(summary)
    }

    fn dispatch(&mut self, phase: Phase) -> Result<()> {
        let result = self.phases.dispatch(phase, &mut self.frame);
        if result.is_err() {
            self.state = LoopState::Stopped;
        }
        result
    }
}
