//! Cadence Runtime - Run loop infrastructure
//!
//! Provides the building blocks of a fixed-rate run loop:
//! - `Script` / `ScriptCatalog` — static registration of script types and their methods
//! - `PhaseLists` — discovered callbacks grouped into the six lifecycle phases
//! - `FrameClock` — deadline wait gating each iteration at the target interval
//! - `FrameState` — frame counter, measured rate, and stop flag seen by callbacks
//! - `GameLoop` — the loop driver tying the above together

mod catalog;
mod clock;
mod config;
mod frame;
mod game_loop;
mod sequencer;

pub use cadence_core::{CadenceError, Phase, Result};
pub use catalog::{MethodEntry, MethodTable, Script, ScriptCatalog, ScriptMethod};
pub use clock::{frame_interval, instantaneous_rate, FrameClock};
pub use config::{LoopConfig, WaitStrategy};
pub use frame::FrameState;
pub use game_loop::{GameLoop, LoopState, RunSummary};
pub use sequencer::{LifecycleCallback, PhaseLists};
