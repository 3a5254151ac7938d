//! Cadence Core - Foundational types for the Cadence run loop
//!
//! This crate provides the types that the other Cadence crates depend on:
//! - `Phase` - The six lifecycle phases callbacks attach to
//! - Error types and Result alias

mod error;
mod phase;

pub use error::{CadenceError, Result};
pub use phase::Phase;
