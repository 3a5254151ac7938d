//! Error types for Cadence

use crate::Phase;
use thiserror::Error;

/// The main error type for Cadence operations
#[derive(Debug, Error)]
pub enum CadenceError {
    #[error("Invalid target frame rate: {0} (must be greater than zero)")]
    InvalidFrameRate(u32),

    #[error("Callback {script}::{method} failed during {phase} on frame {frame}")]
    CallbackFailed {
        script: String,
        method: String,
        phase: Phase,
        frame: u64,
        #[source]
        source: Box<CadenceError>,
    },

    #[error("Script error: {0}")]
    Script(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

impl CadenceError {
    /// Shorthand for the error a script body returns to abort the loop
    pub fn script(message: impl Into<String>) -> Self {
        CadenceError::Script(message.into())
    }
}

/// Result type alias for Cadence operations
pub type Result<T> = std::result::Result<T, CadenceError>;

impl From<toml::de::Error> for CadenceError {
    fn from(err: toml::de::Error) -> Self {
        CadenceError::TomlParseError(err.to_string())
    }
}
