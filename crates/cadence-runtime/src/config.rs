//! Loop configuration, loadable from TOML

use crate::frame::validate_frame_rate;
use cadence_core::{CadenceError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// How the frame clock waits for the next deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitStrategy {
    /// Sleep until shortly before the deadline, then yield until it passes
    #[default]
    Sleep,
    /// Yield the thread until the deadline passes
    Yield,
    /// Busy-poll the clock. Lowest jitter, saturates a core while waiting.
    Spin,
}

impl FromStr for WaitStrategy {
    type Err = CadenceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sleep" => Ok(WaitStrategy::Sleep),
            "yield" => Ok(WaitStrategy::Yield),
            "spin" => Ok(WaitStrategy::Spin),
            other => Err(CadenceError::Config(format!(
                "unknown wait strategy '{other}' (expected sleep, yield or spin)"
            ))),
        }
    }
}

impl fmt::Display for WaitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WaitStrategy::Sleep => "sleep",
            WaitStrategy::Yield => "yield",
            WaitStrategy::Spin => "spin",
        };
        f.write_str(name)
    }
}

/// Settings for one loop instance
///
/// ```toml
/// target_frame_rate = 60
/// wait = "spin"
/// sleep_margin_us = 500
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// Iterations per second; the gating interval is `1 / target_frame_rate`
    pub target_frame_rate: u32,
    pub wait: WaitStrategy,
    /// With `WaitStrategy::Sleep`, how early to wake before the deadline
    pub sleep_margin_us: u64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            target_frame_rate: 30,
            wait: WaitStrategy::Sleep,
            sleep_margin_us: 1_000,
        }
    }
}

impl LoopConfig {
    /// Parse and validate a config from TOML text. Missing keys take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: LoopConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        validate_frame_rate(self.target_frame_rate)
    }

    pub fn sleep_margin(&self) -> Duration {
        Duration::from_micros(self.sleep_margin_us)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoopConfig::default();
        assert_eq!(config.target_frame_rate, 30);
        assert_eq!(config.wait, WaitStrategy::Sleep);
        assert_eq!(config.sleep_margin(), Duration::from_millis(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = LoopConfig::from_toml_str("target_frame_rate = 120\n").unwrap();
        assert_eq!(config.target_frame_rate, 120);
        assert_eq!(config.wait, WaitStrategy::Sleep);
        assert_eq!(config.sleep_margin_us, 1_000);
    }

    #[test]
    fn test_full_toml() {
        let toml_str = r#"
target_frame_rate = 60
wait = "spin"
sleep_margin_us = 250
"#;
        let config = LoopConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.target_frame_rate, 60);
        assert_eq!(config.wait, WaitStrategy::Spin);
        assert_eq!(config.sleep_margin(), Duration::from_micros(250));
    }

    #[test]
    fn test_zero_rate_rejected() {
        let err = LoopConfig::from_toml_str("target_frame_rate = 0").unwrap_err();
        assert!(matches!(err, CadenceError::InvalidFrameRate(0)));
    }

    #[test]
    fn test_negative_rate_is_a_parse_error() {
        let err = LoopConfig::from_toml_str("target_frame_rate = -5").unwrap_err();
        assert!(matches!(err, CadenceError::TomlParseError(_)));
    }

    #[test]
    fn test_unknown_wait_strategy() {
        assert!(LoopConfig::from_toml_str("wait = \"nap\"").is_err());
        assert!("nap".parse::<WaitStrategy>().is_err());
        assert_eq!("Yield".parse::<WaitStrategy>().unwrap(), WaitStrategy::Yield);
        assert_eq!(WaitStrategy::Spin.to_string(), "spin");
    }

    #[test]
    fn test_missing_file() {
        let err = LoopConfig::load(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, CadenceError::IoError(_)));
    }
}
