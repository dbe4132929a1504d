//! Draft configuration.
//!
//! Timer lengths and turn-order policy. Every field has a default, so an
//! empty JSON object is a valid configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default time allowed for a single pick (120 seconds).
pub const DEFAULT_PICK_SECONDS: u32 = 120;

/// Default remaining time at which the pick warning fires (90 seconds).
pub const DEFAULT_WARNING_AT_SECONDS: u32 = 90;

/// Default timer tick period (one second).
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

/// Longest accepted timer tick period (one minute).
pub const MAX_TICK_MILLIS: u64 = 60_000;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse draft config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid draft config: {0}")]
    Invalid(String),
}

/// Settings for a single draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftConfig {
    /// Seconds on the clock at the start of every turn
    pub pick_seconds: u32,

    /// Remaining seconds at which the warning fires (0 disables it)
    pub warning_at_seconds: u32,

    /// Milliseconds between timer ticks
    pub tick_millis: u64,

    /// Shuffle participants once when the draft is configured
    pub randomize_order: bool,

    /// Fixed shuffle seed, for reproducible pick orders
    pub shuffle_seed: Option<u64>,
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            pick_seconds: DEFAULT_PICK_SECONDS,
            warning_at_seconds: DEFAULT_WARNING_AT_SECONDS,
            tick_millis: DEFAULT_TICK_PERIOD.as_millis() as u64,
            randomize_order: true,
            shuffle_seed: None,
        }
    }
}

impl DraftConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Keep the participant order exactly as given.
    pub fn with_fixed_order(mut self) -> Self {
        self.randomize_order = false;
        self
    }

    /// Shuffle with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.randomize_order = true;
        self.shuffle_seed = Some(seed);
        self
    }

    pub fn with_pick_seconds(mut self, pick_seconds: u32, warning_at_seconds: u32) -> Self {
        self.pick_seconds = pick_seconds;
        self.warning_at_seconds = warning_at_seconds;
        self
    }

    /// Timer tick period.
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }

    /// Check that the timer settings make sense together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pick_seconds == 0 {
            return Err(ConfigError::Invalid("pick_seconds must be positive".into()));
        }
        if self.tick_millis == 0 || self.tick_millis > MAX_TICK_MILLIS {
            return Err(ConfigError::Invalid(format!(
                "tick_millis must be between 1 and {}",
                MAX_TICK_MILLIS
            )));
        }
        if self.warning_at_seconds >= self.pick_seconds {
            return Err(ConfigError::Invalid(format!(
                "warning_at_seconds ({}) must be below pick_seconds ({})",
                self.warning_at_seconds, self.pick_seconds
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = DraftConfig::default();
        assert_eq!(config.pick_seconds, 120);
        assert_eq!(config.warning_at_seconds, 90);
        assert_eq!(config.tick_period(), Duration::from_secs(1));
        assert!(config.randomize_order);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = DraftConfig::from_json(r#"{"pick_seconds": 60, "warning_at_seconds": 15}"#)
            .unwrap();
        assert_eq!(config.pick_seconds, 60);
        assert_eq!(config.warning_at_seconds, 15);
        assert_eq!(config.tick_millis, 1000);

        let empty = DraftConfig::from_json("{}").unwrap();
        assert_eq!(empty, DraftConfig::default());
    }

    #[test]
    fn test_from_json_rejects_bad_threshold() {
        let result = DraftConfig::from_json(r#"{"pick_seconds": 30}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = DraftConfig::from_json(r#"{"pick_seconds": 0, "warning_at_seconds": 0}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_tick_period_bounds() {
        let result = DraftConfig::from_json(r#"{"tick_millis": 0}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = DraftConfig::from_json(r#"{"tick_millis": 18446744073709551615}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let config = DraftConfig::from_json(r#"{"tick_millis": 60000}"#).unwrap();
        assert_eq!(config.tick_period(), Duration::from_secs(60));
    }

    #[test]
    fn test_from_json_parse_error() {
        let result = DraftConfig::from_json("{not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_builders() {
        let config = DraftConfig::new().with_seed(7).with_pick_seconds(10, 0);
        assert_eq!(config.shuffle_seed, Some(7));
        assert!(config.randomize_order);
        assert!(config.validate().is_ok());

        let fixed = DraftConfig::new().with_fixed_order();
        assert!(!fixed.randomize_order);
    }
}
