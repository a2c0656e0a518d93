//! Scoring configuration.
//!
//! Flare scoring has a single tunable: the window bottom, a height above
//! ground below which the trajectory no longer counts towards the flare.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoringError};

/// Default window bottom in meters above ground.
pub const DEFAULT_WINDOW_BOTTOM: f64 = 2000.0;

/// Configuration for flare scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    /// Height above ground (m) below which samples re-anchor the window search.
    /// Zero or negative values are allowed and simply disable re-anchoring.
    /// Default: 2000.0 meters
    #[serde(default = "default_window_bottom")]
    pub window_bottom: f64,
}

fn default_window_bottom() -> f64 {
    DEFAULT_WINDOW_BOTTOM
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            window_bottom: DEFAULT_WINDOW_BOTTOM,
        }
    }
}

impl ScoringConfig {
    /// Create a config with a custom window bottom.
    pub fn with_window_bottom(window_bottom: f64) -> Self {
        Self { window_bottom }
    }

    /// Reject values the search cannot use meaningfully.
    pub fn validate(&self) -> Result<()> {
        if !self.window_bottom.is_finite() {
            return Err(ScoringError::ConfigError {
                message: format!("window bottom must be finite, got {}", self.window_bottom),
            });
        }
        Ok(())
    }

    /// Parse and validate a config from JSON, e.g. `{"windowBottom": 1500}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
