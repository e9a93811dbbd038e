//! Immutable rules configuration handed to a game at construction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gravity::GravityConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
    #[error("failed to parse rules config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub gravity: GravityConfig,
    /// Frames between identifying full rows and removing them
    pub clear_delay_frames: u32,
    /// ARE: frames between a lock (or clear) and the next spawn
    pub entry_delay_frames: u32,
    /// Cap on garbage rows inserted by one application
    pub max_garbage_per_application: u32,
    pub perfect_clear_score: u64,
    /// Extra outgoing attack for a perfect clear, sent without offsetting
    pub perfect_clear_attack: u32,
    /// Number of preview pieces exposed to players
    pub preview_len: usize,
    /// Host tick rate
    pub tick_hz: u32,
}

impl RulesConfig {
    pub fn versus() -> Self {
        Self {
            gravity: GravityConfig::standard(),
            clear_delay_frames: 0,
            entry_delay_frames: 0,
            max_garbage_per_application: 10,
            perfect_clear_score: 3000,
            perfect_clear_attack: 10,
            preview_len: 5,
            tick_hz: 60,
        }
    }

    /// Versus rules with visible clear animation and ARE.
    pub fn classic_delays() -> Self {
        Self {
            clear_delay_frames: 40,
            entry_delay_frames: 6,
            ..Self::versus()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let factor = self.gravity.soft_drop_factor;
        if !factor.is_finite() || factor < 1.0 {
            return Err(invalid("gravity.soft_drop_factor", format!("{factor} < 1")));
        }
        if self.gravity.fall_interval_ms == 0 {
            return Err(invalid("gravity.fall_interval_ms", "must be positive".into()));
        }
        if self.tick_hz == 0 {
            return Err(invalid("tick_hz", "must be positive".into()));
        }
        if self.preview_len == 0 {
            return Err(invalid("preview_len", "must be at least 1".into()));
        }
        if self.max_garbage_per_application == 0 {
            return Err(invalid(
                "max_garbage_per_application",
                "must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn frame_ms(&self) -> f64 {
        1000.0 / self.tick_hz as f64
    }

    /// Ticks needed for soft drop to pull a piece down one cell.
    pub fn frames_per_soft_drop_cell(&self) -> u32 {
        let interval = self.gravity.fall_interval_ms as f64 / self.gravity.soft_drop_factor;
        (interval / self.frame_ms()).ceil() as u32
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::versus()
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::InvalidValue { field, reason }
}
