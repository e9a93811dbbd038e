//! Fall-rate and lock-delay timing.

use serde::{Deserialize, Serialize};

/// Gravity and lockdown tunables, in wall-clock milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravityConfig {
    /// Time between gravity steps without soft drop
    pub fall_interval_ms: u64,
    /// Soft drop divides the fall interval by this (typically 20x)
    pub soft_drop_factor: f64,
    /// Grace period after touching down before the piece locks
    pub lock_delay_ms: u64,
    /// Maximum lock delay resets allowed per piece
    pub max_lockdown_resets: u32,
}

impl GravityConfig {
    /// Versus default: one row per half second.
    pub fn standard() -> Self {
        Self {
            fall_interval_ms: 500,
            soft_drop_factor: 20.0,
            lock_delay_ms: 500,
            max_lockdown_resets: 15,
        }
    }

    /// Faster preset for short matches.
    pub fn fast() -> Self {
        Self {
            fall_interval_ms: 100,
            soft_drop_factor: 20.0,
            lock_delay_ms: 500,
            max_lockdown_resets: 15,
        }
    }

    /// Fall interval while soft drop is engaged, truncated to whole ms.
    pub fn soft_drop_interval_ms(&self) -> u64 {
        (self.fall_interval_ms as f64 / self.soft_drop_factor) as u64
    }

    pub fn interval_ms(&self, soft_dropping: bool) -> u64 {
        if soft_dropping {
            self.soft_drop_interval_ms()
        } else {
            self.fall_interval_ms
        }
    }
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self::standard()
    }
}
