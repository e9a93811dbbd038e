//! Landing candidate to per-tick input plan.

use serde::{Deserialize, Serialize};
use versus_core::{GameAction, LandingSpot};
use versus_engine::RulesConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Idle ticks inserted after a hold and around the movement path.
    pub action_delay_frames: u32,
    /// Idle ticks per cell while soft drop is held.
    pub frames_per_soft_drop_cell: u32,
}

impl TranslatorConfig {
    pub fn from_rules(rules: &RulesConfig, action_delay_frames: u32) -> Self {
        Self {
            action_delay_frames,
            frames_per_soft_drop_cell: rules.frames_per_soft_drop_cell(),
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self::from_rules(&RulesConfig::versus(), 0)
    }
}

fn pad(plan: &mut Vec<GameAction>, frames: u32) {
    plan.extend(std::iter::repeat(GameAction::None).take(frames as usize));
}

/// Build the input plan for `spot`. Always ends in a hard drop.
pub fn translate(spot: &LandingSpot, config: &TranslatorConfig) -> Vec<GameAction> {
    let mut plan = Vec::with_capacity(spot.path.len() + 2 * config.action_delay_frames as usize + 2);

    if spot.used_hold {
        plan.push(GameAction::Hold);
        pad(&mut plan, config.action_delay_frames);
    }

    if spot.uses_soft_drop() {
        pad(&mut plan, config.action_delay_frames);
        let mut dropping = false;
        for &action in &spot.path {
            if action == GameAction::SoftDrop {
                if !dropping {
                    plan.push(GameAction::StartSoftDrop);
                    dropping = true;
                }
                pad(&mut plan, config.frames_per_soft_drop_cell);
            } else {
                if dropping {
                    plan.push(GameAction::StopSoftDrop);
                    dropping = false;
                }
                plan.push(action);
            }
        }
        if dropping {
            plan.push(GameAction::StopSoftDrop);
        }
    } else {
        plan.extend(spot.path.iter().copied());
        pad(&mut plan, config.action_delay_frames);
    }

    plan.push(GameAction::HardDrop);
    plan
}
