//! versus-engine - rules, timing and move generation for two-player block stacking.
//!
//! Provides SRS rotation, kicks, movement, spin detection, the clear tables,
//! the lock/clear state machine and reachable-placement enumeration.

pub mod apply;
pub mod attack;
pub mod b2b;
pub mod bag;
pub mod clear;
pub mod collision;
pub mod combo;
pub mod config;
pub mod events;
pub mod game;
pub mod garbage;
pub mod gravity;
pub mod kicks;
pub mod movegen;
pub mod movement;
pub mod rng;
pub mod scoring;
pub mod versus;

pub use apply::{apply_pose, apply_pose_mut};
pub use attack::{calculate_attack, combo_bonus, COMBO_TABLE};
pub use b2b::B2BTracker;
pub use bag::SevenBag;
pub use clear::{clear_label, resolve_clear, ClearInfo};
pub use collision::{
    can_place, collides, drop_distance, hard_drop_y, is_grounded, landing_pose, pose_grounded,
};
pub use combo::{ComboCounter, NO_COMBO};
pub use config::{ConfigError, RulesConfig};
pub use events::{GameEvent, GameOverCause};
pub use game::{Game, Phase};
pub use garbage::GarbageQueue;
pub use gravity::GravityConfig;
pub use kicks::get_kicks;
pub use movegen::{generate_moves, generate_moves_with_hold, spawn_pose, MAX_EXPANDED_STATES};
pub use movement::{detect_spin, try_drop, try_move, try_rotate, try_rotate_to, RotationResult};
pub use scoring::{base_score, clear_score};
pub use versus::{Outcome, Side, Versus};
