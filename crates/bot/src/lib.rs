//! versus-bot - automated players on top of the planner.

mod observer;
mod player;
mod translator;

pub use observer::{clamp_score, EvaluationObserver, LOST_SCORE, LOST_THRESHOLD};
pub use player::{BotPlayer, Player, ScriptedPlayer};
pub use translator::{translate, TranslatorConfig};

use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use thiserror::Error;
use versus_engine::{Side, Versus};

#[derive(Debug, Error)]
pub enum BotError {
    #[error("failed to start planner threads: {0}")]
    ThreadPool(#[from] ThreadPoolBuildError),
}

/// Worker pool shared by bots and observers.
pub fn build_pool(threads: usize) -> Result<Arc<ThreadPool>, BotError> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("planner-{i}"))
        .build()?;
    Ok(Arc::new(pool))
}

/// One host tick: each side's player supplies an input, then both games advance.
pub fn step_versus(
    versus: &mut Versus,
    left: &mut dyn Player,
    right: &mut dyn Player,
    now_ms: u64,
) {
    let action = left.next_action(versus.game(Side::Left));
    versus.apply_action(Side::Left, action, now_ms);
    let action = right.next_action(versus.game(Side::Right));
    versus.apply_action(Side::Right, action, now_ms);
    versus.tick(now_ms);
}
