//! Per-tick input sources.

use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;

use rayon::ThreadPool;
use versus_core::GameAction;
use versus_engine::Game;
use versus_eval::Evaluator;
use versus_search::BeamSearch;

use crate::translator::{translate, TranslatorConfig};

/// Supplies one input per tick.
pub trait Player {
    fn next_action(&mut self, game: &Game) -> GameAction;
}

/// Replays a fixed input list, then idles.
#[derive(Clone, Debug, Default)]
pub struct ScriptedPlayer {
    actions: VecDeque<GameAction>,
}

impl ScriptedPlayer {
    pub fn new(actions: impl IntoIterator<Item = GameAction>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.actions.len()
    }
}

impl Player for ScriptedPlayer {
    fn next_action(&mut self, _game: &Game) -> GameAction {
        self.actions.pop_front().unwrap_or(GameAction::None)
    }
}

struct Plan {
    generation: u64,
    /// Spawn the plan was computed for.
    spawn: u64,
    actions: Option<Vec<GameAction>>,
}

/// Plans off the tick thread and feeds the result back one input per tick.
///
/// At most one search is in flight. Plans computed for a piece that is no
/// longer active, or requested before the last `clear`, are dropped.
pub struct BotPlayer<E> {
    search: Arc<BeamSearch<E>>,
    translator: TranslatorConfig,
    pool: Arc<ThreadPool>,
    tx: Sender<Plan>,
    rx: Receiver<Plan>,
    pending: VecDeque<GameAction>,
    thinking: bool,
    generation: u64,
    /// Spawn the queued inputs belong to.
    target_spawn: u64,
}

impl<E: Evaluator + 'static> BotPlayer<E> {
    pub fn new(search: BeamSearch<E>, translator: TranslatorConfig, pool: Arc<ThreadPool>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            search: Arc::new(search),
            translator,
            pool,
            tx,
            rx,
            pending: VecDeque::new(),
            thinking: false,
            generation: 0,
            target_spawn: 0,
        }
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Drop queued inputs and forget any search in flight.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.thinking = false;
        self.generation += 1;
    }

    /// Block until the in-flight search reports or `timeout` passes.
    /// Returns true when a result was received.
    pub fn wait_for_plan(&mut self, game: &Game, timeout: Duration) -> bool {
        if !self.thinking {
            return false;
        }
        match self.rx.recv_timeout(timeout) {
            Ok(plan) => {
                self.accept(plan, game);
                true
            }
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => {
                self.thinking = false;
                false
            }
        }
    }

    fn drain(&mut self, game: &Game) {
        while let Ok(plan) = self.rx.try_recv() {
            self.accept(plan, game);
        }
    }

    fn accept(&mut self, plan: Plan, game: &Game) {
        if plan.generation != self.generation {
            log::debug!("dropping plan from generation {}", plan.generation);
            return;
        }
        self.thinking = false;
        if plan.spawn != game.spawn_count() {
            log::debug!("dropping plan for spawn {}, now {}", plan.spawn, game.spawn_count());
            return;
        }
        if let Some(actions) = plan.actions {
            self.target_spawn = plan.spawn;
            self.pending.extend(actions);
        }
    }

    fn request(&mut self, game: &Game) {
        let Some(snapshot) = game.snapshot() else {
            return;
        };
        self.thinking = true;
        let search = Arc::clone(&self.search);
        let translator = self.translator;
        let tx = self.tx.clone();
        let generation = self.generation;
        let spawn = game.spawn_count();
        self.pool.spawn(move || {
            let actions = match search.find_best_move(&snapshot) {
                Ok(Some(decision)) => {
                    log::debug!(
                        "planned {:?} at ({}, {}) score {:.1}",
                        decision.spot.pose.piece,
                        decision.spot.pose.x,
                        decision.spot.pose.y,
                        decision.score
                    );
                    Some(translate(&decision.spot, &translator))
                }
                Ok(None) => None,
                Err(e) => {
                    log::warn!("search aborted: {e}");
                    None
                }
            };
            // receiver gone means the player was dropped
            let _ = tx.send(Plan {
                generation,
                spawn,
                actions,
            });
        });
    }
}

impl<E: Evaluator + 'static> Player for BotPlayer<E> {
    fn next_action(&mut self, game: &Game) -> GameAction {
        self.drain(game);

        if !self.pending.is_empty() && game.spawn_count() > self.target_spawn {
            log::debug!("piece changed under a running plan, {} inputs dropped", self.pending.len());
            self.pending.clear();
        }

        if let Some(action) = self.pending.pop_front() {
            if action == GameAction::Hold {
                // the held-in piece is part of the same plan
                self.target_spawn += 1;
            }
            return action;
        }

        if !self.thinking && !game.is_game_over() {
            self.request(game);
        }
        GameAction::None
    }
}
