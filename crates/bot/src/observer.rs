//! Background evaluation of a game someone else is playing.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use rayon::ThreadPool;
use versus_engine::Game;
use versus_eval::Evaluator;
use versus_search::BeamSearch;

/// Scores below this mean the position is lost.
pub const LOST_THRESHOLD: f64 = -9.0e8;
pub const LOST_SCORE: f64 = -999_999.0;

pub fn clamp_score(score: f64) -> f64 {
    if score < LOST_THRESHOLD {
        LOST_SCORE
    } else {
        score
    }
}

/// Runs the planner on every fresh spawn of a watched game and publishes
/// the best first move's oracle score.
pub struct EvaluationObserver<E> {
    search: Arc<BeamSearch<E>>,
    pool: Arc<ThreadPool>,
    tx: Sender<Option<f64>>,
    rx: Receiver<Option<f64>>,
    thinking: bool,
    last_spawn: u64,
    score: Option<f64>,
}

impl<E: Evaluator + 'static> EvaluationObserver<E> {
    pub fn new(search: BeamSearch<E>, pool: Arc<ThreadPool>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            search: Arc::new(search),
            pool,
            tx,
            rx,
            thinking: false,
            last_spawn: 0,
            score: None,
        }
    }

    /// Call once per tick with the watched game.
    pub fn observe(&mut self, game: &Game) {
        self.poll();
        if self.thinking || game.is_game_over() || game.spawn_count() == self.last_spawn {
            return;
        }
        let Some(snapshot) = game.snapshot() else {
            return;
        };
        self.last_spawn = game.spawn_count();
        self.thinking = true;

        let search = Arc::clone(&self.search);
        let tx = self.tx.clone();
        self.pool.spawn(move || {
            let score = match search.find_best_move(&snapshot) {
                Ok(decision) => decision.and_then(|d| d.spot.oracle_score),
                Err(e) => {
                    log::warn!("evaluation aborted: {e}");
                    None
                }
            };
            let _ = tx.send(score);
        });
    }

    /// Latest published score, clamped for lost positions.
    pub fn score(&mut self) -> Option<f64> {
        self.poll();
        self.score
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    /// Block until the running evaluation reports or `timeout` passes.
    pub fn wait(&mut self, timeout: Duration) -> Option<f64> {
        if self.thinking {
            if let Ok(result) = self.rx.recv_timeout(timeout) {
                self.publish(result);
            }
        }
        self.score
    }

    fn poll(&mut self) {
        while let Ok(result) = self.rx.try_recv() {
            self.publish(result);
        }
    }

    fn publish(&mut self, result: Option<f64>) {
        self.thinking = false;
        match result {
            Some(score) => {
                let score = clamp_score(score);
                log::debug!("evaluation {score:.1}");
                self.score = Some(score);
            }
            None => log::debug!("evaluation produced no score"),
        }
    }
}
