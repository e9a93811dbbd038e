//! Two games sharing a tick loop, with attacks routed between them.

use serde::{Deserialize, Serialize};
use versus_core::GameAction;

use crate::config::{ConfigError, RulesConfig};
use crate::game::Game;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Ongoing,
    Winner(Side),
    Draw,
}

#[derive(Clone, Debug)]
pub struct Versus {
    games: [Game; 2],
}

impl Versus {
    pub fn new(config: RulesConfig, left_seed: u64, right_seed: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            games: [
                Game::new(config.clone(), left_seed)?,
                Game::new(config, right_seed)?,
            ],
        })
    }

    pub fn from_games(left: Game, right: Game) -> Self {
        Self {
            games: [left, right],
        }
    }

    pub fn game(&self, side: Side) -> &Game {
        &self.games[side.index()]
    }

    pub fn game_mut(&mut self, side: Side) -> &mut Game {
        &mut self.games[side.index()]
    }

    /// Feed one input to one side and deliver any attack it produced.
    pub fn apply_action(&mut self, side: Side, action: GameAction, now_ms: u64) -> bool {
        let applied = self.games[side.index()].apply_action(action, now_ms);
        self.route_attacks();
        applied
    }

    /// Advance both games by one tick. Stops once the match is decided.
    pub fn tick(&mut self, now_ms: u64) {
        if self.outcome() != Outcome::Ongoing {
            return;
        }
        for game in &mut self.games {
            game.tick(now_ms);
        }
        self.route_attacks();
    }

    fn route_attacks(&mut self) {
        let sent = [self.games[0].take_outgoing(), self.games[1].take_outgoing()];
        for side in [Side::Left, Side::Right] {
            let lines = sent[side.index()];
            if lines > 0 {
                log::debug!("{side:?} sends {lines} rows");
                self.games[side.opponent().index()].receive_garbage(lines);
            }
        }
    }

    pub fn outcome(&self) -> Outcome {
        match (self.games[0].is_game_over(), self.games[1].is_game_over()) {
            (false, false) => Outcome::Ongoing,
            (true, true) => Outcome::Draw,
            (true, false) => Outcome::Winner(Side::Right),
            (false, true) => Outcome::Winner(Side::Left),
        }
    }

    pub fn reset(&mut self, left_seed: u64, right_seed: u64, now_ms: u64) {
        self.games[0].reset(left_seed, now_ms);
        self.games[1].reset(right_seed, now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::GameEvent;
    use versus_core::{Board, Piece};

    fn quad_ready() -> Board {
        let mut board = Board::new();
        for y in 0..6 {
            for x in 0..9 {
                board.set(x, y, true);
            }
        }
        board
    }

    #[test]
    fn test_new_match_is_ongoing() {
        let versus = Versus::new(RulesConfig::versus(), 1, 2).expect("valid config");
        assert_eq!(versus.outcome(), Outcome::Ongoing);
    }

    #[test]
    fn test_attack_routes_to_opponent() {
        let config = RulesConfig::versus();
        let left = Game::from_position(config.clone(), 1, quad_ready(), Some(Piece::I))
            .expect("valid config");
        let right = Game::new(config, 2).expect("valid config");
        let mut versus = Versus::from_games(left, right);

        // vertical I down the right well
        assert!(versus.apply_action(Side::Left, GameAction::RotateRight, 0));
        for _ in 0..4 {
            versus.apply_action(Side::Left, GameAction::MoveRight, 0);
        }
        assert!(versus.apply_action(Side::Left, GameAction::HardDrop, 0));

        assert_eq!(versus.game(Side::Right).pending_garbage(), 4);
        let events = versus.game_mut(Side::Right).drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::GarbageQueued { lines: 4, .. })));
    }

    #[test]
    fn test_outcome_after_top_out() {
        let config = RulesConfig::versus();
        let mut doomed = Board::new();
        for y in 0..Board::HEIGHT {
            doomed.set(4, y, true);
        }
        let left = Game::from_position(config.clone(), 1, doomed, None).expect("valid config");
        let right = Game::new(config, 2).expect("valid config");
        let versus = Versus::from_games(left, right);
        assert_eq!(versus.outcome(), Outcome::Winner(Side::Right));
    }
}
