//! Single-player game state machine.
//!
//! The game never reads a clock. Hosts pass a monotonic millisecond timestamp
//! to every tick and input; delays between pieces are counted in ticks.

use serde::{Deserialize, Serialize};
use versus_core::{Board, GameAction, Piece, PiecePose, Snapshot};

use crate::b2b::B2BTracker;
use crate::bag::SevenBag;
use crate::clear::{resolve_clear, ClearInfo};
use crate::collision::{drop_distance, landing_pose, pose_grounded};
use crate::combo::ComboCounter;
use crate::config::{ConfigError, RulesConfig};
use crate::events::{GameEvent, GameOverCause};
use crate::garbage::GarbageQueue;
use crate::movement::{try_drop, try_move, try_rotate};
use crate::rng::XorShift64;
use crate::scoring::{HARD_DROP_SCORE_PER_CELL, SOFT_DROP_SCORE_PER_CELL};

/// Garbage holes draw from a stream separate from the bag.
const GARBAGE_SEED_SALT: u64 = 0xA5A5_5A5A_C3C3_3C3C;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Accepting input, gravity active.
    Playing,
    /// Full rows identified, waiting before removal.
    ClearAnimation,
    /// Waiting before the next spawn.
    EntryDelay,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Lockdown {
    active: bool,
    start_ms: u64,
    resets: u32,
}

#[derive(Clone, Debug)]
pub struct Game {
    config: RulesConfig,
    board: Board,
    active: Option<PiecePose>,
    hold: Option<Piece>,
    can_hold: bool,
    bag: SevenBag,
    rng: XorShift64,
    phase: Phase,
    delay_counter: i64,
    score: u64,
    combo: ComboCounter,
    b2b: B2BTracker,
    garbage: GarbageQueue,
    lockdown: Lockdown,
    last_fall_ms: u64,
    soft_dropping: bool,
    last_action_was_rotation: bool,
    last_kick_index: usize,
    game_over: Option<GameOverCause>,
    game_over_piece: Option<PiecePose>,
    last_clear: Option<ClearInfo>,
    outgoing: u32,
    spawns: u64,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(config: RulesConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::from_position(config, seed, Board::new(), None)
    }

    /// Start from a prepared board. `first` overrides the bag's first piece.
    pub fn from_position(
        config: RulesConfig,
        seed: u64,
        board: Board,
        first: Option<Piece>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut game = Self::blank(config, seed, board, 0);
        match first {
            Some(piece) => game.spawn_piece(piece, 0),
            None => game.spawn_next(0),
        }
        Ok(game)
    }

    /// Fresh board, counters and bag; keeps the configuration.
    pub fn reset(&mut self, seed: u64, now_ms: u64) {
        *self = Self::blank(self.config.clone(), seed, Board::new(), now_ms);
        self.spawn_next(now_ms);
    }

    fn blank(config: RulesConfig, seed: u64, board: Board, now_ms: u64) -> Self {
        Self {
            config,
            board,
            active: None,
            hold: None,
            can_hold: true,
            bag: SevenBag::new(seed),
            rng: XorShift64::new(seed ^ GARBAGE_SEED_SALT),
            phase: Phase::Playing,
            delay_counter: 0,
            score: 0,
            combo: ComboCounter::new(),
            b2b: B2BTracker::new(),
            garbage: GarbageQueue::new(),
            lockdown: Lockdown::default(),
            last_fall_ms: now_ms,
            soft_dropping: false,
            last_action_was_rotation: false,
            last_kick_index: 0,
            game_over: None,
            game_over_piece: None,
            last_clear: None,
            outgoing: 0,
            spawns: 0,
            events: Vec::new(),
        }
    }

    /// Advance one tick.
    pub fn tick(&mut self, now_ms: u64) {
        if self.game_over.is_some() {
            return;
        }
        match self.phase {
            Phase::ClearAnimation => {
                self.delay_counter -= 1;
                if self.delay_counter <= 0 {
                    let removed = self.board.clear_lines();
                    log::debug!("cleared {removed} rows");
                    self.enter_phase(Phase::EntryDelay, self.config.entry_delay_frames);
                }
            }
            Phase::EntryDelay => {
                self.delay_counter -= 1;
                if self.delay_counter <= 0 {
                    self.spawn_next(now_ms);
                }
            }
            Phase::Playing => {
                if self.active.is_none() {
                    self.spawn_next(now_ms);
                    if self.game_over.is_some() {
                        return;
                    }
                }
                self.update_playing(now_ms);
            }
        }
    }

    /// Apply one input. Returns false when the input had no effect.
    pub fn apply_action(&mut self, action: GameAction, now_ms: u64) -> bool {
        if self.game_over.is_some() || self.phase != Phase::Playing || self.active.is_none() {
            if matches!(action, GameAction::StartSoftDrop | GameAction::StopSoftDrop) {
                self.soft_dropping = false;
            }
            return false;
        }
        match action {
            GameAction::None => false,
            GameAction::MoveLeft => self.shift(-1, now_ms),
            GameAction::MoveRight => self.shift(1, now_ms),
            GameAction::RotateLeft => self.rotate(false, now_ms),
            GameAction::RotateRight => self.rotate(true, now_ms),
            GameAction::SoftDrop => {
                let fell = self.fall_one(now_ms);
                if fell {
                    self.score += SOFT_DROP_SCORE_PER_CELL;
                }
                fell
            }
            GameAction::StartSoftDrop => self.set_soft_drop(true, now_ms),
            GameAction::StopSoftDrop => self.set_soft_drop(false, now_ms),
            GameAction::Hold => self.hold(now_ms),
            GameAction::HardDrop => self.hard_drop(),
        }
    }

    /// Queue incoming garbage; it lands on this player's next lock.
    pub fn receive_garbage(&mut self, lines: u32) {
        if lines == 0 || self.game_over.is_some() {
            return;
        }
        self.garbage.receive(lines);
        self.events.push(GameEvent::GarbageQueued {
            lines,
            pending: self.garbage.pending(),
        });
    }

    /// Cancel pending garbage with outgoing attack; returns the leftover.
    pub fn offset_garbage(&mut self, attack: u32) -> u32 {
        self.garbage.offset(attack)
    }

    /// Rows sent since the last call.
    pub fn take_outgoing(&mut self) -> u32 {
        std::mem::take(&mut self.outgoing)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Owned copy for the planner, or None when there is no active piece.
    pub fn snapshot(&self) -> Option<Snapshot> {
        if self.game_over.is_some() {
            return None;
        }
        let current = self.active?.piece;
        Some(Snapshot {
            board: self.board.clone(),
            current,
            hold: self.hold,
            can_hold: self.can_hold,
            queue: self.preview(),
        })
    }

    fn update_playing(&mut self, now_ms: u64) {
        let Some(pose) = self.active else {
            return;
        };
        if self.grounded(&pose) {
            if !self.lockdown.active {
                self.lockdown.active = true;
                self.lockdown.start_ms = now_ms;
            } else if now_ms.saturating_sub(self.lockdown.start_ms) > self.config.gravity.lock_delay_ms
            {
                self.lock_piece();
            }
        } else {
            self.lockdown.active = false;
            self.lockdown.resets = 0;
            let interval = self.config.gravity.interval_ms(self.soft_dropping);
            if now_ms.saturating_sub(self.last_fall_ms) > interval
                && self.fall_one(now_ms)
                && self.soft_dropping
            {
                self.score += SOFT_DROP_SCORE_PER_CELL;
            }
        }
    }

    fn grounded(&self, pose: &PiecePose) -> bool {
        pose_grounded(&self.board, pose)
    }

    fn fall_one(&mut self, now_ms: u64) -> bool {
        let Some(pose) = self.active.as_mut() else {
            return false;
        };
        let Some(y) = try_drop(&self.board, pose.piece, pose.rotation, pose.x, pose.y) else {
            return false;
        };
        pose.y = y;
        self.last_fall_ms = now_ms;
        self.last_action_was_rotation = false;
        self.lockdown.resets = 0;
        true
    }

    fn shift(&mut self, dx: i8, now_ms: u64) -> bool {
        let Some(pose) = self.active.as_mut() else {
            return false;
        };
        let Some(x) = try_move(&self.board, pose.piece, pose.rotation, pose.x, pose.y, dx) else {
            return false;
        };
        pose.x = x;
        self.last_action_was_rotation = false;
        self.after_successful_move(now_ms);
        true
    }

    fn rotate(&mut self, clockwise: bool, now_ms: u64) -> bool {
        let Some(pose) = self.active.as_mut() else {
            return false;
        };
        let Some(result) =
            try_rotate(&self.board, pose.piece, pose.rotation, pose.x, pose.y, clockwise)
        else {
            return false;
        };
        *pose = result.pose(pose.piece);
        self.last_action_was_rotation = true;
        self.last_kick_index = result.kick_index;
        self.after_successful_move(now_ms);
        true
    }

    /// Grounded moves restart the lock timer until the reset budget runs out,
    /// after which they lock immediately.
    fn after_successful_move(&mut self, now_ms: u64) {
        let Some(pose) = self.active else {
            return;
        };
        if !self.grounded(&pose) {
            return;
        }
        if self.lockdown.resets < self.config.gravity.max_lockdown_resets {
            self.lockdown.start_ms = now_ms;
            self.lockdown.resets += 1;
        } else {
            self.lock_piece();
        }
    }

    fn set_soft_drop(&mut self, engaged: bool, now_ms: u64) -> bool {
        self.soft_dropping = engaged;
        if engaged {
            let interval = self.config.gravity.soft_drop_interval_ms();
            if now_ms.saturating_sub(self.last_fall_ms) >= interval && self.fall_one(now_ms) {
                self.score += SOFT_DROP_SCORE_PER_CELL;
            }
        }
        true
    }

    fn hard_drop(&mut self) -> bool {
        let Some(pose) = self.active.as_mut() else {
            return false;
        };
        // The rotation flag survives a hard drop
        let cells = drop_distance(&self.board, pose) as u64;
        pose.y -= cells as i8;
        self.score += cells * HARD_DROP_SCORE_PER_CELL;
        self.lockdown.resets = 0;
        self.lock_piece();
        true
    }

    fn hold(&mut self, now_ms: u64) -> bool {
        if !self.can_hold {
            return false;
        }
        let Some(pose) = self.active.take() else {
            return false;
        };
        self.can_hold = false;
        self.lockdown = Lockdown::default();
        match self.hold.replace(pose.piece) {
            None => {
                self.enter_phase(Phase::EntryDelay, self.config.entry_delay_frames);
            }
            Some(swapped) => self.spawn_piece(swapped, now_ms),
        }
        true
    }

    fn lock_piece(&mut self) {
        let Some(pose) = self.active.take() else {
            return;
        };
        self.lockdown = Lockdown::default();
        self.last_clear = None;

        if pose.is_above_visible() {
            self.board.place_minos(pose.piece, &pose.minos(), pose.x, pose.y);
            self.set_game_over(GameOverCause::LockOut, Some(pose));
            return;
        }

        let info = resolve_clear(
            &mut self.board,
            &pose,
            self.last_action_was_rotation,
            &mut self.b2b,
            &mut self.combo,
            &mut self.garbage,
            &self.config,
        );
        self.score += info.score_delta;
        self.can_hold = true;
        log::debug!(
            "locked {:?} at ({}, {}) {:?}: {} lines, {} sent",
            pose.piece,
            pose.x,
            pose.y,
            pose.rotation,
            info.lines,
            info.sent
        );

        if info.lines > 0 {
            if info.sent > 0 {
                self.outgoing += info.sent;
                self.events.push(GameEvent::AttackSent { lines: info.sent });
            }
            self.last_clear = Some(info.clone());
            self.enter_phase(Phase::ClearAnimation, self.config.clear_delay_frames);
        } else {
            self.enter_phase(Phase::EntryDelay, self.config.entry_delay_frames);
        }
        self.events.push(GameEvent::Locked(info));
        self.apply_garbage();
    }

    fn apply_garbage(&mut self) {
        let lines = self
            .garbage
            .take_application(self.config.max_garbage_per_application);
        if lines == 0 {
            return;
        }
        let hole = self.rng.below(Board::WIDTH);
        let overflow = self.board.add_garbage_lines(lines as usize, hole);
        self.events.push(GameEvent::GarbageApplied { lines, hole });
        if overflow {
            self.set_game_over(GameOverCause::GarbageOverflow, None);
        }
    }

    fn spawn_next(&mut self, now_ms: u64) {
        let piece = self.bag.next_piece();
        self.spawn_piece(piece, now_ms);
    }

    /// Place `piece` at the spawn pose, one row higher if blocked.
    fn spawn_piece(&mut self, piece: Piece, now_ms: u64) {
        self.phase = Phase::Playing;
        self.delay_counter = 0;
        self.lockdown = Lockdown::default();
        self.last_fall_ms = now_ms;
        self.last_action_was_rotation = false;
        self.last_kick_index = 0;

        let pose = PiecePose::spawn(piece);
        let pose = if pose.fits(&self.board) {
            pose
        } else {
            pose.shifted(0, 1)
        };
        if !pose.fits(&self.board) {
            self.active = None;
            self.set_game_over(GameOverCause::BlockOut, Some(pose));
            return;
        }
        self.active = Some(pose);
        self.spawns += 1;
        self.events.push(GameEvent::Spawned { piece });
    }

    fn enter_phase(&mut self, phase: Phase, frames: u32) {
        log::debug!("{:?} -> {:?} ({} frames)", self.phase, phase, frames);
        self.phase = phase;
        self.delay_counter = frames as i64;
    }

    fn set_game_over(&mut self, cause: GameOverCause, piece: Option<PiecePose>) {
        if self.game_over.is_some() {
            return;
        }
        log::info!("game over: {cause:?}");
        self.game_over = Some(cause);
        if piece.is_some() {
            self.game_over_piece = piece;
        }
        self.active = None;
        self.soft_dropping = false;
        self.events.push(GameEvent::GameOver { cause });
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active_piece(&self) -> Option<PiecePose> {
        self.active
    }

    /// Ghost landing row for the active piece.
    pub fn ghost_y(&self) -> Option<i8> {
        let pose = self.active?;
        Some(landing_pose(&self.board, &pose).y)
    }

    pub fn hold_piece(&self) -> Option<Piece> {
        self.hold
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn preview(&self) -> Vec<Piece> {
        self.bag.preview(self.config.preview_len)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn combo(&self) -> i32 {
        self.combo.get()
    }

    pub fn is_b2b_active(&self) -> bool {
        self.b2b.active
    }

    pub fn pending_garbage(&self) -> u32 {
        self.garbage.pending()
    }

    pub fn lockdown_resets(&self) -> u32 {
        self.lockdown.resets
    }

    pub fn is_lockdown_active(&self) -> bool {
        self.lockdown.active
    }

    pub fn is_soft_dropping(&self) -> bool {
        self.soft_dropping
    }

    pub fn last_action_was_rotation(&self) -> bool {
        self.last_action_was_rotation
    }

    pub fn last_kick_index(&self) -> usize {
        self.last_kick_index
    }

    pub fn last_clear(&self) -> Option<&ClearInfo> {
        self.last_clear.as_ref()
    }

    /// Pieces spawned so far, hold swaps included.
    pub fn spawn_count(&self) -> u64 {
        self.spawns
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over.is_some()
    }

    pub fn game_over_cause(&self) -> Option<GameOverCause> {
        self.game_over
    }

    /// The piece that ended the game, for block-out and lock-out.
    pub fn game_over_piece(&self) -> Option<PiecePose> {
        self.game_over_piece
    }
}
