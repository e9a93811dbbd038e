//! Lock resolution: commit the piece, classify the clear, settle score,
//! attack, combo and back-to-back.

use serde::{Deserialize, Serialize};
use versus_core::{Board, PiecePose, SpinType};

use crate::attack::calculate_attack;
use crate::b2b::B2BTracker;
use crate::combo::ComboCounter;
use crate::config::RulesConfig;
use crate::garbage::GarbageQueue;
use crate::movement::detect_spin;
use crate::scoring::clear_score;

/// Report for one lock.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearInfo {
    /// Display name such as "T-SPIN DOUBLE" or "QUAD"
    pub label: String,
    pub lines: u8,
    pub spin: SpinType,
    pub back_to_back: bool,
    pub combo: i32,
    pub perfect_clear: bool,
    /// Attack before offsetting against incoming garbage
    pub attack: u32,
    /// Rows actually routed to the opponent, perfect clear bonus included
    pub sent: u32,
    pub score_delta: u64,
}

pub fn clear_label(lines: u8, spin: SpinType) -> String {
    if lines == 4 && spin == SpinType::None {
        return "QUAD".to_string();
    }
    let prefix = match spin {
        SpinType::Full => "T-SPIN",
        SpinType::Mini => "T-SPIN MINI",
        SpinType::None => "",
    };
    let count = match lines {
        1 => "SINGLE",
        2 => "DOUBLE",
        3 => "TRIPLE",
        4 => "QUAD",
        _ => "",
    };
    match (prefix.is_empty(), count.is_empty()) {
        (true, _) => count.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{prefix} {count}"),
    }
}

/// Place `pose` and settle the clear it makes. Full rows are counted but left
/// in place; the caller removes them once the clear animation ends.
///
/// `rotated_last` must be true only when the final successful input before
/// the lock was a rotation.
pub fn resolve_clear(
    board: &mut Board,
    pose: &PiecePose,
    rotated_last: bool,
    b2b: &mut B2BTracker,
    combo: &mut ComboCounter,
    garbage: &mut GarbageQueue,
    config: &RulesConfig,
) -> ClearInfo {
    // spin corners are read before the piece is committed
    let spin = if rotated_last {
        detect_spin(board, pose)
    } else {
        SpinType::None
    };

    board.place_minos(pose.piece, &pose.minos(), pose.x, pose.y);
    let lines = board.count_full_lines();

    if lines == 0 {
        combo.register_lock(0);
        return ClearInfo {
            label: clear_label(0, spin),
            lines,
            spin,
            back_to_back: false,
            combo: combo.get(),
            perfect_clear: false,
            attack: 0,
            sent: 0,
            score_delta: 0,
        };
    }

    let perfect_clear = board.clears_to_empty();
    let combo_count = combo.register_lock(lines);
    let back_to_back = b2b.register_clear(lines, spin);

    let attack = calculate_attack(lines, spin, back_to_back, combo_count);
    let mut score_delta = clear_score(lines, spin, back_to_back, combo_count);
    let mut sent = if attack > 0 { garbage.offset(attack) } else { 0 };

    if perfect_clear {
        score_delta += config.perfect_clear_score;
        sent += config.perfect_clear_attack;
    }

    ClearInfo {
        label: clear_label(lines, spin),
        lines,
        spin,
        back_to_back,
        combo: combo_count,
        perfect_clear,
        attack,
        sent,
        score_delta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use versus_core::{Piece, Rotation};

    struct Fixture {
        board: Board,
        b2b: B2BTracker,
        combo: ComboCounter,
        garbage: GarbageQueue,
        config: RulesConfig,
    }

    impl Fixture {
        fn new(board: Board) -> Self {
            Self {
                board,
                b2b: B2BTracker::new(),
                combo: ComboCounter::new(),
                garbage: GarbageQueue::new(),
                config: RulesConfig::versus(),
            }
        }

        fn lock(&mut self, pose: PiecePose, rotated_last: bool) -> ClearInfo {
            let info = resolve_clear(
                &mut self.board,
                &pose,
                rotated_last,
                &mut self.b2b,
                &mut self.combo,
                &mut self.garbage,
                &self.config,
            );
            self.board.clear_lines();
            info
        }
    }

    /// Twelve rows filled except column 9, enough for two quads with rows to spare.
    fn quad_well() -> Board {
        let mut board = Board::new();
        for y in 0..12 {
            for x in 0..9 {
                board.set(x, y, true);
            }
        }
        board
    }

    fn vertical_i() -> PiecePose {
        // East I occupies column x+1, rows y-2..=y+1
        PiecePose::new(Piece::I, Rotation::East, 8, 2)
    }

    #[test]
    fn test_labels() {
        assert_eq!(clear_label(2, SpinType::Full), "T-SPIN DOUBLE");
        assert_eq!(clear_label(1, SpinType::Mini), "T-SPIN MINI SINGLE");
        assert_eq!(clear_label(4, SpinType::None), "QUAD");
        assert_eq!(clear_label(3, SpinType::None), "TRIPLE");
        assert_eq!(clear_label(0, SpinType::Full), "T-SPIN");
        assert_eq!(clear_label(0, SpinType::None), "");
    }

    #[test]
    fn test_no_clear_resets_combo_keeps_b2b() {
        let mut fx = Fixture::new(Board::new());
        fx.b2b.active = true;
        let info = fx.lock(PiecePose::new(Piece::O, Rotation::North, 0, 0), false);
        assert_eq!(info.lines, 0);
        assert_eq!(info.combo, -1);
        assert!(fx.b2b.active);
        assert_eq!(info.score_delta, 0);
    }

    #[test]
    fn test_quad_then_b2b_quad() {
        let mut fx = Fixture::new(quad_well());
        let first = fx.lock(vertical_i(), false);
        assert_eq!(first.label, "QUAD");
        assert_eq!(first.lines, 4);
        assert!(!first.back_to_back);
        assert_eq!(first.combo, 0);
        assert_eq!(first.attack, 4);
        assert_eq!(first.score_delta, 800);

        let second = fx.lock(vertical_i(), false);
        assert!(second.back_to_back);
        assert_eq!(second.combo, 1);
        // 4 + b2b 1 + combo(1) 0
        assert_eq!(second.attack, 5);
        // 800 * 1.5 + 50 * 1
        assert_eq!(second.score_delta, 1250);
        assert!(!second.perfect_clear);
    }

    #[test]
    fn test_attack_offsets_incoming() {
        let mut fx = Fixture::new(quad_well());
        fx.garbage.receive(3);
        let info = fx.lock(vertical_i(), false);
        assert_eq!(info.attack, 4);
        assert_eq!(info.sent, 1);
        assert_eq!(fx.garbage.pending(), 0);
    }

    #[test]
    fn test_perfect_clear_bonus() {
        let mut board = Board::new();
        for x in 0..6 {
            board.set(x, 0, true);
        }
        let mut fx = Fixture::new(board);
        fx.garbage.receive(2);
        // flat I fills columns 6..=9
        let info = fx.lock(PiecePose::new(Piece::I, Rotation::North, 7, 0), false);
        assert!(info.perfect_clear);
        assert_eq!(info.score_delta, 100 + 3000);
        // single sends nothing to offset; the bonus bypasses pending garbage
        assert_eq!(info.sent, 10);
        assert_eq!(fx.garbage.pending(), 2);
        assert!(fx.board.is_empty());
    }

    #[test]
    fn test_tspin_double_needs_rotation() {
        let mut board = Board::new();
        for x in 0..Board::WIDTH {
            if x != 4 {
                board.set(x, 0, true);
            }
            if !(3..=5).contains(&x) {
                board.set(x, 1, true);
            }
        }
        board.set(3, 2, true);
        board.set(9, 2, true);
        let pose = PiecePose::new(Piece::T, Rotation::South, 4, 1);

        let mut spun = Fixture::new(board.clone());
        let info = spun.lock(pose, true);
        assert_eq!(info.label, "T-SPIN DOUBLE");
        assert_eq!(info.attack, 4);
        assert_eq!(info.score_delta, 1200);
        assert!(spun.b2b.active);

        let mut slid = Fixture::new(board);
        let info = slid.lock(pose, false);
        assert_eq!(info.spin, SpinType::None);
        assert_eq!(info.label, "DOUBLE");
        assert_eq!(info.attack, 1);
    }
}
