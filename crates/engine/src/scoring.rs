//! Points awarded for clears.

use versus_core::SpinType;

pub const COMBO_SCORE_STEP: u64 = 50;
pub const SOFT_DROP_SCORE_PER_CELL: u64 = 1;
pub const HARD_DROP_SCORE_PER_CELL: u64 = 2;

pub fn base_score(lines: u8, spin: SpinType) -> u64 {
    match spin {
        SpinType::Full => match lines {
            1 => 800,
            2 => 1200,
            3 => 1600,
            _ => 400,
        },
        SpinType::Mini => match lines {
            1 => 200,
            2 => 400,
            _ => 100,
        },
        SpinType::None => match lines {
            1 => 100,
            2 => 300,
            3 => 500,
            4 => 800,
            _ => 0,
        },
    }
}

/// Base points, x1.5 on back-to-back, then the combo addend.
pub fn clear_score(lines: u8, spin: SpinType, back_to_back: bool, combo: i32) -> u64 {
    let mut score = base_score(lines, spin);
    if back_to_back {
        score = score * 3 / 2;
    }
    if combo > 0 {
        score += COMBO_SCORE_STEP * combo as u64;
    }
    score
}
