use versus_core::SpinType;

pub const SINGLE: u32 = 0;
pub const DOUBLE: u32 = 1;
pub const TRIPLE: u32 = 2;
pub const QUAD: u32 = 4;

/// Full spins send two rows per cleared line.
pub const TSPIN_PER_LINE: u32 = 2;
pub const TSPIN_MINI_DOUBLE: u32 = 2;
pub const TSPIN_MINI: u32 = 1;

pub const BACK_TO_BACK_BONUS: u32 = 1;

/// Bonus rows by combo count; counts past the end use the last entry.
pub const COMBO_TABLE: [u32; 12] = [0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 4, 5];

pub fn base_attack(lines: u8, spin: SpinType) -> u32 {
    match spin {
        SpinType::Full => lines as u32 * TSPIN_PER_LINE,
        SpinType::Mini => {
            if lines == 2 {
                TSPIN_MINI_DOUBLE
            } else {
                TSPIN_MINI
            }
        }
        SpinType::None => match lines {
            1 => SINGLE,
            2 => DOUBLE,
            3 => TRIPLE,
            4 => QUAD,
            _ => 0,
        },
    }
}

/// `combo` uses the -1 "no chain" sentinel; the bonus starts at combo 1.
pub fn combo_bonus(combo: i32) -> u32 {
    if combo < 1 {
        return 0;
    }
    let index = (combo as usize).min(COMBO_TABLE.len() - 1);
    COMBO_TABLE[index]
}

/// Outgoing rows for one line-clearing lock, before offsetting.
pub fn calculate_attack(lines: u8, spin: SpinType, back_to_back: bool, combo: i32) -> u32 {
    let mut garbage = base_attack(lines, spin);

    if back_to_back && garbage > 0 {
        garbage += BACK_TO_BACK_BONUS;
    }

    garbage + combo_bonus(combo)
}
