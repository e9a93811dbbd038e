use versus_core::SpinType;

/// Back-to-back state: whether the most recent line clear was difficult.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct B2BTracker {
    pub active: bool,
}

impl B2BTracker {
    pub fn new() -> Self {
        Self { active: false }
    }

    pub fn reset(&mut self) {
        self.active = false;
    }

    /// Register a line clear. Returns true when the back-to-back bonus applies.
    /// Non-clearing locks leave the chain untouched and must not be passed in.
    pub fn register_clear(&mut self, lines: u8, spin: SpinType) -> bool {
        debug_assert!(lines > 0);
        let difficult = is_difficult(lines, spin);
        let applied = self.active && difficult;
        self.active = difficult;
        applied
    }
}

/// Spins of any kind and quads keep a back-to-back chain alive.
pub fn is_difficult(lines: u8, spin: SpinType) -> bool {
    spin != SpinType::None || lines == 4
}
