/// Sentinel for "no active chain".
pub const NO_COMBO: i32 = -1;

/// Consecutive line-clearing locks. Starts at -1 so the first clear is combo 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComboCounter {
    count: i32,
}

impl ComboCounter {
    pub fn new() -> Self {
        Self { count: NO_COMBO }
    }

    /// Advance on a lock and return the new count.
    pub fn register_lock(&mut self, lines: u8) -> i32 {
        if lines > 0 {
            self.count += 1;
        } else {
            self.count = NO_COMBO;
        }
        self.count
    }

    pub fn get(&self) -> i32 {
        self.count
    }

    pub fn reset(&mut self) {
        self.count = NO_COMBO;
    }
}

impl Default for ComboCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_without_chain() {
        assert_eq!(ComboCounter::new().get(), -1);
    }

    #[test]
    fn test_consecutive_clears_increment() {
        let mut combo = ComboCounter::new();
        assert_eq!(combo.register_lock(1), 0);
        assert_eq!(combo.register_lock(2), 1);
        assert_eq!(combo.register_lock(4), 2);
    }

    #[test]
    fn test_non_clearing_lock_resets() {
        let mut combo = ComboCounter::new();
        combo.register_lock(1);
        combo.register_lock(1);
        assert_eq!(combo.register_lock(0), -1);
        assert_eq!(combo.register_lock(1), 0);
    }
}
