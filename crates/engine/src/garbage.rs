/// Incoming garbage rows waiting to be inserted into one player's board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GarbageQueue {
    pending: u32,
}

impl GarbageQueue {
    pub fn new() -> Self {
        Self { pending: 0 }
    }

    pub fn pending(&self) -> u32 {
        self.pending
    }

    pub fn receive(&mut self, lines: u32) {
        self.pending = self.pending.saturating_add(lines);
    }

    /// Cancel pending rows with outgoing attack. Returns the attack left over
    /// once the queue is empty.
    pub fn offset(&mut self, attack: u32) -> u32 {
        let overflow = attack.saturating_sub(self.pending);
        self.pending = self.pending.saturating_sub(attack);
        overflow
    }

    /// Remove and return the rows for one application, at most `cap`.
    pub fn take_application(&mut self, cap: u32) -> u32 {
        let lines = self.pending.min(cap);
        self.pending -= lines;
        lines
    }

    pub fn reset(&mut self) {
        self.pending = 0;
    }
}
