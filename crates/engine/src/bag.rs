use std::collections::VecDeque;

use versus_core::Piece;

use crate::rng::XorShift64;

/// 7-bag randomizer. Holds at least one full bag ahead so the preview is
/// always populated.
#[derive(Clone, Debug)]
pub struct SevenBag {
    pieces: VecDeque<Piece>,
    rng: XorShift64,
}

impl SevenBag {
    pub fn new(seed: u64) -> Self {
        let mut bag = Self {
            pieces: VecDeque::with_capacity(Piece::ALL.len() * 3),
            rng: XorShift64::new(seed),
        };
        bag.refill();
        bag.refill();
        bag
    }

    fn refill(&mut self) {
        let mut set = Piece::ALL;
        self.rng.shuffle(&mut set);
        self.pieces.extend(set);
    }

    pub fn next_piece(&mut self) -> Piece {
        if self.pieces.len() <= Piece::ALL.len() {
            self.refill();
        }
        // refill guarantees at least one bag is queued
        self.pieces.pop_front().unwrap_or(Piece::I)
    }

    pub fn peek(&self) -> Option<Piece> {
        self.pieces.front().copied()
    }

    /// Up to `n` upcoming pieces, next first.
    pub fn preview(&self, n: usize) -> Vec<Piece> {
        self.pieces.iter().take(n).copied().collect()
    }

    pub fn remaining(&self) -> usize {
        self.pieces.len()
    }
}
