//! versus core crate - fundamental types shared by the rules engine and the planner.

mod board;
mod board_heights;
mod landing;
mod moves;
mod piece;
mod state;

pub use board::{Board, Cell};
pub use board_heights::BoardWithHeights;
pub use landing::{ActionPath, LandingSpot};
pub use moves::{GameAction, SpinType};
pub use piece::{Piece, PiecePose, Rotation};
pub use state::Snapshot;
