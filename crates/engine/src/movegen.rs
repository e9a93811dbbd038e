//! Reachable landing spots for a piece, with the inputs that reach them.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use versus_core::{
    ActionPath, Board, GameAction, LandingSpot, Piece, PiecePose, Rotation, Snapshot, SpinType,
};

use crate::apply::apply_pose;
use crate::collision::{can_place, hard_drop_y, is_grounded};
use crate::movement::{detect_spin, try_drop, try_move, try_rotate};
use crate::scoring::base_score;

/// Hard cap on expanded states: padded width x height x rotations x grounded.
pub const MAX_EXPANDED_STATES: usize = 14 * Board::HEIGHT * 4 * 2;

/// Transition order is part of the contract: it decides which path wins a tie.
const TRANSITIONS: [GameAction; 5] = [
    GameAction::MoveLeft,
    GameAction::MoveRight,
    GameAction::SoftDrop,
    GameAction::RotateLeft,
    GameAction::RotateRight,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct SearchState {
    x: i8,
    y: i8,
    rotation: Rotation,
    grounded: bool,
}

#[derive(Clone, Copy, Debug)]
struct SearchNode {
    state: SearchState,
    parent: Option<usize>,
    action: GameAction,
}

/// Spawn pose, nudged one row up when the canonical cell is blocked.
pub fn spawn_pose(board: &Board, piece: Piece) -> Option<PiecePose> {
    let pose = PiecePose::spawn(piece);
    if pose.fits(board) {
        return Some(pose);
    }
    let nudged = pose.shifted(0, 1);
    nudged.fits(board).then_some(nudged)
}

/// Breadth-first search over (x, y, rotation, grounded) from the spawn pose.
/// Every first-seen (x, resting y, rotation) yields one landing spot whose path
/// ends in a hard drop (not included in the path).
pub fn generate_moves(board: &Board, piece: Piece, used_hold: bool) -> Vec<LandingSpot> {
    let mut spots = Vec::new();
    let Some(start) = spawn_pose(board, piece) else {
        return spots;
    };

    let mut nodes: Vec<SearchNode> = Vec::with_capacity(256);
    let mut visited: FxHashSet<SearchState> = FxHashSet::default();
    let mut found: FxHashMap<(i8, i8, Rotation), usize> = FxHashMap::default();
    let mut queue = VecDeque::new();

    let start_state = SearchState {
        x: start.x,
        y: start.y,
        rotation: start.rotation,
        grounded: is_grounded(board, piece, start.rotation, start.x, start.y),
    };
    visited.insert(start_state);
    nodes.push(SearchNode {
        state: start_state,
        parent: None,
        action: GameAction::None,
    });
    queue.push_back(0usize);

    let mut expanded = 0usize;
    while let Some(index) = queue.pop_front() {
        if expanded >= MAX_EXPANDED_STATES {
            log::warn!("move enumeration hit the {MAX_EXPANDED_STATES} state ceiling");
            break;
        }
        expanded += 1;

        let curr = nodes[index].state;
        let rest_y = if curr.grounded {
            curr.y
        } else {
            hard_drop_y(board, piece, curr.rotation, curr.x, curr.y)
        };
        let key = (curr.x, rest_y, curr.rotation);
        if !found.contains_key(&key) {
            found.insert(key, spots.len());
            let path = reconstruct_path(&nodes, index);
            let pose = PiecePose::new(piece, curr.rotation, curr.x, rest_y);
            spots.push(landing_spot(board, pose, path, used_hold));
        }

        for action in TRANSITIONS {
            if curr.grounded && action == GameAction::SoftDrop {
                continue;
            }
            let Some((x, y, rotation)) = step(board, piece, &curr, action) else {
                continue;
            };
            let next = SearchState {
                x,
                y,
                rotation,
                grounded: is_grounded(board, piece, rotation, x, y),
            };
            if visited.insert(next) {
                nodes.push(SearchNode {
                    state: next,
                    parent: Some(index),
                    action,
                });
                queue.push_back(nodes.len() - 1);
            }
        }
    }

    spots
}

/// Candidates for the current piece followed by the hold alternative, if any.
pub fn generate_moves_with_hold(snapshot: &Snapshot) -> Vec<LandingSpot> {
    let mut moves = generate_moves(&snapshot.board, snapshot.current, false);
    if let Some(alternative) = snapshot.hold_alternative() {
        moves.extend(generate_moves(&snapshot.board, alternative, true));
    }
    moves
}

fn step(
    board: &Board,
    piece: Piece,
    curr: &SearchState,
    action: GameAction,
) -> Option<(i8, i8, Rotation)> {
    let (x, y, rot) = (curr.x, curr.y, curr.rotation);
    match action {
        GameAction::MoveLeft => try_move(board, piece, rot, x, y, -1).map(|nx| (nx, y, rot)),
        GameAction::MoveRight => try_move(board, piece, rot, x, y, 1).map(|nx| (nx, y, rot)),
        GameAction::SoftDrop => try_drop(board, piece, rot, x, y).map(|ny| (x, ny, rot)),
        GameAction::RotateLeft | GameAction::RotateRight => {
            let clockwise = action == GameAction::RotateRight;
            try_rotate(board, piece, rot, x, y, clockwise)
                .map(|r| (r.new_x, r.new_y, r.new_rotation))
        }
        _ => None,
    }
}

fn reconstruct_path(nodes: &[SearchNode], mut index: usize) -> ActionPath {
    let mut path = ActionPath::new();
    while let Some(parent) = nodes[index].parent {
        if nodes[index].action != GameAction::None {
            path.push(nodes[index].action);
        }
        index = parent;
    }
    path.reverse();
    path
}

fn landing_spot(
    board: &Board,
    pose: PiecePose,
    path: ActionPath,
    used_hold: bool,
) -> LandingSpot {
    debug_assert!(can_place(board, pose.piece, pose.rotation, pose.x, pose.y));
    // The closing hard drop keeps the rotation flag, so a path ending in a turn
    // is judged by the corners at the landing pose
    let spin = if path.last().is_some_and(|a| a.is_rotation()) {
        detect_spin(board, &pose)
    } else {
        SpinType::None
    };
    let (board_after, lines_cleared) = apply_pose(board, &pose);
    let score_delta = if lines_cleared > 0 {
        base_score(lines_cleared, spin)
    } else {
        0
    };
    LandingSpot {
        path,
        board_after,
        lines_cleared,
        spin,
        score_delta,
        used_hold,
        pose,
        oracle_score: None,
    }
}
