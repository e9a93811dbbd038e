use versus_core::{Board, Piece, Snapshot};
use versus_engine::generate_moves_with_hold;
use versus_eval::{EvalInput, HeuristicEvaluator};
use versus_search::{BeamConfig, BeamSearch};

fn ragged() -> Board {
    let mut board = Board::new();
    let heights = [4, 3, 3, 1, 0, 2, 2, 3, 4, 0];
    for (x, &h) in heights.iter().enumerate() {
        for y in 0..h {
            board.set(x, y, true);
        }
    }
    board
}

fn search(beam_width: usize, depth: usize) -> BeamSearch<HeuristicEvaluator> {
    BeamSearch::new(
        BeamConfig {
            beam_width,
            depth,
            ..BeamConfig::heuristic()
        },
        HeuristicEvaluator::default(),
    )
}

#[test]
fn test_width_one_depth_one_is_greedy() {
    let snap = Snapshot::new(ragged(), Piece::L, vec![Piece::J, Piece::T]);
    let eval = HeuristicEvaluator::default();

    let candidates = generate_moves_with_hold(&snap);
    let mut best = 0;
    let mut best_score = f32::NEG_INFINITY;
    for (i, spot) in candidates.iter().enumerate() {
        let score = eval.score(&EvalInput::with_candidate(&snap.board, &spot.pose));
        if score > best_score {
            best_score = score;
            best = i;
        }
    }

    let decision = search(1, 1)
        .find_best_move(&snap)
        .expect("heuristic never fails")
        .expect("a move exists");
    assert_eq!(decision.plies, 1);
    assert_eq!(decision.spot.pose, candidates[best].pose);
    assert_eq!(decision.spot.used_hold, candidates[best].used_hold);
    assert!((decision.score - best_score as f64).abs() < 1e-6);
}

#[test]
fn test_takes_the_line_clear() {
    let mut board = Board::new();
    for y in 0..4 {
        for x in 0..9 {
            board.set(x, y, true);
        }
    }
    let mut snap = Snapshot::new(board, Piece::I, vec![Piece::O, Piece::O]);
    snap.can_hold = false;
    let decision = search(15, 3)
        .find_best_move(&snap)
        .expect("heuristic never fails")
        .expect("a move exists");
    assert_eq!(decision.spot.lines_cleared, 4);
}

#[test]
fn test_snapshot_untouched() {
    let snap = Snapshot::new(ragged(), Piece::T, vec![Piece::I, Piece::S, Piece::Z]);
    let before = snap.clone();
    let _ = search(15, 5).find_best_move(&snap);
    assert_eq!(snap, before);
}

#[test]
fn test_deterministic() {
    let snap = Snapshot::new(ragged(), Piece::S, vec![Piece::Z, Piece::T, Piece::I, Piece::O]);
    let a = search(15, 5).find_best_move(&snap).expect("ok");
    let b = search(15, 5).find_best_move(&snap).expect("ok");
    assert_eq!(a, b);
}
