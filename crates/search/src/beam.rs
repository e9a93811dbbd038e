use std::cmp::Ordering;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use versus_core::{Board, LandingSpot, Piece, Snapshot};
use versus_engine::{generate_moves, generate_moves_with_hold};
use versus_eval::{evaluate_checked, Denormalization, EvalInput, Evaluator};

use crate::SearchError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamConfig {
    pub beam_width: usize,
    /// Plies searched, the first move included.
    pub depth: usize,
    pub denormalization: Denormalization,
}

impl BeamConfig {
    /// Settings for an oracle whose output is already in score units.
    pub fn heuristic() -> Self {
        Self {
            denormalization: Denormalization::IDENTITY,
            ..Self::default()
        }
    }
}

impl Default for BeamConfig {
    fn default() -> Self {
        Self {
            beam_width: 15,
            depth: 5,
            denormalization: Denormalization::MODEL,
        }
    }
}

/// Chosen first move and how the search arrived at it.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    /// First-ply candidate, with its oracle score filled in.
    pub spot: LandingSpot,
    /// Cumulative reward plus oracle score of the best leaf.
    pub score: f64,
    pub plies: usize,
    pub first_ply_candidates: usize,
}

#[derive(Clone, Debug)]
struct SearchNode {
    board: Board,
    reward: f64,
    total: f64,
    /// Index into the retained first-ply candidates.
    first_move: usize,
    queue_offset: usize,
}

pub struct BeamSearch<E> {
    pub config: BeamConfig,
    pub evaluator: E,
}

impl<E: Evaluator> BeamSearch<E> {
    pub fn new(config: BeamConfig, evaluator: E) -> Self {
        Self {
            config: BeamConfig {
                beam_width: config.beam_width.max(1),
                depth: config.depth.max(1),
                ..config
            },
            evaluator,
        }
    }

    /// Best first move for `snapshot`, or None when the piece cannot land.
    /// An oracle failure at any ply aborts the whole search.
    pub fn find_best_move(&self, snapshot: &Snapshot) -> Result<Option<Decision>, SearchError> {
        let candidates = generate_moves_with_hold(snapshot);
        if candidates.is_empty() {
            return Ok(None);
        }
        let first_ply_candidates = candidates.len();

        let roots = self.rank_first_ply(snapshot, candidates)?;
        let mut beam: Vec<SearchNode> = roots
            .iter()
            .enumerate()
            .map(|(i, spot)| SearchNode {
                board: spot.board_after.clone(),
                reward: spot.score_delta as f64,
                total: spot.oracle_score.unwrap_or(f64::NEG_INFINITY),
                first_move: i,
                queue_offset: snapshot.queue_offset_after(spot.used_hold),
            })
            .collect();

        let mut plies = 1;
        while plies < self.config.depth {
            let (live, pieces) = next_pieces(&beam, &snapshot.queue, plies - 1);
            if live.is_empty() {
                break;
            }
            if live.len() < beam.len() {
                log::debug!(
                    "ply {plies}: {} nodes ran past the preview",
                    beam.len() - live.len()
                );
            }
            let children = expand(&live, &pieces);
            if children.is_empty() {
                break;
            }
            beam = self.rank_children(snapshot, children)?;
            plies += 1;
        }

        let Some(best) = beam.first() else {
            return Ok(None);
        };
        log::debug!(
            "search: {} candidates, {} plies, best {:.1}",
            first_ply_candidates,
            plies,
            best.total
        );
        Ok(Some(Decision {
            spot: roots[best.first_move].clone(),
            score: best.total,
            plies,
            first_ply_candidates,
        }))
    }

    /// Ply 0 ranks by oracle score alone, on the board before placement with
    /// the candidate on the mask plane.
    fn rank_first_ply(
        &self,
        snapshot: &Snapshot,
        candidates: Vec<LandingSpot>,
    ) -> Result<Vec<LandingSpot>, SearchError> {
        let inputs: Vec<EvalInput> = candidates
            .iter()
            .map(|spot| EvalInput::with_candidate(&snapshot.board, &spot.pose))
            .collect();
        let raw = self.evaluate(&inputs)?;

        let mut scored: Vec<LandingSpot> = candidates
            .into_iter()
            .zip(raw)
            .map(|(spot, r)| spot.with_oracle_score(self.config.denormalization.apply(r)))
            .collect();
        // stable: ties keep discovery order
        scored.sort_by(|a, b| score_cmp(a.oracle_score, b.oracle_score));
        scored.truncate(self.config.beam_width);
        Ok(scored)
    }

    fn rank_children(
        &self,
        snapshot: &Snapshot,
        mut children: Vec<SearchNode>,
    ) -> Result<Vec<SearchNode>, SearchError> {
        let inputs: Vec<EvalInput> = children
            .iter()
            .map(|node| EvalInput::from_board(&node.board).with_queue(&snapshot.queue))
            .collect();
        let raw = self.evaluate(&inputs)?;

        for (node, r) in children.iter_mut().zip(raw) {
            node.total = node.reward + self.config.denormalization.apply(r);
        }
        children.sort_by(|a, b| score_cmp(Some(a.total), Some(b.total)));
        children.truncate(self.config.beam_width);
        Ok(children)
    }

    fn evaluate(&self, inputs: &[EvalInput]) -> Result<Vec<f32>, SearchError> {
        evaluate_checked(&self.evaluator, inputs).map_err(|e| {
            log::warn!("oracle call over {} positions failed: {e}", inputs.len());
            SearchError::from(e)
        })
    }
}

/// Nodes that still have a piece at the given lookahead slot, paired with it.
/// Nodes past the end of the preview drop out.
fn next_pieces(
    beam: &[SearchNode],
    queue: &[Piece],
    slot: usize,
) -> (Vec<SearchNode>, Vec<Piece>) {
    beam.iter()
        .filter_map(|node| {
            queue
                .get(slot + node.queue_offset)
                .map(|&piece| (node.clone(), piece))
        })
        .unzip()
}

fn expand(beam: &[SearchNode], pieces: &[Piece]) -> Vec<SearchNode> {
    let per_node: Vec<Vec<SearchNode>> = beam
        .par_iter()
        .zip(pieces.par_iter())
        .map(|(node, &piece)| {
            generate_moves(&node.board, piece, false)
                .into_iter()
                .map(|spot| SearchNode {
                    reward: node.reward + spot.score_delta as f64,
                    board: spot.board_after,
                    total: f64::NEG_INFINITY,
                    first_move: node.first_move,
                    queue_offset: node.queue_offset,
                })
                .collect()
        })
        .collect();
    per_node.into_iter().flatten().collect()
}

fn score_cmp(a: Option<f64>, b: Option<f64>) -> Ordering {
    let a = a.unwrap_or(f64::NEG_INFINITY);
    let b = b.unwrap_or(f64::NEG_INFINITY);
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
