//! Fixed-depth game-tree search.
//!
//! Every simulated move is played on a fresh clone of the board, so the
//! caller's board is never touched.

use crate::evaluation::{evaluate, MATE_SCORE};
use chess_core::Square;
use chess_engine::Board;
use serde::{Deserialize, Serialize};

/// Bound used for the full search window. Wider than any reachable score.
const INFINITY: i32 = MATE_SCORE + 1;

/// The chosen root move and its score from the root mover's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub from: Square,
    pub to: Square,
    pub score: i32,
    /// Nodes visited below the root.
    pub nodes: u64,
}

/// Search state
#[derive(Debug, Default)]
pub struct Searcher {
    nodes: u64,
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Negamax search with alpha-beta pruning.
    ///
    /// Returns the score for the side to move on `board`.
    pub fn alpha_beta(&mut self, board: &Board, depth: u8, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;

        if depth == 0 {
            return evaluate(board);
        }

        let moves = board.legal_moves();
        if moves.is_empty() {
            return if board.is_in_check(board.current_turn()) {
                -MATE_SCORE
            } else {
                0
            };
        }

        for (from, to) in moves {
            let mut child = board.clone();
            if child.make_move(from, to).is_none() {
                continue;
            }
            let score = -self.alpha_beta(&child, depth - 1, -beta, -alpha);

            if score >= beta {
                return beta; // Beta cutoff
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }

    /// Plain minimax without pruning.
    ///
    /// Scores are from the perspective of the side that is to move when
    /// `maximizing` is true. Visits every node, so it serves as a reference
    /// for [`Searcher::alpha_beta`].
    pub fn minimax(&mut self, board: &Board, depth: u8, maximizing: bool) -> i32 {
        self.nodes += 1;

        if depth == 0 {
            let score = evaluate(board);
            return if maximizing { score } else { -score };
        }

        let moves = board.legal_moves();
        if moves.is_empty() {
            if !board.is_in_check(board.current_turn()) {
                return 0;
            }
            return if maximizing { -MATE_SCORE } else { MATE_SCORE };
        }

        let scores = moves.into_iter().filter_map(|(from, to)| {
            let mut child = board.clone();
            child.make_move(from, to)?;
            Some(self.minimax(&child, depth - 1, !maximizing))
        });

        if maximizing {
            scores.fold(-INFINITY, i32::max)
        } else {
            scores.fold(INFINITY, i32::min)
        }
    }
}

/// Searches `depth` plies with alpha-beta and returns the best root move.
///
/// A depth of zero is treated as one. Returns `None` when the side to move
/// has no legal move.
pub fn search(board: &Board, depth: u8) -> Option<SearchResult> {
    search_root(board, depth, |searcher, child, depth| {
        -searcher.alpha_beta(child, depth, -INFINITY, INFINITY)
    })
}

/// Same as [`search`] but without pruning.
pub fn search_minimax(board: &Board, depth: u8) -> Option<SearchResult> {
    search_root(board, depth, |searcher, child, depth| {
        searcher.minimax(child, depth, false)
    })
}

fn search_root<F>(board: &Board, depth: u8, mut score_child: F) -> Option<SearchResult>
where
    F: FnMut(&mut Searcher, &Board, u8) -> i32,
{
    let depth = depth.max(1);
    let mut searcher = Searcher::new();
    let mut best: Option<(Square, Square, i32)> = None;

    for (from, to) in board.legal_moves() {
        let mut child = board.clone();
        if child.make_move(from, to).is_none() {
            continue;
        }
        let score = score_child(&mut searcher, &child, depth - 1);

        // Strictly greater: the first move found keeps ties.
        if best.map_or(true, |(_, _, best_score)| score > best_score) {
            best = Some((from, to, score));
        }
    }

    let (from, to, score) = best?;
    tracing::debug!(
        depth,
        nodes = searcher.nodes(),
        score,
        best = %format!("{}{}", from, to),
        "search complete"
    );

    Some(SearchResult {
        from,
        to,
        score,
        nodes: searcher.nodes(),
    })
}
