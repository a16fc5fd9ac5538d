//! Computer opponent for the chess engine.
//!
//! This crate provides:
//! - [`Difficulty`] - easy (random), medium (2 plies) and hard (3 plies)
//! - [`evaluation`] - static evaluation in centipawns
//! - [`search`] - negamax alpha-beta search plus a plain minimax reference
//! - [`best_move`] - the single entry point used by callers
//!
//! # Example
//!
//! ```
//! use chess_ai::{best_move, Difficulty};
//! use chess_engine::Board;
//!
//! let board = Board::new();
//! let (from, to) = best_move(&board, Difficulty::Medium).unwrap();
//! assert!(board.is_valid_move(from, to));
//! ```

mod difficulty;
pub mod evaluation;
mod random;
pub mod search;

pub use difficulty::{Difficulty, ParseDifficultyError};
pub use evaluation::{evaluate, MATE_SCORE};
pub use random::random_move;
pub use search::{search, search_minimax, SearchResult, Searcher};

use chess_core::Square;
use chess_engine::Board;
use rand::Rng;

/// Picks a move for the side to move on `board`.
///
/// Returns `None` when the side to move has no legal move. The board is
/// only read; every simulated move happens on a copy.
pub fn best_move(board: &Board, difficulty: Difficulty) -> Option<(Square, Square)> {
    best_move_with_rng(board, difficulty, &mut rand::thread_rng())
}

/// Same as [`best_move`], drawing randomness from `rng`.
pub fn best_move_with_rng<R: Rng + ?Sized>(
    board: &Board,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<(Square, Square)> {
    match difficulty {
        Difficulty::Easy => random_move(board, rng),
        Difficulty::Medium | Difficulty::Hard => {
            search(board, difficulty.search_depth()).map(|result| (result.from, result.to))
        }
    }
}
