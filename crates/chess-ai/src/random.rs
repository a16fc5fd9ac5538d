//! Random move selection.

use chess_core::Square;
use chess_engine::Board;
use rand::seq::SliceRandom;
use rand::Rng;

/// Picks a legal move for the side to move uniformly at random.
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<(Square, Square)> {
    board.legal_moves().choose(rng).copied()
}
