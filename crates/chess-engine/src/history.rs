//! Move history with undo snapshots.

use chess_core::{Move, Piece, Square};
use serde::{Deserialize, Serialize};

/// A move in the board's history, together with the state it overwrote.
///
/// Undo restores these values directly instead of reconstructing them from
/// earlier moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The move as applied.
    pub mov: Move,
    /// The moving piece exactly as it stood on `mov.from`.
    pub(crate) moved_before: Piece,
    /// The castling rook as it stood before the move.
    pub(crate) rook_before: Option<Piece>,
    /// The en passant target before the move.
    pub(crate) en_passant_before: Option<Square>,
}

impl HistoryEntry {
    /// Returns the en passant target that was active before this move.
    pub fn en_passant_before(&self) -> Option<Square> {
        self.en_passant_before
    }
}
