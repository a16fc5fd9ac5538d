//! Attack detection.
//!
//! An attack is pure reach: pins, checks against the attacker's own king and
//! castling play no part. Pawns attack only diagonally forward and kings
//! only the adjacent squares.

use super::is_path_clear;
use crate::Grid;
use chess_core::{Color, Piece, PieceKind, Square};

/// Returns true if `piece` standing on `from` attacks `target`.
pub fn attacks(grid: &Grid, piece: Piece, from: Square, target: Square) -> bool {
    if from == target {
        return false;
    }
    let d_row = target.row() as i8 - from.row() as i8;
    let d_col = target.col() as i8 - from.col() as i8;

    match piece.kind {
        PieceKind::Pawn => d_row == piece.color.pawn_direction() && d_col.abs() == 1,
        PieceKind::Knight => is_knight_step(d_row, d_col),
        PieceKind::Bishop => is_diagonal(d_row, d_col) && is_path_clear(grid, from, target),
        PieceKind::Rook => is_straight(d_row, d_col) && is_path_clear(grid, from, target),
        PieceKind::Queen => {
            (is_straight(d_row, d_col) || is_diagonal(d_row, d_col))
                && is_path_clear(grid, from, target)
        }
        PieceKind::King => d_row.abs() <= 1 && d_col.abs() <= 1,
    }
}

/// Returns true if any piece of color `by` attacks `target`.
pub fn is_square_attacked(grid: &Grid, target: Square, by: Color) -> bool {
    grid.pieces_of(by)
        .any(|(from, piece)| attacks(grid, piece, from, target))
}

/// Returns true if the king of `color` is attacked.
///
/// A grid without a king of that color is never in check.
pub fn is_king_attacked(grid: &Grid, color: Color) -> bool {
    grid.find_king(color)
        .is_some_and(|king| is_square_attacked(grid, king, color.opposite()))
}

#[inline]
pub(crate) fn is_knight_step(d_row: i8, d_col: i8) -> bool {
    matches!((d_row.abs(), d_col.abs()), (1, 2) | (2, 1))
}

#[inline]
pub(crate) fn is_diagonal(d_row: i8, d_col: i8) -> bool {
    d_row != 0 && d_row.abs() == d_col.abs()
}

#[inline]
pub(crate) fn is_straight(d_row: i8, d_col: i8) -> bool {
    (d_row == 0) != (d_col == 0)
}
