//! Move rules.
//!
//! Legality is decided per `(from, to)` pair in two stages: the piece's
//! movement pattern, then a replay of the move on a scratch copy of the grid
//! to make sure the mover's king is not left attacked. These functions never
//! look at whose turn it is; [`Board`](crate::Board) applies that filter.

mod attacks;

use crate::Grid;
use chess_core::{Color, Piece, PieceKind, Square};

pub use attacks::{attacks, is_king_attacked, is_square_attacked};

use attacks::{is_diagonal, is_knight_step, is_straight};

/// Returns true if every square strictly between `from` and `to` is empty.
///
/// `from` and `to` must share a row, column or diagonal.
pub fn is_path_clear(grid: &Grid, from: Square, to: Square) -> bool {
    let step_row = (to.row() as i8 - from.row() as i8).signum();
    let step_col = (to.col() as i8 - from.col() as i8).signum();

    let mut current = from.offset(step_row, step_col);
    while let Some(sq) = current {
        if sq == to {
            return true;
        }
        if !grid.is_empty(sq) {
            return false;
        }
        current = sq.offset(step_row, step_col);
    }
    true
}

/// Returns true if `piece` on `from` may travel to `to` by its movement pattern.
///
/// Does not check the destination for friendly pieces nor the mover's own
/// king safety.
pub fn follows_pattern(
    grid: &Grid,
    piece: Piece,
    from: Square,
    to: Square,
    en_passant: Option<Square>,
) -> bool {
    if from == to {
        return false;
    }
    let d_row = to.row() as i8 - from.row() as i8;
    let d_col = to.col() as i8 - from.col() as i8;

    match piece.kind {
        PieceKind::Pawn => pawn_pattern(grid, piece, from, to, en_passant),
        PieceKind::Knight => is_knight_step(d_row, d_col),
        PieceKind::Bishop => is_diagonal(d_row, d_col) && is_path_clear(grid, from, to),
        PieceKind::Rook => is_straight(d_row, d_col) && is_path_clear(grid, from, to),
        PieceKind::Queen => {
            (is_straight(d_row, d_col) || is_diagonal(d_row, d_col))
                && is_path_clear(grid, from, to)
        }
        PieceKind::King => {
            (d_row.abs() <= 1 && d_col.abs() <= 1)
                || (d_row == 0 && d_col.abs() == 2 && castling_allowed(grid, piece, from, to))
        }
    }
}

fn pawn_pattern(
    grid: &Grid,
    pawn: Piece,
    from: Square,
    to: Square,
    en_passant: Option<Square>,
) -> bool {
    let dir = pawn.color.pawn_direction();
    let d_row = to.row() as i8 - from.row() as i8;
    let d_col = to.col() as i8 - from.col() as i8;

    if d_col == 0 {
        if d_row == dir {
            return grid.is_empty(to);
        }
        if d_row == 2 * dir && from.row() == pawn.color.pawn_row() {
            return grid.is_empty(to) && from.offset(dir, 0).is_some_and(|mid| grid.is_empty(mid));
        }
        return false;
    }

    if d_col.abs() == 1 && d_row == dir {
        return match grid.get(to) {
            Some(target) => target.color != pawn.color,
            None => en_passant_victim(grid, pawn, from, to, en_passant).is_some(),
        };
    }
    false
}

/// Returns the square of the pawn captured en passant if `pawn` moving
/// from `from` to `to` is an en passant capture.
///
/// The destination must be the current en passant target and an enemy pawn
/// must stand beside `from` on the destination's column.
pub fn en_passant_victim(
    grid: &Grid,
    pawn: Piece,
    from: Square,
    to: Square,
    en_passant: Option<Square>,
) -> Option<Square> {
    if pawn.kind != PieceKind::Pawn || en_passant != Some(to) || from.col() == to.col() {
        return None;
    }
    let victim = Square::new(from.row() as i8, to.col() as i8)?;
    match grid.get(victim) {
        Some(p) if p.kind == PieceKind::Pawn && p.color != pawn.color => Some(victim),
        _ => None,
    }
}

/// Returns the rook's `(from, to)` squares for a castling king move.
pub fn castling_rook_squares(king_from: Square, king_to: Square) -> Option<(Square, Square)> {
    let (rook_col, dir) = if king_to.col() > king_from.col() {
        (7, 1)
    } else {
        (0, -1)
    };
    let row = king_from.row() as i8;
    Some((
        Square::new(row, rook_col)?,
        Square::new(row, king_from.col() as i8 + dir)?,
    ))
}

fn castling_allowed(grid: &Grid, king: Piece, from: Square, to: Square) -> bool {
    if king.has_moved {
        return false;
    }
    let Some((rook_from, _)) = castling_rook_squares(from, to) else {
        return false;
    };
    let rook_ready = grid.get(rook_from).is_some_and(|rook| {
        rook.kind == PieceKind::Rook && rook.color == king.color && !rook.has_moved
    });
    if !rook_ready || !is_path_clear(grid, from, rook_from) {
        return false;
    }

    // The king may not start on, cross, or land on an attacked square.
    let enemy = king.color.opposite();
    let dir = if to.col() > from.col() { 1 } else { -1 };
    [Some(from), from.offset(0, dir), Some(to)]
        .into_iter()
        .flatten()
        .all(|sq| !is_square_attacked(grid, sq, enemy))
}

/// Returns true if moving the piece on `from` to `to` would leave its own
/// king attacked.
pub fn leaves_king_in_check(
    grid: &Grid,
    from: Square,
    to: Square,
    en_passant: Option<Square>,
) -> bool {
    let Some(piece) = grid.get(from) else {
        return false;
    };
    let mut scratch = *grid;
    if let Some(victim) = en_passant_victim(grid, piece, from, to, en_passant) {
        scratch.set(victim, None);
    }
    scratch.set(to, Some(piece));
    scratch.set(from, None);
    is_king_attacked(&scratch, piece.color)
}

/// Returns true if the piece on `from` can legally move to `to`, whatever
/// side is to move.
pub fn is_legal(grid: &Grid, from: Square, to: Square, en_passant: Option<Square>) -> bool {
    let Some(piece) = grid.get(from) else {
        return false;
    };
    if grid.get(to).is_some_and(|target| target.color == piece.color) {
        return false;
    }
    follows_pattern(grid, piece, from, to, en_passant)
        && !leaves_king_in_check(grid, from, to, en_passant)
}

/// Returns every legal destination for the piece on `from`, in scan order.
pub fn legal_destinations(grid: &Grid, from: Square, en_passant: Option<Square>) -> Vec<Square> {
    Square::all()
        .filter(|&to| is_legal(grid, from, to, en_passant))
        .collect()
}

/// Counts legal moves for every piece of `color`.
pub fn count_legal_moves(grid: &Grid, color: Color, en_passant: Option<Square>) -> usize {
    grid.pieces_of(color)
        .map(|(from, _)| {
            Square::all()
                .filter(|&to| is_legal(grid, from, to, en_passant))
                .count()
        })
        .sum()
}

/// Returns true if any piece of `color` has a legal move.
pub fn has_legal_move(grid: &Grid, color: Color, en_passant: Option<Square>) -> bool {
    grid.pieces_of(color).any(|(from, _)| {
        Square::all().any(|to| is_legal(grid, from, to, en_passant))
    })
}
