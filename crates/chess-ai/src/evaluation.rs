//! Static evaluation.
//!
//! Scores are in centipawns from the perspective of the side to move:
//! positive means the side to move is better off.

use chess_core::{Color, Piece, PieceKind, Square};
use chess_engine::Board;

/// Piece values in centipawns
pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 300;
pub const BISHOP_VALUE: i32 = 300;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
pub const KING_VALUE: i32 = 100_000;

/// Score of a mated side to move, negated. Larger than any material swing.
pub const MATE_SCORE: i32 = 1_000_000;

/// A tenth of a pawn per legal move.
const MOBILITY_WEIGHT: i32 = 10;
const CHECK_WEIGHT: i32 = 50;
const PAWN_ADVANCE_BONUS: i32 = 10;
const CENTER_WEIGHT: i32 = 5;

pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => KING_VALUE,
    }
}

/// Closeness to the four central squares, from -10 in a corner to 50 on d4.
fn center_bonus(sq: Square) -> i32 {
    let row_dist = (2 * sq.row() as i32 - 7).abs();
    let col_dist = (2 * sq.col() as i32 - 7).abs();
    (12 - row_dist - col_dist) * CENTER_WEIGHT
}

/// Positional bonus for `piece` standing on `sq`.
pub fn positional_bonus(piece: Piece, sq: Square) -> i32 {
    match piece.kind {
        PieceKind::Pawn => {
            let advanced = match piece.color {
                Color::White => sq.row() as i32 - Color::White.pawn_row() as i32,
                Color::Black => Color::Black.pawn_row() as i32 - sq.row() as i32,
            };
            advanced.max(0) * PAWN_ADVANCE_BONUS
        }
        PieceKind::Knight | PieceKind::Bishop => center_bonus(sq),
        PieceKind::Queen => center_bonus(sq) / 2,
        PieceKind::Rook | PieceKind::King => 0,
    }
}

/// Evaluates the board for the side to move.
///
/// Sums material and positional bonuses (mover minus opponent), adds the
/// legal move count difference, and adjusts for either king being in check.
pub fn evaluate(board: &Board) -> i32 {
    let mover = board.current_turn();
    let opponent = mover.opposite();

    let mut score = 0;
    for (sq, piece) in board.grid().pieces() {
        let value = piece_value(piece.kind) + positional_bonus(piece, sq);
        if piece.color == mover {
            score += value;
        } else {
            score -= value;
        }
    }

    let mobility = board.legal_move_count(mover) as i32 - board.legal_move_count(opponent) as i32;
    score += mobility * MOBILITY_WEIGHT;

    if board.is_in_check(mover) {
        score -= CHECK_WEIGHT;
    }
    if board.is_in_check(opponent) {
        score += CHECK_WEIGHT;
    }

    score
}

/// Material balance from White's point of view, kings excluded.
pub fn material_balance(board: &Board) -> i32 {
    board
        .grid()
        .pieces()
        .filter(|(_, piece)| piece.kind != PieceKind::King)
        .map(|(_, piece)| match piece.color {
            Color::White => piece_value(piece.kind),
            Color::Black => -piece_value(piece.kind),
        })
        .sum()
}
