//! 8x8 piece placement.

use chess_core::{Color, Piece, PieceKind, Square};
use serde::{Deserialize, Serialize};

/// The squares of a board, indexed `[row][col]`.
///
/// `Grid` is `Copy`, so legality checks can play a move on a scratch copy
/// without touching the board they were asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid([[Option<Piece>; 8]; 8]);

impl Grid {
    /// A grid with no pieces.
    pub const EMPTY: Grid = Grid([[None; 8]; 8]);

    /// Returns the standard starting arrangement.
    pub fn standard() -> Self {
        const BACK_ROW: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut grid = Grid::EMPTY;
        for color in Color::ALL {
            for (col, kind) in BACK_ROW.into_iter().enumerate() {
                grid.0[color.back_row() as usize][col] = Some(Piece::new(kind, color));
                grid.0[color.pawn_row() as usize][col] = Some(Piece::new(PieceKind::Pawn, color));
            }
        }
        grid
    }

    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.0[sq.row() as usize][sq.col() as usize]
    }

    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.0[sq.row() as usize][sq.col() as usize] = piece;
    }

    /// Removes and returns the piece on `sq`.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.0[sq.row() as usize][sq.col() as usize].take()
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Iterates over occupied squares in scan order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    /// Iterates over the squares holding pieces of `color`, in scan order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// Returns the square of the first king of `color` in scan order.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, p)| p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::EMPTY
    }
}
