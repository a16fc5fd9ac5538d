//! The board: position, turn, history and en passant state.
//!
//! [`Board`] is the single source of truth for legality. Queries are total
//! over any board state; [`Board::make_move`] and [`Board::undo_last_move`]
//! either commit a complete change or leave the board untouched.

use crate::history::HistoryEntry;
use crate::movegen::{self, castling_rook_squares, en_passant_victim};
use crate::{GameStatus, Grid};
use chess_core::{Color, Move, MoveKind, Piece, PieceKind, Square};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A chess position with its move history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub(crate) grid: Grid,
    pub(crate) current_turn: Color,
    pub(crate) history: Vec<HistoryEntry>,
    pub(crate) en_passant_target: Option<Square>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates a board with the standard starting position, White to move.
    pub fn new() -> Self {
        Board {
            grid: Grid::standard(),
            ..Self::empty()
        }
    }

    /// Creates a board with no pieces, White to move.
    pub fn empty() -> Self {
        Board {
            grid: Grid::EMPTY,
            current_turn: Color::White,
            history: Vec::new(),
            en_passant_target: None,
        }
    }

    /// Returns the piece on `sq`.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.grid.get(sq)
    }

    /// Places or clears a piece. Intended for setting up positions.
    pub fn set_piece(&mut self, sq: Square, piece: Option<Piece>) {
        self.grid.set(sq, piece);
    }

    /// Sets the side to move. Intended for setting up positions.
    pub fn set_turn(&mut self, color: Color) {
        self.current_turn = color;
    }

    /// Returns the underlying grid.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the side to move.
    #[inline]
    pub fn current_turn(&self) -> Color {
        self.current_turn
    }

    /// Returns the square a pawn may capture into en passant, if any.
    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    /// Returns the applied moves, oldest first.
    pub fn move_history(&self) -> impl ExactSizeIterator<Item = &Move> + '_ {
        self.history.iter().map(|entry| &entry.mov)
    }

    /// Returns the history entries, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Returns the most recent move.
    pub fn last_move(&self) -> Option<&Move> {
        self.history.last().map(|entry| &entry.mov)
    }

    /// Returns the number of half-moves played on this board.
    #[inline]
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Returns the square of the king of `color`.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.grid.find_king(color)
    }

    // Validation

    /// Returns true if the side to move may play `from` to `to`.
    pub fn is_valid_move(&self, from: Square, to: Square) -> bool {
        match self.piece_at(from) {
            Some(piece) if piece.color == self.current_turn => {
                movegen::is_legal(&self.grid, from, to, self.en_passant_target)
            }
            _ => false,
        }
    }

    /// Returns every destination the piece on `from` may move to, in scan order.
    ///
    /// Empty when `from` is empty or holds a piece of the side not to move.
    pub fn possible_moves(&self, from: Square) -> Vec<Square> {
        match self.piece_at(from) {
            Some(piece) if piece.color == self.current_turn => {
                movegen::legal_destinations(&self.grid, from, self.en_passant_target)
            }
            _ => Vec::new(),
        }
    }

    /// Returns every legal `(from, to)` pair for the side to move, in scan order.
    pub fn legal_moves(&self) -> Vec<(Square, Square)> {
        self.grid
            .pieces_of(self.current_turn)
            .flat_map(|(from, _)| {
                self.possible_moves(from)
                    .into_iter()
                    .map(move |to| (from, to))
            })
            .collect()
    }

    /// Counts the legal moves available to `color`, whether or not it is to move.
    pub fn legal_move_count(&self, color: Color) -> usize {
        movegen::count_legal_moves(&self.grid, color, self.en_passant_target)
    }

    /// Returns true if `color` has at least one legal move.
    ///
    /// Stops at the first legal move found.
    pub fn has_legal_moves(&self, color: Color) -> bool {
        movegen::has_legal_move(&self.grid, color, self.en_passant_target)
    }

    // Check detection

    /// Returns true if any piece of `by` reaches `sq`.
    pub fn is_square_under_attack(&self, sq: Square, by: Color) -> bool {
        movegen::is_square_attacked(&self.grid, sq, by)
    }

    /// Returns true if the king of `color` is attacked.
    pub fn is_in_check(&self, color: Color) -> bool {
        movegen::is_king_attacked(&self.grid, color)
    }

    /// Returns true if `color` is in check and has no legal move.
    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_legal_moves(color)
    }

    /// Returns true if `color` is not in check and has no legal move.
    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_legal_moves(color)
    }

    /// Returns the status of the side to move.
    pub fn status(&self) -> GameStatus {
        let turn = self.current_turn;
        if self.has_legal_moves(turn) {
            GameStatus::InProgress
        } else if self.is_in_check(turn) {
            GameStatus::Checkmate {
                winner: turn.opposite(),
            }
        } else {
            GameStatus::Stalemate
        }
    }

    /// Returns the squares of `color`'s pieces that the other side attacks.
    pub fn threatened_pieces(&self, color: Color) -> HashSet<Square> {
        self.grid
            .pieces_of(color)
            .filter(|&(sq, _)| self.is_square_under_attack(sq, color.opposite()))
            .map(|(sq, _)| sq)
            .collect()
    }

    // Mutation

    /// Plays `from` to `to` for the side to move.
    ///
    /// Returns `None` and leaves the board unchanged if the move is not
    /// legal. Pawns reaching the last row always become queens.
    pub fn make_move(&mut self, from: Square, to: Square) -> Option<Move> {
        if !self.is_valid_move(from, to) {
            return None;
        }
        let moved_before = self.grid.get(from)?;
        let en_passant_before = self.en_passant_target;
        let mut captured = self.grid.get(to);
        let mut rook_before = None;
        let mut kind = MoveKind::Normal;

        if let Some(victim) = en_passant_victim(&self.grid, moved_before, from, to, en_passant_before)
        {
            kind = MoveKind::EnPassant;
            captured = self.grid.take(victim);
        }

        let d_row = to.row() as i8 - from.row() as i8;
        let d_col = to.col() as i8 - from.col() as i8;

        if moved_before.kind == PieceKind::King && d_col.abs() == 2 {
            kind = if d_col > 0 {
                MoveKind::CastleKingside
            } else {
                MoveKind::CastleQueenside
            };
            if let Some((rook_from, rook_to)) = castling_rook_squares(from, to) {
                rook_before = self.grid.take(rook_from);
                self.grid.set(rook_to, rook_before.map(Piece::moved));
            }
        }

        let mut piece = moved_before.moved();
        if piece.kind == PieceKind::Pawn {
            if to.row() == piece.color.promotion_row() {
                kind = MoveKind::Promotion(PieceKind::Queen);
                piece = Piece::new(PieceKind::Queen, piece.color).moved();
            } else if d_row.abs() == 2 {
                kind = MoveKind::DoublePush;
            }
        }

        self.en_passant_target = match kind {
            MoveKind::DoublePush => from.offset(piece.color.pawn_direction(), 0),
            _ => None,
        };

        self.grid.set(to, Some(piece));
        self.grid.set(from, None);

        let mov = Move {
            from,
            to,
            piece,
            captured,
            kind,
        };
        self.history.push(HistoryEntry {
            mov,
            moved_before,
            rook_before,
            en_passant_before,
        });
        self.current_turn = self.current_turn.opposite();

        Some(mov)
    }

    /// Takes back the most recent move.
    ///
    /// Returns the undone move, or `None` if the history is empty.
    pub fn undo_last_move(&mut self) -> Option<Move> {
        let entry = self.history.pop()?;
        let mov = entry.mov;

        self.current_turn = self.current_turn.opposite();
        self.grid.set(mov.from, Some(entry.moved_before));

        if mov.is_en_passant() {
            self.grid.set(mov.to, None);
            if let Some(victim) = Square::new(mov.from.row() as i8, mov.to.col() as i8) {
                self.grid.set(victim, mov.captured);
            }
        } else {
            self.grid.set(mov.to, mov.captured);
        }

        if mov.is_castling() {
            if let Some((rook_from, rook_to)) = castling_rook_squares(mov.from, mov.to) {
                self.grid.set(rook_to, None);
                self.grid.set(rook_from, entry.rook_before);
            }
        }

        self.en_passant_target = entry.en_passant_before;
        Some(mov)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..8).rev() {
            write!(f, "{} ", row + 1)?;
            for col in 0..8 {
                let c = Square::new(row, col)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', Piece::to_fen_char);
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn play(board: &mut Board, moves: &[(&str, &str)]) {
        for &(from, to) in moves {
            assert!(
                board.make_move(sq(from), sq(to)).is_some(),
                "move {}{} rejected",
                from,
                to
            );
        }
    }

    #[test]
    fn new_board() {
        let board = Board::new();
        assert_eq!(board.current_turn(), Color::White);
        assert_eq!(board.ply_count(), 0);
        assert_eq!(board.en_passant_target(), None);
        assert_eq!(board.status(), GameStatus::InProgress);
        assert_eq!(board.legal_moves().len(), 20);
    }

    #[test]
    fn wrong_side_cannot_move() {
        let mut board = Board::new();
        assert!(!board.is_valid_move(sq("e7"), sq("e5")));
        assert!(board.possible_moves(sq("e7")).is_empty());
        assert_eq!(board.make_move(sq("e7"), sq("e5")), None);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn empty_square_and_own_piece() {
        let board = Board::new();
        assert!(!board.is_valid_move(sq("e4"), sq("e5")));
        assert!(!board.is_valid_move(sq("a1"), sq("a2")));
        assert!(!board.is_valid_move(sq("e2"), sq("e2")));
    }

    #[test]
    fn double_push_sets_en_passant_target() {
        let mut board = Board::new();
        let mv = board.make_move(sq("e2"), sq("e4")).unwrap();
        assert_eq!(mv.kind, MoveKind::DoublePush);
        assert!(mv.piece.has_moved);
        assert_eq!(board.en_passant_target(), Some(sq("e3")));
        assert_eq!(board.current_turn(), Color::Black);

        board.make_move(sq("g8"), sq("f6")).unwrap();
        assert_eq!(board.en_passant_target(), None);
    }

    #[test]
    fn en_passant_capture() {
        let mut board = Board::new();
        play(
            &mut board,
            &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")],
        );
        let mv = board.make_move(sq("e5"), sq("d6")).unwrap();
        assert!(mv.is_en_passant());
        assert_eq!(
            mv.captured.map(|p| (p.kind, p.color)),
            Some((PieceKind::Pawn, Color::Black))
        );
        assert_eq!(board.piece_at(sq("d5")), None);
        assert_eq!(mv.notation(), "exd6");
    }

    #[test]
    fn en_passant_expires_after_one_ply() {
        let mut board = Board::new();
        play(
            &mut board,
            &[
                ("e2", "e4"),
                ("a7", "a6"),
                ("e4", "e5"),
                ("d7", "d5"),
                ("h2", "h3"),
                ("a6", "a5"),
            ],
        );
        assert!(!board.is_valid_move(sq("e5"), sq("d6")));
    }

    #[test]
    fn castling_moves_rook() {
        let mut board = Board::new();
        play(
            &mut board,
            &[
                ("e2", "e4"),
                ("e7", "e5"),
                ("g1", "f3"),
                ("b8", "c6"),
                ("f1", "c4"),
                ("g8", "f6"),
            ],
        );
        let mv = board.make_move(sq("e1"), sq("g1")).unwrap();
        assert_eq!(mv.kind, MoveKind::CastleKingside);
        assert_eq!(
            board.piece_at(sq("f1")),
            Some(Piece::new(PieceKind::Rook, Color::White).moved())
        );
        assert_eq!(board.piece_at(sq("h1")), None);
    }

    #[test]
    fn cannot_castle_after_rook_moved_back() {
        let mut board = Board::new();
        play(
            &mut board,
            &[
                ("g1", "f3"),
                ("g8", "f6"),
                ("e2", "e3"),
                ("e7", "e6"),
                ("f1", "e2"),
                ("f8", "e7"),
                ("h1", "g1"),
                ("h8", "g8"),
                ("g1", "h1"),
                ("g8", "h8"),
            ],
        );
        assert!(!board.is_valid_move(sq("e1"), sq("g1")));
    }

    #[test]
    fn promotion_to_queen() {
        let mut board = Board::empty();
        board.set_piece(sq("e1"), Some(Piece::new(PieceKind::King, Color::White)));
        board.set_piece(sq("a8"), Some(Piece::new(PieceKind::King, Color::Black)));
        board.set_piece(sq("g7"), Some(Piece::new(PieceKind::Pawn, Color::White)));
        let mv = board.make_move(sq("g7"), sq("g8")).unwrap();
        assert_eq!(mv.kind, MoveKind::Promotion(PieceKind::Queen));
        assert_eq!(mv.piece.kind, PieceKind::Queen);
        assert_eq!(
            board.piece_at(sq("g8")),
            Some(Piece::new(PieceKind::Queen, Color::White).moved())
        );
    }

    #[test]
    fn undo_on_empty_history() {
        let mut board = Board::new();
        assert_eq!(board.undo_last_move(), None);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn undo_restores_previous_state() {
        let mut board = Board::new();
        play(&mut board, &[("e2", "e4"), ("d7", "d5")]);
        let before = board.clone();
        let mv = board.make_move(sq("e4"), sq("d5")).unwrap();
        assert!(mv.is_capture());
        assert_eq!(board.undo_last_move(), Some(mv));
        assert_eq!(board, before);
        assert_eq!(board.en_passant_target(), Some(sq("d6")));
    }

    #[test]
    fn history_keeps_snapshots() {
        let mut board = Board::new();
        play(&mut board, &[("e2", "e4"), ("g8", "f6")]);
        let notations: Vec<String> = board.move_history().map(|mv| mv.notation()).collect();
        assert_eq!(notations, vec!["e4", "Nf6"]);
        assert_eq!(board.last_move().map(|mv| mv.to), Some(sq("f6")));
        assert_eq!(board.history()[0].en_passant_before(), None);
        assert_eq!(board.history()[1].en_passant_before(), Some(sq("e3")));
    }

    #[test]
    fn threatened_pieces() {
        let mut board = Board::new();
        play(&mut board, &[("e2", "e4"), ("d7", "d5")]);
        let threatened = board.threatened_pieces(Color::White);
        assert_eq!(threatened, HashSet::from([sq("e4")]));
        let threatened = board.threatened_pieces(Color::Black);
        assert_eq!(threatened, HashSet::from([sq("d5")]));
    }

    #[test]
    fn display_renders_ranks_top_down() {
        let text = Board::new().to_string();
        let first = text.lines().next().unwrap();
        assert_eq!(first, "8  r n b q k b n r");
        assert!(text.ends_with("   a b c d e f g h"));
    }
}
