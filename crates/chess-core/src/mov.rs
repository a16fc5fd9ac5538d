//! Move representation.

use crate::{Piece, PieceKind, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Special move types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// Normal move or capture.
    Normal,
    /// Pawn double push from starting rank.
    DoublePush,
    /// Kingside castling (O-O).
    CastleKingside,
    /// Queenside castling (O-O-O).
    CastleQueenside,
    /// En passant capture.
    EnPassant,
    /// Pawn promotion to the given kind.
    Promotion(PieceKind),
}

impl MoveKind {
    /// Returns the promotion piece if this is a promotion move.
    #[inline]
    pub const fn promotion_piece(self) -> Option<PieceKind> {
        match self {
            MoveKind::Promotion(kind) => Some(kind),
            _ => None,
        }
    }

    /// Returns true if this is a promotion move.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        matches!(self, MoveKind::Promotion(_))
    }

    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveKind::CastleKingside | MoveKind::CastleQueenside)
    }

    /// Returns true if this is an en passant capture.
    #[inline]
    pub const fn is_en_passant(self) -> bool {
        matches!(self, MoveKind::EnPassant)
    }
}

/// A move that has been applied to a board.
///
/// `piece` is the piece as it stands after the move: flagged as moved, and
/// already replaced by the promoted piece for promotions. For en passant,
/// `captured` is the pawn taken from beside the destination square.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub kind: MoveKind,
}

impl Move {
    /// Returns true if the move took a piece.
    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        self.kind.is_en_passant()
    }

    #[inline]
    pub const fn is_castling(&self) -> bool {
        self.kind.is_castling()
    }

    #[inline]
    pub const fn is_promotion(&self) -> bool {
        self.kind.is_promotion()
    }

    #[inline]
    pub const fn promotion_piece(&self) -> Option<PieceKind> {
        self.kind.promotion_piece()
    }

    /// Returns the UCI notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(&self) -> String {
        match self.promotion_piece() {
            Some(kind) => format!(
                "{}{}{}",
                self.from,
                self.to,
                kind.to_fen_char(crate::Color::Black)
            ),
            None => format!("{}{}", self.from, self.to),
        }
    }

    /// Returns the algebraic notation without check suffix (e.g., "Nf3", "exd5", "e8=Q", "O-O").
    ///
    /// Pieces are never disambiguated by origin square.
    pub fn notation(&self) -> String {
        match self.kind {
            MoveKind::CastleKingside => return "O-O".to_string(),
            MoveKind::CastleQueenside => return "O-O-O".to_string(),
            _ => {}
        }

        let mut san = String::new();
        // A promoted piece is recorded as the new kind, but moved as a pawn.
        let moved_kind = if self.is_promotion() {
            PieceKind::Pawn
        } else {
            self.piece.kind
        };

        match moved_kind.san_letter() {
            Some(letter) => san.push(letter),
            None if self.is_capture() => san.push(self.from.file_char()),
            None => {}
        }
        if self.is_capture() {
            san.push('x');
        }
        san.push_str(&self.to.to_algebraic());
        if let Some(letter) = self.promotion_piece().and_then(PieceKind::san_letter) {
            san.push('=');
            san.push(letter);
        }
        san
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn record(from: &str, to: &str, piece: Piece, captured: Option<Piece>, kind: MoveKind) -> Move {
        Move {
            from: sq(from),
            to: sq(to),
            piece,
            captured,
            kind,
        }
    }

    #[test]
    fn move_kind_flags() {
        assert_eq!(MoveKind::Normal.promotion_piece(), None);
        assert_eq!(
            MoveKind::Promotion(PieceKind::Queen).promotion_piece(),
            Some(PieceKind::Queen)
        );
        assert!(MoveKind::Promotion(PieceKind::Queen).is_promotion());
        assert!(!MoveKind::DoublePush.is_promotion());
        assert!(MoveKind::CastleKingside.is_castling());
        assert!(MoveKind::CastleQueenside.is_castling());
        assert!(!MoveKind::EnPassant.is_castling());
        assert!(MoveKind::EnPassant.is_en_passant());
    }

    #[test]
    fn pawn_notation() {
        let pawn = Piece::new(PieceKind::Pawn, Color::White).moved();
        let push = record("e2", "e4", pawn, None, MoveKind::DoublePush);
        assert_eq!(push.notation(), "e4");
        assert_eq!(push.to_uci(), "e2e4");

        let black_pawn = Piece::new(PieceKind::Pawn, Color::Black).moved();
        let capture = record("e4", "d5", pawn, Some(black_pawn), MoveKind::Normal);
        assert_eq!(capture.notation(), "exd5");

        let ep = record("e5", "d6", pawn, Some(black_pawn), MoveKind::EnPassant);
        assert_eq!(ep.notation(), "exd6");
    }

    #[test]
    fn piece_notation() {
        let knight = Piece::new(PieceKind::Knight, Color::White).moved();
        assert_eq!(
            record("g1", "f3", knight, None, MoveKind::Normal).notation(),
            "Nf3"
        );
        let bishop = Piece::new(PieceKind::Bishop, Color::Black).moved();
        let taken = Piece::new(PieceKind::Knight, Color::White);
        assert_eq!(
            record("b4", "c3", bishop, Some(taken), MoveKind::Normal).to_string(),
            "Bxc3"
        );
    }

    #[test]
    fn castling_notation() {
        let king = Piece::new(PieceKind::King, Color::White).moved();
        assert_eq!(
            record("e1", "g1", king, None, MoveKind::CastleKingside).notation(),
            "O-O"
        );
        assert_eq!(
            record("e1", "c1", king, None, MoveKind::CastleQueenside).notation(),
            "O-O-O"
        );
    }

    #[test]
    fn promotion_notation() {
        let queen = Piece::new(PieceKind::Queen, Color::White).moved();
        let promo = record(
            "e7",
            "e8",
            queen,
            None,
            MoveKind::Promotion(PieceKind::Queen),
        );
        assert_eq!(promo.notation(), "e8=Q");
        assert_eq!(promo.to_uci(), "e7e8q");

        let rook = Piece::new(PieceKind::Rook, Color::Black);
        let capture_promo = record(
            "g7",
            "h8",
            queen,
            Some(rook),
            MoveKind::Promotion(PieceKind::Queen),
        );
        assert_eq!(capture_promo.notation(), "gxh8=Q");
        assert_eq!(format!("{:?}", capture_promo), "Move(g7h8q)");
    }
}
