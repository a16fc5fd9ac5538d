//! Seeding a board from FEN and rendering it back.

use crate::{Board, Grid};
use chess_core::{Color, Fen, FenError, Piece, PieceKind, Square};

impl Board {
    /// Creates a board from a FEN string.
    ///
    /// Kings and rooks count as unmoved only when the castling field names
    /// them. Pawns on their starting row and minor pieces or queens on the
    /// back row count as unmoved; everything else is treated as having
    /// moved. The history starts empty.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = Fen::parse(fen)?;
        let mut grid = Grid::EMPTY;

        for &(sq, kind, color) in &parsed.placement {
            let unmoved = match kind {
                PieceKind::Pawn => sq.row() == color.pawn_row(),
                PieceKind::King => {
                    let (kingside, queenside) = parsed.castling.for_color(color);
                    (kingside || queenside) && Some(sq) == home(color, 4)
                }
                PieceKind::Rook => {
                    let (kingside, queenside) = parsed.castling.for_color(color);
                    (kingside && Some(sq) == home(color, 7))
                        || (queenside && Some(sq) == home(color, 0))
                }
                _ => sq.row() == color.back_row(),
            };
            let piece = Piece::new(kind, color);
            grid.set(sq, Some(if unmoved { piece } else { piece.moved() }));
        }

        Ok(Board {
            grid,
            current_turn: parsed.side_to_move,
            history: Vec::new(),
            en_passant_target: parsed.en_passant,
        })
    }

    /// Renders the board as FEN.
    ///
    /// Castling rights are derived from unmoved kings and rooks. The
    /// halfmove clock is always 0 and the fullmove number counts from the
    /// board's own history.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for row in (0..8).rev() {
            let mut empty = 0;
            for col in 0..8 {
                match Square::new(row, col).and_then(|sq| self.piece_at(sq)) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if row > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.current_turn {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        fen.push_str(&self.castling_field());

        fen.push(' ');
        match self.en_passant_target {
            Some(sq) => fen.push_str(&sq.to_algebraic()),
            None => fen.push('-'),
        }

        let fullmove = 1 + self.ply_count() / 2;
        fen.push_str(&format!(" 0 {}", fullmove));
        fen
    }

    fn castling_field(&self) -> String {
        let mut field = String::new();
        for color in Color::ALL {
            let king_home = home(color, 4)
                .and_then(|sq| self.piece_at(sq))
                .is_some_and(|p| p.kind == PieceKind::King && p.color == color && !p.has_moved);
            if !king_home {
                continue;
            }
            for (col, letter) in [(7, 'k'), (0, 'q')] {
                let rook_home = home(color, col)
                    .and_then(|sq| self.piece_at(sq))
                    .is_some_and(|p| p.kind == PieceKind::Rook && p.color == color && !p.has_moved);
                if rook_home {
                    field.push(match color {
                        Color::White => letter.to_ascii_uppercase(),
                        Color::Black => letter,
                    });
                }
            }
        }
        if field.is_empty() {
            field.push('-');
        }
        field
    }
}

fn home(color: Color, col: i8) -> Option<Square> {
    Square::new(color.back_row() as i8, col)
}
