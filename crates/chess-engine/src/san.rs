//! Standard Algebraic Notation (SAN) rendering and parsing.
//!
//! Examples: "e4", "Nf3", "Bxc6", "O-O", "e8=Q", "Nbd2", "R1e1", "Qh4#".
//! Promotions are always to a queen, so "=Q" is the only suffix accepted.

use crate::{Board, GameStatus};
use chess_core::{PieceKind, Square};
use thiserror::Error;

/// Error type for SAN parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SanError {
    #[error("empty SAN string")]
    Empty,
    #[error("invalid SAN format: {0}")]
    InvalidFormat(String),
    #[error("no legal move matches: {0}")]
    NoMatchingMove(String),
    #[error("ambiguous move: {0}")]
    AmbiguousMove(String),
}

/// Renders `from` to `to` as SAN, given the board before the move.
///
/// Returns `None` if the move is not legal for the side to move.
pub fn move_to_san(board: &Board, from: Square, to: Square) -> Option<String> {
    let mut after = board.clone();
    let mov = after.make_move(from, to)?;

    let mut san = if mov.is_castling() {
        mov.notation()
    } else {
        let moved_kind = board.piece_at(from)?.kind;
        let mut san = String::new();
        if let Some(letter) = moved_kind.san_letter() {
            san.push(letter);
            san.push_str(&disambiguation(board, moved_kind, from, to));
        } else if mov.is_capture() {
            san.push(from.file_char());
        }
        if mov.is_capture() {
            san.push('x');
        }
        san.push_str(&to.to_algebraic());
        if mov.is_promotion() {
            san.push_str("=Q");
        }
        san
    };

    match after.status() {
        GameStatus::Checkmate { .. } => san.push('#'),
        _ if after.is_in_check(after.current_turn()) => san.push('+'),
        _ => {}
    }
    Some(san)
}

/// Parses a SAN string into the matching legal `(from, to)` pair.
pub fn san_to_move(board: &Board, san: &str) -> Result<(Square, Square), SanError> {
    let san = san.trim();
    if san.is_empty() {
        return Err(SanError::Empty);
    }
    let body = san.trim_end_matches(['#', '+']);

    if body == "O-O" || body == "0-0" || body == "O-O-O" || body == "0-0-0" {
        let kingside = body.len() == 3;
        return board
            .legal_moves()
            .into_iter()
            .find(|&(from, to)| {
                let is_king = board
                    .piece_at(from)
                    .is_some_and(|p| p.kind == PieceKind::King);
                let d_col = to.col() as i8 - from.col() as i8;
                is_king && d_col == if kingside { 2 } else { -2 }
            })
            .ok_or_else(|| SanError::NoMatchingMove(san.to_string()));
    }

    let (kind, rest) = match body.chars().next() {
        Some(c) if c.is_ascii_uppercase() => {
            let kind = PieceKind::ALL
                .into_iter()
                .find(|k| k.san_letter() == Some(c))
                .ok_or_else(|| SanError::InvalidFormat(format!("invalid piece: {}", c)))?;
            (kind, &body[1..])
        }
        _ => (PieceKind::Pawn, body),
    };

    let rest = match rest.split_once('=') {
        Some((head, "Q")) => head,
        Some(_) => {
            return Err(SanError::InvalidFormat(format!(
                "only queen promotion is supported: {}",
                san
            )))
        }
        None => rest,
    };
    let rest: String = rest.chars().filter(|&c| c != 'x').collect();
    if rest.len() < 2 || !rest.is_ascii() {
        return Err(SanError::InvalidFormat(format!("too short: {}", san)));
    }

    let (hint, dest) = rest.split_at(rest.len() - 2);
    let to = Square::from_algebraic(dest)
        .ok_or_else(|| SanError::InvalidFormat(format!("invalid square: {}", dest)))?;
    let (hint_file, hint_rank) = parse_hint(hint)
        .ok_or_else(|| SanError::InvalidFormat(format!("invalid disambiguation: {}", hint)))?;

    let matching: Vec<(Square, Square)> = board
        .legal_moves()
        .into_iter()
        .filter(|&(from, target)| {
            target == to
                && board.piece_at(from).is_some_and(|p| p.kind == kind)
                && hint_file.map_or(true, |c| from.file_char() == c)
                && hint_rank.map_or(true, |c| from.rank_char() == c)
        })
        .collect();

    match matching.as_slice() {
        [] => Err(SanError::NoMatchingMove(san.to_string())),
        [single] => Ok(*single),
        _ => Err(SanError::AmbiguousMove(san.to_string())),
    }
}

fn parse_hint(hint: &str) -> Option<(Option<char>, Option<char>)> {
    let mut file = None;
    let mut rank = None;
    for c in hint.chars() {
        match c {
            'a'..='h' if file.is_none() && rank.is_none() => file = Some(c),
            '1'..='8' if rank.is_none() => rank = Some(c),
            _ => return None,
        }
    }
    Some((file, rank))
}

fn disambiguation(board: &Board, kind: PieceKind, from: Square, to: Square) -> String {
    if kind == PieceKind::King {
        return String::new();
    }
    let rivals: Vec<Square> = board
        .legal_moves()
        .into_iter()
        .filter(|&(other, target)| {
            target == to && other != from && board.piece_at(other).is_some_and(|p| p.kind == kind)
        })
        .map(|(other, _)| other)
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|r| r.col() != from.col()) {
        from.file_char().to_string()
    } else if rivals.iter().all(|r| r.row() != from.row()) {
        from.rank_char().to_string()
    } else {
        from.to_algebraic()
    }
}
