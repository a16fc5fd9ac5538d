//! Computer-versus-computer games.
//!
//! [`play_game`] alternates [`best_move_with_rng`] calls for both sides until
//! the game ends or the ply limit is reached.

use chess_ai::evaluation::material_balance;
use chess_ai::{best_move_with_rng, Difficulty};
use chess_core::Color;
use chess_engine::{move_to_san, Board, GameStatus};
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while playing a game.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelfPlayError {
    /// The search produced a move the board rejected.
    #[error("Illegal move from search: {0}")]
    IllegalMove(String),
}

/// A single played move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    /// The move in UCI notation (e.g., "e2e4", "e7e8q").
    pub uci: String,
    /// The move in SAN with check suffix (e.g., "Qh4#").
    pub san: String,
}

/// A finished or interrupted game.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub white: Difficulty,
    pub black: Difficulty,
    pub start_fen: String,
    pub moves: Vec<MoveRecord>,
    /// Status of the side to move after the last ply.
    pub status: GameStatus,
    pub final_fen: String,
    /// Material balance in centipawns from White's side at the end.
    pub material: i32,
}

impl GameRecord {
    /// PGN-style result token: "1-0", "0-1", "1/2-1/2", or "*" when unfinished.
    pub fn result(&self) -> &'static str {
        match self.status {
            GameStatus::Checkmate {
                winner: Color::White,
            } => "1-0",
            GameStatus::Checkmate {
                winner: Color::Black,
            } => "0-1",
            GameStatus::Stalemate => "1/2-1/2",
            GameStatus::InProgress => "*",
        }
    }

    /// Numbered SAN movetext followed by the result, e.g. "1. e4 e5 2. Nf3 *".
    ///
    /// Numbering follows the side that moved first, so a game started from a
    /// Black-to-move position opens with "1... ".
    pub fn movetext(&self, first_mover: Color) -> String {
        let offset = usize::from(first_mover == Color::Black);
        let mut text = String::new();
        for (i, mv) in self.moves.iter().enumerate() {
            let ply = i + offset;
            if ply % 2 == 0 {
                text.push_str(&format!("{}. ", ply / 2 + 1));
            } else if i == 0 {
                text.push_str("1... ");
            }
            text.push_str(&mv.san);
            text.push(' ');
        }
        text.push_str(self.result());
        text
    }
}

/// Plays from `board` until a terminal status or `max_plies` moves.
pub fn play_game<R: Rng + ?Sized>(
    mut board: Board,
    white: Difficulty,
    black: Difficulty,
    max_plies: usize,
    rng: &mut R,
) -> Result<GameRecord, SelfPlayError> {
    let start_fen = board.to_fen();
    let mut moves = Vec::new();

    while moves.len() < max_plies && !board.status().is_terminal() {
        let difficulty = match board.current_turn() {
            Color::White => white,
            Color::Black => black,
        };
        let Some((from, to)) = best_move_with_rng(&board, difficulty, rng) else {
            break;
        };
        let san = move_to_san(&board, from, to)
            .ok_or_else(|| SelfPlayError::IllegalMove(format!("{}{}", from, to)))?;
        let mv = board
            .make_move(from, to)
            .ok_or_else(|| SelfPlayError::IllegalMove(format!("{}{}", from, to)))?;

        tracing::debug!(ply = moves.len() + 1, %difficulty, san = %san, "move played");
        moves.push(MoveRecord {
            uci: mv.to_uci(),
            san,
        });
    }

    let status = board.status();
    tracing::info!(plies = moves.len(), %status, "game finished");

    Ok(GameRecord {
        white,
        black,
        start_fen,
        moves,
        status,
        final_fen: board.to_fen(),
        material: material_balance(&board),
    })
}
