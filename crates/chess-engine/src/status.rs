//! Game-terminal status.

use chess_core::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of the side to move.
///
/// Both terminal states are absorbing by convention: the board itself keeps
/// accepting moves, so callers stop play once a terminal status is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// The side to move has at least one legal move.
    InProgress,
    /// The side to move is checkmated.
    Checkmate { winner: Color },
    /// The side to move has no legal move and is not in check.
    Stalemate,
}

impl GameStatus {
    /// Returns true for checkmate or stalemate.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Returns the winner, if any.
    #[inline]
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            GameStatus::Stalemate => write!(f, "stalemate"),
        }
    }
}
