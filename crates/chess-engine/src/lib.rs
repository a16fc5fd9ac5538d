//! Chess rules engine over an 8x8 grid.
//!
//! This crate provides:
//! - [`Board`] - position, side to move, move history and en passant state
//! - [`Grid`] - the raw 8x8 array of squares
//! - [`GameStatus`] - in progress, checkmate or stalemate
//! - Move validation, attack detection and undo
//! - FEN setup, SAN rendering and parsing
//! - [`PuzzleSession`] for playing forced lines from a FEN position, and
//!   [`builtin_puzzles`] for a starter set
//!
//! # Example
//!
//! ```
//! use chess_engine::{Board, GameStatus};
//! use chess_core::Square;
//!
//! let mut board = Board::new();
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let e4 = Square::from_algebraic("e4").unwrap();
//!
//! assert_eq!(board.possible_moves(e2).len(), 2);
//! let mv = board.make_move(e2, e4).unwrap();
//! assert_eq!(mv.notation(), "e4");
//! assert_eq!(board.status(), GameStatus::InProgress);
//!
//! board.undo_last_move();
//! assert_eq!(board, Board::new());
//! ```

mod board;
mod fen;
mod grid;
mod history;
pub mod movegen;
pub mod puzzle;
pub mod san;
mod status;

pub use board::Board;
pub use grid::Grid;
pub use history::HistoryEntry;
pub use puzzle::{
    builtin_puzzles, Puzzle, PuzzleDifficulty, PuzzleError, PuzzleProgress, PuzzleSession,
    PuzzleTheme,
};
pub use san::{move_to_san, san_to_move, SanError};
pub use status::GameStatus;
