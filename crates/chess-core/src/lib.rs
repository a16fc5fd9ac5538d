//! Core types for chess.
//!
//! This crate provides the value types shared by the engine and the search:
//! - [`Piece`], [`PieceKind`] and [`Color`] for piece representation
//! - [`Square`] for board coordinates
//! - [`Move`] and [`MoveKind`] for applied moves
//! - FEN parsing for seeding positions

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{CastlingRights, Fen, FenError};
pub use mov::{Move, MoveKind};
pub use piece::{Piece, PieceKind};
pub use square::Square;
