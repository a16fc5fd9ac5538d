//! Command-line harness for the chess engine.
//!
//! # Modules
//!
//! - [`config`] - `chess.toml` loading
//! - [`self_play`] - computer-versus-computer games with SAN move records

pub mod config;
pub mod self_play;
