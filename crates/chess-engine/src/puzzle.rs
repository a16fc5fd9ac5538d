//! Puzzle sessions: a FEN position plus a forced line of moves.
//!
//! The solver plays every even step of the solution; the session answers
//! with the odd steps itself.

use crate::Board;
use chess_core::{FenError, Square};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while setting up or playing a puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("invalid puzzle position: {0}")]
    InvalidFen(#[from] FenError),
    #[error("puzzle has no solution moves")]
    EmptySolution,
    #[error("wrong move: {from}{to}")]
    WrongMove { from: Square, to: Square },
    #[error("puzzle is already solved")]
    AlreadySolved,
    #[error("solution step {0} is not a legal move")]
    IllegalSolutionStep(usize),
}

/// How hard a puzzle is meant to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PuzzleDifficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

/// The tactical idea a puzzle trains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PuzzleTheme {
    Mate,
    Fork,
    Pin,
    Skewer,
    DiscoveredAttack,
    Sacrifice,
    Endgame,
    #[default]
    Tactical,
}

impl PuzzleTheme {
    pub const fn as_str(self) -> &'static str {
        match self {
            PuzzleTheme::Mate => "Checkmate",
            PuzzleTheme::Fork => "Fork",
            PuzzleTheme::Pin => "Pin",
            PuzzleTheme::Skewer => "Skewer",
            PuzzleTheme::DiscoveredAttack => "Discovered Attack",
            PuzzleTheme::Sacrifice => "Sacrifice",
            PuzzleTheme::Endgame => "Endgame",
            PuzzleTheme::Tactical => "Tactical",
        }
    }
}

/// A puzzle definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub title: String,
    pub fen: String,
    /// Alternating solver and opponent moves, starting with the solver.
    pub solution: Vec<(Square, Square)>,
    #[serde(default)]
    pub difficulty: PuzzleDifficulty,
    #[serde(default)]
    pub theme: PuzzleTheme,
    #[serde(default)]
    pub description: String,
}

impl Puzzle {
    /// Creates a beginner-level tactical puzzle with no description.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        fen: impl Into<String>,
        solution: Vec<(Square, Square)>,
    ) -> Self {
        Puzzle {
            title: title.into(),
            fen: fen.into(),
            solution,
            difficulty: PuzzleDifficulty::default(),
            theme: PuzzleTheme::default(),
            description: String::new(),
        }
    }

    /// Sets the difficulty, theme and description.
    #[must_use]
    pub fn with_details(
        mut self,
        difficulty: PuzzleDifficulty,
        theme: PuzzleTheme,
        description: impl Into<String>,
    ) -> Self {
        self.difficulty = difficulty;
        self.theme = theme;
        self.description = description.into();
        self
    }
}

/// Parses a space-separated list of coordinate moves such as "f3g5 d8e7".
///
/// Returns `None` if any entry is not two squares.
fn parse_line(line: &str) -> Option<Vec<(Square, Square)>> {
    line.split_whitespace()
        .map(|mv| {
            let from = Square::from_algebraic(mv.get(0..2)?)?;
            let to = Square::from_algebraic(mv.get(2..)?)?;
            Some((from, to))
        })
        .collect()
}

/// Returns the built-in puzzle set, easiest first.
#[must_use]
pub fn builtin_puzzles() -> Vec<Puzzle> {
    let entries = [
        (
            "Back Rank Mate",
            "6k1/5ppp/8/8/8/8/5PPP/4R1K1 w - - 0 1",
            "e1e8",
            PuzzleDifficulty::Beginner,
            PuzzleTheme::Mate,
            "Deliver checkmate on the back rank.",
        ),
        (
            "Knight Fork",
            "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 0 1",
            "f3g5 d8e7 g5f7",
            PuzzleDifficulty::Beginner,
            PuzzleTheme::Fork,
            "Use the knight to attack two pieces at once.",
        ),
        (
            "Simple Pin",
            "r1bqkb1r/pppp1ppp/2n5/4p3/2B1n3/5N2/PPPP1PPP/RNBQK2R w KQkq - 0 1",
            "d1e2",
            PuzzleDifficulty::Beginner,
            PuzzleTheme::Pin,
            "Pin the knight against the king.",
        ),
        (
            "Skewer Attack",
            "2r2rk1/5ppp/8/3Q4/8/8/5PPP/4R1K1 w - - 0 1",
            "d5a8 c8a8 e1e8",
            PuzzleDifficulty::Intermediate,
            PuzzleTheme::Skewer,
            "Give up the queen to open the back rank.",
        ),
        (
            "Discovered Attack",
            "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQK2R w KQkq - 0 1",
            "f3d4 e8f8 d4c6",
            PuzzleDifficulty::Advanced,
            PuzzleTheme::DiscoveredAttack,
            "Move the knight to uncover an attack and win material.",
        ),
    ];

    entries
        .into_iter()
        .filter_map(|(title, fen, line, difficulty, theme, description)| {
            let solution = parse_line(line)?;
            Some(Puzzle::new(title, fen, solution).with_details(difficulty, theme, description))
        })
        .collect()
}

/// Result of a correct solver move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleProgress {
    /// The opponent answered with `reply`; the solver is to move again.
    Continue { reply: (Square, Square) },
    /// The whole line has been played.
    Solved,
}

/// A puzzle being played on its own board.
#[derive(Debug, Clone)]
pub struct PuzzleSession {
    puzzle: Puzzle,
    board: Board,
    next_step: usize,
    attempts: u32,
}

impl PuzzleSession {
    /// Sets up the puzzle position.
    pub fn new(puzzle: Puzzle) -> Result<Self, PuzzleError> {
        if puzzle.solution.is_empty() {
            return Err(PuzzleError::EmptySolution);
        }
        let board = Board::from_fen(&puzzle.fen)?;
        Ok(PuzzleSession {
            puzzle,
            board,
            next_step: 0,
            attempts: 0,
        })
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of moves tried so far, right or wrong.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_solved(&self) -> bool {
        self.next_step >= self.puzzle.solution.len()
    }

    /// Returns the move the solver is expected to play next.
    pub fn hint(&self) -> Option<(Square, Square)> {
        self.puzzle.solution.get(self.next_step).copied()
    }

    /// Plays a solver move.
    ///
    /// A wrong move counts as an attempt and leaves the board unchanged. A
    /// correct move is applied together with the opponent's reply, or not at
    /// all if either step turns out to be illegal.
    pub fn try_move(&mut self, from: Square, to: Square) -> Result<PuzzleProgress, PuzzleError> {
        let expected = self.hint().ok_or(PuzzleError::AlreadySolved)?;
        self.attempts += 1;
        if (from, to) != expected {
            return Err(PuzzleError::WrongMove { from, to });
        }

        let mut board = self.board.clone();
        let mut step = self.next_step;
        board
            .make_move(from, to)
            .ok_or(PuzzleError::IllegalSolutionStep(step))?;
        step += 1;

        let reply = match self.puzzle.solution.get(step).copied() {
            Some((reply_from, reply_to)) => {
                board
                    .make_move(reply_from, reply_to)
                    .ok_or(PuzzleError::IllegalSolutionStep(step))?;
                step += 1;
                Some((reply_from, reply_to))
            }
            None => None,
        };

        self.board = board;
        self.next_step = step;
        Ok(match reply {
            Some(reply) if !self.is_solved() => PuzzleProgress::Continue { reply },
            _ => PuzzleProgress::Solved,
        })
    }

    /// Restores the starting position and clears progress and attempts.
    pub fn reset(&mut self) -> Result<(), PuzzleError> {
        self.board = Board::from_fen(&self.puzzle.fen)?;
        self.next_step = 0;
        self.attempts = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameStatus;
    use chess_core::Color;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn back_rank() -> Puzzle {
        Puzzle::new(
            "Back Rank Mate",
            "6k1/5ppp/8/8/8/8/5PPP/4R1K1 w - - 0 1",
            vec![(sq("e1"), sq("e8"))],
        )
    }

    fn knight_fork() -> Puzzle {
        Puzzle::new(
            "Knight Fork",
            "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 0 1",
            vec![
                (sq("f3"), sq("g5")),
                (sq("d8"), sq("e7")),
                (sq("g5"), sq("f7")),
            ],
        )
    }

    #[test]
    fn single_move_puzzle() {
        let mut session = PuzzleSession::new(back_rank()).unwrap();
        assert!(!session.is_solved());
        assert_eq!(
            session.try_move(sq("e1"), sq("e8")),
            Ok(PuzzleProgress::Solved)
        );
        assert!(session.is_solved());
        assert_eq!(
            session.board().status(),
            GameStatus::Checkmate {
                winner: Color::White
            }
        );
        assert_eq!(
            session.try_move(sq("g1"), sq("h1")),
            Err(PuzzleError::AlreadySolved)
        );
        assert_eq!(session.hint(), None);
    }

    #[test]
    fn opponent_reply_is_played() {
        let mut session = PuzzleSession::new(knight_fork()).unwrap();
        assert_eq!(
            session.try_move(sq("f3"), sq("g5")),
            Ok(PuzzleProgress::Continue {
                reply: (sq("d8"), sq("e7"))
            })
        );
        assert_eq!(session.board().current_turn(), Color::White);
        assert_eq!(session.hint(), Some((sq("g5"), sq("f7"))));
        assert_eq!(
            session.try_move(sq("g5"), sq("f7")),
            Ok(PuzzleProgress::Solved)
        );
        assert_eq!(session.attempts(), 2);
    }

    #[test]
    fn wrong_move_leaves_board_unchanged() {
        let mut session = PuzzleSession::new(back_rank()).unwrap();
        let before = session.board().clone();
        assert_eq!(
            session.try_move(sq("e1"), sq("e2")),
            Err(PuzzleError::WrongMove {
                from: sq("e1"),
                to: sq("e2")
            })
        );
        assert_eq!(session.board(), &before);
        assert_eq!(session.attempts(), 1);
        assert_eq!(session.hint(), Some((sq("e1"), sq("e8"))));
    }

    #[test]
    fn reset_restores_start() {
        let mut session = PuzzleSession::new(knight_fork()).unwrap();
        session.try_move(sq("f3"), sq("g5")).unwrap();
        session.reset().unwrap();
        assert_eq!(session.attempts(), 0);
        assert_eq!(session.board().ply_count(), 0);
        assert_eq!(session.hint(), Some((sq("f3"), sq("g5"))));
    }

    #[test]
    fn illegal_reply_is_rejected_atomically() {
        let puzzle = Puzzle::new(
            "Broken",
            "6k1/5ppp/8/8/8/8/5PPP/4R1K1 w - - 0 1",
            vec![(sq("e1"), sq("e2")), (sq("a1"), sq("a2"))],
        );
        let mut session = PuzzleSession::new(puzzle).unwrap();
        let before = session.board().clone();
        assert_eq!(
            session.try_move(sq("e1"), sq("e2")),
            Err(PuzzleError::IllegalSolutionStep(1))
        );
        assert_eq!(session.board(), &before);
        assert!(!session.is_solved());
    }

    #[test]
    fn builtin_puzzles_are_solvable() {
        let puzzles = builtin_puzzles();
        assert_eq!(puzzles.len(), 5);
        let expected = back_rank().with_details(
            PuzzleDifficulty::Beginner,
            PuzzleTheme::Mate,
            "Deliver checkmate on the back rank.",
        );
        assert_eq!(puzzles[0], expected);
        assert_eq!(puzzles[1].solution, knight_fork().solution);

        for puzzle in puzzles {
            let title = puzzle.title.clone();
            let mut session = PuzzleSession::new(puzzle).unwrap();
            while let Some((from, to)) = session.hint() {
                assert!(session.try_move(from, to).is_ok(), "{}", title);
            }
            assert!(session.is_solved(), "{}", title);
        }
    }

    #[test]
    fn metadata_defaults_when_missing() {
        let json = r#"{"title":"Mate","fen":"6k1/5ppp/8/8/8/8/5PPP/4R1K1 w - - 0 1","solution":[]}"#;
        let puzzle: Puzzle = serde_json::from_str(json).unwrap();
        assert_eq!(puzzle.difficulty, PuzzleDifficulty::Beginner);
        assert_eq!(puzzle.theme, PuzzleTheme::Tactical);
        assert!(puzzle.description.is_empty());
        assert_eq!(PuzzleTheme::DiscoveredAttack.as_str(), "Discovered Attack");
    }

    #[test]
    fn parse_line_rejects_bad_entries() {
        assert_eq!(
            parse_line("e2e4 e7e5"),
            Some(vec![(sq("e2"), sq("e4")), (sq("e7"), sq("e5"))])
        );
        assert_eq!(parse_line("e2e9"), None);
        assert_eq!(parse_line("e2"), None);
    }

    #[test]
    fn setup_errors() {
        let empty = Puzzle::new("Empty", "8/8/8/8/8/8/8/8 w - - 0 1", Vec::new());
        assert_eq!(
            PuzzleSession::new(empty).unwrap_err(),
            PuzzleError::EmptySolution
        );
        let bad = Puzzle::new("Bad", "not a fen", vec![(sq("e1"), sq("e2"))]);
        assert!(matches!(
            PuzzleSession::new(bad),
            Err(PuzzleError::InvalidFen(_))
        ));
    }
}
