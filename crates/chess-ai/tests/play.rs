//! Whole-game behaviour of the computer opponent.

use chess_ai::{best_move, best_move_with_rng, Difficulty};
use chess_core::Square;
use chess_engine::{Board, GameStatus};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn sq(s: &str) -> Square {
    Square::from_algebraic(s).unwrap()
}

#[test]
fn every_difficulty_returns_a_legal_move() {
    let mut rng = StdRng::seed_from_u64(3);
    let board = Board::from_fen("4k3/8/8/8/3q4/8/8/3RK3 w - - 0 1").unwrap();
    for difficulty in Difficulty::ALL {
        let (from, to) = best_move_with_rng(&board, difficulty, &mut rng).unwrap();
        assert!(board.is_valid_move(from, to), "{}", difficulty);
    }
}

#[test]
fn caller_board_is_untouched() {
    let mut board = Board::from_fen("4k3/8/8/8/3q4/8/8/3RK3 w - - 0 1").unwrap();
    board.make_move(sq("e1"), sq("e2")).unwrap();
    let before = board.clone();
    for difficulty in Difficulty::ALL {
        best_move(&board, difficulty);
        assert_eq!(board, before);
    }
}

#[test]
fn no_move_on_terminal_positions() {
    let stalemate = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    let mate = Board::from_fen("R6k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    for difficulty in Difficulty::ALL {
        assert_eq!(best_move(&stalemate, difficulty), None);
        assert_eq!(best_move(&mate, difficulty), None);
    }
}

#[test]
fn hard_finds_back_rank_mate() {
    let board = Board::from_fen("6k1/5ppp/8/8/8/8/5PPP/4R1K1 w - - 0 1").unwrap();
    assert_eq!(
        best_move(&board, Difficulty::Hard),
        Some((sq("e1"), sq("e8")))
    );
}

#[test]
fn seeded_easy_games_are_reproducible() {
    let play = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = Board::new();
        for _ in 0..30 {
            if board.status() != GameStatus::InProgress {
                break;
            }
            let (from, to) = best_move_with_rng(&board, Difficulty::Easy, &mut rng).unwrap();
            board.make_move(from, to).unwrap();
        }
        board
    };
    assert_eq!(play(11), play(11));
}
