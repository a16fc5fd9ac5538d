//! `chess` - inspect positions, ask the computer for a move, or watch it
//! play itself.

use anyhow::Context;
use chess_ai::{best_move, Difficulty};
use chess_cli::config::CliConfig;
use chess_cli::self_play::play_game;
use chess_core::{Fen, Square};
use chess_engine::{move_to_san, Board};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chess")]
#[command(about = "Chess rules engine and computer opponent")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the legal destinations of the piece on a square
    Moves {
        /// Square of the piece, e.g. "e2"
        square: String,
        /// Position to inspect
        #[arg(long, default_value = Fen::STARTPOS)]
        fen: String,
    },
    /// Ask the computer for a move
    BestMove {
        /// Position to search
        #[arg(long, default_value = Fen::STARTPOS)]
        fen: String,
        /// easy, medium or hard
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
    },
    /// Let the computer play both sides
    SelfPlay {
        /// Difficulty for White
        #[arg(long)]
        white: Option<Difficulty>,
        /// Difficulty for Black
        #[arg(long)]
        black: Option<Difficulty>,
        /// Stop after this many plies
        #[arg(long)]
        max_plies: Option<usize>,
        /// RNG seed for reproducible games
        #[arg(long)]
        seed: Option<u64>,
        /// Starting position (defaults to the standard setup)
        #[arg(long)]
        fen: Option<String>,
        /// Print the game record as JSON instead of movetext
        #[arg(long)]
        json: bool,
    },
}

fn parse_board(fen: &str) -> anyhow::Result<Board> {
    Board::from_fen(fen).with_context(|| format!("invalid FEN: {}", fen))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(CliConfig::config_path);
    let config = CliConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    tracing::debug!("Config: {:?}", config);

    match cli.command {
        Commands::Moves { square, fen } => {
            let board = parse_board(&fen)?;
            let from = Square::from_algebraic(&square)
                .with_context(|| format!("invalid square: {}", square))?;
            let destinations: Vec<String> = board
                .possible_moves(from)
                .into_iter()
                .map(|to| to.to_algebraic())
                .collect();
            println!("{}", destinations.join(" "));
        }

        Commands::BestMove { fen, difficulty } => {
            let board = parse_board(&fen)?;
            let difficulty = difficulty.unwrap_or(config.difficulty);
            tracing::info!("Searching at {} for {}", difficulty, board.current_turn());

            match best_move(&board, difficulty) {
                Some((from, to)) => {
                    let san = move_to_san(&board, from, to).unwrap_or_default();
                    println!("{} {}{}", san, from, to);
                }
                None => println!("none ({})", board.status()),
            }
        }

        Commands::SelfPlay {
            white,
            black,
            max_plies,
            seed,
            fen,
            json,
        } => {
            let defaults = config.self_play;
            let board = match fen {
                Some(fen) => parse_board(&fen)?,
                None => Board::new(),
            };
            let first_mover = board.current_turn();
            let white = white.unwrap_or(defaults.white);
            let black = black.unwrap_or(defaults.black);
            let max_plies = max_plies.unwrap_or(defaults.max_plies);
            let mut rng = match seed.or(defaults.seed) {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            tracing::info!("Self-play: {} (White) vs {} (Black)", white, black);
            let record = play_game(board, white, black, max_plies, &mut rng)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!("{}", record.movetext(first_mover));
                println!("{} (material {:+})", record.status, record.material);
                println!("{}", record.final_fen);
            }
        }
    }

    Ok(())
}
