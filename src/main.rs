//! Othello-AI: command line front end for the engine.
//!
//! ## Usage
//!
//! - `othello-ai` - Show a demo
//! - `othello-ai best-move --level 7 --player 1` - Ask a bot for a move
//! - `othello-ai valid --board start.txt` - Check a starting board
//! - `othello-ai play --player1 5 --player2 9` - Watch two bots play
//!
//! Boards are read as 8 rows of `B` (player 1), `N` (player 2) and `?`
//! (empty), one row per line.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use othello_ai::board::{Board, Piece};
use othello_ai::difficulty::{Difficulty, DifficultySelector};
use othello_ai::error::InvalidRules;
use othello_ai::game::{Controller, Match, Outcome};
use othello_ai::rules::CaptureRules;

/// Othello-AI: an Othello engine with configurable capture rules
#[derive(Parser)]
#[command(name = "othello-ai")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log search decisions (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the move a bot of the given level would play
    BestMove {
        /// Difficulty level, 1 to 10
        #[arg(short, long)]
        level: Difficulty,
        /// Side to move, 1 or 2
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=2))]
        player: u8,
        #[command(flatten)]
        setup: Setup,
    },
    /// Check that a starting board is playable and list each side's moves
    Valid {
        #[command(flatten)]
        setup: Setup,
    },
    /// Play a full bot-versus-bot match
    Play {
        /// Level of the bot playing player 1
        #[arg(long)]
        player1: Difficulty,
        /// Level of the bot playing player 2
        #[arg(long)]
        player2: Difficulty,
        #[command(flatten)]
        setup: Setup,
    },
    /// Run a simple demo of the engine
    Demo,
}

/// Board and rule options shared by the subcommands.
#[derive(Args)]
struct Setup {
    /// Enabled capture axes: any of h, v, d
    #[arg(short, long, default_value = "hvd")]
    rules: CaptureRules,
    /// File holding the starting board (default: standard opening)
    #[arg(short, long)]
    board: Option<PathBuf>,
    /// Seed for the MCTS tie-break jitter
    #[arg(long)]
    seed: Option<u64>,
}

impl Setup {
    fn rules(&self) -> Result<CaptureRules> {
        if self.rules.is_empty() {
            return Err(InvalidRules::NoDirection.into());
        }
        Ok(self.rules)
    }

    fn board(&self) -> Result<Board> {
        let Some(path) = &self.board else {
            return Ok(Board::fresh());
        };
        let text = fs::read_to_string(path).with_context(|| format!("reading board from {}", path.display()))?;
        text.parse::<Board>()
            .with_context(|| format!("parsing board from {}", path.display()))
    }

    fn selector(&self) -> DifficultySelector {
        match self.seed {
            Some(seed) => DifficultySelector::with_seed(seed),
            None => DifficultySelector::new(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::BestMove { level, player, setup }) => best_move(level, piece(player), &setup),
        Some(Commands::Valid { setup }) => valid(&setup),
        Some(Commands::Play {
            player1,
            player2,
            setup,
        }) => play(player1, player2, &setup),
        Some(Commands::Demo) | None => {
            run_demo();
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn piece(player: u8) -> Piece {
    if player == 2 { Piece::Player2 } else { Piece::Player1 }
}

fn best_move(level: Difficulty, owner: Piece, setup: &Setup) -> Result<()> {
    let rules = setup.rules()?;
    let board = setup.board()?;
    match setup.selector().best_move(level, &board, rules, owner) {
        Some(pos) => println!("{pos}"),
        None => println!("none"),
    }
    Ok(())
}

fn valid(setup: &Setup) -> Result<()> {
    let rules = setup.rules()?;
    let board = setup.board()?;
    print!("{board}");
    board.is_valid(rules).context("board cannot be used to start a game")?;

    for owner in [Piece::Player1, Piece::Player2] {
        let moves: Vec<String> = board
            .valid_positions(owner, rules)
            .into_iter()
            .map(|p| p.to_string())
            .collect();
        println!("{owner} ({}): {}", owner.symbol(), moves.join(" "));
    }
    Ok(())
}

fn play(player1: Difficulty, player2: Difficulty, setup: &Setup) -> Result<()> {
    let rules = setup.rules()?;
    let board = setup.board()?;
    board.is_valid(rules).context("board cannot be used to start a game")?;

    let mut game = Match::with_board(
        board,
        rules,
        Controller::Bot(player1),
        Controller::Bot(player2),
        Piece::Player1,
    )
    .with_selector(setup.selector());

    while !game.is_finished() {
        let mover = game.to_move();
        let pos = game.play_bot_turn()?;
        println!("{mover}: {pos}");
    }

    print!("\n{}", game.board());
    let (p1, p2) = game.board().counts();
    match game.outcome() {
        Some(Outcome::Winner(piece)) => println!("{piece} wins {p1}-{p2}"),
        Some(Outcome::Draw) | None => println!("draw {p1}-{p2}"),
    }
    Ok(())
}

fn run_demo() {
    println!("Othello-AI: configurable-rule Othello engine\n");

    let rules = CaptureRules::all();
    let mut board = Board::fresh();
    println!("=== Board Demo ===");
    print!("{board}");
    let flipped = board.place_piece((2, 4).into(), Piece::Player1, rules);
    println!("Player 1 at (2, 4) flips {flipped:?}");
    println!("Counts: {:?}\n", board.counts());

    println!("=== Strategy Demo ===");
    let selector = DifficultySelector::with_seed(1);
    for level in [1, 5, 7] {
        let Ok(difficulty) = Difficulty::new(level) else {
            continue;
        };
        let (kind, param) = difficulty.plan();
        let reply = selector.best_move(difficulty, &board, rules, Piece::Player2);
        match reply {
            Some(pos) => println!("Level {difficulty} ({kind}, {param}): {pos}"),
            None => println!("Level {difficulty} ({kind}, {param}): no move"),
        }
    }
}
