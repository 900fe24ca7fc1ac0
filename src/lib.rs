//! Othello-AI: an Othello engine with configurable capture rules.
//!
//! The board supports any combination of horizontal, vertical and diagonal
//! capture. Three search families pick moves for a computer player, chosen
//! by a difficulty level from 1 to 10.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, cell symbols and search parameters
//! - [`rules`] - Capture rule sets and compass directions
//! - [`board`] - Board state, legal moves and captures
//! - [`eval`] - Static evaluation functions
//! - [`minimax`] - Plain minimax and alpha-beta search
//! - [`mcts`] - Monte Carlo Tree Search with UCT
//! - [`difficulty`] - Level table, strategies and bots
//! - [`game`] - Turn, pass and end-of-match orchestration
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```
//! use othello_ai::board::{Board, Piece, Position};
//! use othello_ai::difficulty::{Difficulty, DifficultySelector};
//! use othello_ai::rules::CaptureRules;
//!
//! let mut board = Board::fresh();
//! let rules = CaptureRules::all();
//!
//! // Play an opening move
//! board.place_piece(Position::new(2, 4), Piece::Player1, rules);
//! assert_eq!(board.counts(), (4, 1));
//!
//! // Ask a level 7 bot for the reply
//! let level = Difficulty::new(7).unwrap();
//! let reply = DifficultySelector::new().best_move(level, &board, rules, Piece::Player2);
//! assert!(reply.is_some());
//! ```

pub mod board;
pub mod constants;
pub mod difficulty;
pub mod error;
pub mod eval;
pub mod game;
pub mod mcts;
pub mod minimax;
pub mod rules;
