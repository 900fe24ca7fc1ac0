//! Difficulty levels and the strategy table behind them.
//!
//! Every level from 1 to 10 maps to one search strategy and one tuning
//! parameter:
//!
//! | level | strategy          | parameter                         |
//! |-------|-------------------|-----------------------------------|
//! | 1-4   | Monte Carlo       | 7000, 8000, 9000, 10000 iterations |
//! | 5-6   | plain minimax     | depth 1, 2                        |
//! | 7-10  | alpha-beta        | depth 3, 4, 5, 6                  |
//!
//! All searches run to their full budget on the calling thread.

use std::fmt;
use std::str::FromStr;

use fastrand::Rng;
use tracing::debug;

use crate::board::{Board, Piece, Position};
use crate::constants::{
    ITERATIONS_PER_LEVEL, MAX_LEVEL, MCTS_LEVEL_OFFSET, MCTS_LEVELS, MIN_LEVEL, PLAIN_MINIMAX_MAX_LEVEL,
};
use crate::error::{InvalidDifficulty, ParseDifficultyError};
use crate::mcts;
use crate::minimax;
use crate::rules::CaptureRules;

/// A validated difficulty level in `1..=10`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: Difficulty = Difficulty(MIN_LEVEL);
    pub const MAX: Difficulty = Difficulty(MAX_LEVEL);

    pub fn new(level: u8) -> Result<Self, InvalidDifficulty> {
        if (MIN_LEVEL..=MAX_LEVEL).contains(&level) {
            Ok(Difficulty(level))
        } else {
            Err(InvalidDifficulty(level))
        }
    }

    #[inline]
    pub const fn level(self) -> u8 {
        self.0
    }

    /// Every selectable level, easiest label first.
    pub fn all() -> impl Iterator<Item = Difficulty> {
        (MIN_LEVEL..=MAX_LEVEL).map(Difficulty)
    }

    /// Strategy kind and tuning parameter for this level.
    pub fn plan(self) -> (StrategyKind, u32) {
        let level = self.0;
        if level <= MCTS_LEVELS {
            let tuning = u32::from(level) + MCTS_LEVEL_OFFSET;
            (StrategyKind::MonteCarlo, tuning * ITERATIONS_PER_LEVEL)
        } else {
            let depth = u32::from(level - MCTS_LEVELS);
            if level <= PLAIN_MINIMAX_MAX_LEVEL {
                (StrategyKind::PlainMinimax, depth)
            } else {
                (StrategyKind::AlphaBeta, depth)
            }
        }
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = InvalidDifficulty;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Difficulty::new(level)
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level: u8 = s
            .trim()
            .parse()
            .map_err(|_| ParseDifficultyError::NotANumber(s.to_string()))?;
        Ok(Difficulty::new(level)?)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The three search families a level can resolve to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// MCTS; the parameter is an iteration count.
    MonteCarlo,
    /// Unpruned minimax over the piece count; the parameter is a depth.
    PlainMinimax,
    /// Alpha-beta over the positional heuristic; the parameter is a depth.
    AlphaBeta,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StrategyKind::MonteCarlo => "mcts",
            StrategyKind::PlainMinimax => "minimax",
            StrategyKind::AlphaBeta => "alpha-beta",
        })
    }
}

/// Settings shared by every strategy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub rules: CaptureRules,
    /// Side the search plays for.
    pub piece: Piece,
    /// Iterations for MCTS, plies for the minimax family.
    pub param: u32,
}

/// A concrete search strategy ready to run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    MonteCarlo(SearchConfig),
    PlainMinimax(SearchConfig),
    AlphaBeta(SearchConfig),
}

impl Strategy {
    pub fn new(kind: StrategyKind, config: SearchConfig) -> Self {
        match kind {
            StrategyKind::MonteCarlo => Strategy::MonteCarlo(config),
            StrategyKind::PlainMinimax => Strategy::PlainMinimax(config),
            StrategyKind::AlphaBeta => Strategy::AlphaBeta(config),
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::MonteCarlo(_) => StrategyKind::MonteCarlo,
            Strategy::PlainMinimax(_) => StrategyKind::PlainMinimax,
            Strategy::AlphaBeta(_) => StrategyKind::AlphaBeta,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        match self {
            Strategy::MonteCarlo(c) | Strategy::PlainMinimax(c) | Strategy::AlphaBeta(c) => c,
        }
    }

    /// Search `board` for the configured side. `None` iff that side has no
    /// legal move, or MCTS ran zero iterations.
    pub fn best_move(&self, board: &Board, rng: &mut Rng) -> Option<Position> {
        match *self {
            Strategy::MonteCarlo(c) => mcts::search(board, c.rules, c.piece, c.param, rng),
            Strategy::PlainMinimax(c) => {
                minimax::plain_minimax(board, c.rules, c.piece, c.param).map(|r| r.position)
            }
            Strategy::AlphaBeta(c) => minimax::alpha_beta(board, c.rules, c.piece, c.param).map(|r| r.position),
        }
    }
}

/// A computer player with a name and a configured level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bot {
    pub name: String,
    difficulty: Difficulty,
}

impl Bot {
    pub fn new(name: impl Into<String>, level: u8) -> Result<Self, InvalidDifficulty> {
        Ok(Self {
            name: name.into(),
            difficulty: Difficulty::new(level)?,
        })
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Change the level. An out-of-range level leaves the bot unchanged.
    pub fn set_difficulty(&mut self, level: u8) -> Result<(), InvalidDifficulty> {
        self.difficulty = Difficulty::new(level)?;
        Ok(())
    }
}

/// Resolves a difficulty to a strategy and runs it.
///
/// MCTS draws its tie-break jitter from a fresh generator per call: seeded
/// from entropy by default, or from a fixed seed for reproducible play.
#[derive(Copy, Clone, Debug, Default)]
pub struct DifficultySelector {
    seed: Option<u64>,
}

impl DifficultySelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// The strategy `difficulty` plays for `piece` under `rules`.
    pub fn strategy_for(&self, difficulty: Difficulty, rules: CaptureRules, piece: Piece) -> Strategy {
        let (kind, param) = difficulty.plan();
        Strategy::new(kind, SearchConfig { rules, piece, param })
    }

    /// Best move for `owner` at `difficulty`, or `None` when `owner` has no
    /// legal move. The caller's board is never modified.
    pub fn best_move(
        &self,
        difficulty: Difficulty,
        board: &Board,
        rules: CaptureRules,
        owner: Piece,
    ) -> Option<Position> {
        let strategy = self.strategy_for(difficulty, rules, owner);
        let mut rng = match self.seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };
        let best = strategy.best_move(board, &mut rng);
        debug!(
            level = difficulty.level(),
            strategy = %strategy.kind(),
            param = strategy.config().param,
            ?owner,
            ?best,
            "strategy picked a move"
        );
        best
    }

    /// Same as [`best_move`](Self::best_move) at the bot's configured level.
    pub fn best_move_for_bot(&self, bot: &Bot, board: &Board, rules: CaptureRules, owner: Piece) -> Option<Position> {
        self.best_move(bot.difficulty(), board, rules, owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(l: u8) -> Difficulty {
        Difficulty::new(l).unwrap()
    }

    /// Player 1's only move is (7,0), which wipes out player 2.
    fn single_move_board() -> Board {
        "\
        ????????
        ????????
        ????????
        ????????
        ????????
        ????????
        ????????
        ?NNB????"
            .parse()
            .unwrap()
    }

    #[test]
    fn test_level_table() {
        let table: Vec<_> = Difficulty::all().map(Difficulty::plan).collect();
        assert_eq!(
            table,
            vec![
                (StrategyKind::MonteCarlo, 7000),
                (StrategyKind::MonteCarlo, 8000),
                (StrategyKind::MonteCarlo, 9000),
                (StrategyKind::MonteCarlo, 10000),
                (StrategyKind::PlainMinimax, 1),
                (StrategyKind::PlainMinimax, 2),
                (StrategyKind::AlphaBeta, 3),
                (StrategyKind::AlphaBeta, 4),
                (StrategyKind::AlphaBeta, 5),
                (StrategyKind::AlphaBeta, 6),
            ]
        );
    }

    #[test]
    fn test_out_of_range_levels_rejected() {
        assert_eq!(Difficulty::new(0), Err(InvalidDifficulty(0)));
        assert_eq!(Difficulty::try_from(11), Err(InvalidDifficulty(11)));
        assert_eq!(Difficulty::MIN.level(), 1);
        assert_eq!(Difficulty::MAX.level(), 10);
    }

    #[test]
    fn test_parse_difficulty() {
        assert_eq!(" 7 ".parse::<Difficulty>(), Ok(level(7)));
        assert_eq!(
            "12".parse::<Difficulty>(),
            Err(ParseDifficultyError::OutOfRange(InvalidDifficulty(12)))
        );
        assert!(matches!(
            "hard".parse::<Difficulty>(),
            Err(ParseDifficultyError::NotANumber(_))
        ));
    }

    #[test]
    fn test_strategy_carries_config() {
        let selector = DifficultySelector::new();
        let rules = CaptureRules::new(false, true, true);
        let strategy = selector.strategy_for(level(8), rules, Piece::Player2);
        assert_eq!(
            strategy,
            Strategy::AlphaBeta(SearchConfig {
                rules,
                piece: Piece::Player2,
                param: 4,
            })
        );
        assert_eq!(strategy.kind(), StrategyKind::AlphaBeta);
    }

    #[test]
    fn test_every_level_finds_single_move() {
        let board = single_move_board();
        let selector = DifficultySelector::with_seed(1);
        for difficulty in Difficulty::all() {
            let best = selector.best_move(difficulty, &board, CaptureRules::all(), Piece::Player1);
            assert_eq!(best, Some(Position::new(7, 0)), "level {difficulty}");
        }
    }

    #[test]
    fn test_no_legal_move_returns_none() {
        let mut board = single_move_board();
        board.place_piece(Position::new(7, 0), Piece::Player1, CaptureRules::all());
        assert_eq!(board.counts(), (4, 0));
        let selector = DifficultySelector::with_seed(1);
        for l in [1, 5, 7] {
            assert_eq!(selector.best_move(level(l), &board, CaptureRules::all(), Piece::Player2), None);
        }
    }

    #[test]
    fn test_search_leaves_board_untouched() {
        let board = Board::new();
        let selector = DifficultySelector::with_seed(3);
        for l in [1, 6, 9] {
            let best = selector.best_move(level(l), &board, CaptureRules::all(), Piece::Player1);
            assert!(board.is_legal(best.unwrap(), Piece::Player1, CaptureRules::all()));
            assert_eq!(board, Board::new());
        }
    }

    #[test]
    fn test_bot_difficulty() {
        let mut bot = Bot::new("Ada", 3).unwrap();
        assert_eq!(bot.set_difficulty(0), Err(InvalidDifficulty(0)));
        assert_eq!(bot.difficulty(), level(3));
        bot.set_difficulty(10).unwrap();
        assert_eq!(bot.difficulty(), Difficulty::MAX);
        assert!(Bot::new("Zed", 42).is_err());

        let selector = DifficultySelector::with_seed(5);
        let board = single_move_board();
        assert_eq!(
            selector.best_move_for_bot(&bot, &board, CaptureRules::all(), Piece::Player1),
            Some(Position::new(7, 0))
        );
    }
}
