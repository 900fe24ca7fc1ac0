//! Error types for board construction, configuration and match play.

use crate::board::Position;

/// Neither player has a legal move on a proposed initial board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid board: neither player has a legal move")]
pub struct InvalidBoardState;

/// Errors from decoding the row-based board encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBoardError {
    #[error("expected 8 rows, got {0}")]
    RowCount(usize),

    #[error("row {row} must hold 8 cells, got {len}")]
    RowLength { row: usize, len: usize },

    #[error("unknown cell symbol {symbol:?} at ({row}, {col})")]
    UnknownSymbol { row: usize, col: usize, symbol: char },
}

/// Difficulty level outside the supported range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("difficulty must be between 1 and 10, got {0}")]
pub struct InvalidDifficulty(pub u8);

/// Errors from parsing a difficulty level from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseDifficultyError {
    #[error("difficulty {0:?} is not a number")]
    NotANumber(String),

    #[error(transparent)]
    OutOfRange(#[from] InvalidDifficulty),
}

/// Errors from building or parsing a capture rule set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidRules {
    #[error("at least one capture direction must be enabled")]
    NoDirection,

    #[error("unknown rule flag {0:?} (expected h, v or d)")]
    UnknownFlag(char),

    #[error("empty rule string (use \"none\" to disable every direction)")]
    Empty,
}

/// A move rejected by the match orchestration layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMove {
    #[error("{0} is not a legal move")]
    NotLegal(Position),

    #[error("the match is already finished")]
    Finished,

    #[error("the side to move is controlled by a bot")]
    NotHumanTurn,

    #[error("the side to move is controlled by a human")]
    NotBotTurn,
}
