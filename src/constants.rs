//! Constants for board geometry, cell encoding, heuristics and search budgets.
//!
//! Everything tunable about the engine lives here so the search modules only
//! contain algorithms.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). Othello is always played on 8x8.
pub const N: usize = 8;

/// Number of cells on the board.
pub const CELLS: usize = N * N;

/// Number of pieces on a freshly constructed board.
pub const INITIAL_PIECES: u32 = 4;

// =============================================================================
// Row Encoding
// =============================================================================

/// Cell symbol for a player 1 piece.
pub const SYMBOL_PLAYER1: char = 'B';

/// Cell symbol for a player 2 piece.
pub const SYMBOL_PLAYER2: char = 'N';

/// Cell symbol for an empty cell.
pub const SYMBOL_EMPTY: char = '?';

// =============================================================================
// Positional Heuristic
// =============================================================================

/// Bonus for holding a corner.
pub const WEIGHT_CORNER: i32 = 50;

/// Bonus for an edge cell that does not touch a corner.
pub const WEIGHT_EDGE: i32 = 17;

/// Bonus for a cell on the ring around the center.
pub const WEIGHT_RING: i32 = 10;

/// Penalty for the X- and C-squares next to each corner.
pub const WEIGHT_NEAR_CORNER: i32 = -25;

/// Per-cell positional adjustment used by the alpha-beta evaluation.
///
/// The four corners of the center ring are counted from both the row and
/// the column scan, so they carry twice the ring bonus.
#[rustfmt::skip]
pub const POSITION_WEIGHTS: [[i32; N]; N] = {
    const C: i32 = WEIGHT_CORNER;
    const E: i32 = WEIGHT_EDGE;
    const R: i32 = WEIGHT_RING;
    const X: i32 = WEIGHT_NEAR_CORNER;
    [
        [C, X, E,     E, E, E,     X, C],
        [X, X, 0,     0, 0, 0,     X, X],
        [E, 0, R + R, R, R, R + R, 0, E],
        [E, 0, R,     0, 0, R,     0, E],
        [E, 0, R,     0, 0, R,     0, E],
        [E, 0, R + R, R, R, R + R, 0, E],
        [X, X, 0,     0, 0, 0,     X, X],
        [C, X, E,     E, E, E,     X, C],
    ]
};

// =============================================================================
// MCTS Parameters
// =============================================================================

/// Divide-by-zero guard in the UCT formula, also the scale of the random
/// tie-break jitter added to every UCT score.
pub const UCT_EPSILON: f64 = 1e-6;

/// Iterations granted per unit of MCTS tuning level.
pub const ITERATIONS_PER_LEVEL: u32 = 1000;

// =============================================================================
// Difficulty Levels
// =============================================================================

/// Lowest selectable difficulty.
pub const MIN_LEVEL: u8 = 1;

/// Highest selectable difficulty.
pub const MAX_LEVEL: u8 = 10;

/// Levels `1..=MCTS_LEVELS` use MCTS. Higher levels search
/// `level - MCTS_LEVELS` plies deep.
pub const MCTS_LEVELS: u8 = 4;

/// Shift from a selectable MCTS level to its tuning level, which is then
/// scaled by [`ITERATIONS_PER_LEVEL`].
pub const MCTS_LEVEL_OFFSET: u32 = 6;

/// Highest level played by unpruned minimax. Levels above it use alpha-beta.
pub const PLAIN_MINIMAX_MAX_LEVEL: u8 = 6;
