//! Static board evaluation.
//!
//! Scores are always taken from the perspective of the side the search is
//! maximizing for: positive is good for `me`.

use crate::board::{Board, Piece, Position};
use crate::constants::POSITION_WEIGHTS;

/// Static evaluation used by a minimax-family search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Evaluation {
    /// Raw piece count difference.
    PieceCount,
    /// Piece count plus the positional weight table.
    Positional,
}

impl Evaluation {
    #[inline]
    pub fn score(self, board: &Board, me: Piece) -> i32 {
        match self {
            Evaluation::PieceCount => piece_differential(board, me),
            Evaluation::Positional => positional_score(board, me),
        }
    }
}

/// `me`'s pieces minus the opponent's.
pub fn piece_differential(board: &Board, me: Piece) -> i32 {
    board.count(me) as i32 - board.count(me.opponent()) as i32
}

/// Piece counts adjusted by [`POSITION_WEIGHTS`]: corners and safe edges
/// are rewarded, the squares next to corners are penalized.
pub fn positional_score(board: &Board, me: Piece) -> i32 {
    let mut own = board.count(me) as i32;
    let mut opp = board.count(me.opponent()) as i32;

    for pos in Position::all() {
        let weight = POSITION_WEIGHTS[pos.row][pos.col];
        match board.cell(pos) {
            Some(p) if p == me => own += weight,
            Some(_) => opp += weight,
            None => {}
        }
    }

    own - opp
}
