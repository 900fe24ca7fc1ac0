//! Depth-limited minimax search, with and without alpha-beta pruning.
//!
//! Both searches share one shape: the root tries every legal move of the
//! maximizing side on a cloned board and scores the result with a recursive
//! search `depth - 1` plies deep. Inside the recursion the side to move
//! alternates; a node with no legal move for its mover, or with no depth
//! left, is scored by the static [`Evaluation`]. There is no pass handling.
//!
//! At the root the first move reaching the best score wins, so ties go to
//! the earliest position in row-major order.

use tracing::debug;

use crate::board::{Board, Piece, Position};
use crate::eval::Evaluation;
use crate::rules::CaptureRules;

/// Move chosen by a minimax search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MinimaxResult {
    pub position: Position,
    /// Backed-up score of the chosen move, from the maximizing side's view.
    pub score: i32,
    /// Number of nodes evaluated below the root.
    pub nodes: u64,
}

/// Unpruned minimax over the plain piece-count differential.
pub fn plain_minimax(board: &Board, rules: CaptureRules, me: Piece, depth: u32) -> Option<MinimaxResult> {
    let mut searcher = Searcher::new(rules, me, Evaluation::PieceCount);
    let result = searcher.root(board, depth, false);
    debug!(?me, depth, nodes = searcher.nodes, ?result, "plain minimax finished");
    result
}

/// Alpha-beta minimax over the positional heuristic.
pub fn alpha_beta(board: &Board, rules: CaptureRules, me: Piece, depth: u32) -> Option<MinimaxResult> {
    let mut searcher = Searcher::new(rules, me, Evaluation::Positional);
    let result = searcher.root(board, depth, true);
    debug!(?me, depth, nodes = searcher.nodes, ?result, "alpha-beta finished");
    result
}

struct Searcher {
    rules: CaptureRules,
    me: Piece,
    evaluation: Evaluation,
    nodes: u64,
}

impl Searcher {
    fn new(rules: CaptureRules, me: Piece, evaluation: Evaluation) -> Self {
        Self {
            rules,
            me,
            evaluation,
            nodes: 0,
        }
    }

    /// Score every root move. A depth of 0 is treated like 1: each move is
    /// judged by the evaluation of the board it produces.
    fn root(&mut self, board: &Board, depth: u32, prune: bool) -> Option<MinimaxResult> {
        let child_depth = depth.saturating_sub(1);
        let mut best: Option<(Position, i32)> = None;
        let mut alpha = i32::MIN;

        for pos in board.valid_positions(self.me, self.rules) {
            let mut child = board.clone();
            child.place_piece(pos, self.me, self.rules);

            let score = if prune {
                self.alpha_beta(&child, self.me.opponent(), child_depth, alpha, i32::MAX)
            } else {
                self.minimax(&child, self.me.opponent(), child_depth)
            };

            if best.is_none_or(|(_, b)| score > b) {
                best = Some((pos, score));
            }
            alpha = alpha.max(score);
        }

        best.map(|(position, score)| MinimaxResult {
            position,
            score,
            nodes: self.nodes,
        })
    }

    fn minimax(&mut self, board: &Board, mover: Piece, depth: u32) -> i32 {
        self.nodes += 1;
        let moves = board.valid_positions(mover, self.rules);
        if moves.is_empty() || depth == 0 {
            return self.evaluation.score(board, self.me);
        }

        let maximizing = mover == self.me;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for pos in moves {
            let mut child = board.clone();
            child.place_piece(pos, mover, self.rules);
            let value = self.minimax(&child, mover.opponent(), depth - 1);
            best = if maximizing { best.max(value) } else { best.min(value) };
        }
        best
    }

    fn alpha_beta(&mut self, board: &Board, mover: Piece, depth: u32, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;
        let moves = board.valid_positions(mover, self.rules);
        if moves.is_empty() || depth == 0 {
            return self.evaluation.score(board, self.me);
        }

        if mover == self.me {
            let mut best = i32::MIN;
            for pos in moves {
                let mut child = board.clone();
                child.place_piece(pos, mover, self.rules);
                let value = self.alpha_beta(&child, mover.opponent(), depth - 1, alpha, beta);
                best = best.max(value);
                alpha = alpha.max(value);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for pos in moves {
                let mut child = board.clone();
                child.place_piece(pos, mover, self.rules);
                let value = self.alpha_beta(&child, mover.opponent(), depth - 1, alpha, beta);
                best = best.min(value);
                beta = beta.min(value);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}
