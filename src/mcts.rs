//! Monte Carlo Tree Search (MCTS) with UCT selection.
//!
//! Each iteration:
//! - descends from the root by UCT, recording the path of child indices
//! - expands the leaf with one child per legal move
//! - picks one fresh child by UCT (or keeps the leaf if it has no moves)
//! - scores that node with a one-shot rollout: 1 if the root's side is
//!   ahead on that board, else 0
//! - walks the recorded path again, adding the visit and the score to every
//!   node on it
//!
//! The tree owns its children by value, so the path of indices is all that
//! back-propagation needs.

use fastrand::Rng;
use tracing::{debug, trace};

use crate::board::{Board, Piece, Position};
use crate::constants::UCT_EPSILON;
use crate::rules::CaptureRules;

/// A node in the MCTS search tree.
pub struct TreeNode {
    /// Board after the move that produced this node
    pub board: Board,
    /// Side to move on `board`
    pub to_move: Piece,
    /// Side the whole search is played for
    pub root_piece: Piece,
    /// Move that led here (`None` at the root)
    pub position: Option<Position>,
    /// Number of visits
    pub visits: u32,
    /// Sum of rollout scores seen through this node
    pub value: f64,
    /// Child nodes, one per legal move once expanded
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a root node searching for `me`, who is to move on `board`.
    pub fn new(board: &Board, me: Piece) -> Self {
        Self {
            board: board.clone(),
            to_move: me,
            root_piece: me,
            position: None,
            visits: 0,
            value: 0.0,
            children: Vec::new(),
        }
    }

    /// Observed win ratio. Unvisited nodes score 0.
    #[inline]
    pub fn winrate(&self) -> f64 {
        self.value / (self.visits as f64 + UCT_EPSILON)
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Add one child per legal move of the side to move. A node without legal
/// moves stays a leaf.
pub fn expand(node: &mut TreeNode, rules: CaptureRules) {
    for pos in node.board.valid_positions(node.to_move, rules) {
        let mut board = node.board.clone();
        board.place_piece(pos, node.to_move, rules);
        node.children.push(TreeNode {
            board,
            to_move: node.to_move.opponent(),
            root_piece: node.root_piece,
            position: Some(pos),
            visits: 0,
            value: 0.0,
            children: Vec::new(),
        });
    }
}

/// UCT score of `child` under a parent with `parent_visits` visits.
///
/// The epsilon keeps unvisited children finite and, scaled by a uniform
/// draw, breaks ties at random.
fn uct(child: &TreeNode, parent_visits: u32, rng: &mut Rng) -> f64 {
    let visits = child.visits as f64 + UCT_EPSILON;
    let exploit = child.value / visits;
    let explore = ((parent_visits as f64 + 1.0).ln() / visits).sqrt();
    exploit + explore + rng.f64() * UCT_EPSILON
}

/// Index of the child with the highest UCT score.
fn select(node: &TreeNode, rng: &mut Rng) -> usize {
    let mut best = 0;
    let mut best_score = f64::NEG_INFINITY;
    for (i, child) in node.children.iter().enumerate() {
        let score = uct(child, node.visits, rng);
        if score > best_score {
            best_score = score;
            best = i;
        }
    }
    best
}

/// Descend to a leaf, expand it and choose the node to score.
///
/// Returns the path of child indices from the root to that node.
fn tree_descend(root: &mut TreeNode, rules: CaptureRules, rng: &mut Rng) -> Vec<usize> {
    let mut path = Vec::new();
    let mut node = root;

    while !node.is_leaf() {
        let idx = select(node, rng);
        path.push(idx);
        node = &mut node.children[idx];
    }

    expand(node, rules);
    if !node.is_leaf() {
        path.push(select(node, rng));
    }

    path
}

/// Score a board for the root's side: 1 if strictly ahead, else 0.
fn rollout(board: &Board, root_piece: Piece) -> f64 {
    if board.count(root_piece) > board.count(root_piece.opponent()) {
        1.0
    } else {
        0.0
    }
}

/// Add one visit and `score` to the root and every node along `path`.
fn tree_update(root: &mut TreeNode, path: &[usize], score: f64) {
    root.visits += 1;
    root.value += score;

    let mut node = root;
    for &idx in path {
        node = &mut node.children[idx];
        node.visits += 1;
        node.value += score;
    }
}

/// Get the node reached by following `path` from the root.
fn node_at<'a>(root: &'a TreeNode, path: &[usize]) -> &'a TreeNode {
    path.iter().fold(root, |node, &idx| &node.children[idx])
}

/// Run one full iteration: selection, expansion, rollout, back-propagation.
pub fn iterate(root: &mut TreeNode, rules: CaptureRules, rng: &mut Rng) {
    let path = tree_descend(root, rules, rng);
    let score = {
        let leaf = node_at(root, &path);
        rollout(&leaf.board, leaf.root_piece)
    };
    tree_update(root, &path, score);
}

/// Run `iterations` iterations from `root` and return the best move found.
pub fn tree_search(root: &mut TreeNode, rules: CaptureRules, iterations: u32, rng: &mut Rng) -> Option<Position> {
    for _ in 0..iterations {
        iterate(root, rules, rng);
    }

    let best = best_move(root);
    debug!(
        iterations,
        children = root.children.len(),
        root_visits = root.visits,
        ?best,
        "tree search finished"
    );
    dump_children(root);
    best
}

/// Pick a move for `me` on `board` with a fresh tree.
pub fn search(board: &Board, rules: CaptureRules, me: Piece, iterations: u32, rng: &mut Rng) -> Option<Position> {
    let mut root = TreeNode::new(board, me);
    tree_search(&mut root, rules, iterations, rng)
}

/// The root child with the highest win ratio; the earliest one on ties.
pub fn best_move(root: &TreeNode) -> Option<Position> {
    let mut best = None;
    let mut best_ratio = f64::NEG_INFINITY;
    for child in &root.children {
        let ratio = child.winrate();
        if ratio > best_ratio {
            best_ratio = ratio;
            best = child.position;
        }
    }
    best
}

/// Log statistics about the root's children.
pub fn dump_children(root: &TreeNode) {
    for child in &root.children {
        trace!(
            position = ?child.position,
            visits = child.visits,
            value = child.value,
            winrate = child.winrate(),
            "root child"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> Rng {
        Rng::with_seed(7)
    }

    #[test]
    fn test_zero_iterations_returns_none() {
        let board = Board::new();
        let mut root = TreeNode::new(&board, Piece::Player1);
        assert_eq!(tree_search(&mut root, CaptureRules::all(), 0, &mut rng()), None);
        assert!(root.is_leaf());
        assert_eq!(root.visits, 0);
    }

    #[test]
    fn test_first_iteration_expands_root() {
        let board = Board::new();
        let mut root = TreeNode::new(&board, Piece::Player1);
        let mut rng = rng();
        iterate(&mut root, CaptureRules::all(), &mut rng);

        assert_eq!(root.children.len(), 4);
        assert_eq!(root.visits, 1);
        // Every opening move leaves the mover 4 to 1 ahead.
        assert_eq!(root.value, 1.0);
        let visited: u32 = root.children.iter().map(|c| c.visits).sum();
        assert_eq!(visited, 1);
        assert!(root.children.iter().all(|c| c.to_move == Piece::Player2));
    }

    #[test]
    fn test_visits_are_consistent() {
        let board = Board::new();
        let mut root = TreeNode::new(&board, Piece::Player2);
        tree_search(&mut root, CaptureRules::all(), 200, &mut rng());

        assert_eq!(root.visits, 200);
        fn check(node: &TreeNode) {
            if node.is_leaf() {
                return;
            }
            let below: u32 = node.children.iter().map(|c| c.visits).sum();
            // A node is visited once on its own before it is expanded.
            assert!(below == node.visits || below + 1 == node.visits);
            assert!(node.value <= node.visits as f64);
            node.children.iter().for_each(check);
        }
        check(&root);
    }

    #[test]
    fn test_terminal_leaf_is_scored_directly() {
        // Player 1 has no move at all: the root stays a leaf and every
        // iteration scores the root board.
        let board: Board = "\
            BB??????
            ????????
            ????????
            ????????
            ????????
            ????????
            ????????
            ????????"
            .parse()
            .unwrap();
        let mut root = TreeNode::new(&board, Piece::Player1);
        assert_eq!(tree_search(&mut root, CaptureRules::all(), 5, &mut rng()), None);
        assert_eq!(root.visits, 5);
        assert_eq!(root.value, 5.0);
    }

    #[test]
    fn test_seed_reproducible() {
        let board = Board::new();
        let a = search(&board, CaptureRules::all(), Piece::Player1, 300, &mut Rng::with_seed(42));
        let b = search(&board, CaptureRules::all(), Piece::Player1, 300, &mut Rng::with_seed(42));
        assert_eq!(a, b);
        assert!(board.valid_positions(Piece::Player1, CaptureRules::all()).contains(&a.unwrap()));
    }

    #[test]
    fn test_best_move_prefers_higher_ratio() {
        let board = Board::new();
        let mut root = TreeNode::new(&board, Piece::Player1);
        expand(&mut root, CaptureRules::all());
        root.children[2].visits = 3;
        root.children[2].value = 2.0;
        root.children[3].visits = 3;
        root.children[3].value = 2.0;
        assert_eq!(best_move(&root), root.children[2].position);
    }
}
