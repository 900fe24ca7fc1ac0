//! Match orchestration: turns, passes and the end of the game.
//!
//! A [`Match`] owns the board and decides who moves next. After every move
//! the opponent takes the turn if they can move; otherwise the mover plays
//! again, and when neither side can move the match is over. The engine
//! itself never passes: it only reports empty move sets.

use std::collections::BTreeSet;

use tracing::debug;

use crate::board::{Board, Piece, Position};
use crate::difficulty::{Difficulty, DifficultySelector};
use crate::error::IllegalMove;
use crate::rules::CaptureRules;

/// Who picks the moves for one side.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Controller {
    Human,
    Bot(Difficulty),
}

/// Final result of a match.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Winner(Piece),
    Draw,
}

impl Outcome {
    /// Outcome by piece count on a final board.
    pub fn from_board(board: &Board) -> Self {
        let (p1, p2) = board.counts();
        match p1.cmp(&p2) {
            std::cmp::Ordering::Greater => Outcome::Winner(Piece::Player1),
            std::cmp::Ordering::Less => Outcome::Winner(Piece::Player2),
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

/// A single game between two controllers.
#[derive(Clone, Debug)]
pub struct Match {
    board: Board,
    rules: CaptureRules,
    players: [Controller; 2],
    to_move: Piece,
    outcome: Option<Outcome>,
    selector: DifficultySelector,
}

impl Match {
    /// Start from the standard opening, player 1 to move.
    pub fn new(rules: CaptureRules, player1: Controller, player2: Controller) -> Self {
        Self::with_board(Board::new(), rules, player1, player2, Piece::Player1)
    }

    /// Start from an arbitrary board. If `first` cannot move the turn passes
    /// at once, and a board where nobody can move is finished immediately.
    pub fn with_board(board: Board, rules: CaptureRules, player1: Controller, player2: Controller, first: Piece) -> Self {
        let mut game = Self {
            board,
            rules,
            players: [player1, player2],
            to_move: first,
            outcome: None,
            selector: DifficultySelector::new(),
        };
        if !game.can_move(first) {
            if game.can_move(first.opponent()) {
                game.pass();
            } else {
                game.finish();
            }
        }
        game
    }

    /// Use `selector` for bot moves, e.g. a seeded one.
    pub fn with_selector(mut self, selector: DifficultySelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rules(&self) -> CaptureRules {
        self.rules
    }

    pub fn to_move(&self) -> Piece {
        self.to_move
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn controller(&self, piece: Piece) -> Controller {
        match piece {
            Piece::Player1 => self.players[0],
            Piece::Player2 => self.players[1],
        }
    }

    /// Legal moves of the side to move. Empty once the match is over.
    pub fn legal_moves(&self) -> BTreeSet<Position> {
        if self.is_finished() {
            return BTreeSet::new();
        }
        self.board.valid_positions(self.to_move, self.rules)
    }

    /// Play a human move. Returns the flipped positions.
    pub fn play(&mut self, pos: Position) -> Result<Vec<Position>, IllegalMove> {
        if self.is_finished() {
            return Err(IllegalMove::Finished);
        }
        if let Controller::Bot(_) = self.controller(self.to_move) {
            return Err(IllegalMove::NotHumanTurn);
        }
        if !pos.is_on_board() {
            return Err(IllegalMove::NotLegal(pos));
        }
        self.apply(pos)
    }

    /// Suggest a move for the side to move, searched at `difficulty`.
    /// `None` once the match is over.
    pub fn hint(&self, difficulty: Difficulty) -> Option<Position> {
        if self.is_finished() {
            return None;
        }
        self.selector
            .best_move(difficulty, &self.board, self.rules, self.to_move)
    }

    /// Let the bot on turn pick and play its move.
    pub fn play_bot_turn(&mut self) -> Result<Position, IllegalMove> {
        if self.is_finished() {
            return Err(IllegalMove::Finished);
        }
        let Controller::Bot(difficulty) = self.controller(self.to_move) else {
            return Err(IllegalMove::NotBotTurn);
        };

        // The turn logic guarantees the side to move has a legal move, and
        // every strategy returns one when it exists.
        let pos = self
            .selector
            .best_move(difficulty, &self.board, self.rules, self.to_move)
            .ok_or(IllegalMove::Finished)?;
        self.apply(pos)?;
        Ok(pos)
    }

    /// Play bot turns until the match ends or a human is on turn.
    pub fn run_bots(&mut self) -> Result<Option<Outcome>, IllegalMove> {
        while !self.is_finished() && self.controller(self.to_move) != Controller::Human {
            self.play_bot_turn()?;
        }
        Ok(self.outcome)
    }

    /// The side to move gives up and the opponent wins.
    pub fn surrender(&mut self) -> Result<Outcome, IllegalMove> {
        if self.is_finished() {
            return Err(IllegalMove::Finished);
        }
        let outcome = Outcome::Winner(self.to_move.opponent());
        debug!(loser = ?self.to_move, "surrender");
        self.outcome = Some(outcome);
        Ok(outcome)
    }

    fn apply(&mut self, pos: Position) -> Result<Vec<Position>, IllegalMove> {
        let mover = self.to_move;
        let flipped = self.board.place_piece(pos, mover, self.rules);
        if flipped.is_empty() {
            return Err(IllegalMove::NotLegal(pos));
        }
        debug!(?mover, %pos, flips = flipped.len(), "move played");

        if self.can_move(mover.opponent()) {
            self.to_move = mover.opponent();
        } else if self.can_move(mover) {
            debug!(passer = ?mover.opponent(), "no legal move, turn passes");
        } else {
            self.finish();
        }
        Ok(flipped)
    }

    fn pass(&mut self) {
        debug!(passer = ?self.to_move, "no legal move, turn passes");
        self.to_move = self.to_move.opponent();
    }

    fn finish(&mut self) {
        let outcome = Outcome::from_board(&self.board);
        debug!(?outcome, counts = ?self.board.counts(), "match finished");
        self.outcome = Some(outcome);
    }

    fn can_move(&self, piece: Piece) -> bool {
        !self.board.valid_positions(piece, self.rules).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn humans() -> Match {
        Match::new(CaptureRules::all(), Controller::Human, Controller::Human)
    }

    fn bot(level: u8) -> Controller {
        Controller::Bot(Difficulty::new(level).unwrap())
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = humans();
        assert_eq!(game.to_move(), Piece::Player1);
        let flipped = game.play(Position::new(2, 4)).unwrap();
        assert_eq!(flipped, vec![Position::new(3, 4)]);
        assert_eq!(game.to_move(), Piece::Player2);
        assert_eq!(game.board().counts(), (4, 1));
    }

    #[test]
    fn test_illegal_move_rejected() {
        let mut game = humans();
        let before = game.board().clone();
        assert_eq!(
            game.play(Position::new(0, 0)),
            Err(IllegalMove::NotLegal(Position::new(0, 0)))
        );
        assert_eq!(game.board(), &before);
        assert_eq!(game.to_move(), Piece::Player1);
    }

    #[test]
    fn test_off_board_move_rejected() {
        let mut game = humans();
        let before = game.board().clone();
        for pos in [Position::new(8, 0), Position::new(2, 8), Position::new(usize::MAX, usize::MAX)] {
            assert_eq!(game.play(pos), Err(IllegalMove::NotLegal(pos)));
        }
        assert_eq!(game.board(), &before);
        assert_eq!(game.to_move(), Piece::Player1);
    }

    #[test]
    fn test_hint_suggests_legal_move() {
        let mut game = humans().with_selector(DifficultySelector::with_seed(4));
        let level = Difficulty::new(7).unwrap();
        let hint = game.hint(level).unwrap();
        assert!(game.legal_moves().contains(&hint));
        // Asking for a hint does not play it.
        assert_eq!(game.board(), &Board::new());

        game.play(hint).unwrap();
        assert_eq!(game.to_move(), Piece::Player2);
        game.surrender().unwrap();
        assert_eq!(game.hint(level), None);
    }

    #[test]
    fn test_wipeout_finishes_match() {
        let board: Board = "\
            ????????
            ????????
            ????????
            ????????
            ????????
            ????????
            ????????
            ?NNB????"
            .parse()
            .unwrap();
        let mut game = Match::with_board(
            board,
            CaptureRules::all(),
            Controller::Human,
            Controller::Human,
            Piece::Player1,
        );
        game.play(Position::new(7, 0)).unwrap();
        assert_eq!(game.outcome(), Some(Outcome::Winner(Piece::Player1)));
        assert!(game.legal_moves().is_empty());
        assert_eq!(game.play(Position::new(0, 0)), Err(IllegalMove::Finished));
    }

    #[test]
    fn test_mover_plays_again_when_opponent_is_stuck() {
        // After (0,0) player 2 has nothing to flank, while player 1 can
        // still take (6,7) from (5,7).
        let board: Board = "\
            ?NB?????
            ????????
            ????????
            ????????
            ????????
            ????????
            ???????N
            ???????B"
            .parse()
            .unwrap();
        let mut game = Match::with_board(
            board,
            CaptureRules::all(),
            Controller::Human,
            Controller::Human,
            Piece::Player1,
        );
        game.play(Position::new(0, 0)).unwrap();
        assert_eq!(game.board().to_rows()[0], "BBB?????");
        assert_eq!(game.legal_moves().into_iter().collect::<Vec<_>>(), vec![Position::new(5, 7)]);
        assert_eq!(game.to_move(), Piece::Player1);
        assert!(!game.is_finished());
    }

    #[test]
    fn test_stuck_first_player_passes_at_start() {
        let board: Board = "\
            BN??????
            ????????
            ????????
            ????????
            ????????
            ????????
            ????????
            ????????"
            .parse()
            .unwrap();
        // Player 2 cannot flank; player 1 can take (0,1) from (0,2).
        let game = Match::with_board(
            board,
            CaptureRules::all(),
            Controller::Human,
            Controller::Human,
            Piece::Player2,
        );
        assert_eq!(game.to_move(), Piece::Player1);
        assert!(!game.is_finished());
    }

    #[test]
    fn test_dead_board_finishes_at_start() {
        let game = Match::with_board(
            Board::empty(),
            CaptureRules::all(),
            Controller::Human,
            Controller::Human,
            Piece::Player1,
        );
        assert_eq!(game.outcome(), Some(Outcome::Draw));
    }

    #[test]
    fn test_controller_checks() {
        let mut game = Match::new(CaptureRules::all(), bot(5), Controller::Human);
        assert_eq!(game.play(Position::new(2, 4)), Err(IllegalMove::NotHumanTurn));

        let pos = game.play_bot_turn().unwrap();
        assert!(Board::new().is_legal(pos, Piece::Player1, CaptureRules::all()));
        assert_eq!(game.play_bot_turn(), Err(IllegalMove::NotBotTurn));
        assert_eq!(game.run_bots(), Ok(None));
    }

    #[test]
    fn test_bots_play_to_the_end() {
        let mut game = Match::new(CaptureRules::all(), bot(5), bot(6)).with_selector(DifficultySelector::with_seed(9));
        let outcome = game.run_bots().unwrap().unwrap();
        assert!(game.is_finished());
        assert_eq!(outcome, Outcome::from_board(game.board()));
        let board = game.board();
        assert!(board.valid_positions(Piece::Player1, game.rules()).is_empty());
        assert!(board.valid_positions(Piece::Player2, game.rules()).is_empty());
    }

    #[test]
    fn test_surrender() {
        let mut game = humans();
        game.play(Position::new(2, 4)).unwrap();
        assert_eq!(game.surrender(), Ok(Outcome::Winner(Piece::Player1)));
        assert_eq!(game.surrender(), Err(IllegalMove::Finished));
    }
}
