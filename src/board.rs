//! Othello board representation and the capture engine.
//!
//! The board is an 8x8 grid of `Option<Piece>` plus a running piece count
//! per player. Captures follow the sandwich rule: walking from an empty cell
//! in some direction, one or more opponent pieces must be followed by one of
//! the mover's own pieces. Which directions participate is decided by the
//! [`CaptureRules`] passed to every query.
//!
//! Boards are plain values. Searches clone them before trying a move and
//! never touch the caller's copy.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::constants::{CELLS, N, SYMBOL_EMPTY, SYMBOL_PLAYER1, SYMBOL_PLAYER2};
use crate::error::{InvalidBoardState, ParseBoardError};
use crate::rules::{CaptureRules, Direction};

/// Owner of a piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Piece {
    Player1,
    Player2,
}

impl Piece {
    #[inline]
    pub const fn opponent(self) -> Piece {
        match self {
            Piece::Player1 => Piece::Player2,
            Piece::Player2 => Piece::Player1,
        }
    }

    /// Symbol used by the row encoding.
    pub const fn symbol(self) -> char {
        match self {
            Piece::Player1 => SYMBOL_PLAYER1,
            Piece::Player2 => SYMBOL_PLAYER2,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Piece::Player1 => f.write_str("player 1"),
            Piece::Player2 => f.write_str("player 2"),
        }
    }
}

/// State of a single cell.
pub type Cell = Option<Piece>;

/// A cell coordinate, `0 <= row, col < 8`.
///
/// Ordering is row-major, so sets of positions iterate the board from the
/// top-left corner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// True when both coordinates are below 8.
    #[inline]
    pub const fn is_on_board(self) -> bool {
        self.row < N && self.col < N
    }

    /// The neighbouring position one step in `dir`, if it is on the board.
    #[inline]
    pub fn step(self, dir: Direction) -> Option<Position> {
        let (dr, dc) = dir.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < N && col < N).then_some(Position { row, col })
    }

    /// Iterate over every cell of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..N).flat_map(|row| (0..N).map(move |col| Position { row, col }))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position { row, col }
    }
}

/// An 8x8 Othello board with cached piece counts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; N]; N],
    player1: u32,
    player2: u32,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard starting position: player 1 on (3,3) and (4,4),
    /// player 2 on (3,4) and (4,3).
    pub fn new() -> Self {
        let mut cells = [[None; N]; N];
        cells[3][3] = Some(Piece::Player1);
        cells[4][4] = Some(Piece::Player1);
        cells[3][4] = Some(Piece::Player2);
        cells[4][3] = Some(Piece::Player2);
        Self {
            cells,
            player1: 2,
            player2: 2,
        }
    }

    /// Alias of [`Board::new`].
    pub fn fresh() -> Self {
        Self::new()
    }

    /// A board with no pieces at all. Only useful as a starting point for
    /// configuration editing.
    pub fn empty() -> Self {
        Self {
            cells: [[None; N]; N],
            player1: 0,
            player2: 0,
        }
    }

    /// Build a board from a cell grid, counting the pieces it contains.
    pub fn from_grid(cells: [[Cell; N]; N]) -> Self {
        let mut board = Self {
            cells,
            player1: 0,
            player2: 0,
        };
        for pos in Position::all() {
            if let Some(piece) = board.cell(pos) {
                *board.count_mut(piece) += 1;
            }
        }
        board
    }

    /// Decode a board from 8 rows of 8 symbols (`B`, `N`, `?`).
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, ParseBoardError> {
        if rows.len() != N {
            return Err(ParseBoardError::RowCount(rows.len()));
        }

        let mut cells = [[None; N]; N];
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let len = line.chars().count();
            if len != N {
                return Err(ParseBoardError::RowLength { row, len });
            }
            for (col, symbol) in line.chars().enumerate() {
                cells[row][col] = match symbol {
                    SYMBOL_PLAYER1 => Some(Piece::Player1),
                    SYMBOL_PLAYER2 => Some(Piece::Player2),
                    SYMBOL_EMPTY => None,
                    _ => return Err(ParseBoardError::UnknownSymbol { row, col, symbol }),
                };
            }
        }
        Ok(Self::from_grid(cells))
    }

    /// Encode the board as 8 rows of 8 symbols.
    pub fn to_rows(&self) -> [String; N] {
        std::array::from_fn(|row| {
            self.cells[row]
                .iter()
                .map(|cell| cell.map_or(SYMBOL_EMPTY, Piece::symbol))
                .collect()
        })
    }

    /// Contents of `pos`. Off-board positions read as empty.
    #[inline]
    pub fn cell(&self, pos: Position) -> Cell {
        self.cells.get(pos.row).and_then(|row| row.get(pos.col)).copied().flatten()
    }

    /// The raw grid, row by row.
    pub fn cells(&self) -> &[[Cell; N]; N] {
        &self.cells
    }

    /// Piece counts as `(player 1, player 2)`.
    pub fn counts(&self) -> (u32, u32) {
        (self.player1, self.player2)
    }

    pub fn count(&self, piece: Piece) -> u32 {
        match piece {
            Piece::Player1 => self.player1,
            Piece::Player2 => self.player2,
        }
    }

    pub fn empty_count(&self) -> u32 {
        CELLS as u32 - self.player1 - self.player2
    }

    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// Every empty cell where `owner` could play under `rules`.
    pub fn valid_positions(&self, owner: Piece, rules: CaptureRules) -> BTreeSet<Position> {
        Position::all()
            .filter(|&pos| self.is_legal(pos, owner, rules))
            .collect()
    }

    /// True when `owner` playing on `pos` would flip at least one piece.
    pub fn is_legal(&self, pos: Position, owner: Piece, rules: CaptureRules) -> bool {
        pos.is_on_board()
            && self.cell(pos).is_none()
            && rules
                .directions()
                .any(|dir| self.bracket(pos, dir, owner).is_some())
    }

    /// The opponent pieces `owner` would flip by playing on `pos`.
    ///
    /// Empty when the cell is off the board, occupied or nothing is
    /// sandwiched. Flips are grouped per direction, nearest first.
    pub fn flips(&self, pos: Position, owner: Piece, rules: CaptureRules) -> Vec<Position> {
        if !pos.is_on_board() || self.cell(pos).is_some() {
            return Vec::new();
        }

        let mut flipped = Vec::new();
        for dir in rules.directions() {
            if let Some(end) = self.bracket(pos, dir, owner) {
                let mut cur = pos;
                while let Some(next) = cur.step(dir) {
                    if next == end {
                        break;
                    }
                    flipped.push(next);
                    cur = next;
                }
            }
        }
        flipped
    }

    /// Play `owner` on `pos`, flipping every sandwiched run in the enabled
    /// directions, and return the flipped positions.
    ///
    /// Callers are expected to pass a position from
    /// [`valid_positions`](Board::valid_positions). Any other position leaves
    /// the board untouched and yields an empty list.
    pub fn place_piece(&mut self, pos: Position, owner: Piece, rules: CaptureRules) -> Vec<Position> {
        let flipped = self.flips(pos, owner, rules);
        if flipped.is_empty() {
            return flipped;
        }

        self.cells[pos.row][pos.col] = Some(owner);
        *self.count_mut(owner) += 1;
        for &p in &flipped {
            self.cells[p.row][p.col] = Some(owner);
        }
        let n = flipped.len() as u32;
        *self.count_mut(owner) += n;
        *self.count_mut(owner.opponent()) -= n;

        flipped
    }

    /// Clear a cell unconditionally. Editor primitive, bypasses capture.
    /// Off-board positions are ignored.
    pub fn remove_piece(&mut self, pos: Position) {
        if !pos.is_on_board() {
            return;
        }
        if let Some(old) = self.cells[pos.row][pos.col].take() {
            *self.count_mut(old) -= 1;
        }
    }

    /// Set a cell to `owner` unconditionally. Editor primitive, bypasses
    /// capture. Off-board positions are ignored.
    pub fn place_piece_config(&mut self, pos: Position, owner: Piece) {
        if !pos.is_on_board() {
            return;
        }
        self.remove_piece(pos);
        self.cells[pos.row][pos.col] = Some(owner);
        *self.count_mut(owner) += 1;
    }

    /// Reject a candidate starting board on which neither side can move.
    pub fn is_valid(&self, rules: CaptureRules) -> Result<(), InvalidBoardState> {
        let movable = [Piece::Player1, Piece::Player2]
            .into_iter()
            .any(|p| Position::all().any(|pos| self.is_legal(pos, p, rules)));
        if movable { Ok(()) } else { Err(InvalidBoardState) }
    }

    /// Walk from `pos` in `dir`. Returns the closing own piece if at least
    /// one opponent piece lies between.
    fn bracket(&self, pos: Position, dir: Direction, owner: Piece) -> Option<Position> {
        let opponent = Some(owner.opponent());
        let mut cur = pos.step(dir)?;
        if self.cell(cur) != opponent {
            return None;
        }
        loop {
            cur = cur.step(dir)?;
            match self.cell(cur) {
                Some(p) if p == owner => return Some(cur),
                Some(_) => continue,
                None => return None,
            }
        }
    }

    fn count_mut(&mut self, piece: Piece) -> &mut u32 {
        match piece {
            Piece::Player1 => &mut self.player1,
            Piece::Player2 => &mut self.player2,
        }
    }
}

/// Renders the row encoding, one row per line.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

/// Parses 8 rows separated by whitespace or newlines.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.split_whitespace().collect();
        Self::from_rows(&rows)
    }
}
