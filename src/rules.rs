//! Capture rule sets.
//!
//! A rule set decides which of the eight compass directions take part in
//! sandwich capture. Horizontal play enables east/west, vertical play enables
//! north/south and diagonal play enables the four diagonals. The toggles are
//! independent; the engine accepts every combination, including the all-off
//! one under which no move is ever legal.

use std::fmt;
use std::str::FromStr;

use crate::error::InvalidRules;

/// Axis a direction belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
    Diagonal,
}

/// One of the eight compass directions on the board.
///
/// North points towards row 0, west towards column 0.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// All directions, orthogonal ones first.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Row and column step of one move in this direction.
    #[inline]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
            Direction::NorthEast => (-1, 1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (1, -1),
        }
    }

    #[inline]
    pub const fn axis(self) -> Axis {
        match self {
            Direction::East | Direction::West => Axis::Horizontal,
            Direction::North | Direction::South => Axis::Vertical,
            _ => Axis::Diagonal,
        }
    }
}

/// Which capture directions are active in a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CaptureRules {
    pub horizontal: bool,
    pub vertical: bool,
    pub diagonal: bool,
}

impl Default for CaptureRules {
    fn default() -> Self {
        Self::all()
    }
}

impl CaptureRules {
    /// Build a rule set without validation.
    pub const fn new(horizontal: bool, vertical: bool, diagonal: bool) -> Self {
        Self {
            horizontal,
            vertical,
            diagonal,
        }
    }

    /// Classic Othello: every direction captures.
    pub const fn all() -> Self {
        Self::new(true, true, true)
    }

    /// Build a rule set, rejecting the combination with every toggle off.
    ///
    /// Game configurations go through this constructor; the board engine
    /// itself takes any [`CaptureRules`].
    pub fn checked(horizontal: bool, vertical: bool, diagonal: bool) -> Result<Self, InvalidRules> {
        let rules = Self::new(horizontal, vertical, diagonal);
        if rules.is_empty() {
            return Err(InvalidRules::NoDirection);
        }
        Ok(rules)
    }

    /// True when no direction can capture.
    pub const fn is_empty(&self) -> bool {
        !self.horizontal && !self.vertical && !self.diagonal
    }

    pub const fn allows(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
            Axis::Diagonal => self.diagonal,
        }
    }

    /// Iterate over the directions this rule set enables.
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |d| self.allows(d.axis()))
    }
}

/// Renders as the flag letters of the enabled axes (`"hvd"`), or `"none"`.
impl fmt::Display for CaptureRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        for (enabled, flag) in [(self.horizontal, 'h'), (self.vertical, 'v'), (self.diagonal, 'd')] {
            if enabled {
                write!(f, "{flag}")?;
            }
        }
        Ok(())
    }
}

/// Parses any combination of `h`, `v`, `d` (case-insensitive), or `none`.
/// Blank input is rejected.
impl FromStr for CaptureRules {
    type Err = InvalidRules;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(InvalidRules::Empty);
        }
        if s.eq_ignore_ascii_case("none") {
            return Ok(Self::new(false, false, false));
        }

        let mut rules = Self::new(false, false, false);
        for c in s.chars() {
            match c.to_ascii_lowercase() {
                'h' => rules.horizontal = true,
                'v' => rules.vertical = true,
                'd' => rules.diagonal = true,
                _ => return Err(InvalidRules::UnknownFlag(c)),
            }
        }
        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_rules_enable_eight_directions() {
        assert_eq!(CaptureRules::all().directions().count(), 8);
    }

    #[test]
    fn test_each_axis_enables_its_directions() {
        let h: Vec<_> = CaptureRules::new(true, false, false).directions().collect();
        assert_eq!(h, vec![Direction::East, Direction::West]);

        let v: Vec<_> = CaptureRules::new(false, true, false).directions().collect();
        assert_eq!(v, vec![Direction::North, Direction::South]);

        let d: Vec<_> = CaptureRules::new(false, false, true).directions().collect();
        assert_eq!(d.len(), 4);
        assert!(d.iter().all(|d| d.axis() == Axis::Diagonal));
    }

    #[test]
    fn test_empty_rules_enable_nothing() {
        let rules = CaptureRules::new(false, false, false);
        assert!(rules.is_empty());
        assert_eq!(rules.directions().count(), 0);
    }

    #[test]
    fn test_checked_rejects_all_off() {
        assert_eq!(
            CaptureRules::checked(false, false, false),
            Err(InvalidRules::NoDirection)
        );
        assert!(CaptureRules::checked(false, true, false).is_ok());
    }

    #[test]
    fn test_parse_and_display() {
        let rules: CaptureRules = "vd".parse().unwrap();
        assert_eq!(rules, CaptureRules::new(false, true, true));
        assert_eq!(rules.to_string(), "vd");

        assert_eq!("HVD".parse::<CaptureRules>().unwrap(), CaptureRules::all());
        assert_eq!("none".parse::<CaptureRules>().unwrap().to_string(), "none");
        assert_eq!(
            "hx".parse::<CaptureRules>(),
            Err(InvalidRules::UnknownFlag('x'))
        );
    }

    #[test]
    fn test_parse_rejects_blank_input() {
        assert_eq!("".parse::<CaptureRules>(), Err(InvalidRules::Empty));
        assert_eq!("  ".parse::<CaptureRules>(), Err(InvalidRules::Empty));
    }

    #[test]
    fn test_deltas_are_unit_steps() {
        for d in Direction::ALL {
            let (dr, dc) = d.delta();
            assert!(dr.abs() <= 1 && dc.abs() <= 1);
            assert_ne!((dr, dc), (0, 0));
        }
    }
}
