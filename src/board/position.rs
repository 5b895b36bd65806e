use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChessError, ChessResult};

pub const MIN: i32 = 0;
pub const MAX: i32 = 7;

/// A square on the board: `x` is the file (0 = a), `y` the rank (0 = 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: u8,
    y: u8,
}

impl Position {
    pub fn new(x: i32, y: i32) -> ChessResult<Self> {
        if x < MIN || y < MIN || x > MAX || y > MAX {
            return Err(ChessError::InvalidCoordinate { x, y });
        }
        Ok(Self { x: x as u8, y: y as u8 })
    }

    // Callers guarantee the range; used on hot paths inside the board.
    pub(crate) fn at(x: u8, y: u8) -> Self {
        debug_assert!(x < 8 && y < 8);
        Self { x, y }
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    /// All 64 squares, file by file (a1, a2, ... a8, b1, ...).
    pub fn all() -> impl Iterator<Item = Position> {
        (0..8u8).flat_map(|x| (0..8u8).map(move |y| Position::at(x, y)))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.x) as char, self.y + 1)
    }
}

impl FromStr for Position {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.trim().as_bytes();
        if bytes.len() != 2 {
            return Err(ChessError::InvalidSquare(s.to_string()));
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(ChessError::InvalidSquare(s.to_string()));
        }
        Ok(Position::at(file - b'a', rank - b'1'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_file_letter_and_rank_number() {
        assert_eq!(Position::new(0, 0).unwrap().to_string(), "a1");
        assert_eq!(Position::new(4, 3).unwrap().to_string(), "e4");
        assert_eq!(Position::new(7, 7).unwrap().to_string(), "h8");
    }

    #[test]
    fn parses_algebraic_squares() {
        let p: Position = "g7".parse().unwrap();
        assert_eq!((p.x(), p.y()), (6, 6));
        assert!("i1".parse::<Position>().is_err());
        assert!("a9".parse::<Position>().is_err());
        assert!("a10".parse::<Position>().is_err());
    }

    #[test]
    fn all_visits_every_square_once() {
        let squares: Vec<Position> = Position::all().collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[1].to_string(), "a2");
        assert_eq!(squares[8].to_string(), "b1");
    }
}
