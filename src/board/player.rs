use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    White,
    Black,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Rank holding this side's king and rooks at the start.
    pub fn home_rank(self) -> u8 {
        match self {
            Player::White => 0,
            Player::Black => 7,
        }
    }

    /// Rank from which this side's pawns may double-step.
    pub fn pawn_rank(self) -> u8 {
        match self {
            Player::White => 1,
            Player::Black => 6,
        }
    }

    /// Rank a pawn of this side promotes on.
    pub fn promotion_rank(self) -> u8 {
        match self {
            Player::White => 7,
            Player::Black => 0,
        }
    }

    /// Rank a pawn of this side must stand on to capture en passant.
    pub fn en_passant_rank(self) -> u8 {
        match self {
            Player::White => 4,
            Player::Black => 3,
        }
    }

    /// Direction pawns of this side advance in.
    pub fn forward(self) -> i8 {
        match self {
            Player::White => 1,
            Player::Black => -1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::White => write!(f, "W"),
            Player::Black => write!(f, "B"),
        }
    }
}
