use serde::{Deserialize, Serialize};

use super::player::Player;

/// Game status of a board, always describing the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    None,
    CheckWhite,
    CheckBlack,
    CheckmateWhite,
    CheckmateBlack,
    StalemateWhite,
    StalemateBlack,
}

impl Status {
    pub fn check(player: Player) -> Status {
        match player {
            Player::White => Status::CheckWhite,
            Player::Black => Status::CheckBlack,
        }
    }

    pub fn checkmate(player: Player) -> Status {
        match player {
            Player::White => Status::CheckmateWhite,
            Player::Black => Status::CheckmateBlack,
        }
    }

    pub fn stalemate(player: Player) -> Status {
        match player {
            Player::White => Status::StalemateWhite,
            Player::Black => Status::StalemateBlack,
        }
    }

    /// Checkmate and stalemate end the game.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Status::CheckmateWhite | Status::CheckmateBlack | Status::StalemateWhite | Status::StalemateBlack
        )
    }

    /// The side this status is about, `None` for `Status::None`.
    pub fn player(self) -> Option<Player> {
        match self {
            Status::None => None,
            Status::CheckWhite | Status::CheckmateWhite | Status::StalemateWhite => Some(Player::White),
            Status::CheckBlack | Status::CheckmateBlack | Status::StalemateBlack => Some(Player::Black),
        }
    }

    pub fn is_check(self) -> bool {
        matches!(self, Status::CheckWhite | Status::CheckBlack)
    }

    pub fn is_checkmate(self) -> bool {
        matches!(self, Status::CheckmateWhite | Status::CheckmateBlack)
    }

    pub fn is_stalemate(self) -> bool {
        matches!(self, Status::StalemateWhite | Status::StalemateBlack)
    }
}
