use thiserror::Error;

use crate::board::position::Position;
use crate::board::status::Status;

/// Errors surfaced by the rules engine and the game session.
///
/// An illegal move is not an error at the board level: `Board::make_move`
/// answers `None` and leaves the board untouched. Only the session turns that
/// into `IllegalMove` so a front end can report it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error("invalid coordinate ({x}, {y}): both values must be within 0..=7")]
    InvalidCoordinate { x: i32, y: i32 },

    #[error("invalid square '{0}': expected a file a-h followed by a rank 1-8")]
    InvalidSquare(String),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("illegal move {from}{to}")]
    IllegalMove { from: Position, to: Position },

    #[error("game is over ({0:?})")]
    GameOver(Status),
}

pub type ChessResult<T> = Result<T, ChessError>;
