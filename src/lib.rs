// Rules engine, fixed-depth search and the session layer around them
pub mod board;
pub mod error;
pub mod game;
pub mod perft;
pub mod search;
pub mod selfplay;

pub use board::figure::{Figure, FigureKind};
pub use board::player::Player;
pub use board::position::Position;
pub use board::status::Status;
pub use board::Board;
pub use error::{ChessError, ChessResult};
