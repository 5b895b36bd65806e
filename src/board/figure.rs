use std::fmt;

use serde::{Deserialize, Serialize};

use super::player::Player;
use super::position::Position;
use super::Board;
use crate::search::eval;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FigureKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl FigureKind {
    pub fn symbol(self) -> char {
        match self {
            FigureKind::Pawn => 'P',
            FigureKind::Knight => 'N',
            FigureKind::Bishop => 'B',
            FigureKind::Rook => 'R',
            FigureKind::Queen => 'Q',
            FigureKind::King => 'K',
        }
    }

    pub fn from_symbol(c: char) -> Option<FigureKind> {
        match c.to_ascii_uppercase() {
            'P' => Some(FigureKind::Pawn),
            'N' => Some(FigureKind::Knight),
            'B' => Some(FigureKind::Bishop),
            'R' => Some(FigureKind::Rook),
            'Q' => Some(FigureKind::Queen),
            'K' => Some(FigureKind::King),
            _ => None,
        }
    }
}

/// A piece on the board. Its (x, y) always matches the grid cell holding it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Figure {
    kind: FigureKind,
    owner: Player,
    x: u8,
    y: u8,
    has_moved: bool,
}

/// How a destination is reached; drives the side effects of a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Reach {
    Step,
    DoubleStep,
    EnPassant,
    Castle { rook_from_x: u8, rook_to_x: u8 },
}

type ReachFn = fn(&Figure, &Board, u8, u8) -> Option<Reach>;

// Indexed by `FigureKind as usize`.
const REACH: [ReachFn; 6] = [pawn_reach, knight_reach, bishop_reach, rook_reach, queen_reach, king_reach];

impl Figure {
    pub(crate) fn new(kind: FigureKind, owner: Player, x: u8, y: u8) -> Self {
        Self { kind, owner, x, y, has_moved: false }
    }

    pub(crate) fn with_moved(mut self, has_moved: bool) -> Self {
        self.has_moved = has_moved;
        self
    }

    pub(crate) fn place(&mut self, x: u8, y: u8) {
        self.x = x;
        self.y = y;
    }

    pub fn kind(&self) -> FigureKind {
        self.kind
    }

    pub fn owner(&self) -> Player {
        self.owner
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    pub fn position(&self) -> Position {
        Position::at(self.x, self.y)
    }

    /// Castling eligibility; only meaningful for kings and rooks.
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// True if the destination holds no piece of the same owner and the piece's
    /// geometry allows it. Whether the mover's own king ends up in check is not
    /// considered here.
    pub fn is_square_reachable(&self, board: &Board, to_x: u8, to_y: u8) -> bool {
        self.reach(board, to_x, to_y).is_some()
    }

    pub(crate) fn reach(&self, board: &Board, to_x: u8, to_y: u8) -> Option<Reach> {
        if to_x >= 8 || to_y >= 8 {
            return None;
        }
        if let Some(other) = board.figure_at(to_x, to_y) {
            if other.owner == self.owner {
                return None;
            }
        }
        REACH[self.kind as usize](self, board, to_x, to_y)
    }

    /// Material plus positional value of this piece on `board`.
    pub fn value(&self, board: &Board) -> i32 {
        eval::figure_value(self.kind, self.owner, self.x, self.y, board.is_late_game())
    }

    /// Moves this piece on `board`. Returns the resulting board, or `None` if the
    /// move is unreachable or would leave the mover's king in check.
    pub fn make_move(&self, board: &Board, to_x: u8, to_y: u8) -> Option<Board> {
        board.play_figure(self, to_x, to_y)
    }
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.owner, self.kind.symbol())
    }
}

fn deltas(f: &Figure, to_x: u8, to_y: u8) -> (i8, i8) {
    (to_x as i8 - f.x as i8, to_y as i8 - f.y as i8)
}

// No piece strictly between origin and destination along a straight line.
fn clear_path(board: &Board, f: &Figure, dx: i8, dy: i8) -> bool {
    let steps = dx.abs().max(dy.abs());
    let (sx, sy) = (dx.signum(), dy.signum());
    (1..steps).all(|i| {
        let x = (f.x as i8 + sx * i) as u8;
        let y = (f.y as i8 + sy * i) as u8;
        board.figure_at(x, y).is_none()
    })
}

fn pawn_reach(f: &Figure, board: &Board, to_x: u8, to_y: u8) -> Option<Reach> {
    let (dx, dy) = deltas(f, to_x, to_y);
    let fwd = f.owner.forward();
    let target = board.figure_at(to_x, to_y);

    if dx == 0 {
        if target.is_some() {
            return None;
        }
        if dy == fwd {
            return Some(Reach::Step);
        }
        let between = (f.y as i8 + fwd) as u8;
        if dy == 2 * fwd && f.y == f.owner.pawn_rank() && board.figure_at(f.x, between).is_none() {
            return Some(Reach::DoubleStep);
        }
        return None;
    }

    if dx.abs() != 1 || dy != fwd {
        return None;
    }
    if target.is_some() {
        // same-owner targets were rejected before dispatch
        return Some(Reach::Step);
    }
    // en passant: the opponent double-stepped past us on the previous move
    if f.y == f.owner.en_passant_rank() && board.en_passant_file(f.owner.opponent()) == Some(to_x) {
        if let Some(victim) = board.figure_at(to_x, f.y) {
            if victim.kind == FigureKind::Pawn && victim.owner != f.owner {
                return Some(Reach::EnPassant);
            }
        }
    }
    None
}

fn knight_reach(f: &Figure, _board: &Board, to_x: u8, to_y: u8) -> Option<Reach> {
    let (dx, dy) = deltas(f, to_x, to_y);
    let (ax, ay) = (dx.abs(), dy.abs());
    ((ax == 2 && ay == 1) || (ax == 1 && ay == 2)).then_some(Reach::Step)
}

fn bishop_reach(f: &Figure, board: &Board, to_x: u8, to_y: u8) -> Option<Reach> {
    let (dx, dy) = deltas(f, to_x, to_y);
    (dx != 0 && dx.abs() == dy.abs() && clear_path(board, f, dx, dy)).then_some(Reach::Step)
}

fn rook_reach(f: &Figure, board: &Board, to_x: u8, to_y: u8) -> Option<Reach> {
    let (dx, dy) = deltas(f, to_x, to_y);
    ((dx == 0) != (dy == 0) && clear_path(board, f, dx, dy)).then_some(Reach::Step)
}

fn queen_reach(f: &Figure, board: &Board, to_x: u8, to_y: u8) -> Option<Reach> {
    bishop_reach(f, board, to_x, to_y).or_else(|| rook_reach(f, board, to_x, to_y))
}

fn king_reach(f: &Figure, board: &Board, to_x: u8, to_y: u8) -> Option<Reach> {
    let (dx, dy) = deltas(f, to_x, to_y);
    if dx.abs() == 2 && dy == 0 {
        return castle_reach(f, board, to_x, to_y);
    }
    (dx.abs() <= 1 && dy.abs() <= 1 && (dx, dy) != (0, 0)).then_some(Reach::Step)
}

fn castle_reach(f: &Figure, board: &Board, to_x: u8, to_y: u8) -> Option<Reach> {
    let home = f.owner.home_rank();
    if f.has_moved || f.x != 4 || f.y != home || to_y != home {
        return None;
    }
    let (rook_from_x, rook_to_x, empty): (u8, u8, &[u8]) = match to_x {
        6 => (7, 5, &[5, 6]),
        2 => (0, 3, &[1, 2, 3]),
        _ => return None,
    };
    match board.figure_at(rook_from_x, home) {
        Some(rook) if rook.kind == FigureKind::Rook && rook.owner == f.owner && !rook.has_moved => {}
        _ => return None,
    }
    if empty.iter().any(|&x| board.figure_at(x, home).is_some()) {
        return None;
    }
    if board.is_in_check(f.owner) {
        return None;
    }
    // transit square; the destination is verified when the move is played
    if board.king_step_exposes(f, rook_to_x, home) {
        return None;
    }
    Some(Reach::Castle { rook_from_x, rook_to_x })
}
