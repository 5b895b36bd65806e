use crate::board::figure::FigureKind;
use crate::board::player::Player;

pub const PAWN: i32 = 100;
pub const KNIGHT: i32 = 320;
pub const BISHOP: i32 = 330;
pub const ROOK: i32 = 500;
pub const QUEEN: i32 = 900;
pub const KING: i32 = 20_000;

// Mate scoring helpers
pub const CHECKMATE_SCORE: i64 = 100_000;
pub const DRAW_SCORE: i64 = 0;

// Piece-square tables are indexed [file][rank] from White's side; Black
// mirrors the rank.
type Table = [[i32; 8]; 8];

#[rustfmt::skip]
const PAWN_TABLE: Table = [
    [  0,   5,   5,   0,   5,  10,  50,   0],
    [  0,  10,  -5,   0,   5,  10,  50,   0],
    [  0,  10, -10,   0,  10,  20,  50,   0],
    [  0, -20,   0,  20,  25,  30,  50,   0],
    [  0, -20,   0,  20,  25,  30,  50,   0],
    [  0,  10, -10,   0,  10,  20,  50,   0],
    [  0,  10,  -5,   0,   5,  10,  50,   0],
    [  0,   5,   5,   0,   5,  10,  50,   0],
];

#[rustfmt::skip]
const KNIGHT_TABLE: Table = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20,   5,   0,   5,   0, -20, -40],
    [-30,   0,  10,  15,  15,  10,   0, -30],
    [-30,   5,  15,  20,  20,  15,   0, -30],
    [-30,   5,  15,  20,  20,  15,   0, -30],
    [-30,   0,  10,  15,  15,  10,   0, -30],
    [-40, -20,   5,   0,   5,   0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

#[rustfmt::skip]
const BISHOP_TABLE: Table = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10,   5,  10,   0,   5,   0,   0, -10],
    [-10,   0,  10,  10,   5,   5,   0, -10],
    [-10,   0,  10,  10,  10,  10,   0, -10],
    [-10,   0,  10,  10,  10,  10,   0, -10],
    [-10,   0,  10,  10,   5,   5,   0, -10],
    [-10,   5,  10,   0,   5,   0,   0, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

#[rustfmt::skip]
const ROOK_TABLE: Table = [
    [  0,  -5,  -5,  -5,  -5,  -5,   5,   0],
    [  0,   0,   0,   0,   0,   0,  10,   0],
    [  0,   0,   0,   0,   0,   0,  10,   0],
    [  5,   0,   0,   0,   0,   0,  10,   0],
    [  5,   0,   0,   0,   0,   0,  10,   0],
    [  0,   0,   0,   0,   0,   0,  10,   0],
    [  0,   0,   0,   0,   0,   0,  10,   0],
    [  0,  -5,  -5,  -5,  -5,  -5,   5,   0],
];

#[rustfmt::skip]
const QUEEN_TABLE: Table = [
    [-20, -10, -10,   0,  -5, -10, -10, -20],
    [-10,   0,   5,   0,   0,   0,   0, -10],
    [-10,   5,   5,   5,   5,   5,   0, -10],
    [ -5,   0,   5,   5,   5,   5,   0,  -5],
    [ -5,   0,   5,   5,   5,   5,   0,  -5],
    [-10,   0,   5,   5,   5,   5,   0, -10],
    [-10,   0,   0,   0,   0,   0,   0, -10],
    [-20, -10, -10,  -5,  -5, -10, -10, -20],
];

#[rustfmt::skip]
const KING_MID_TABLE: Table = [
    [ 20,  20, -10, -20, -30, -30, -30, -30],
    [ 30,  20, -20, -30, -40, -40, -40, -40],
    [ 10,   0, -20, -30, -40, -40, -40, -40],
    [  0,   0, -20, -40, -50, -50, -50, -50],
    [  0,   0, -20, -40, -50, -50, -50, -50],
    [ 10,   0, -20, -30, -40, -40, -40, -40],
    [ 30,  20, -20, -30, -40, -40, -40, -40],
    [ 20,  20, -10, -20, -30, -30, -30, -30],
];

#[rustfmt::skip]
const KING_LATE_TABLE: Table = [
    [-50, -30, -30, -30, -30, -30, -30, -50],
    [-30, -30, -10, -10, -10, -10, -20, -40],
    [-30,   0,  20,  30,  30,  20, -10, -30],
    [-30,   0,  30,  40,  40,  30,   0, -20],
    [  0,   0, -20, -40, -50, -50, -50, -50],
    [ 10,   0, -20, -30, -40, -40, -40, -40],
    [ 30,  20, -20, -30, -40, -40, -40, -40],
    [ 20,  20, -10, -20, -30, -30, -30, -30],
];

pub fn material(kind: FigureKind) -> i32 {
    match kind {
        FigureKind::Pawn => PAWN,
        FigureKind::Knight => KNIGHT,
        FigureKind::Bishop => BISHOP,
        FigureKind::Rook => ROOK,
        FigureKind::Queen => QUEEN,
        FigureKind::King => KING,
    }
}

/// Positional bonus of a piece on (x, y). `late_game` switches the king to its
/// endgame table and is true once both queens are gone.
pub fn positional_bonus(kind: FigureKind, owner: Player, x: u8, y: u8, late_game: bool) -> i32 {
    let table = match kind {
        FigureKind::Pawn => &PAWN_TABLE,
        FigureKind::Knight => &KNIGHT_TABLE,
        FigureKind::Bishop => &BISHOP_TABLE,
        FigureKind::Rook => &ROOK_TABLE,
        FigureKind::Queen => &QUEEN_TABLE,
        FigureKind::King if late_game => &KING_LATE_TABLE,
        FigureKind::King => &KING_MID_TABLE,
    };
    let rank = match owner { Player::White => y, Player::Black => 7 - y };
    table[x as usize][rank as usize]
}

pub fn figure_value(kind: FigureKind, owner: Player, x: u8, y: u8, late_game: bool) -> i32 {
    material(kind) + positional_bonus(kind, owner, x, y, late_game)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_mirrors_white_by_rank() {
        for kind in [FigureKind::Pawn, FigureKind::Knight, FigureKind::Bishop, FigureKind::Rook, FigureKind::Queen, FigureKind::King] {
            for x in 0..8u8 {
                for y in 0..8u8 {
                    assert_eq!(
                        figure_value(kind, Player::White, x, y, false),
                        figure_value(kind, Player::Black, x, 7 - y, false),
                    );
                }
            }
        }
    }

    #[test]
    fn king_table_switches_in_late_game() {
        // e1 king: midgame 0, endgame -30
        assert_eq!(positional_bonus(FigureKind::King, Player::White, 4, 0, false), 0);
        assert_eq!(positional_bonus(FigureKind::King, Player::White, 3, 0, true), -30);
        assert_eq!(figure_value(FigureKind::King, Player::White, 6, 0, false), KING + 30);
    }

    #[test]
    fn pawn_on_seventh_is_worth_more() {
        assert_eq!(figure_value(FigureKind::Pawn, Player::White, 4, 6, false), PAWN + 50);
        assert_eq!(figure_value(FigureKind::Pawn, Player::Black, 4, 1, false), PAWN + 50);
    }
}
