use std::sync::atomic::{AtomicU64, Ordering};

use rookery::search::eval::CHECKMATE_SCORE;
use rookery::{Board, Player, Position, Status};

fn sq(s: &str) -> Position {
    s.parse().unwrap()
}

fn first_move(root: &Board, leaf: &Board, plies: u8) -> (Position, Position) {
    let first = leaf.ancestor(plies as usize - 1).unwrap();
    assert_eq!(first.generation(), root.generation() + 1);
    (first.last_from().unwrap(), first.last_to().unwrap())
}

#[test]
fn depth_one_takes_the_hanging_queen() {
    let b = Board::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").unwrap();
    let counter = AtomicU64::new(0);
    let leaf = b.get_max(1, &(), false, &counter).unwrap();
    assert_eq!(first_move(&b, &leaf, 1), (sq("d2"), sq("d5")));
    assert!(leaf.get_score(Player::White) > b.get_score(Player::White));
}

#[test]
fn depth_one_finds_the_back_rank_mate() {
    let b = Board::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
    let counter = AtomicU64::new(0);
    let leaf = b.get_max(1, &(), false, &counter).unwrap();
    assert_eq!(leaf.current_state(), Status::CheckmateBlack);
    assert_eq!(leaf.get_score(Player::White), CHECKMATE_SCORE);
    assert_eq!(first_move(&b, &leaf, 1), (sq("a1"), sq("a8")));
}

#[test]
fn deeper_search_still_plays_the_mate() {
    let b = Board::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
    let counter = AtomicU64::new(0);
    let leaf = b.get_max(2, &(), false, &counter).unwrap();
    assert_eq!(leaf.generation(), 2);
    assert_eq!(leaf.current_state(), Status::CheckmateBlack);
    assert_eq!(first_move(&b, &leaf, 2), (sq("a1"), sq("a8")));
}

#[test]
fn counter_sees_every_legal_child() {
    let b = Board::new();
    let counter = AtomicU64::new(0);
    b.get_max(1, &(), false, &counter).unwrap();
    assert_eq!(counter.load(Ordering::Relaxed), 20);

    let counter = AtomicU64::new(0);
    let leaf = b.get_max(2, &(), false, &counter).unwrap();
    assert_eq!(counter.load(Ordering::Relaxed), 20 + 400);
    assert_eq!(leaf.generation(), 2);
    assert_eq!(leaf.current_player(), Player::White);
}

#[test]
fn zero_plies_searches_one() {
    let b = Board::new();
    let c0 = AtomicU64::new(0);
    let c1 = AtomicU64::new(0);
    assert_eq!(b.get_max(0, &(), false, &c0), b.get_max(1, &(), false, &c1));
    assert_eq!(c0.load(Ordering::Relaxed), c1.load(Ordering::Relaxed));
}

#[test]
fn finished_game_yields_a_placeholder_chain() {
    // f3 e6 g4 Qh4#
    let b = [(5, 1, 5, 2), (4, 6, 4, 5), (6, 1, 6, 3), (3, 7, 7, 3)]
        .iter()
        .fold(Board::new(), |b, &(fx, fy, tx, ty)| b.make_move(fx, fy, tx, ty).unwrap());
    assert!(b.is_game_over());
    let counter = AtomicU64::new(0);
    let leaf = b.get_max(3, &(), false, &counter).unwrap();
    assert_eq!(counter.load(Ordering::Relaxed), 0);
    assert_eq!(leaf.generation(), b.generation() + 3);
    assert_eq!(leaf.current_state(), Status::CheckmateWhite);
    assert_eq!(leaf.get_score(Player::Black), CHECKMATE_SCORE);
    assert!(leaf.figures().eq(b.figures()));
}

#[test]
fn search_is_repeatable() {
    let b = Board::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3").unwrap();
    let c = AtomicU64::new(0);
    let a = b.get_max(2, &(), false, &c).unwrap();
    let again = b.get_max(2, &(), false, &c).unwrap();
    assert_eq!(a, again);
    assert_eq!(first_move(&b, &a, 2), first_move(&b, &again, 2));
}
