use std::sync::atomic::{AtomicU64, Ordering};

use pretty_assertions::assert_eq;
use rookery::search::AtomicProgress;
use rookery::Board;

const MIDDLEGAME: &str = "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/3P1N2/PPP2PPP/RNBQK2R w KQkq - 1 5";

fn compare(b: &Board, plies: u8) {
    let (cs, ct) = (AtomicU64::new(0), AtomicU64::new(0));
    let single = b.get_max(plies, &(), false, &cs);
    let threaded = b.get_max(plies, &(), true, &ct);
    assert_eq!(single, threaded);
    assert_eq!(cs.load(Ordering::Relaxed), ct.load(Ordering::Relaxed));
    let first = |leaf: &Board| {
        let f = leaf.ancestor(plies as usize - 1).unwrap();
        (f.last_from(), f.last_to())
    };
    assert_eq!(single.as_ref().map(first), threaded.as_ref().map(first));
}

#[test]
fn threaded_search_matches_single_threaded_from_start() {
    let b = Board::new();
    compare(&b, 1);
    compare(&b, 2);
}

#[test]
fn threaded_search_matches_single_threaded_in_middlegame() {
    let b = Board::from_fen(MIDDLEGAME).unwrap();
    compare(&b, 1);
    compare(&b, 2);
}

#[test]
fn progress_adds_up_to_one() {
    let b = Board::new();
    for threaded in [false, true] {
        let progress = AtomicProgress::new();
        let counter = AtomicU64::new(0);
        b.get_max(2, &progress, threaded, &counter).unwrap();
        assert!((progress.fraction() - 1.0).abs() < 1e-3, "threaded={threaded}: {}", progress.fraction());
    }
}

#[test]
fn progress_reports_once_per_movable_piece() {
    let b = Board::new();
    let calls = AtomicU64::new(0);
    let sink = |_step: f64| {
        calls.fetch_add(1, Ordering::Relaxed);
    };
    let counter = AtomicU64::new(0);
    b.get_max(1, &sink, true, &counter).unwrap();
    assert_eq!(calls.load(Ordering::Relaxed), 16);
}
