use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::thread;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::progress::ProgressSink;
use crate::board::player::Player;
use crate::board::position::Position;
use crate::board::Board;

pub const PLY_MIN: u8 = 1;
pub const PLY_MAX: u8 = 5;
pub const PLY_DEFAULT: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub plies: u8,
    pub threaded: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self { plies: PLY_DEFAULT, threaded: true }
    }
}

impl SearchParams {
    pub fn clamped(self) -> Self {
        Self { plies: self.plies.clamp(PLY_MIN, PLY_MAX), ..self }
    }
}

/// Outcome of a computer move, as recorded by the game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReport {
    pub from: Option<Position>,
    pub to: Option<Position>,
    pub plies: u8,
    pub threaded: bool,
    pub moves_calculated: u64,
    pub elapsed_ms: u64,
    pub score: i64,
}

// Strict improvement keeps the first candidate found on ties.
fn improves(candidate: &Board, best: &Option<Board>, player: Player) -> bool {
    match best {
        None => true,
        Some(b) => candidate.get_score(player) > b.get_score(player),
    }
}

impl Board {
    /// Looks `plies` half-moves ahead and returns the best leaf board for the
    /// side to move, or `None` if no legal move exists.
    ///
    /// Every legal child is expanded one ply shallower and asked for its own
    /// best leaf, judged for the side to move at that level; the root then picks
    /// the leaf with the highest `get_score(current_player)`, first found on
    /// ties. No pruning. The returned board sits `plies` generations below
    /// `self`; callers strip `plies - 1` links to get the move to play. A board
    /// whose game is over yields a turn-passing chain of the same depth.
    ///
    /// `counter` is incremented once per legal child produced at any level.
    pub fn get_max(&self, plies: u8, progress: &dyn ProgressSink, threaded: bool, counter: &AtomicU64) -> Option<Board> {
        let plies = plies.max(1);
        if self.is_game_over() {
            return Some(self.chain(plies));
        }
        progress.start();
        let best = if threaded {
            self.max_threaded(plies, progress, counter)
        } else {
            self.max_sequential(plies, progress, counter)
        };
        if best.is_none() {
            warn!("no legal move for {:?} at generation {}", self.current_player(), self.generation());
        }
        best
    }

    fn max_sequential(&self, plies: u8, progress: &dyn ProgressSink, counter: &AtomicU64) -> Option<Board> {
        let origins = self.movable_squares();
        let step = 1.0 / origins.len() as f64;
        let mut best = None;
        for from in origins {
            self.max_from(from, plies, counter, &mut best);
            progress.advance(step);
        }
        best
    }

    // One worker per origin square. Each returns its local best through the
    // channel; the scope join is the barrier, and the reduction runs in origin
    // order so ties resolve exactly as in the sequential search.
    fn max_threaded(&self, plies: u8, progress: &dyn ProgressSink, counter: &AtomicU64) -> Option<Board> {
        let origins = self.movable_squares();
        let step = 1.0 / origins.len() as f64;
        let (tx, rx) = mpsc::channel::<(usize, Option<Board>)>();

        thread::scope(|scope| {
            for (index, &from) in origins.iter().enumerate() {
                let tx = tx.clone();
                scope.spawn(move || {
                    debug!("{from} started");
                    let local = AtomicU64::new(0);
                    let mut best = None;
                    self.max_from(from, plies, &local, &mut best);
                    let calculated = local.load(Ordering::Relaxed);
                    counter.fetch_add(calculated, Ordering::Relaxed);
                    // the receiver outlives the scope
                    let _ = tx.send((index, best));
                    progress.advance(step);
                    debug!("{from} finished, calculated {calculated} possible moves");
                });
            }
        });
        drop(tx);

        let mut results: Vec<(usize, Option<Board>)> = rx.into_iter().collect();
        results.sort_by_key(|(index, _)| *index);
        let player = self.current_player();
        let mut best: Option<Board> = None;
        for candidate in results.into_iter().filter_map(|(_, b)| b) {
            if improves(&candidate, &best, player) {
                best = Some(candidate);
            }
        }
        best
    }

    fn max_from(&self, from: Position, plies: u8, counter: &AtomicU64, best: &mut Option<Board>) {
        let player = self.current_player();
        for (_, _, child) in self.successors_from(from) {
            counter.fetch_add(1, Ordering::Relaxed);
            let leaf = if plies > 1 { child.max_below(plies - 1, counter) } else { Some(child) };
            if let Some(leaf) = leaf {
                if improves(&leaf, best, player) {
                    *best = Some(leaf);
                }
            }
        }
    }

    fn max_below(&self, plies: u8, counter: &AtomicU64) -> Option<Board> {
        if self.is_game_over() {
            return Some(self.chain(plies));
        }
        let mut best = None;
        for from in self.movable_squares() {
            self.max_from(from, plies, counter, &mut best);
        }
        best
    }
}
