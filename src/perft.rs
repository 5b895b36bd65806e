use rayon::prelude::*;

use crate::board::Board;

// Counts legal leaf boards `depth` plies below `board`.
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    if depth == 1 { return board.successors().len() as u64; }
    board.successors().iter().map(|(_, _, child)| perft(child, depth - 1)).sum()
}

// Root-split variant: each root move is counted on the rayon pool.
pub fn perft_parallel(board: &Board, depth: u32) -> u64 {
    if depth <= 1 { return perft(board, depth); }
    let roots = board.successors();
    roots.par_iter().map(|(_, _, child)| perft(child, depth - 1)).sum()
}

/// Per-root-move counts in move order, keyed by move text such as `e2e4`.
pub fn divide(board: &Board, depth: u32) -> Vec<(String, u64)> {
    board
        .successors()
        .into_iter()
        .map(|(from, to, child)| (format!("{from}{to}"), perft(&child, depth.saturating_sub(1))))
        .collect()
}
