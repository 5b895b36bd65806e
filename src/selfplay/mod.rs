use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

use crate::board::position::Position;
use crate::board::status::Status;
use crate::board::Board;
use crate::game::Game;
use crate::search::SearchParams;

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    pub max_plies: usize,
    pub seed: u64,
    /// Let the engine answer every random move for the second player.
    pub use_engine: bool,
    /// Search depth for engine replies.
    pub plies: u8,
}

impl Default for SelfPlayParams {
    fn default() -> Self {
        Self { games: 4, max_plies: 80, seed: 1, use_engine: false, plies: 1 }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct GameSummary {
    pub seed: u64,
    pub plies: usize,
    pub status: Status,
    pub moves: Vec<String>,
    /// No board handed out left the side that just moved in check.
    pub king_safe: bool,
    /// Every move passed the turn to the other side.
    pub turns_alternate: bool,
}

pub fn play_games(params: &SelfPlayParams) -> Vec<GameSummary> {
    (0..params.games)
        .into_par_iter()
        .map(|gi| play_game(params, params.seed ^ (gi as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)))
        .collect()
}

fn play_game(params: &SelfPlayParams, seed: u64) -> GameSummary {
    let mut rng = SmallRng::seed_from_u64(seed);
    let engine = SearchParams { plies: params.plies, threaded: false };
    let mut game = Game::new(engine);
    let mut summary = GameSummary {
        seed,
        plies: 0,
        status: Status::None,
        moves: Vec::new(),
        king_safe: true,
        turns_alternate: true,
    };

    while summary.plies < params.max_plies && !game.is_over() {
        let before = game.board().current_player();
        let engine_turn = params.use_engine && summary.plies % 2 == 1;
        let played = if engine_turn {
            game.computer_move(&()).ok().and_then(|r| Some((r.from?, r.to?)))
        } else {
            random_move(game.board(), &mut rng).and_then(|(from, to)| game.play(from, to).ok().map(|_| (from, to)))
        };
        let Some((from, to)) = played else { break };
        summary.moves.push(format!("{from}{to}"));
        summary.plies += 1;
        let board = game.board();
        summary.king_safe &= !board.is_in_check(before);
        summary.turns_alternate &= board.current_player() == before.opponent();
    }
    summary.status = game.board().current_state();
    summary
}

fn random_move(board: &Board, rng: &mut SmallRng) -> Option<(Position, Position)> {
    let moves = board.legal_moves();
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.gen_range(0..moves.len())])
}
