use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use log::info;

use crate::board::position::Position;
use crate::board::status::Status;
use crate::board::Board;
use crate::error::{ChessError, ChessResult};
use crate::search::{ProgressSink, SearchParams, SearchReport};

/// Notifications for front ends that watch a running game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Moved { from: Position, to: Position, status: Status },
    Undone,
    Reset,
}

/// A game in progress: the current board, the boards it replaced, and the
/// computer's search settings.
pub struct Game {
    board: Board,
    history: Vec<Board>,
    params: SearchParams,
    listeners: Vec<Sender<GameEvent>>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(SearchParams::default())
    }
}

impl Game {
    pub fn new(params: SearchParams) -> Self {
        Self::from_board(Board::new(), params)
    }

    pub fn from_board(board: Board, params: SearchParams) -> Self {
        Self { board, history: Vec::new(), params: params.clamped(), listeners: Vec::new() }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn params(&self) -> SearchParams {
        self.params
    }

    pub fn set_params(&mut self, params: SearchParams) {
        self.params = params.clamped();
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn is_over(&self) -> bool {
        self.board.is_game_over()
    }

    /// Events are delivered until the receiver is dropped.
    pub fn subscribe(&mut self) -> Receiver<GameEvent> {
        let (tx, rx) = mpsc::channel();
        self.listeners.push(tx);
        rx
    }

    fn notify(&mut self, event: GameEvent) {
        self.listeners.retain(|l| l.send(event.clone()).is_ok());
    }

    fn ensure_running(&self) -> ChessResult<()> {
        if self.board.is_game_over() {
            return Err(ChessError::GameOver(self.board.current_state()));
        }
        Ok(())
    }

    fn advance(&mut self, next: Board, from: Position, to: Position) {
        let prior = std::mem::replace(&mut self.board, next);
        self.history.push(prior);
        let status = self.board.current_state();
        self.notify(GameEvent::Moved { from, to, status });
    }

    /// Plays a move for the side to move.
    pub fn play(&mut self, from: Position, to: Position) -> ChessResult<&Board> {
        self.ensure_running()?;
        let next = self.board.make_move_between(from, to).ok_or(ChessError::IllegalMove { from, to })?;
        self.advance(next, from, to);
        Ok(&self.board)
    }

    /// Searches with the configured settings and plays the chosen move.
    pub fn computer_move(&mut self, progress: &dyn ProgressSink) -> ChessResult<SearchReport> {
        self.ensure_running()?;
        let SearchParams { plies, threaded } = self.params;
        let counter = AtomicU64::new(0);
        let started = Instant::now();
        let leaf = self.board.get_max(plies, progress, threaded, &counter);
        let elapsed_ms = started.elapsed().as_millis() as u64;
        let moves_calculated = counter.load(Ordering::Relaxed);

        // the search always yields a leaf on a running board
        let Some(leaf) = leaf else {
            return Err(ChessError::GameOver(self.board.current_state()));
        };
        let Some(next) = leaf.ancestor(plies.saturating_sub(1) as usize).cloned() else {
            panic!("search result is shallower than {plies} plies");
        };
        let (Some(from), Some(to)) = (next.last_from(), next.last_to()) else {
            panic!("search result does not record its move");
        };
        let score = next.get_score(self.board.current_player());
        info!("finished, calculated a total of {moves_calculated} possible moves in {elapsed_ms} ms, playing {from}{to}");
        self.advance(next, from, to);
        Ok(SearchReport { from: Some(from), to: Some(to), plies, threaded, moves_calculated, elapsed_ms, score })
    }

    /// Restores the board before the last move. Returns false with no history.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(prior) => {
                self.board = prior;
                self.notify(GameEvent::Undone);
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.board = Board::new();
        self.history.clear();
        self.notify(GameEvent::Reset);
    }
}
