pub mod figure;
pub mod player;
pub mod position;
pub mod status;

use std::fmt;
use std::sync::Arc;

use crate::error::{ChessError, ChessResult};
use crate::search::eval::{self, CHECKMATE_SCORE, DRAW_SCORE};
use figure::{Figure, FigureKind, Reach};
use player::Player;
use position::Position;
use status::Status;

type Grid = [[Option<Figure>; 8]; 8];

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const BACK_RANK: [FigureKind; 8] = [
    FigureKind::Rook,
    FigureKind::Knight,
    FigureKind::Bishop,
    FigureKind::Queen,
    FigureKind::King,
    FigureKind::Bishop,
    FigureKind::Knight,
    FigureKind::Rook,
];

/// A sealed chess position. Boards are never mutated once handed out: every
/// accepted move produces a new board linked to the one it came from.
#[derive(Clone)]
pub struct Board {
    grid: Grid,
    current_player: Player,
    state: Status,
    en_passant_white: Option<u8>,
    en_passant_black: Option<u8>,
    last_from: Option<Position>,
    last_to: Option<Position>,
    score_white_total: i64,
    score_black_total: i64,
    generation: u32,
    previous: Option<Arc<Board>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard starting position, White to move.
    pub fn new() -> Self {
        let mut grid: Grid = [[None; 8]; 8];
        for x in 0..8u8 {
            let kind = BACK_RANK[x as usize];
            grid[x as usize][0] = Some(Figure::new(kind, Player::White, x, 0));
            grid[x as usize][1] = Some(Figure::new(FigureKind::Pawn, Player::White, x, 1));
            grid[x as usize][6] = Some(Figure::new(FigureKind::Pawn, Player::Black, x, 6));
            grid[x as usize][7] = Some(Figure::new(kind, Player::Black, x, 7));
        }
        let mut board = Self::empty(grid, Player::White);
        board.evaluate();
        board
    }

    fn empty(grid: Grid, current_player: Player) -> Self {
        Self {
            grid,
            current_player,
            state: Status::None,
            en_passant_white: None,
            en_passant_black: None,
            last_from: None,
            last_to: None,
            score_white_total: 0,
            score_black_total: 0,
            generation: 0,
            previous: None,
        }
    }

    // Copy of this board without its history link.
    fn detached(&self) -> Self {
        Self {
            grid: self.grid,
            current_player: self.current_player,
            state: self.state,
            en_passant_white: self.en_passant_white,
            en_passant_black: self.en_passant_black,
            last_from: self.last_from,
            last_to: self.last_to,
            score_white_total: self.score_white_total,
            score_black_total: self.score_black_total,
            generation: self.generation,
            previous: None,
        }
    }

    pub(crate) fn figure_at(&self, x: u8, y: u8) -> Option<&Figure> {
        self.grid[x as usize][y as usize].as_ref()
    }

    /// The piece on (x, y), `None` for an empty or off-board square.
    pub fn get_figure(&self, x: u8, y: u8) -> Option<&Figure> {
        if x >= 8 || y >= 8 {
            return None;
        }
        self.figure_at(x, y)
    }

    pub fn figure_on(&self, pos: Position) -> Option<&Figure> {
        self.figure_at(pos.x(), pos.y())
    }

    /// All pieces, file by file.
    pub fn figures(&self) -> impl Iterator<Item = &Figure> + '_ {
        self.grid.iter().flat_map(|file| file.iter().flatten())
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn current_state(&self) -> Status {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn last_from(&self) -> Option<Position> {
        self.last_from
    }

    pub fn last_to(&self) -> Option<Position> {
        self.last_to
    }

    /// Number of boards between this one and the root of its history.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn previous(&self) -> Option<&Board> {
        self.previous.as_deref()
    }

    /// Walks `n` links back along the history chain.
    pub fn ancestor(&self, n: usize) -> Option<&Board> {
        let mut board = self;
        for _ in 0..n {
            board = board.previous()?;
        }
        Some(board)
    }

    /// File of the pawn `player` double-stepped with on their last move.
    pub fn en_passant_file(&self, player: Player) -> Option<u8> {
        match player {
            Player::White => self.en_passant_white,
            Player::Black => self.en_passant_black,
        }
    }

    pub fn king(&self, player: Player) -> Option<&Figure> {
        self.figures().find(|f| f.kind() == FigureKind::King && f.owner() == player)
    }

    /// True once both queens have left the board.
    pub fn is_late_game(&self) -> bool {
        !self.figures().any(|f| f.kind() == FigureKind::Queen)
    }

    /// True if any enemy piece can reach `player`'s king.
    pub fn is_in_check(&self, player: Player) -> bool {
        let Some(king) = self.king(player) else {
            panic!("board has no {player:?} king");
        };
        let (kx, ky) = (king.x(), king.y());
        self.figures()
            .filter(|f| f.owner() != player)
            .any(|f| f.is_square_reachable(self, kx, ky))
    }

    // Would the king be attacked after stepping to (to_x, to_y)? Used to probe
    // the transit square of a castling move.
    pub(crate) fn king_step_exposes(&self, king: &Figure, to_x: u8, to_y: u8) -> bool {
        let mut tx = Transaction::scratch(self);
        tx.relocate(king.x(), king.y(), to_x, to_y);
        tx.board.is_in_check(king.owner())
    }

    /// Moves the piece on (from_x, from_y) to (to_x, to_y). Returns `None` when
    /// the origin is empty, belongs to the other side, or the move is illegal.
    pub fn make_move(&self, from_x: u8, from_y: u8, to_x: u8, to_y: u8) -> Option<Board> {
        let figure = self.get_figure(from_x, from_y)?;
        if figure.owner() != self.current_player {
            return None;
        }
        figure.make_move(self, to_x, to_y)
    }

    pub fn make_move_between(&self, from: Position, to: Position) -> Option<Board> {
        self.make_move(from.x(), from.y(), to.x(), to.y())
    }

    pub(crate) fn play_figure(&self, figure: &Figure, to_x: u8, to_y: u8) -> Option<Board> {
        if self.get_figure(figure.x(), figure.y()) != Some(figure) {
            return None;
        }
        let mut tx = self.stage(figure, to_x, to_y, true)?;
        tx.finish();
        Some(tx.seal())
    }

    // Everything up to and including the king-safety check; status and scores
    // are left for `Transaction::finish`.
    fn stage(&self, figure: &Figure, to_x: u8, to_y: u8, linked: bool) -> Option<Transaction> {
        let reach = figure.reach(self, to_x, to_y)?;
        let mover = figure.owner();
        let mut tx = if linked { Transaction::derive(self) } else { Transaction::scratch(self) };
        tx.set_marker(mover, None);
        tx.board.last_from = Some(figure.position());
        tx.board.last_to = Some(Position::at(to_x, to_y));
        match reach {
            Reach::Step => {}
            Reach::DoubleStep => tx.set_marker(mover, Some(figure.x())),
            Reach::EnPassant => {
                tx.take(to_x, figure.y());
            }
            Reach::Castle { rook_from_x, rook_to_x } => tx.relocate(rook_from_x, figure.y(), rook_to_x, figure.y()),
        }
        tx.relocate(figure.x(), figure.y(), to_x, to_y);
        tx.promote();
        if tx.board.is_in_check(mover) {
            return None;
        }
        Some(tx)
    }

    /// Does `player` have at least one move that keeps their king safe?
    pub fn has_legal_move(&self, player: Player) -> bool {
        self.figures().filter(|f| f.owner() == player).any(|f| {
            Position::all().any(|to| self.stage(f, to.x(), to.y(), false).is_some())
        })
    }

    /// Every legal move of the side to move, origin by origin, destinations
    /// file by file.
    pub fn successors(&self) -> Vec<(Position, Position, Board)> {
        let mut out = Vec::new();
        for from in self.movable_squares() {
            out.extend(self.successors_from(from));
        }
        out
    }

    pub(crate) fn successors_from(&self, from: Position) -> impl Iterator<Item = (Position, Position, Board)> + '_ {
        let figure = self.figure_on(from);
        Position::all().filter_map(move |to| {
            let next = figure?.make_move(self, to.x(), to.y())?;
            Some((from, to, next))
        })
    }

    pub fn legal_moves(&self) -> Vec<(Position, Position)> {
        self.successors().into_iter().map(|(from, to, _)| (from, to)).collect()
    }

    /// Squares holding a piece of the side to move.
    pub fn movable_squares(&self) -> Vec<Position> {
        self.figures().filter(|f| f.owner() == self.current_player).map(|f| f.position()).collect()
    }

    fn compute_status(&self) -> Status {
        let player = self.current_player;
        let has_move = self.has_legal_move(player);
        if self.is_in_check(player) {
            if has_move {
                Status::check(player)
            } else {
                Status::checkmate(player)
            }
        } else if !has_move {
            Status::stalemate(player)
        } else {
            Status::None
        }
    }

    fn evaluate(&mut self) {
        let late = self.is_late_game();
        let (mut white, mut black) = (0i64, 0i64);
        for f in self.figures() {
            let v = eval::figure_value(f.kind(), f.owner(), f.x(), f.y(), late) as i64;
            match f.owner() {
                Player::White => white += v,
                Player::Black => black += v,
            }
        }
        self.score_white_total = white;
        self.score_black_total = black;
    }

    /// Score from `player`'s point of view: mate scores on checkmate, zero on
    /// stalemate, otherwise own total minus the opponent's.
    pub fn get_score(&self, player: Player) -> i64 {
        match self.state {
            Status::CheckmateBlack if player == Player::White => CHECKMATE_SCORE,
            Status::CheckmateWhite if player == Player::Black => CHECKMATE_SCORE,
            Status::CheckmateBlack | Status::CheckmateWhite => -CHECKMATE_SCORE,
            Status::StalemateWhite | Status::StalemateBlack => DRAW_SCORE,
            _ => self.get_score_total(player) - self.get_score_total(player.opponent()),
        }
    }

    pub fn get_score_total(&self, player: Player) -> i64 {
        match player {
            Player::White => self.score_white_total,
            Player::Black => self.score_black_total,
        }
    }

    /// A placeholder line of `plies` boards that only passes the turn. Keeps the
    /// depth of a search result uniform once the game has ended.
    pub(crate) fn chain(&self, plies: u8) -> Board {
        let mut ret = Transaction::derive(self).seal();
        for _ in 1..plies {
            let mut tx = Transaction::derive(&ret);
            tx.board.current_player = tx.board.current_player.opponent();
            ret = tx.seal();
        }
        ret
    }

    /// Sets up a position from FEN. The castling field maps onto the moved
    /// flags of kings and rooks; the en-passant field onto the marker of the
    /// side that just moved. Move clocks are ignored.
    pub fn from_fen(fen: &str) -> ChessResult<Board> {
        let bad = |msg: &str| ChessError::InvalidFen(format!("{msg}: '{fen}'"));
        let mut fields = fen.split_whitespace();
        let placement = fields.next().ok_or_else(|| bad("empty string"))?;
        let side = fields.next().unwrap_or("w");
        let castling = fields.next().unwrap_or("-");
        let en_passant = fields.next().unwrap_or("-");

        let mut grid: Grid = [[None; 8]; 8];
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(bad("placement needs 8 ranks"));
        }
        for (i, rank) in ranks.iter().enumerate() {
            let y = 7 - i as u8;
            let mut x = 0u8;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10) {
                    x = x.saturating_add(skip as u8);
                    if x > 8 {
                        return Err(bad("rank too long"));
                    }
                    continue;
                }
                let kind = FigureKind::from_symbol(c).ok_or_else(|| bad("unknown piece"))?;
                if x >= 8 {
                    return Err(bad("rank too long"));
                }
                let owner = if c.is_ascii_uppercase() { Player::White } else { Player::Black };
                // castling rights are restored from the castling field below
                let castles = matches!(kind, FigureKind::King | FigureKind::Rook);
                grid[x as usize][y as usize] = Some(Figure::new(kind, owner, x, y).with_moved(castles));
                x += 1;
            }
            if x != 8 {
                return Err(bad("rank does not cover 8 files"));
            }
        }

        let current_player = match side {
            "w" => Player::White,
            "b" => Player::Black,
            _ => return Err(bad("side to move must be 'w' or 'b'")),
        };
        let mut board = Self::empty(grid, current_player);

        if castling != "-" {
            for c in castling.chars() {
                let (owner, rook_x) = match c {
                    'K' => (Player::White, 7),
                    'Q' => (Player::White, 0),
                    'k' => (Player::Black, 7),
                    'q' => (Player::Black, 0),
                    _ => return Err(bad("bad castling field")),
                };
                board.clear_moved(owner, 4, FigureKind::King);
                board.clear_moved(owner, rook_x, FigureKind::Rook);
            }
        }

        if en_passant != "-" {
            let square: Position = en_passant.parse().map_err(|_| bad("bad en-passant square"))?;
            let mover = current_player.opponent();
            let expected = match mover { Player::White => 2, Player::Black => 5 };
            if square.y() != expected {
                return Err(bad("en-passant square on the wrong rank"));
            }
            match mover {
                Player::White => board.en_passant_white = Some(square.x()),
                Player::Black => board.en_passant_black = Some(square.x()),
            }
        }

        for player in [Player::White, Player::Black] {
            let kings = board.figures().filter(|f| f.kind() == FigureKind::King && f.owner() == player).count();
            if kings != 1 {
                return Err(bad("each side needs exactly one king"));
            }
        }
        if board.is_in_check(current_player.opponent()) {
            return Err(bad("side not to move is in check"));
        }

        board.evaluate();
        board.state = board.compute_status();
        Ok(board)
    }

    fn clear_moved(&mut self, owner: Player, x: u8, kind: FigureKind) {
        let y = owner.home_rank();
        if let Some(f) = self.grid[x as usize][y as usize].as_mut() {
            if f.kind() == kind && f.owner() == owner {
                *f = f.with_moved(false);
            }
        }
    }
}

impl Drop for Board {
    // Unlink the history iteratively so long games do not recurse on drop.
    fn drop(&mut self) {
        let mut next = self.previous.take();
        while let Some(link) = next {
            match Arc::try_unwrap(link) {
                Ok(mut board) => next = board.previous.take(),
                Err(_) => break,
            }
        }
    }
}

// Positions compare by content; the history link is ignored.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.grid == other.grid
            && self.current_player == other.current_player
            && self.state == other.state
            && self.en_passant_white == other.en_passant_white
            && self.en_passant_black == other.en_passant_black
            && self.last_from == other.last_from
            && self.last_to == other.last_to
            && self.score_white_total == other.score_white_total
            && self.score_black_total == other.score_black_total
            && self.generation == other.generation
    }
}

impl Eq for Board {}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("current_player", &self.current_player)
            .field("state", &self.state)
            .field("last_from", &self.last_from)
            .field("last_to", &self.last_to)
            .field("generation", &self.generation)
            .field("score_white_total", &self.score_white_total)
            .field("score_black_total", &self.score_black_total)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "current player: {}", self.current_player)?;
        for y in (0..8u8).rev() {
            writeln!(f, "+---+---+---+---+---+---+---+---+")?;
            for x in 0..8u8 {
                match self.figure_at(x, y) {
                    Some(fig) => write!(f, "|{fig} ")?,
                    None => write!(f, "|   ")?,
                }
            }
            writeln!(f, "| {}", y + 1)?;
        }
        writeln!(f, "+---+---+---+---+---+---+---+---+")?;
        write!(f, "  A   B   C   D   E   F   G   H")
    }
}

/// A board under construction. Only this type mutates; `seal` hands out the
/// finished, read-only board.
struct Transaction {
    board: Board,
}

impl Transaction {
    // Child of `parent`: one generation later, linked back for history.
    fn derive(parent: &Board) -> Self {
        let mut board = parent.detached();
        board.previous = Some(Arc::new(parent.clone()));
        board.generation = parent.generation + 1;
        board.last_from = None;
        board.last_to = None;
        Self { board }
    }

    // Throwaway copy for legality probes.
    fn scratch(parent: &Board) -> Self {
        Self { board: parent.detached() }
    }

    fn take(&mut self, x: u8, y: u8) -> Option<Figure> {
        self.board.grid[x as usize][y as usize].take()
    }

    fn put(&mut self, x: u8, y: u8, mut figure: Figure) {
        figure.place(x, y);
        self.board.grid[x as usize][y as usize] = Some(figure);
    }

    fn relocate(&mut self, from_x: u8, from_y: u8, to_x: u8, to_y: u8) {
        if let Some(figure) = self.take(from_x, from_y) {
            self.put(to_x, to_y, figure.with_moved(true));
        }
    }

    fn set_marker(&mut self, player: Player, file: Option<u8>) {
        match player {
            Player::White => self.board.en_passant_white = file,
            Player::Black => self.board.en_passant_black = file,
        }
    }

    /// Replaces every pawn standing on its promotion rank with a queen.
    fn promote(&mut self) {
        for y in [0u8, 7] {
            for x in 0..8u8 {
                let Some(f) = self.board.figure_at(x, y).copied() else { continue };
                if f.kind() == FigureKind::Pawn && f.owner().promotion_rank() == y {
                    self.put(x, y, Figure::new(FigureKind::Queen, f.owner(), x, y).with_moved(true));
                }
            }
        }
    }

    fn finish(&mut self) {
        self.board.current_player = self.board.current_player.opponent();
        self.board.state = self.board.compute_status();
        self.board.evaluate();
    }

    fn seal(self) -> Board {
        self.board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promotion_is_idempotent() {
        let board = Board::from_fen("7k/4P3/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let mut tx = Transaction::scratch(&board);
        tx.relocate(4, 6, 4, 7);
        tx.promote();
        let once = tx.board.clone();
        tx.promote();
        assert_eq!(tx.board, once);
        assert_eq!(once.figure_at(4, 7).map(|f| f.kind()), Some(FigureKind::Queen));
    }

    #[test]
    fn figure_coordinates_match_their_cells() {
        let board = Board::new().make_move(6, 0, 5, 2).unwrap();
        for x in 0..8u8 {
            for y in 0..8u8 {
                if let Some(f) = board.figure_at(x, y) {
                    assert_eq!((f.x(), f.y()), (x, y));
                }
            }
        }
    }

    #[test]
    fn chain_passes_turns_without_moving() {
        let board = Board::new();
        let chained = board.chain(3);
        assert_eq!(chained.generation(), 3);
        assert_eq!(chained.grid, board.grid);
        // two hand-overs after the first copy
        assert_eq!(chained.current_player(), Player::White);
        assert_eq!(board.chain(2).current_player(), Player::Black);
        assert_eq!(chained.ancestor(3).map(|b| b.generation()), Some(0));
    }

    #[test]
    fn long_history_drops_without_recursion() {
        let mut board = Board::new();
        for i in 0..20_000u32 {
            let mut tx = Transaction::derive(&board);
            tx.board.generation = i + 1;
            board = tx.seal();
        }
        assert_eq!(board.generation(), 20_000);
        drop(board);
    }
}
