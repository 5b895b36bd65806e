use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rookery::game::Game;
use rookery::search::{SearchParams, PLY_DEFAULT};
use rookery::{Board, ChessError, Player, Position, Status};
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[command(author, version, about = "Play chess against the rookery engine", long_about = None)]
struct Args {
    /// Search depth of the computer in plies (1..=5)
    #[arg(long, default_value_t = PLY_DEFAULT)]
    plies: u8,

    /// Search on the calling thread only
    #[arg(long)]
    single_threaded: bool,

    /// Your color: 'w' for white, 'b' for black
    #[arg(long, default_value = "w")]
    color: String,

    /// Starting FEN position
    #[arg(long)]
    fen: Option<String>,

    /// Let the computer play both sides
    #[arg(long)]
    self_play: bool,

    /// Print search statistics
    #[arg(long)]
    verbose: bool,
}

fn parse_color(color_str: &str) -> Result<Player> {
    match color_str.to_lowercase().as_str() {
        "w" | "white" => Ok(Player::White),
        "b" | "black" => Ok(Player::Black),
        _ => anyhow::bail!("Invalid color: use 'w' or 'b'"),
    }
}

fn parse_move(input: &str) -> Result<(Position, Position), ChessError> {
    let input = input.trim();
    if input.len() != 4 || !input.is_ascii() {
        return Err(ChessError::InvalidSquare(input.to_string()));
    }
    Ok((input[0..2].parse()?, input[2..4].parse()?))
}

enum Command {
    Move(Position, Position),
    Undo,
    Reset,
    Quit,
}

fn read_command() -> Result<Command> {
    loop {
        print!("Enter your move (e.g., e2e4), 'undo', 'reset' or 'quit': ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(Command::Quit);
        }
        match input.trim() {
            "quit" => return Ok(Command::Quit),
            "undo" => return Ok(Command::Undo),
            "reset" => return Ok(Command::Reset),
            text => match parse_move(text) {
                Ok((from, to)) => return Ok(Command::Move(from, to)),
                Err(e) => println!("{e}"),
            },
        }
    }
}

fn announce(status: Status) {
    match status {
        Status::CheckmateWhite => println!("\nCheckmate! Black wins!"),
        Status::CheckmateBlack => println!("\nCheckmate! White wins!"),
        Status::StalemateWhite | Status::StalemateBlack => println!("\nGame is a stalemate!"),
        Status::CheckWhite => println!("White is in check."),
        Status::CheckBlack => println!("Black is in check."),
        Status::None => {}
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let human_color = parse_color(&args.color)?;
    let params = SearchParams { plies: args.plies, threaded: !args.single_threaded }.clamped();

    let board = match args.fen.as_deref() {
        Some(fen) => Board::from_fen(fen).context("Invalid FEN string")?,
        None => Board::new(),
    };
    let mut game = Game::from_board(board, params);

    let style = ProgressStyle::with_template("thinking {bar:40} {percent:>3}%").context("progress style")?;

    loop {
        let board = game.board();
        println!("\n{board}");
        announce(board.current_state());
        if board.is_game_over() {
            break;
        }

        let is_human_turn = !args.self_play && board.current_player() == human_color;
        if is_human_turn {
            match read_command()? {
                Command::Quit => break,
                Command::Undo => {
                    // take back the computer's reply as well
                    game.undo();
                    game.undo();
                }
                Command::Reset => game.reset(),
                Command::Move(from, to) => {
                    if let Err(e) = game.play(from, to) {
                        println!("{e}");
                    }
                }
            }
        } else {
            let bar = ProgressBar::new(1000).with_style(style.clone());
            let report = game.computer_move(&bar)?;
            bar.finish_and_clear();
            if let (Some(from), Some(to)) = (report.from, report.to) {
                println!("Computer plays: {from}{to}");
            }
            if args.verbose {
                println!(
                    "plies: {}, threaded: {}, moves calculated: {}, elapsed: {} ms, score: {}",
                    report.plies, report.threaded, report.moves_calculated, report.elapsed_ms, report.score
                );
            }
        }
    }

    Ok(())
}
