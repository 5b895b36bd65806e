use anyhow::{Context, Result};
use clap::Parser;
use rookery::search::{AtomicProgress, PLY_DEFAULT};
use rookery::Board;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "rookery-bench", version, about = "Benchmark rookery's fixed-depth search")]
struct Args {
    /// FEN string or 'startpos'
    #[arg(long, default_value = "startpos")]
    fen: String,

    /// Search depth in plies
    #[arg(long, default_value_t = PLY_DEFAULT)]
    plies: u8,

    /// Search on the calling thread only
    #[arg(long, default_value_t = false)]
    single_threaded: bool,

    /// Print the result as a JSON object
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(serde::Serialize)]
struct BenchReport {
    fen: String,
    plies: u8,
    threaded: bool,
    bestmove: Option<String>,
    score: Option<i64>,
    moves_calculated: u64,
    elapsed_s: f64,
    moves_per_s: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let board = if args.fen == "startpos" { Board::new() } else { Board::from_fen(&args.fen).context("Invalid FEN")? };
    let plies = args.plies.max(1);
    let threaded = !args.single_threaded;

    let counter = AtomicU64::new(0);
    let progress = AtomicProgress::new();
    let t0 = Instant::now();
    let leaf = board.get_max(plies, &progress, threaded, &counter);
    let dt = t0.elapsed().as_secs_f64();
    let moves = counter.load(Ordering::Relaxed);

    let first = leaf.as_ref().and_then(|l| l.ancestor(plies as usize - 1));
    let bestmove = first.and_then(|b| Some(format!("{}{}", b.last_from()?, b.last_to()?)));
    let report = BenchReport {
        fen: args.fen.clone(),
        plies,
        threaded,
        bestmove,
        score: leaf.as_ref().map(|l| l.get_score(board.current_player())),
        moves_calculated: moves,
        elapsed_s: dt,
        moves_per_s: if dt > 0.0 { moves as f64 / dt } else { 0.0 },
    };

    if args.json {
        println!("{}", serde_json::to_string(&report).context("serialize report")?);
    } else {
        println!(
            "bestmove={} score={} moves={} elapsed={:.3}s mps={:.1}",
            report.bestmove.as_deref().unwrap_or("(none)"),
            report.score.map_or_else(|| "-".to_string(), |s| s.to_string()),
            report.moves_calculated,
            report.elapsed_s,
            report.moves_per_s
        );
    }
    Ok(())
}
