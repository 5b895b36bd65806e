use anyhow::{Context, Result};
use clap::Parser;
use rookery::perft::{divide, perft, perft_parallel};
use rookery::Board;
use std::time::Instant;

#[derive(clap::Parser, Debug)]
#[command(name = "perft", about = "Perft driver for rookery")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// FEN string or "startpos"
    #[arg(value_name = "FEN", default_value = "startpos")]
    fen: String,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
    /// Print the count below every root move
    #[arg(long, default_value_t = false)]
    divide: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let board = if args.fen == "startpos" {
        Board::new()
    } else {
        Board::from_fen(&args.fen).context("Invalid FEN")?
    };

    if args.divide {
        for (mv, nodes) in divide(&board, args.depth) {
            println!("{mv}: {nodes}");
        }
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build().context("thread pool")?;
    let t0 = Instant::now();
    let nodes = pool.install(|| if args.threads <= 1 { perft(&board, args.depth) } else { perft_parallel(&board, args.depth) });
    let dt = t0.elapsed().as_secs_f64();

    if args.nps {
        let nps = if dt > 0.0 { nodes as f64 / dt } else { f64::INFINITY };
        println!("nodes: {} elapsed: {:.3}s nps: {:.1}", nodes, dt, nps);
    } else {
        println!("nodes: {}", nodes);
    }
    Ok(())
}
