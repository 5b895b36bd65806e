use anyhow::Context;
use clap::Parser;
use rookery::selfplay::{play_games, SelfPlayParams};

#[derive(Parser, Debug)]
#[command(name = "rookery-selfplay", about = "Play seeded random games and check the rule invariants")]
struct Args {
    #[arg(long, default_value_t = 16)]
    games: usize,
    #[arg(long, default_value_t = 120)]
    max_plies: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Let the engine answer the random side
    #[arg(long, default_value_t = false)]
    use_engine: bool,
    #[arg(long, default_value_t = 1)]
    plies: u8,
    /// Print one JSON object per game instead of a summary line
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let params = SelfPlayParams {
        games: a.games,
        max_plies: a.max_plies,
        seed: a.seed,
        use_engine: a.use_engine,
        plies: a.plies,
    };
    eprintln!("Playing {} games (max_plies={}, engine={}, plies={})", a.games, a.max_plies, a.use_engine, a.plies);
    let games = play_games(&params);
    if a.json {
        for g in &games {
            println!("{}", serde_json::to_string(g).context("serialize game summary")?);
        }
    }
    let finished = games.iter().filter(|g| g.status.is_terminal()).count();
    let violations = games.iter().filter(|g| !g.king_safe || !g.turns_alternate).count();
    eprintln!("{} games, {} finished, {} invariant violations", games.len(), finished, violations);
    anyhow::ensure!(violations == 0, "{violations} games broke king safety or turn order");
    Ok(())
}
