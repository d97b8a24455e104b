use std::collections::BTreeMap;
use std::time::Instant;

use clap::Parser;
use env_logger::Env;
use grid_2048::engine::{Direction, Tile};
use grid_2048::game::{Game, GameConfig};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "autoplay", about = "Play many 2048 games with a uniform random policy")]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: u64,

    /// Base seed; game i uses seed + i
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Stop a game after this many turns
    #[arg(long)]
    max_moves: Option<u64>,

    /// Tile value that counts as a win
    #[arg(long, default_value_t = 2048)]
    target: Tile,

    /// Suppress the progress bar
    #[arg(long)]
    quiet: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Serialize)]
struct GameReport {
    seed: u64,
    turns: u64,
    highest_tile: Tile,
    won: bool,
    stuck: bool,
}

#[derive(Debug, Serialize)]
struct Summary {
    games: u64,
    mean_turns: f64,
    /// Games that reached the target tile.
    wins: u64,
    /// Games that ended with no legal move, winners included.
    stuck: u64,
    /// highest tile -> number of games
    highest_tiles: BTreeMap<Tile, u64>,
    elapsed_s: f64,
    reports: Vec<GameReport>,
}

fn play_one(seed: u64, target: Tile, max_moves: Option<u64>) -> GameReport {
    let mut game = Game::seeded(seed, GameConfig { win_target: target });
    // Policy draws come from their own stream so spawns stay reproducible per seed.
    let mut policy = StdRng::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15);
    loop {
        if max_moves.is_some_and(|limit| game.turns() >= limit) {
            break;
        }
        let legal: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&d| game.grid().try_move(d).changed())
            .collect();
        let Some(&dir) = legal.choose(&mut policy) else { break };
        game.apply(dir);
    }
    GameReport {
        seed,
        turns: game.turns(),
        highest_tile: game.grid().highest_tile(),
        won: game.is_won(),
        stuck: game.is_stuck(),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if args.games == 0 {
        anyhow::bail!("--games must be at least 1");
    }
    if !args.target.is_power_of_two() || args.target < 2 {
        anyhow::bail!("--target must be a power of two >= 2, got {}", args.target);
    }

    let start = Instant::now();
    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(args.games);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} games ({eta})",
            )?
            .progress_chars("=>-"),
        );
        pb
    };

    let mut reports: Vec<GameReport> = (0..args.games)
        .into_par_iter()
        .map(|i| {
            let r = play_one(args.seed.wrapping_add(i), args.target, args.max_moves);
            pb.inc(1);
            r
        })
        .collect();
    pb.finish_and_clear();
    reports.sort_by_key(|r| r.seed);

    let mut highest_tiles = BTreeMap::new();
    for r in &reports {
        *highest_tiles.entry(r.highest_tile).or_insert(0u64) += 1;
    }
    let total_turns: u64 = reports.iter().map(|r| r.turns).sum();
    let summary = Summary {
        games: args.games,
        mean_turns: total_turns as f64 / args.games as f64,
        wins: reports.iter().filter(|r| r.won).count() as u64,
        stuck: reports.iter().filter(|r| r.stuck).count() as u64,
        highest_tiles,
        elapsed_s: start.elapsed().as_secs_f64(),
        reports,
    };
    info!("played {} games in {:.2}s", summary.games, summary.elapsed_s);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Games: {} | mean turns: {:.1} | wins: {} | stuck: {}",
            summary.games, summary.mean_turns, summary.wins, summary.stuck
        );
        for (tile, count) in &summary.highest_tiles {
            println!("  highest {:>6}: {}", tile, count);
        }
    }
    Ok(())
}
