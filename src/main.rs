use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use grid_2048::engine::{Direction, Grid, MoveOutcome, Tile};
use grid_2048::game::{Game, GameConfig, GameStatus};
use log::debug;
use rand::{rngs::StdRng, SeedableRng};

#[derive(Debug, Parser)]
#[command(name = "grid-2048", version, about = "Play 2048 in the terminal (one command per line)")]
struct Args {
    /// Seed for tile spawns; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Tile value that counts as a win
    #[arg(long, default_value_t = 2048)]
    target: Tile,

    /// Starting grid, 16 values row-major (e.g. "2 2 0 0 / 0 0 0 0 / ...")
    #[arg(long, value_name = "GRID")]
    start: Option<Grid>,
}

const HELP: &str = "commands: left|right|up|down (or h/j/k/l, w/a/s/d), reset (r), quit (q)";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    if !args.target.is_power_of_two() || args.target < 2 {
        anyhow::bail!("--target must be a power of two >= 2, got {}", args.target);
    }

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let config = GameConfig { win_target: args.target };
    let mut game = match args.start {
        Some(grid) => Game::with_grid(grid, rng, config),
        None => Game::new(rng, config),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", HELP)?;
    render(&mut out, &game)?;

    let mut announced_win = false;
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read command")?;
        let cmd = line.trim();
        match cmd {
            "" => continue,
            "q" | "quit" | "exit" => break,
            "r" | "reset" => {
                game.reset();
                announced_win = false;
            }
            other => match other.parse::<Direction>() {
                Ok(dir) => {
                    if let MoveOutcome::Unchanged = game.apply(dir) {
                        debug!("ignored no-op move {}", dir);
                        continue;
                    }
                }
                Err(e) => {
                    writeln!(out, "{e}; {HELP}")?;
                    continue;
                }
            },
        }
        render(&mut out, &game)?;
        if game.status() == GameStatus::Won && !announced_win {
            writeln!(out, "You reached {}! Keep going or type reset.", args.target)?;
            announced_win = true;
        }
        if !game.grid().has_legal_move() {
            writeln!(out, "No moves left. Type reset to play again.")?;
        }
    }
    Ok(())
}

fn render<W: Write>(out: &mut W, game: &Game) -> io::Result<()> {
    writeln!(out, "\nturn {}", game.turns())?;
    writeln!(out, "{}", game.grid())?;
    out.flush()
}
