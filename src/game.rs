//! Game controller: owns the current grid and drives the engine.
//!
//! The engine is stateless; `Game` is the explicit state container a shell
//! holds on to. It applies the spawn-after-valid-move rule, counts turns, and
//! answers "won / stuck" queries without ever blocking input.

use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::engine::{self, Direction, Grid, MoveOutcome, Tile};

/// Runtime knobs for a game. Defaults follow standard 2048 rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Tile value that counts as a win.
    pub win_target: Tile,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { win_target: 2048 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    /// A tile reached the target. Play may continue.
    Won,
    /// No direction changes the grid.
    Stuck,
}

/// Fresh grid with two random tiles.
pub fn init_game<R: Rng + ?Sized>(rng: &mut R) -> Grid {
    engine::place_random_tile(engine::place_random_tile(engine::empty_grid(), rng), rng)
}

/// Apply `direction` to `current`; spawn a tile only if the grid changed.
pub fn on_direction_input<R: Rng + ?Sized>(
    direction: Direction,
    current: Grid,
    rng: &mut R,
) -> Grid {
    match engine::try_move(current, direction) {
        MoveOutcome::Moved(moved) => engine::place_random_tile(moved, rng),
        MoveOutcome::Unchanged => current,
    }
}

#[inline]
pub fn on_reset<R: Rng + ?Sized>(rng: &mut R) -> Grid {
    init_game(rng)
}

/// A running game: current grid, RNG, config and turn count.
#[derive(Debug, Clone)]
pub struct Game<R = StdRng> {
    grid: Grid,
    rng: R,
    config: GameConfig,
    turns: u64,
}

impl Game<StdRng> {
    /// Deterministic game from a seed.
    pub fn seeded(seed: u64, config: GameConfig) -> Self {
        Self::new(StdRng::seed_from_u64(seed), config)
    }

    /// Game seeded from OS entropy.
    pub fn from_entropy(config: GameConfig) -> Self {
        Self::new(StdRng::from_entropy(), config)
    }
}

impl<R: Rng> Game<R> {
    pub fn new(mut rng: R, config: GameConfig) -> Self {
        let grid = init_game(&mut rng);
        Self { grid, rng, config, turns: 0 }
    }

    /// Start from a given grid instead of two random tiles.
    pub fn with_grid(grid: Grid, rng: R, config: GameConfig) -> Self {
        Self { grid, rng, config, turns: 0 }
    }

    #[inline]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[inline]
    pub fn turns(&self) -> u64 {
        self.turns
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Play one move. A no-op move neither spawns a tile nor counts as a turn.
    pub fn apply(&mut self, direction: Direction) -> MoveOutcome {
        let outcome = engine::try_move(self.grid, direction);
        match outcome {
            MoveOutcome::Moved(moved) => {
                let was_won = self.is_won();
                self.grid = engine::place_random_tile(moved, &mut self.rng);
                self.turns += 1;
                if !was_won && self.is_won() {
                    info!("reached {} after {} turns", self.config.win_target, self.turns);
                }
            }
            MoveOutcome::Unchanged => debug!("move {} changed nothing", direction),
        }
        outcome
    }

    /// Throw the current grid away and start over.
    pub fn reset(&mut self) {
        self.grid = on_reset(&mut self.rng);
        self.turns = 0;
        info!("game reset");
    }

    #[inline]
    pub fn is_won(&self) -> bool {
        engine::has_winning_tile(self.grid, self.config.win_target)
    }

    /// No direction changes the grid. Independent of `is_won`.
    #[inline]
    pub fn is_stuck(&self) -> bool {
        !engine::has_legal_move(self.grid)
    }

    /// Combined status; `Won` takes precedence over `Stuck`, so check
    /// `is_stuck` when both matter.
    pub fn status(&self) -> GameStatus {
        if self.is_won() {
            GameStatus::Won
        } else if self.is_stuck() {
            GameStatus::Stuck
        } else {
            GameStatus::Playing
        }
    }
}
