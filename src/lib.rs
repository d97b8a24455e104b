//! grid-2048: a 4x4 2048 grid engine and a small game controller
//!
//! This crate provides:
//! - An immutable `Grid` type with pure slide/merge moves (`engine` module)
//! - Random tile spawning driven by any caller-supplied `rand::Rng`
//! - A `Game` controller (`game` module) that spawns only after moves that
//!   changed the grid and reports won/stuck status
//!
//! Quick start:
//! ```
//! use grid_2048::engine::{Direction, Grid};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic grid initialization with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let g0 = Grid::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
//! let g1 = g0.make_move(Direction::Left, &mut rng);
//! assert!(g1.tile_sum() >= g0.tile_sum());
//! ```
//!
//! Full loop with the controller
//! ```
//! use grid_2048::engine::Direction;
//! use grid_2048::game::{Game, GameConfig, GameStatus};
//!
//! let mut game = Game::seeded(123, GameConfig::default());
//! for dir in [Direction::Left, Direction::Up, Direction::Right, Direction::Down] {
//!     if game.status() == GameStatus::Stuck {
//!         break;
//!     }
//!     game.apply(dir);
//! }
//! println!("{}", game.grid());
//! ```
//!
pub mod engine;
pub mod game;
