//! Engine module: the 4x4 grid, directional slide/merge moves, and random
//! tile spawning. Everything here is a pure function of its arguments;
//! randomness always comes from a caller-supplied `Rng`.
//!
//! - `Grid` is the immutable board with ergonomic methods.
//! - Free functions mirror the methods when convenient (e.g., `shift`).

mod ops;
pub mod state;

pub use state::{
    Cell, Direction, Grid, GridError, ParseDirectionError, Rows, Tile, MAX_TILE, SIZE,
};

pub use ops::{
    empty_cells, empty_grid, has_legal_move, has_winning_tile, move_down, move_left, move_right,
    move_up, moves_equal, place_random_tile, shift, slide_and_merge_line, try_move, MoveOutcome,
};
