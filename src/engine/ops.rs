use rand::Rng;

use super::state::{Cell, Direction, Grid, Tile, SIZE};

/// Result of attempting a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Nothing slid or merged; the caller must not spawn a tile.
    Unchanged,
    Moved(Grid),
}

impl MoveOutcome {
    #[inline]
    pub fn changed(&self) -> bool {
        matches!(self, MoveOutcome::Moved(_))
    }

    /// The moved grid, or `current` when the move was a no-op.
    #[inline]
    pub fn grid_or(self, current: Grid) -> Grid {
        match self {
            MoveOutcome::Moved(g) => g,
            MoveOutcome::Unchanged => current,
        }
    }
}

/// A grid with every cell empty.
#[inline]
pub fn empty_grid() -> Grid {
    Grid::EMPTY
}

/// Coordinates of every empty cell, row-major.
pub fn empty_cells(grid: Grid) -> Vec<Cell> {
    grid.cells().filter(|&(_, v)| v == 0).map(|(cell, _)| cell).collect()
}

/// Put a 2 (90%) or 4 (10%) on a uniformly chosen empty cell.
///
/// A full grid is returned as-is.
pub fn place_random_tile<R: Rng + ?Sized>(grid: Grid, rng: &mut R) -> Grid {
    let empty = empty_cells(grid);
    if empty.is_empty() {
        return grid;
    }
    let cell = empty[rng.gen_range(0..empty.len())];
    let tile = generate_random_tile(rng);
    let mut out = grid;
    out.0[cell.row][cell.col] = tile;
    log::trace!("spawned {} at ({}, {})", tile, cell.row, cell.col);
    out
}

pub(crate) fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R) -> Tile {
    if rng.gen_range(0..10) < 9 { 2 } else { 4 }
}

/// Slide the non-empty tiles of `line` towards index 0 and merge equal neighbours once.
///
/// Each tile takes part in at most one merge, so `[2, 2, 2, 2]` becomes
/// `[4, 4, 0, 0]`. The output has the same length as the input.
///
/// ```
/// use grid_2048::engine::slide_and_merge_line;
/// assert_eq!(slide_and_merge_line(&[2, 2, 2, 2]), vec![4, 4, 0, 0]);
/// assert_eq!(slide_and_merge_line(&[2, 0, 0, 2]), vec![4, 0, 0, 0]);
/// ```
pub fn slide_and_merge_line(line: &[Tile]) -> Vec<Tile> {
    let mut tiles: Vec<Tile> = line.iter().copied().filter(|&v| v != 0).collect();
    for i in 1..tiles.len() {
        if tiles[i - 1] != 0 && tiles[i - 1] == tiles[i] {
            tiles[i - 1] *= 2;
            tiles[i] = 0;
        }
    }
    tiles.retain(|&v| v != 0);
    tiles.resize(line.len(), 0);
    tiles
}

fn merge_row(row: [Tile; SIZE]) -> [Tile; SIZE] {
    let merged = slide_and_merge_line(&row);
    let mut out = [0; SIZE];
    out.copy_from_slice(&merged);
    out
}

/// Slide/merge every row towards column 0.
///
/// ```
/// use grid_2048::engine::{move_left, Grid};
/// let g = Grid::from_rows([[0, 2, 0, 2], [0; 4], [0; 4], [0; 4]]).unwrap();
/// assert_eq!(move_left(g).rows()[0], [4, 0, 0, 0]);
/// ```
pub fn move_left(grid: Grid) -> Grid {
    let mut out = Grid::EMPTY;
    for (dst, &row) in out.0.iter_mut().zip(grid.0.iter()) {
        *dst = merge_row(row);
    }
    out
}

/// Slide/merge every row towards the last column.
pub fn move_right(grid: Grid) -> Grid {
    move_left(grid.mirror()).mirror()
}

/// Slide/merge every column towards row 0.
pub fn move_up(grid: Grid) -> Grid {
    // Columns are handled as rows of the transposed grid.
    move_left(grid.transpose()).transpose()
}

/// Slide/merge every column towards the bottom row.
pub fn move_down(grid: Grid) -> Grid {
    move_right(grid.transpose()).transpose()
}

/// Slide/merge tiles in the given direction. No randomness.
pub fn shift(grid: Grid, direction: Direction) -> Grid {
    match direction {
        Direction::Left => move_left(grid),
        Direction::Right => move_right(grid),
        Direction::Up => move_up(grid),
        Direction::Down => move_down(grid),
    }
}

/// Shift and report whether the grid changed.
///
/// ```
/// use grid_2048::engine::{try_move, Direction, Grid, MoveOutcome};
/// let g = Grid::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
/// assert_eq!(try_move(g, Direction::Left), MoveOutcome::Unchanged);
/// assert!(try_move(g, Direction::Right).changed());
/// ```
pub fn try_move(grid: Grid, direction: Direction) -> MoveOutcome {
    let moved = shift(grid, direction);
    if moves_equal(&moved, &grid) {
        MoveOutcome::Unchanged
    } else {
        MoveOutcome::Moved(moved)
    }
}

/// Cell-by-cell equality of two grids.
#[inline]
pub fn moves_equal(a: &Grid, b: &Grid) -> bool {
    a == b
}

/// True if a move in any direction changes the grid.
pub fn has_legal_move(grid: Grid) -> bool {
    Direction::ALL.into_iter().any(|d| try_move(grid, d).changed())
}

/// True if some tile has reached `target`.
pub fn has_winning_tile(grid: Grid, target: Tile) -> bool {
    grid.highest_tile() >= target
}
