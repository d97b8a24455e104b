use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ops;

/// Side length of the square grid.
pub const SIZE: usize = 4;

/// Cell value: 0 for empty, otherwise a power of two >= 2.
pub type Tile = u32;

/// Largest tile accepted when building a grid from outside values (2^17, the
/// ceiling of normal 4x4 play). Merges above it still fit in a `Tile`.
pub const MAX_TILE: Tile = 1 << 17;

/// Row-major cell values.
pub type Rows = [[Tile; SIZE]; SIZE];

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in a fixed order.
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(s)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown direction: {0:?}")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Accepts full names, vi keys (`hjkl`), WASD and browser arrow-key names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "k" | "w" | "arrowup" => Ok(Direction::Up),
            "down" | "j" | "s" | "arrowdown" => Ok(Direction::Down),
            "left" | "h" | "a" | "arrowleft" => Ok(Direction::Left),
            "right" | "l" | "d" | "arrowright" => Ok(Direction::Right),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// A (row, col) coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error(
        "tile {value} at ({row}, {col}) is not 0 or a power of two in 2..={max}",
        max = MAX_TILE
    )]
    InvalidTile { row: usize, col: usize, value: Tile },
    #[error("expected {expected} cells, got {got}")]
    CellCount { expected: usize, got: usize },
    #[error("cannot parse {0:?} as a tile")]
    Number(String),
}

/// Immutable 4x4 grid of tile values.
///
/// Every operation returns a new `Grid`; the receiver is never touched, so
/// a caller can keep the previous grid around and compare with `==`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Rows", into = "Rows")]
pub struct Grid(pub(crate) Rows);

impl Grid {
    /// A constant empty grid (all zeros).
    pub const EMPTY: Grid = Grid([[0; SIZE]; SIZE]);

    /// Build a grid from rows, checking that every value is 0 or a power of two
    /// between 2 and [`MAX_TILE`].
    ///
    /// ```
    /// use grid_2048::engine::{Grid, GridError};
    /// assert!(Grid::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).is_ok());
    /// assert!(matches!(
    ///     Grid::from_rows([[3, 0, 0, 0], [0; 4], [0; 4], [0; 4]]),
    ///     Err(GridError::InvalidTile { row: 0, col: 0, value: 3 })
    /// ));
    /// ```
    pub fn from_rows(rows: Rows) -> Result<Self, GridError> {
        for (row, line) in rows.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if !is_valid_tile(value) {
                    return Err(GridError::InvalidTile { row, col, value });
                }
            }
        }
        Ok(Grid(rows))
    }

    /// Borrow the rows, top to bottom.
    #[inline]
    pub fn rows(&self) -> &[[Tile; SIZE]; SIZE] {
        &self.0
    }

    #[inline]
    pub fn get(&self, cell: Cell) -> Tile {
        self.0[cell.row][cell.col]
    }

    /// Iterate over every cell and its value in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, Tile)> + '_ {
        self.0.iter().enumerate().flat_map(|(row, line)| {
            line.iter().enumerate().map(move |(col, &v)| (Cell { row, col }, v))
        })
    }

    /// Return the grid resulting from sliding/merging tiles in `dir` (no random insert).
    #[inline]
    pub fn shift(self, dir: Direction) -> Self {
        ops::shift(self, dir)
    }

    /// Like `shift`, but reports whether anything moved.
    #[inline]
    pub fn try_move(self, dir: Direction) -> ops::MoveOutcome {
        ops::try_move(self, dir)
    }

    /// Insert a random 2 (90%) or 4 (10%) tile into a random empty cell, using the provided RNG.
    ///
    /// ```
    /// use grid_2048::engine::Grid;
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let g = Grid::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(g.count_empty(), 14);
    /// ```
    #[inline]
    pub fn with_random_tile<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        ops::place_random_tile(self, rng)
    }

    /// Perform a move then insert a random tile if the move changed the grid.
    pub fn make_move<R: Rng + ?Sized>(self, dir: Direction, rng: &mut R) -> Self {
        match ops::try_move(self, dir) {
            ops::MoveOutcome::Moved(moved) => moved.with_random_tile(rng),
            ops::MoveOutcome::Unchanged => self,
        }
    }

    /// Coordinates of empty cells in row-major order.
    #[inline]
    pub fn empty_cells(&self) -> Vec<Cell> {
        ops::empty_cells(*self)
    }

    pub fn count_empty(&self) -> usize {
        self.0.iter().flatten().filter(|&&v| v == 0).count()
    }

    /// Highest tile value on the grid (0 when empty).
    pub fn highest_tile(&self) -> Tile {
        self.0.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Sum of all tile values.
    pub fn tile_sum(&self) -> u64 {
        self.0.iter().flatten().map(|&v| u64::from(v)).sum()
    }

    /// Swap rows and columns.
    pub fn transpose(self) -> Self {
        let mut out = Grid::EMPTY;
        for (r, line) in self.0.iter().enumerate() {
            for (c, &v) in line.iter().enumerate() {
                out.0[c][r] = v;
            }
        }
        out
    }

    /// Reverse every row (left-right mirror).
    pub fn mirror(self) -> Self {
        let mut out = self;
        for line in out.0.iter_mut() {
            line.reverse();
        }
        out
    }

    /// True if a move in some direction would change the grid.
    #[inline]
    pub fn has_legal_move(&self) -> bool {
        ops::has_legal_move(*self)
    }
}

#[inline]
fn is_valid_tile(value: Tile) -> bool {
    value == 0 || (value >= 2 && value <= MAX_TILE && value.is_power_of_two())
}

impl TryFrom<Rows> for Grid {
    type Error = GridError;
    fn try_from(rows: Rows) -> Result<Self, Self::Error> {
        Grid::from_rows(rows)
    }
}

impl From<Grid> for Rows {
    fn from(g: Grid) -> Self {
        g.0
    }
}

impl FromStr for Grid {
    type Err = GridError;

    /// Parse `SIZE * SIZE` numbers in row-major order, separated by whitespace, `,` or `/`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(|c: char| c.is_whitespace() || c == ',' || c == '/')
            .filter(|t| !t.is_empty())
            .map(|t| t.parse::<Tile>().map_err(|_| GridError::Number(t.to_string())))
            .collect::<Result<Vec<_>, _>>()?;
        if values.len() != SIZE * SIZE {
            return Err(GridError::CellCount { expected: SIZE * SIZE, got: values.len() });
        }
        let mut rows = [[0; SIZE]; SIZE];
        for (idx, v) in values.into_iter().enumerate() {
            rows[idx / SIZE][idx % SIZE] = v;
        }
        Grid::from_rows(rows)
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid({:?})", self.0)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = "-".repeat(SIZE * 8 - 1);
        for (r, line) in self.0.iter().enumerate() {
            if r > 0 {
                writeln!(f, "{}", sep)?;
            }
            let cells: Vec<String> = line.iter().map(|&v| format_val(v)).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

fn format_val(val: Tile) -> String {
    match val {
        0 => " ".repeat(7),
        v => format!("{:^7}", v),
    }
}
