//! Maze representation and generation.
//!
//! This module contains the occupancy grid the search engine walks on, the coordinate type used as
//! a key throughout the crate and the random generator that carves a bordered maze.

use std::{fmt, str::FromStr};

use rand::{rngs::StdRng, Rng};

use crate::config::{check_density, check_dimensions, ConfigurationError};

/// Unit offsets probed around a cell: up, down, left, right.
///
/// The order is observable. Breadth-first and greedy search enqueue neighbors in this order and
/// depth-first search pushes them reversed, so it decides every tie between siblings.
pub const DIRECTIONS: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Wall probability on even/even interior cells used when none is given.
pub const DEFAULT_WALL_DENSITY: f64 = 0.7;

/// Column and row of the agent when an episode starts.
pub const AGENT_START: Position = Position::new(1, 1);

/// Occupancy of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Impassable cell.
    Wall,
    /// Walkable cell.
    Open,
}

impl Cell {
    /// Character used for the cell in the textual grid format.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Open => '.',
        }
    }
}

/// Zero-based grid coordinate, `x` being the column and `y` the row.
///
/// Ordering is lexicographic on `(x, y)`; it is the tie-break used wherever the search engine has
/// to pick between equally good positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Column index.
    pub x: usize,
    /// Row index.
    pub y: usize,
}

impl Position {
    /// Builds a position from a column and a row.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Shifts the position by a signed offset, or returns [`None`] if either axis would go
    /// negative.
    #[must_use]
    pub const fn offset(self, dx: isize, dy: isize) -> Option<Self> {
        let Some(x) = self.x.checked_add_signed(dx) else {
            return None;
        };
        let Some(y) = self.y.checked_add_signed(dy) else {
            return None;
        };

        Some(Self { x, y })
    }

    /// Manhattan distance `|dx| + |dy|` to another position.
    #[must_use]
    pub const fn manhattan(self, other: Self) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.x, self.y)
    }
}

/// Rectangular wall/open grid with a solid outer ring.
///
/// Cells are stored row-major. The grid is never mutated after construction; food, agent and
/// ghosts are overlaid by the game without touching wall data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Number of columns.
    width: usize,
    /// Number of rows.
    height: usize,
    /// Row-major cell storage of length `width * height`.
    cells: Vec<Cell>,
}

impl Grid {
    /// Generates a random maze.
    ///
    /// Every cell starts as a wall. Interior cells whose column and row are both even become a
    /// wall with probability `wall_density`; every other interior cell is open. The cells
    /// `(1, 1)`, `(2, 1)` and `(1, 2)` are then forced open so the agent never starts boxed in.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if either side is below
    /// [`MIN_GRID_SIDE`](crate::config::MIN_GRID_SIDE) or above
    /// [`MAX_GRID_SIDE`](crate::config::MAX_GRID_SIDE), or `wall_density` is not in `[0, 1]`.
    pub fn generate<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        wall_density: f64,
        rng: &mut R,
    ) -> Result<Self, ConfigurationError> {
        check_dimensions(width, height)?;
        check_density(wall_density)?;

        let mut cells = vec![Cell::Wall; width * height];
        for y in 1..height - 1 {
            for x in 1..width - 1 {
                let wall = x % 2 == 0 && y % 2 == 0 && rng.gen_bool(wall_density);
                if !wall {
                    if let Some(cell) = cells.get_mut(y * width + x) {
                        *cell = Cell::Open;
                    }
                }
            }
        }

        for (x, y) in [(1, 1), (2, 1), (1, 2)] {
            if let Some(cell) = cells.get_mut(y * width + x) {
                *cell = Cell::Open;
            }
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Generates a maze with [`DEFAULT_WALL_DENSITY`], seeded for reproducibility or from
    /// entropy when `seed` is [`None`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if either side is too small or too large.
    pub fn seeded(
        width: usize,
        height: usize,
        seed: Option<u64>,
    ) -> Result<Self, ConfigurationError> {
        use rand::SeedableRng as _;

        let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self::generate(width, height, DEFAULT_WALL_DENSITY, &mut rng)
    }

    /// Number of columns, border included.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows, border included.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns the cell at `pos`, or [`None`] when it lies outside the grid.
    #[must_use]
    pub fn cell(&self, pos: Position) -> Option<Cell> {
        if pos.x >= self.width || pos.y >= self.height {
            return None;
        }

        self.cells.get(pos.y * self.width + pos.x).copied()
    }

    /// Whether `pos` is inside the grid and walkable.
    ///
    /// Out-of-bounds positions are reported as blocked, so callers may probe arbitrary offsets
    /// without checking bounds first.
    #[must_use]
    pub fn is_open(&self, pos: Position) -> bool {
        self.cell(pos) == Some(Cell::Open)
    }

    /// Walkable orthogonal neighbors of `pos`, in [`DIRECTIONS`] order.
    #[must_use]
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        DIRECTIONS
            .iter()
            .filter_map(|&(dx, dy)| pos.offset(dx, dy))
            .filter(|&next| self.is_open(next))
            .collect()
    }

    /// Every walkable position, row by row.
    pub fn open_cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
            .filter(|&pos| self.is_open(pos))
    }
}

impl FromStr for Grid {
    type Err = ConfigurationError;

    /// Parses rows of `#` (wall) and `.` (open), one row per line.
    ///
    /// Leading and trailing blank lines and surrounding whitespace on each row are ignored. The
    /// result must be rectangular, at least 4 by 4 and walled on its outer ring.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        check_dimensions(width, height)?;

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(ConfigurationError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }

            for (x, glyph) in row.chars().enumerate() {
                let cell = match glyph {
                    '#' => Cell::Wall,
                    '.' => Cell::Open,
                    _ => return Err(ConfigurationError::UnknownGlyph { glyph, x, y }),
                };
                let border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                if border && cell == Cell::Open {
                    return Err(ConfigurationError::OpenBorder { x, y });
                }
                cells.push(cell);
            }
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.cells.chunks(self.width).enumerate() {
            if idx > 0 {
                writeln!(formatter)?;
            }
            for cell in row {
                write!(formatter, "{}", cell.glyph())?;
            }
        }

        Ok(())
    }
}
