//! Command-line configuration and the construction errors it can raise.

use std::path::PathBuf;

use clap::Parser;

use crate::{maze::DEFAULT_WALL_DENSITY, pathfinding::Strategy};

/// Smallest grid side that still leaves room for the border plus the open start cells.
///
/// The cells `(1, 1)`, `(2, 1)` and `(1, 2)` are always carved open, so both sides need at least
/// one more column and row after index 2 to hold the wall ring.
pub const MIN_GRID_SIDE: usize = 4;

/// Largest grid side, bounded by the terminal coordinates the maze is drawn in.
pub const MAX_GRID_SIDE: u16 = u16::MAX;

/// Errors raised while validating settings or building a maze.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// The requested grid cannot hold the border and the open start cells.
    #[error("grid of {width}x{height} is too small, both sides must be at least 4")]
    GridTooSmall {
        /// Requested number of columns.
        width: usize,
        /// Requested number of rows.
        height: usize,
    },
    /// The requested grid does not fit in terminal coordinates or in memory.
    #[error("grid of {width}x{height} is too large, both sides must be at most 65535")]
    GridTooLarge {
        /// Requested number of columns.
        width: usize,
        /// Requested number of rows.
        height: usize,
    },
    /// The wall density is not a probability.
    #[error("wall density {0} is outside [0, 1]")]
    WallDensity(f64),
    /// The game loop cannot run at zero frames per second.
    #[error("frame rate must be positive")]
    ZeroFrameRate,
    /// A textual grid row differs in length from the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A textual grid contains a character that is neither `#` nor `.`.
    #[error("unknown cell glyph {glyph:?} at ({x}, {y})")]
    UnknownGlyph {
        /// The offending character.
        glyph: char,
        /// Column of the character.
        x: usize,
        /// Row of the character.
        y: usize,
    },
    /// A textual grid has an open cell on its outer ring.
    #[error("border cell ({x}, {y}) is open")]
    OpenBorder {
        /// Column of the open border cell.
        x: usize,
        /// Row of the open border cell.
        y: usize,
    },
}

/// Runtime settings for a session.
///
/// Every field maps to a long command-line flag. The defaults reproduce a 20 by 15 maze with 20
/// pellets, searched breadth-first at ten frames per second.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Number of grid columns, border included.
    #[arg(long, default_value_t = 20)]
    pub width: usize,
    /// Number of grid rows, border included.
    #[arg(long, default_value_t = 15)]
    pub height: usize,
    /// Probability in [0, 1] that an interior cell with even coordinates becomes a wall.
    #[arg(long, default_value_t = DEFAULT_WALL_DENSITY)]
    pub wall_density: f64,
    /// Number of food pellets placed per episode.
    #[arg(long, default_value_t = 20)]
    pub food_count: usize,
    /// Search strategy used when the game starts.
    #[arg(long, value_enum, default_value_t = Strategy::Bfs)]
    pub algorithm: Strategy,
    /// Seed for maze and food placement; omitted means a fresh seed every run.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Game loop frame rate.
    #[arg(long, default_value_t = 10)]
    pub fps: u32,
    /// File that receives log lines; logging is off without it.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 20,
            height: 15,
            wall_density: DEFAULT_WALL_DENSITY,
            food_count: 20,
            algorithm: Strategy::Bfs,
            seed: None,
            fps: 10,
            log_file: None,
        }
    }
}

impl Config {
    /// Checks the settings before anything is built from them.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] when the grid is too small, the wall density is not a
    /// probability or the frame rate is zero.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_dimensions(self.width, self.height)?;
        check_density(self.wall_density)?;
        if self.fps == 0 {
            return Err(ConfigurationError::ZeroFrameRate);
        }

        Ok(())
    }
}

/// Rejects grids that cannot hold the border and the open start cells, or that cannot be drawn.
///
/// On success `width * height` is known not to overflow.
pub(crate) fn check_dimensions(width: usize, height: usize) -> Result<(), ConfigurationError> {
    if width < MIN_GRID_SIDE || height < MIN_GRID_SIDE {
        return Err(ConfigurationError::GridTooSmall { width, height });
    }

    let drawable = u16::try_from(width).is_ok() && u16::try_from(height).is_ok();
    if !drawable || width.checked_mul(height).is_none() {
        return Err(ConfigurationError::GridTooLarge { width, height });
    }

    Ok(())
}

/// Rejects densities that are not a finite probability.
pub(crate) fn check_density(density: f64) -> Result<(), ConfigurationError> {
    if !(0.0..=1.0).contains(&density) {
        return Err(ConfigurationError::WallDensity(density));
    }

    Ok(())
}
