use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::direction::Direction;
use super::grid::{BoundaryPolicy, Cell, Grid};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("grid of {width}x{height} is too large")]
    GridTooLarge { width: usize, height: usize },
    #[error("initial snake length must be at least 1")]
    EmptySnake,
    #[error("a snake of length {length} heading {direction:?} does not fit on a {width}x{height} grid")]
    SnakeDoesNotFit {
        length: usize,
        direction: Direction,
        width: usize,
        height: usize,
    },
    #[error("{name} must be a positive, representable number of seconds, got {value}")]
    InvalidDelay { name: &'static str, value: f32 },
    #[error("minimum move delay {min} exceeds the starting delay {start}")]
    MinAboveStart { min: f32, start: f32 },
    #[error("move delay multiplier must be strictly between 0 and 1, got {0}")]
    InvalidMultiplier(f32),
    #[error("failed to read config {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Whether the cell the tail is about to leave counts as occupied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TailRule {
    /// Moving onto the current tail is a crash
    #[default]
    Collides,
    /// The tail vacates its cell in the same tick, so the head may take it
    Vacates,
}

/// Largest accepted grid side, so every coordinate fits in an `i32`
pub const MAX_GRID_SIDE: usize = i32::MAX as usize;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Heading at round start
    pub initial_direction: Direction,
    pub boundary: BoundaryPolicy,
    pub tail_rule: TailRule,

    // Cadence, in seconds
    /// Move delay at round start
    pub start_move_delay: f32,
    /// Applied to the move delay after every successful move
    pub move_delay_multiplier: f32,
    /// Floor for the move delay
    pub min_move_delay: f32,
    /// Delay between apple spawns
    pub apple_delay: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 31,
            grid_height: 31,
            initial_snake_length: 5,
            initial_direction: Direction::North,
            boundary: BoundaryPolicy::Wrap,
            tail_rule: TailRule::Collides,
            start_move_delay: 0.35,
            move_delay_multiplier: 0.998,
            min_move_delay: 0.1,
            apple_delay: 2.0,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(11, 11)
    }

    /// Reads a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn start_interval(&self) -> Duration {
        Duration::from_secs_f32(self.start_move_delay)
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_secs_f32(self.min_move_delay)
    }

    pub fn apple_interval(&self) -> Duration {
        Duration::from_secs_f32(self.apple_delay)
    }

    /// Empty board with this configuration's geometry
    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height, self.boundary)
    }

    /// Cells of the starting snake, head first: the head sits on the origin
    /// and the body trails away from the initial heading.
    pub fn initial_body(&self) -> impl Iterator<Item = Cell> {
        let (dx, dy) = self.initial_direction.opposite().delta();
        (0..self.initial_snake_length as i32).map(move |i| Cell::new(dx * i, dy * i))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        if self.grid_width > MAX_GRID_SIDE
            || self.grid_height > MAX_GRID_SIDE
            || self.grid_width.checked_mul(self.grid_height).is_none()
        {
            return Err(ConfigError::GridTooLarge {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        if self.initial_snake_length == 0 {
            return Err(ConfigError::EmptySnake);
        }

        let snake_does_not_fit = ConfigError::SnakeDoesNotFit {
            length: self.initial_snake_length,
            direction: self.initial_direction,
            width: self.grid_width,
            height: self.grid_height,
        };
        if self.initial_snake_length > self.grid_width.max(self.grid_height) {
            return Err(snake_does_not_fit);
        }
        let grid = self.grid();
        if self.initial_body().any(|cell| grid.is_out_of_bounds(cell)) {
            return Err(snake_does_not_fit);
        }

        // A zero period would stall the timers; an overlong one is unrepresentable
        for (name, value) in [
            ("start_move_delay", self.start_move_delay),
            ("min_move_delay", self.min_move_delay),
            ("apple_delay", self.apple_delay),
        ] {
            match Duration::try_from_secs_f32(value) {
                Ok(delay) if !delay.is_zero() => {}
                _ => return Err(ConfigError::InvalidDelay { name, value }),
            }
        }

        if self.min_move_delay > self.start_move_delay {
            return Err(ConfigError::MinAboveStart {
                min: self.min_move_delay,
                start: self.start_move_delay,
            });
        }

        if !(self.move_delay_multiplier > 0.0 && self.move_delay_multiplier < 1.0) {
            return Err(ConfigError::InvalidMultiplier(self.move_delay_multiplier));
        }

        Ok(())
    }
}
