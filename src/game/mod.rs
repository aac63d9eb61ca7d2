//! Core game logic for the snake
//!
//! Everything here is free of terminal I/O and timers. Presentation goes out
//! through [`TileSink`], and the best score through [`ScoreStore`].

pub mod body;
pub mod config;
pub mod direction;
pub mod engine;
pub mod grid;
pub mod level;
pub mod round;
pub mod score;
pub mod state;
pub mod tiles;

// Re-export commonly used types
pub use body::{Body, BodyError};
pub use config::{ConfigError, GameConfig, TailRule};
pub use direction::Direction;
pub use engine::{GameEngine, StepResult};
pub use grid::{BoundaryPolicy, Cell, Grid};
pub use level::{Level, LevelError};
pub use round::{Round, RoundSummary};
pub use score::{HIGH_SCORE_KEY, MemoryStore, ScoreStore, Scoreboard};
pub use state::{CollisionKind, GameState, Phase};
pub use tiles::{NullSink, TileBuffer, TileKind, TileSink, TileUpdate};
