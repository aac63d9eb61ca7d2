//! Round and score control: owns one engine, its live state, the best score
//! and the tile sink, and restarts rounds on demand.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::info;

use super::{
    config::GameConfig,
    direction::Direction,
    engine::{GameEngine, StepResult},
    grid::{Cell, Grid},
    level::{Level, LevelError},
    score::{ScoreStore, Scoreboard},
    state::{GameState, Phase},
    tiles::{TileBuffer, TileKind, TileSink, TileUpdate},
};

/// What the UI shows: score line plus whether the game-over panel is up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummary {
    pub score: u32,
    pub best_score: u32,
    pub game_over: bool,
}

pub struct Round<S, T = TileBuffer, R = StdRng> {
    engine: GameEngine<R>,
    state: GameState,
    scoreboard: Scoreboard<S>,
    tiles: T,
    level: Option<Level>,
    rounds_started: u32,
}

impl<S: ScoreStore> Round<S> {
    /// Round with an entropy-seeded engine drawing into a [`TileBuffer`]
    pub fn new(config: GameConfig, store: S, level: Option<Level>) -> anyhow::Result<Self> {
        let engine = GameEngine::new(config)?;
        Ok(Self::start(engine, Scoreboard::load(store), TileBuffer::new(), level)?)
    }
}

impl<S: ScoreStore, T: TileSink, R: Rng> Round<S, T, R> {
    /// Loads the level and seeds the first round. Fails without starting if
    /// the level does not match the grid.
    pub fn start(
        engine: GameEngine<R>,
        scoreboard: Scoreboard<S>,
        mut tiles: T,
        level: Option<Level>,
    ) -> Result<Self, LevelError> {
        let state = engine.reset(&mut tiles);
        let mut round = Self {
            engine,
            state,
            scoreboard,
            tiles,
            level,
            rounds_started: 0,
        };
        round.restart()?;
        Ok(round)
    }

    /// Throws the current round away and seeds a fresh one. Works from any
    /// phase; the best score carries over.
    pub fn restart(&mut self) -> Result<(), LevelError> {
        self.state.phase = Phase::GameOver;
        self.tiles.apply(TileUpdate::ClearAll);

        let grid = self.engine.grid_mut();
        grid.clear_walls();
        if let Some(level) = &self.level {
            grid.load_walls(&level.map)?;
        }
        for wall in self.engine.grid().walls() {
            self.tiles.paint(wall, TileKind::Wall);
        }

        self.state = self.engine.reset(&mut self.tiles);
        self.rounds_started += 1;
        info!(
            round = self.rounds_started,
            best = self.scoreboard.best(),
            walls = self.engine.grid().walls().count(),
            "round started"
        );

        Ok(())
    }

    /// One movement tick. Eating an apple is scored here.
    pub fn advance(&mut self) -> StepResult {
        let result = self.engine.step(&mut self.state, &mut self.tiles);

        if let StepResult::Moved { ate: true, .. } = result {
            self.increase_score(1);
        }

        if let StepResult::Crashed(collision) = result {
            info!(
                ?collision,
                score = self.state.score,
                best = self.scoreboard.best(),
                "game over"
            );
        }

        result
    }

    /// One spawn tick
    pub fn spawn_apple(&mut self) -> Option<Cell> {
        self.engine.spawn_apple(&mut self.state, &mut self.tiles)
    }

    pub fn increase_score(&mut self, points: u32) {
        self.state.score += points;
        if self.scoreboard.record(self.state.score) {
            info!(best = self.state.score, "new best score");
        }
    }

    /// Overwrites the heading used by the next tick. Ignored once the round
    /// is over.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.state.is_running() {
            self.state.direction = direction;
        }
    }

    /// Drops an apple on a specific free cell. Returns false if the cell is
    /// outside the grid or already taken.
    pub fn place_apple(&mut self, cell: Cell) -> bool {
        let grid = self.engine.grid();
        if grid.is_out_of_bounds(cell) || grid.is_wall(cell) || self.state.is_occupied(cell) {
            return false;
        }

        self.state.apples.insert(cell);
        self.tiles.paint(cell, TileKind::Apple);
        true
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn grid(&self) -> &Grid {
        self.engine.grid()
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn tiles(&self) -> &T {
        &self.tiles
    }

    pub fn best_score(&self) -> u32 {
        self.scoreboard.best()
    }

    pub fn scoreboard(&self) -> &Scoreboard<S> {
        &self.scoreboard
    }

    /// Delay before the next move
    pub fn tick_interval(&self) -> Duration {
        self.state.tick_interval
    }

    /// Delay between apple spawns
    pub fn apple_interval(&self) -> Duration {
        self.engine.config().apple_interval()
    }

    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            score: self.state.score,
            best_score: self.scoreboard.best(),
            game_over: !self.state.is_running(),
        }
    }
}
