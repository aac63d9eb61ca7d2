use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::{
    body::Body,
    config::{ConfigError, GameConfig, TailRule},
    grid::{BoundaryPolicy, Cell, Grid},
    state::{CollisionKind, GameState, Phase},
    tiles::{TileKind, TileSink},
};

/// Outcome of one movement tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// The head advanced to `head`. `vacated` is the tail cell that was
    /// dropped, `None` when the snake grew.
    Moved {
        head: Cell,
        vacated: Option<Cell>,
        ate: bool,
    },
    /// The round just ended
    Crashed(CollisionKind),
    /// The round was already over; nothing changed
    Halted,
}

impl StepResult {
    pub fn terminated(&self) -> bool {
        !matches!(self, StepResult::Moved { .. })
    }
}

/// The game engine that handles all game logic
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    grid: Grid,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Engine with a reproducible apple sequence
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = config.grid();

        Ok(Self { config, grid, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Fresh round state: a straight snake with its head on the origin,
    /// painted onto `tiles`.
    pub fn reset(&self, tiles: &mut impl TileSink) -> GameState {
        let mut snake = Body::with_capacity(self.config.initial_snake_length);
        for cell in self.config.initial_body() {
            snake.push_tail(cell);
            tiles.paint(cell, TileKind::Body);
        }

        GameState::new(
            snake,
            self.config.initial_direction,
            self.config.start_interval(),
        )
    }

    /// Execute one movement tick.
    ///
    /// Every collision check runs before the state is touched, so a crash
    /// leaves the snake exactly where it was. Scoring an eaten apple is left
    /// to the caller.
    ///
    /// The boundary is resolved before the body check so that a head wrapping
    /// onto its own body is a self-collision, never an overlap.
    ///
    /// A round with no snake left has nothing to move and reports `Halted`.
    pub fn step(&mut self, state: &mut GameState, tiles: &mut impl TileSink) -> StepResult {
        if !state.is_running() {
            return StepResult::Halted;
        }

        let Ok(head) = state.snake.head() else {
            return StepResult::Halted;
        };
        let mut next = head.moved_in_direction(state.direction);

        if self.grid.is_out_of_bounds(next) {
            match self.grid.boundary() {
                BoundaryPolicy::Wrap => next = self.grid.wrap(next),
                BoundaryPolicy::Clamp => return self.crash(state, CollisionKind::OutOfBounds),
            }
        }

        if self.hits_body(state, next) {
            return self.crash(state, CollisionKind::SelfCollision);
        }

        if self.grid.is_wall(next) {
            return self.crash(state, CollisionKind::Wall);
        }

        let ate = state.apples.remove(&next);
        if ate {
            debug!(cell = ?next, "apple eaten");
        }

        state.snake.push_head(next);
        tiles.paint(next, TileKind::Body);

        let vacated = if ate { None } else { state.snake.pop_tail().ok() };
        // The head may have just moved onto the vacating tail
        if let Some(tail) = vacated.filter(|tail| *tail != next) {
            tiles.clear(tail);
        }

        state.ticks += 1;
        state.tick_interval = state
            .tick_interval
            .mul_f32(self.config.move_delay_multiplier)
            .max(self.config.min_interval());

        StepResult::Moved {
            head: next,
            vacated,
            ate,
        }
    }

    /// Place one apple on a uniformly random free cell.
    ///
    /// Candidates are redrawn until one misses the snake, the other apples and
    /// the walls. There is no retry cap, so this never returns on a board with
    /// no free cell left. Returns `None` once the round is over.
    pub fn spawn_apple(&mut self, state: &mut GameState, tiles: &mut impl TileSink) -> Option<Cell> {
        if !state.is_running() {
            return None;
        }

        let cell = loop {
            let candidate = self.grid.random_cell(&mut self.rng);
            if !state.is_occupied(candidate) && !self.grid.is_wall(candidate) {
                break candidate;
            }
        };

        state.apples.insert(cell);
        tiles.paint(cell, TileKind::Apple);
        debug!(?cell, apples = state.apples.len(), "apple spawned");

        Some(cell)
    }

    fn hits_body(&self, state: &GameState, cell: Cell) -> bool {
        match self.config.tail_rule {
            TailRule::Collides => state.snake.contains(cell),
            TailRule::Vacates => {
                let len = state.snake.count();
                state.snake.iter().take(len - 1).any(|segment| segment == cell)
            }
        }
    }

    fn crash(&self, state: &mut GameState, collision: CollisionKind) -> StepResult {
        state.phase = Phase::GameOver;
        info!(?collision, score = state.score, ticks = state.ticks, "snake crashed");
        StepResult::Crashed(collision)
    }
}
