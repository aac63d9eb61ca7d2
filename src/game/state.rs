use std::collections::HashSet;
use std::time::Duration;

use super::body::Body;
use super::direction::Direction;
use super::grid::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    GameOver,
}

/// Type of collision that ended a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Snake hit itself
    SelfCollision,
    /// Snake left the grid under the clamp policy
    OutOfBounds,
    /// Snake hit a level wall
    Wall,
}

/// Everything that changes during one round
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Segments, head first
    pub snake: Body<Cell>,
    pub apples: HashSet<Cell>,
    pub direction: Direction,
    pub score: u32,
    /// Current delay between moves
    pub tick_interval: Duration,
    pub ticks: u32,
    pub phase: Phase,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Body<Cell>, direction: Direction, tick_interval: Duration) -> Self {
        Self {
            snake,
            apples: HashSet::new(),
            direction,
            score: 0,
            tick_interval,
            ticks: 0,
            phase: Phase::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Check if a position is occupied by the snake or an apple
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.snake.contains(cell) || self.apples.contains(&cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_running() {
        let snake: Body<Cell> = [Cell::new(0, 0), Cell::new(0, -1)].into_iter().collect();
        let state = GameState::new(snake, Direction::North, Duration::from_millis(350));

        assert!(state.is_running());
        assert_eq!(state.score, 0);
        assert_eq!(state.ticks, 0);
        assert!(state.apples.is_empty());
    }

    #[test]
    fn test_occupancy() {
        let snake: Body<Cell> = [Cell::new(0, 0), Cell::new(0, -1)].into_iter().collect();
        let mut state = GameState::new(snake, Direction::North, Duration::from_millis(350));
        state.apples.insert(Cell::new(3, 3));

        assert!(state.is_occupied(Cell::new(0, -1)));
        assert!(state.is_occupied(Cell::new(3, 3)));
        assert!(!state.is_occupied(Cell::new(1, 1)));
    }
}
