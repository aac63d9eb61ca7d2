use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::level::LevelError;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const ORIGIN: Cell = Cell { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// What happens when the head leaves the grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Re-enter on the opposite edge
    #[default]
    Wrap,
    /// Leaving the grid ends the round
    Clamp,
}

/// Fixed-size board centered on the origin, plus the static wall set.
///
/// Bounds are half-open with integer division: x in `[-(w / 2), w - w / 2)`,
/// so an odd width of 31 spans -15..=15.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    boundary: BoundaryPolicy,
    walls: HashSet<Cell>,
}

impl Grid {
    pub fn new(width: usize, height: usize, boundary: BoundaryPolicy) -> Self {
        Self {
            width,
            height,
            boundary,
            walls: HashSet::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn boundary(&self) -> BoundaryPolicy {
        self.boundary
    }

    pub fn min_x(&self) -> i32 {
        -((self.width / 2) as i32)
    }

    /// Largest valid x (inclusive)
    pub fn max_x(&self) -> i32 {
        self.min_x() + self.width as i32 - 1
    }

    pub fn min_y(&self) -> i32 {
        -((self.height / 2) as i32)
    }

    /// Largest valid y (inclusive)
    pub fn max_y(&self) -> i32 {
        self.min_y() + self.height as i32 - 1
    }

    pub fn is_out_of_bounds(&self, cell: Cell) -> bool {
        cell.x < self.min_x() || cell.x > self.max_x() || cell.y < self.min_y() || cell.y > self.max_y()
    }

    /// Maps a cell that stepped past an edge onto the opposite edge.
    /// Axes are handled independently; in-bounds coordinates are untouched.
    pub fn wrap(&self, cell: Cell) -> Cell {
        let x = if cell.x > self.max_x() {
            self.min_x()
        } else if cell.x < self.min_x() {
            self.max_x()
        } else {
            cell.x
        };

        let y = if cell.y > self.max_y() {
            self.min_y()
        } else if cell.y < self.min_y() {
            self.max_y()
        } else {
            cell.y
        };

        Cell::new(x, y)
    }

    /// Adds every flagged cell of a level bitmap to the wall set.
    ///
    /// Flag `k` addresses column `k / height` and row `k % height`, counted
    /// from the bottom-left corner. The bitmap is validated in full before any
    /// wall is added. Returns the number of walls added.
    pub fn load_walls(&mut self, bitmap: &[u8]) -> Result<usize, LevelError> {
        let expected = self.width * self.height;
        if bitmap.len() != expected {
            return Err(LevelError::MalformedLevel {
                expected,
                actual: bitmap.len(),
            });
        }

        if let Some((index, &value)) = bitmap.iter().enumerate().find(|(_, flag)| **flag > 1) {
            return Err(LevelError::InvalidFlag { index, value });
        }

        let before = self.walls.len();
        for (index, _) in bitmap.iter().enumerate().filter(|(_, flag)| **flag == 1) {
            self.walls.insert(self.cell_at_flag(index));
        }

        Ok(self.walls.len() - before)
    }

    pub fn clear_walls(&mut self) {
        self.walls.clear();
    }

    pub fn is_wall(&self, cell: Cell) -> bool {
        self.walls.contains(&cell)
    }

    pub fn walls(&self) -> impl Iterator<Item = Cell> + '_ {
        self.walls.iter().copied()
    }

    /// Cell addressed by bitmap flag `index`
    pub fn cell_at_flag(&self, index: usize) -> Cell {
        let column = (index / self.height) as i32;
        let row = (index % self.height) as i32;
        Cell::new(self.min_x() + column, self.min_y() + row)
    }

    /// Bitmap flag index of an in-bounds cell
    pub fn flag_index(&self, cell: Cell) -> Option<usize> {
        if self.is_out_of_bounds(cell) {
            return None;
        }

        let column = (cell.x - self.min_x()) as usize;
        let row = (cell.y - self.min_y()) as usize;
        Some(column * self.height + row)
    }

    /// Uniformly random in-bounds cell
    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> Cell {
        let x = rng.gen_range(self.min_x()..=self.max_x());
        let y = rng.gen_range(self.min_y()..=self.max_y());
        Cell::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_cell_movement() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell.moved_in_direction(Direction::North), Cell::new(5, 6));
        assert_eq!(cell.moved_in_direction(Direction::South), Cell::new(5, 4));
        assert_eq!(cell.moved_in_direction(Direction::East), Cell::new(6, 5));
        assert_eq!(cell.moved_in_direction(Direction::West), Cell::new(4, 5));
    }

    #[test]
    fn test_odd_grid_extent() {
        let grid = Grid::new(31, 31, BoundaryPolicy::Wrap);
        assert_eq!(grid.min_x(), -15);
        assert_eq!(grid.max_x(), 15);
        assert_eq!(grid.min_y(), -15);
        assert_eq!(grid.max_y(), 15);
    }

    #[test]
    fn test_even_grid_extent() {
        let grid = Grid::new(10, 4, BoundaryPolicy::Clamp);
        assert_eq!(grid.min_x(), -5);
        assert_eq!(grid.max_x(), 4);
        assert_eq!(grid.min_y(), -2);
        assert_eq!(grid.max_y(), 1);
    }

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::new(31, 31, BoundaryPolicy::Clamp);

        assert!(!grid.is_out_of_bounds(Cell::ORIGIN));
        assert!(!grid.is_out_of_bounds(Cell::new(15, -15)));
        assert!(grid.is_out_of_bounds(Cell::new(16, 0)));
        assert!(grid.is_out_of_bounds(Cell::new(-16, 0)));
        assert!(grid.is_out_of_bounds(Cell::new(0, 16)));
        assert!(grid.is_out_of_bounds(Cell::new(0, -16)));
    }

    #[test]
    fn test_wrap_each_edge() {
        let grid = Grid::new(31, 31, BoundaryPolicy::Wrap);

        assert_eq!(grid.wrap(Cell::new(16, 3)), Cell::new(-15, 3));
        assert_eq!(grid.wrap(Cell::new(-16, 3)), Cell::new(15, 3));
        assert_eq!(grid.wrap(Cell::new(3, 16)), Cell::new(3, -15));
        assert_eq!(grid.wrap(Cell::new(3, -16)), Cell::new(3, 15));
        assert_eq!(grid.wrap(Cell::new(2, 2)), Cell::new(2, 2));
    }

    #[test]
    fn test_load_walls() {
        let mut grid = Grid::new(3, 3, BoundaryPolicy::Wrap);
        // column x = -1 fully walled, plus the top of column x = 1
        let bitmap = [1, 1, 1, 0, 0, 0, 0, 0, 1];

        assert_eq!(grid.load_walls(&bitmap).unwrap(), 4);
        assert!(grid.is_wall(Cell::new(-1, -1)));
        assert!(grid.is_wall(Cell::new(-1, 0)));
        assert!(grid.is_wall(Cell::new(-1, 1)));
        assert!(grid.is_wall(Cell::new(1, 1)));
        assert!(!grid.is_wall(Cell::ORIGIN));
        assert!(!grid.is_wall(Cell::new(1, -1)));
    }

    #[test]
    fn test_load_walls_rejects_wrong_length() {
        let mut grid = Grid::new(3, 3, BoundaryPolicy::Wrap);
        let err = grid.load_walls(&[0; 8]).unwrap_err();
        assert!(matches!(
            err,
            LevelError::MalformedLevel {
                expected: 9,
                actual: 8
            }
        ));
        assert_eq!(grid.walls().count(), 0);
    }

    #[test]
    fn test_load_walls_rejects_bad_flag_without_partial_load() {
        let mut grid = Grid::new(3, 3, BoundaryPolicy::Wrap);
        let bitmap = [1, 0, 0, 0, 2, 0, 0, 0, 0];
        let err = grid.load_walls(&bitmap).unwrap_err();
        assert!(matches!(err, LevelError::InvalidFlag { index: 4, value: 2 }));
        assert_eq!(grid.walls().count(), 0);
    }

    #[test]
    fn test_flag_index_matches_cell_at_flag() {
        let grid = Grid::new(7, 5, BoundaryPolicy::Wrap);
        for index in 0..35 {
            assert_eq!(grid.flag_index(grid.cell_at_flag(index)), Some(index));
        }
        assert_eq!(grid.cell_at_flag(0), Cell::new(-3, -2));
        assert_eq!(grid.cell_at_flag(34), Cell::new(3, 2));
        assert_eq!(grid.flag_index(Cell::new(4, 0)), None);
    }

    #[test]
    fn test_random_cell_stays_in_bounds() {
        let grid = Grid::new(5, 3, BoundaryPolicy::Clamp);
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = HashSet::new();

        for _ in 0..2000 {
            let cell = grid.random_cell(&mut rng);
            assert!(!grid.is_out_of_bounds(cell));
            seen.insert(cell);
        }

        // Every cell, including the max edges, is reachable
        assert_eq!(seen.len(), 15);
    }
}
