//! Paint instructions emitted by the engine for whatever draws the board.

use std::collections::HashMap;

use super::grid::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    Body,
    Apple,
    Wall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileUpdate {
    Paint { cell: Cell, kind: TileKind },
    Clear { cell: Cell },
    /// Blank every tile
    ClearAll,
}

/// Receives paint instructions. The engine never reads a sink back.
pub trait TileSink {
    fn apply(&mut self, update: TileUpdate);

    fn paint(&mut self, cell: Cell, kind: TileKind) {
        self.apply(TileUpdate::Paint { cell, kind });
    }

    fn clear(&mut self, cell: Cell) {
        self.apply(TileUpdate::Clear { cell });
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl TileSink for NullSink {
    fn apply(&mut self, _update: TileUpdate) {}
}

/// Records updates in order
impl TileSink for Vec<TileUpdate> {
    fn apply(&mut self, update: TileUpdate) {
        self.push(update);
    }
}

/// Current picture of the board, one optional tile per cell
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TileBuffer {
    tiles: HashMap<Cell, TileKind>,
}

impl TileBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, cell: Cell) -> Option<TileKind> {
        self.tiles.get(&cell).copied()
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.values().filter(|tile| **tile == kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

impl TileSink for TileBuffer {
    fn apply(&mut self, update: TileUpdate) {
        match update {
            TileUpdate::Paint { cell, kind } => {
                self.tiles.insert(cell, kind);
            }
            TileUpdate::Clear { cell } => {
                self.tiles.remove(&cell);
            }
            TileUpdate::ClearAll => self.tiles.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_paint_and_clear() {
        let mut buffer = TileBuffer::new();
        buffer.paint(Cell::new(1, 2), TileKind::Apple);
        buffer.paint(Cell::new(0, 0), TileKind::Wall);

        assert_eq!(buffer.get(Cell::new(1, 2)), Some(TileKind::Apple));
        assert_eq!(buffer.count(TileKind::Wall), 1);

        // Repainting replaces the sprite
        buffer.paint(Cell::new(1, 2), TileKind::Body);
        assert_eq!(buffer.get(Cell::new(1, 2)), Some(TileKind::Body));
        assert_eq!(buffer.count(TileKind::Apple), 0);

        buffer.clear(Cell::new(1, 2));
        assert_eq!(buffer.get(Cell::new(1, 2)), None);

        buffer.apply(TileUpdate::ClearAll);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_vec_records_in_order() {
        let mut log: Vec<TileUpdate> = Vec::new();
        log.paint(Cell::ORIGIN, TileKind::Body);
        TileSink::clear(&mut log, Cell::ORIGIN);

        assert_eq!(
            log,
            vec![
                TileUpdate::Paint {
                    cell: Cell::ORIGIN,
                    kind: TileKind::Body
                },
                TileUpdate::Clear { cell: Cell::ORIGIN },
            ]
        );
    }
}
