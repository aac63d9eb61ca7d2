//! Level descriptions: a flat bitmap of wall flags, stored as JSON.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::grid::{Cell, Grid};

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level has {actual} flags, expected {expected}")]
    MalformedLevel { expected: usize, actual: usize },
    #[error("level flag {index} is {value}, expected 0 or 1")]
    InvalidFlag { index: usize, value: u8 },
    #[error("failed to read level {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse level {name}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Wall layout for one board. `map` holds one 0/1 flag per cell in the order
/// expected by [`Grid::load_walls`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub map: Vec<u8>,
}

impl Level {
    /// Builds a level for `grid` with walls on the given cells.
    /// Out-of-bounds cells are ignored.
    pub fn from_walls(grid: &Grid, walls: impl IntoIterator<Item = Cell>) -> Self {
        let mut map = vec![0; grid.width() * grid.height()];
        for index in walls.into_iter().filter_map(|cell| grid.flag_index(cell)) {
            map[index] = 1;
        }
        Self { map }
    }

    pub fn from_json(name: &str, text: &str) -> Result<Self, LevelError> {
        serde_json::from_str(text).map_err(|source| LevelError::Parse {
            name: name.to_string(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, LevelError> {
        let text = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&path.display().to_string(), &text)
    }

    /// Like [`Level::load`], but a missing file means "no level"
    pub fn load_optional(path: &Path) -> Result<Option<Self>, LevelError> {
        match Self::load(path) {
            Ok(level) => Ok(Some(level)),
            Err(LevelError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    pub fn wall_count(&self) -> usize {
        self.map.iter().filter(|flag| **flag == 1).count()
    }
}
