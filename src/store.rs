//! Score store backed by a small JSON file

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use crate::game::ScoreStore;

/// Flat `{"key": value}` JSON object on disk. Every `set` rewrites the file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, u32>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file starts empty; an unreadable
    /// one is logged and also starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match Self::read(&path) {
            Ok(values) => values,
            Err(err) => {
                warn!(path = ?path, error = ?err, "ignoring unreadable score file");
                BTreeMap::new()
            }
        };

        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(path: &Path) -> Result<BTreeMap<String, u32>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read score file {:?}", path))?;
        serde_json::from_str(&text).with_context(|| format!("Failed to parse score file {:?}", path))
    }
}

impl ScoreStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<u32> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: u32) -> Result<()> {
        self.values.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(&self.values).context("Failed to serialize scores")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write scores to {:?}", self.path))?;

        Ok(())
    }
}
