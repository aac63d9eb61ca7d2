use std::collections::HashMap;

use tracing::warn;

/// Store key holding the best score
pub const HIGH_SCORE_KEY: &str = "HighScore";

/// Process-wide key/value store for values that outlive a round
pub trait ScoreStore {
    fn get(&self, key: &str) -> Option<u32>;
    fn set(&mut self, key: &str, value: u32) -> anyhow::Result<()>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn get(&self, key: &str) -> Option<u32> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: u32) -> anyhow::Result<()> {
        (**self).set(key, value)
    }
}

/// Store that forgets everything when the process exits
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Option<u32> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: u32) -> anyhow::Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Best score across rounds, read once from the store and written back on
/// every new best.
#[derive(Debug)]
pub struct Scoreboard<S> {
    best: u32,
    store: S,
}

impl<S: ScoreStore> Scoreboard<S> {
    pub fn load(store: S) -> Self {
        let best = store.get(HIGH_SCORE_KEY).unwrap_or(0);
        Self { best, store }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Raises the best score to `score` if it is higher. A store failure is
    /// logged and the new best is kept in memory only.
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }

        self.best = score;
        if let Err(err) = self.store.set(HIGH_SCORE_KEY, score) {
            warn!(error = ?err, best = score, "failed to persist best score");
        }
        true
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn get(&self, _key: &str) -> Option<u32> {
            None
        }

        fn set(&mut self, _key: &str, _value: u32) -> anyhow::Result<()> {
            anyhow::bail!("disk on fire")
        }
    }

    #[test]
    fn test_best_loaded_from_store() {
        let mut store = MemoryStore::new();
        store.set(HIGH_SCORE_KEY, 12).unwrap();

        let board = Scoreboard::load(store);
        assert_eq!(board.best(), 12);
    }

    #[test]
    fn test_high_score_tracking() {
        let mut board = Scoreboard::load(MemoryStore::new());
        assert_eq!(board.best(), 0);

        assert!(board.record(10));
        assert_eq!(board.best(), 10);
        assert_eq!(board.store().get(HIGH_SCORE_KEY), Some(10));

        assert!(!board.record(5)); // Should not decrease
        assert!(!board.record(10));
        assert_eq!(board.best(), 10);

        assert!(board.record(15));
        assert_eq!(board.store().get(HIGH_SCORE_KEY), Some(15));
    }

    #[test]
    fn test_store_failure_keeps_best_in_memory() {
        let mut board = Scoreboard::load(BrokenStore);
        assert!(board.record(3));
        assert_eq!(board.best(), 3);
    }

    #[test]
    fn test_boxed_store() {
        let store: Box<dyn ScoreStore> = Box::new(MemoryStore::new());
        let mut board = Scoreboard::load(store);
        board.record(4);
        assert_eq!(board.store().get(HIGH_SCORE_KEY), Some(4));
    }
}
