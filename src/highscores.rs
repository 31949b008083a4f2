//! Top-N high score table persisted through a key-value store.
//!
//! The stored payload is a JSON array of `{ "score": int, "date": string }`,
//! sorted descending. Storage problems never interrupt play: they are logged
//! and the in-memory table stays authoritative for the rest of the session.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

pub const HIGH_SCORES_KEY: &str = "galope-libertador-scores";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Display-formatted date, as produced by the host locale.
    pub date: String,
}

/// Minimal string key-value storage (the shape of `window.localStorage`).
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, GameError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), GameError>;
}

/// In-memory store. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<HashMap<String, String>>>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail, like a full or disabled storage.
    pub fn read_only() -> Self {
        Self { fail_writes: true, ..Self::default() }
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, GameError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), GameError> {
        if self.fail_writes {
            return Err(GameError::Storage("quota exceeded".into()));
        }
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Append, sort descending (ties keep insertion order), truncate.
pub fn merge_score(entries: &mut Vec<HighScoreEntry>, entry: HighScoreEntry, capacity: usize) {
    entries.push(entry);
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(capacity);
}

pub struct HighScoreBoard<S: KeyValueStore> {
    store: S,
    entries: Vec<HighScoreEntry>,
    capacity: usize,
}

impl<S: KeyValueStore> HighScoreBoard<S> {
    /// Load the persisted table. Missing, unreadable or corrupt data yields an
    /// empty table.
    pub fn load(store: S, capacity: usize) -> Self {
        let mut entries = match store.get_item(HIGH_SCORES_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<Vec<HighScoreEntry>>(&raw).unwrap_or_else(|err| {
                log::warn!("discarding corrupt high score table: {err}");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(err) => {
                log::warn!("could not read high scores: {err}");
                Vec::new()
            }
        };
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(capacity);
        Self { store, entries, capacity }
    }

    /// Merge a finished run and try to persist. Returns the 0-based rank if the
    /// score made the table.
    pub fn record(&mut self, score: u64, date: String) -> Option<usize> {
        // The new entry lands after any equal scores already present.
        let rank = self.entries.iter().filter(|e| e.score >= score).count();
        merge_score(&mut self.entries, HighScoreEntry { score, date }, self.capacity);
        if let Err(err) = self.persist() {
            log::warn!("could not save high scores: {err}");
        }
        (rank < self.capacity).then_some(rank)
    }

    fn persist(&self) -> Result<(), GameError> {
        let json = serde_json::to_string(&self.entries)?;
        self.store.set_item(HIGH_SCORES_KEY, &json)
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn best(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string(&self.entries)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores<S: KeyValueStore>(board: &HighScoreBoard<S>) -> Vec<u64> {
        board.entries().iter().map(|e| e.score).collect()
    }

    #[test]
    fn keeps_top_five_descending() {
        let store = MemoryStore::new();
        let mut board = HighScoreBoard::load(store.clone(), 5);
        let mut expected_len = 0;
        for s in [50, 200, 10, 300, 150, 400] {
            board.record(s, "1/1/2025".into());
            expected_len = (expected_len + 1).min(5);
            assert_eq!(board.entries().len(), expected_len);
            let got = scores(&board);
            assert!(got.windows(2).all(|w| w[0] >= w[1]), "{got:?}");
        }
        assert_eq!(scores(&board), vec![400, 300, 200, 150, 50]);

        let reloaded = HighScoreBoard::load(store, 5);
        assert_eq!(scores(&reloaded), vec![400, 300, 200, 150, 50]);
    }

    #[test]
    fn rank_is_reported_only_when_on_the_table() {
        let mut board = HighScoreBoard::load(MemoryStore::new(), 2);
        assert_eq!(board.record(10, "d".into()), Some(0));
        assert_eq!(board.record(30, "d".into()), Some(0));
        assert_eq!(board.record(20, "d".into()), Some(1));
        assert_eq!(board.record(5, "d".into()), None);
    }

    #[test]
    fn tie_at_the_cutoff_is_not_ranked() {
        let mut board = HighScoreBoard::load(MemoryStore::new(), 5);
        for s in [100, 90, 80, 70, 60] {
            board.record(s, "old".into());
        }
        assert_eq!(board.record(60, "new".into()), None);
        assert!(board.entries().iter().all(|e| e.date == "old"));

        assert_eq!(board.record(80, "new".into()), Some(3));
        assert_eq!(board.entries()[3].date, "new");
        assert_eq!(scores(&board), vec![100, 90, 80, 80, 70]);
    }

    #[test]
    fn payload_shape_matches_local_storage_format() {
        let store = MemoryStore::new();
        let mut board = HighScoreBoard::load(store.clone(), 5);
        board.record(1234, "10/17/2026".into());
        assert_eq!(store.raw(HIGH_SCORES_KEY).unwrap(), r#"[{"score":1234,"date":"10/17/2026"}]"#);
    }

    #[test]
    fn corrupt_payload_loads_empty() {
        let store = MemoryStore::new();
        store.set_item(HIGH_SCORES_KEY, "{not json").unwrap();
        let board = HighScoreBoard::load(store, 5);
        assert!(board.entries().is_empty());
    }

    #[test]
    fn failed_writes_keep_the_in_memory_table() {
        let mut board = HighScoreBoard::load(MemoryStore::read_only(), 5);
        board.record(99, "d".into());
        assert_eq!(scores(&board), vec![99]);
        assert_eq!(board.best(), Some(99));
    }

    #[test]
    fn unsorted_stored_table_is_normalised() {
        let store = MemoryStore::new();
        store
            .set_item(
                HIGH_SCORES_KEY,
                r#"[{"score":1,"date":"a"},{"score":9,"date":"b"},{"score":5,"date":"c"}]"#,
            )
            .unwrap();
        let board = HighScoreBoard::load(store, 2);
        assert_eq!(scores(&board), vec![9, 5]);
    }
}
