//! Review statistics, keyed by card id
//!
//! Persisted as one JSON object under the engine's storage key:
//! ```text
//! {
//!   "hablar::pres-ind::yo": {
//!     "stage": 2, "due": 1700000000000, "correct": 3,
//!     "incorrect": 1, "streak": 2, "lastReview": 1699999700000
//!   }
//! }
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::storage::{KeyValueStore, StorageError};

use super::algorithm::{apply_answer, MAX_STAGE};
use super::models::{ReviewStat, Summary};

/// In-memory statistics; the store is only written through `persist`
#[derive(Debug, Default)]
pub struct StatStore {
    stats: HashMap<String, ReviewStat>,
}

impl StatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore persisted statistics.
    ///
    /// Unreadable blobs load as empty; individual malformed entries are skipped.
    pub fn load(store: &dyn KeyValueStore, key: &str) -> Self {
        let mut stats = HashMap::new();

        let content = match store.load(key) {
            Ok(Some(content)) => content,
            Ok(None) => return Self { stats },
            Err(e) => {
                log::warn!("Failed to read review stats: {}", e);
                return Self { stats };
            }
        };

        let entries: Map<String, Value> = match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Ignoring malformed review stats: {}", e);
                return Self { stats };
            }
        };

        for (card_id, value) in entries {
            match serde_json::from_value::<ReviewStat>(value) {
                Ok(mut stat) => {
                    stat.stage = stat.stage.min(MAX_STAGE);
                    stats.insert(card_id, stat);
                }
                Err(e) => log::warn!("Skipping review stat for {}: {}", card_id, e),
            }
        }

        Self { stats }
    }

    pub fn persist(&self, store: &dyn KeyValueStore, key: &str) {
        let result = serde_json::to_string(&self.stats)
            .map_err(StorageError::from)
            .and_then(|json| store.save(key, &json));
        if let Err(e) = result {
            log::warn!("Failed to save review stats: {}", e);
        }
    }

    /// Existing stat, or a fresh one due at `now`
    pub fn get(&mut self, card_id: &str, now: DateTime<Utc>) -> &mut ReviewStat {
        self.stats
            .entry(card_id.to_string())
            .or_insert_with(|| ReviewStat::new(now))
    }

    /// Read-only lookup without creating anything
    pub fn peek(&self, card_id: &str) -> Option<&ReviewStat> {
        self.stats.get(card_id)
    }

    pub fn record(&mut self, card_id: &str, correct: bool, now: DateTime<Utc>) -> ReviewStat {
        let stat = self.get(card_id, now);
        apply_answer(stat, correct, now);
        stat.clone()
    }

    /// Drop stats whose card no longer exists. Returns how many were removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&str) -> bool,
    {
        let before = self.stats.len();
        self.stats.retain(|card_id, _| keep(card_id));
        before - self.stats.len()
    }

    /// Counts over `card_ids`. Cards without a stat yet count as fresh and due.
    pub fn summary<'a, I>(&self, card_ids: I, now: DateTime<Utc>) -> Summary
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut total_count = 0;
        let mut due_count = 0;
        let mut correct = 0u64;
        let mut attempts = 0u64;

        for card_id in card_ids {
            total_count += 1;
            match self.peek(card_id) {
                Some(stat) => {
                    if stat.is_due(now) {
                        due_count += 1;
                    }
                    correct += u64::from(stat.correct);
                    attempts += u64::from(stat.attempts());
                }
                None => due_count += 1,
            }
        }

        let accuracy = if attempts > 0 {
            Some(correct as f64 / attempts as f64)
        } else {
            None
        };

        Summary {
            total_count,
            due_count,
            accuracy,
        }
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Forget everything, including the persisted copy
    pub fn reset(&mut self, store: &dyn KeyValueStore, key: &str) {
        self.stats.clear();
        if let Err(e) = store.remove(key) {
            log::warn!("Failed to erase review stats: {}", e);
        }
    }
}
