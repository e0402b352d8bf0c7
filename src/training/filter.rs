//! Tense exclusion filter

use std::collections::BTreeSet;

use crate::storage::{KeyValueStore, StorageError};

use super::algorithm::slugify;

/// Set of normalized tense ids hidden from scheduling and summaries
#[derive(Debug, Clone, Default)]
pub struct TenseFilter {
    excluded: BTreeSet<String>,
}

impl TenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a persisted exclusion list; anything unreadable counts as empty
    pub fn load(store: &dyn KeyValueStore, key: &str) -> Self {
        let mut filter = Self::new();

        let content = match store.load(key) {
            Ok(Some(content)) => content,
            Ok(None) => return filter,
            Err(e) => {
                log::warn!("Failed to read excluded tenses: {}", e);
                return filter;
            }
        };

        match serde_json::from_str::<Vec<serde_json::Value>>(&content) {
            Ok(values) => {
                filter.set(values.iter().filter_map(|v| v.as_str()));
            }
            Err(e) => log::warn!("Ignoring malformed excluded tenses: {}", e),
        }

        filter
    }

    pub fn persist(&self, store: &dyn KeyValueStore, key: &str) {
        let result = serde_json::to_string(&self.excluded)
            .map_err(StorageError::from)
            .and_then(|json| store.save(key, &json));
        if let Err(e) = result {
            log::warn!("Failed to save excluded tenses: {}", e);
        }
    }

    /// Replace the whole set with normalized copies of `tense_ids`
    pub fn set<I, S>(&mut self, tense_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.excluded = tense_ids
            .into_iter()
            .map(|id| slugify(id.as_ref().trim()))
            .filter(|id| !id.is_empty())
            .collect();
    }

    pub fn is_excluded(&self, tense_id: &str) -> bool {
        !tense_id.is_empty() && self.excluded.contains(tense_id)
    }

    pub fn excluded(&self) -> Vec<String> {
        self.excluded.iter().cloned().collect()
    }
}
