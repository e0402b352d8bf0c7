//! Session queue and review batch selection
//!
//! A session hands out cards in small batches. Each batch is drawn from the
//! cards that are due right now, or, when nothing is due, from the few cards
//! that will become due soonest. Within a batch the same verb is not repeated
//! unless the pool is too small, and the first card avoids the verb that was
//! presented last.

use std::collections::{HashSet, VecDeque};

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::RngCore;

/// Cards per batch
pub const BATCH_SIZE: usize = 2;

/// Pool size when no card is due
pub const LOOKAHEAD_POOL_SIZE: usize = 6;

/// A schedulable card: identity, owning verb and due time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub card_id: String,
    pub verb_id: String,
    pub due: DateTime<Utc>,
}

/// Transient per-session state, never persisted
#[derive(Debug, Default)]
pub struct Session {
    queue: VecDeque<String>,
    last_verb_id: Option<String>,
    current_card_id: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.queue.clear();
        self.last_verb_id = None;
        self.current_card_id = None;
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn last_verb_id(&self) -> Option<&str> {
        self.last_verb_id.as_deref()
    }

    pub fn current_card_id(&self) -> Option<&str> {
        self.current_card_id.as_deref()
    }

    pub fn enqueue<I: IntoIterator<Item = String>>(&mut self, card_ids: I) {
        self.queue.extend(card_ids);
    }

    pub fn pop(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    /// Mark a card as the one on screen
    pub fn present(&mut self, card_id: &str, verb_id: &str) {
        self.current_card_id = Some(card_id.to_string());
        self.last_verb_id = Some(verb_id.to_string());
    }
}

/// Cards due at `now`, or the soonest-due few when nothing is due
pub fn select_pool(candidates: Vec<Candidate>, now: DateTime<Utc>) -> Vec<Candidate> {
    let (due, mut pending): (Vec<Candidate>, Vec<Candidate>) =
        candidates.into_iter().partition(|c| c.due <= now);

    if !due.is_empty() {
        return due;
    }

    pending.sort_by_key(|c| c.due);
    pending.truncate(LOOKAHEAD_POOL_SIZE);
    pending
}

/// Shuffle `pool` and pick up to `BATCH_SIZE` card ids from it
pub fn build_batch(
    mut pool: Vec<Candidate>,
    last_verb_id: Option<&str>,
    rng: &mut dyn RngCore,
) -> Vec<String> {
    pool.shuffle(rng);

    let mut batch: Vec<String> = Vec::with_capacity(BATCH_SIZE);
    let mut used_verbs: HashSet<&str> = HashSet::new();

    for entry in &pool {
        if batch.len() >= BATCH_SIZE {
            break;
        }

        if batch.is_empty() && last_verb_id == Some(entry.verb_id.as_str()) && pool.len() > 1 {
            continue;
        }

        if used_verbs.contains(entry.verb_id.as_str()) && pool.len() > BATCH_SIZE {
            continue;
        }

        batch.push(entry.card_id.clone());
        used_verbs.insert(entry.verb_id.as_str());
    }

    if batch.is_empty() {
        if let Some(first) = pool.first() {
            batch.push(first.card_id.clone());
        }
    }

    batch
}
