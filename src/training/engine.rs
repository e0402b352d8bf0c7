//! The training engine: registry, filter, statistics and session in one place

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::storage::KeyValueStore;

use super::evaluator::check_answer;
use super::filter::TenseFilter;
use super::models::{Card, Evaluation, PresentedCard, ReviewStat, Summary, VerbData};
use super::registry::CardRegistry;
use super::scheduler::{build_batch, select_pool, Candidate, Session};
use super::stats::StatStore;
use super::suggestions::suggestions_for;

/// Storage key used when the host does not pick one
pub const DEFAULT_STORAGE_KEY: &str = "losVerbos-srs-v1";

/// One independent trainer.
///
/// Every operation is synchronous and infallible; persistence problems are
/// logged and the in-memory state stays authoritative. Hosts sharing an
/// engine across threads wrap it in a single `Mutex`.
pub struct TrainingEngine {
    store: Box<dyn KeyValueStore>,
    storage_key: String,
    registry: CardRegistry,
    filter: TenseFilter,
    stats: StatStore,
    session: Session,
    rng: Box<dyn RngCore + Send>,
}

impl TrainingEngine {
    /// Engine with an entropy-seeded random source
    pub fn new(store: Box<dyn KeyValueStore>, storage_key: impl Into<String>) -> Self {
        Self::with_rng(store, storage_key, Box::new(StdRng::from_entropy()))
    }

    /// Engine with an explicit random source, for reproducible ordering
    pub fn with_rng(
        store: Box<dyn KeyValueStore>,
        storage_key: impl Into<String>,
        rng: Box<dyn RngCore + Send>,
    ) -> Self {
        let storage_key = storage_key.into();
        let stats = StatStore::load(store.as_ref(), &storage_key);
        let filter = TenseFilter::load(store.as_ref(), &excluded_key(&storage_key));

        log::debug!(
            "Training engine '{}' restored {} stats, {} excluded tenses",
            storage_key,
            stats.len(),
            filter.excluded().len()
        );

        Self {
            store,
            storage_key,
            registry: CardRegistry::new(),
            filter,
            stats,
            session: Session::new(),
            rng,
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    // ==================== Registry ====================

    /// Register (or re-register) the cards of one verb.
    ///
    /// Stats of cards that no longer exist are dropped and the session restarts.
    /// Hosts loading several verbs at startup should use `register_verbs`, so
    /// that stats of verbs not loaded yet are not collected.
    pub fn register_verb(&mut self, verb_id: &str, verb: &VerbData) {
        self.register_verb_at(verb_id, verb, Utc::now())
    }

    pub fn register_verb_at(&mut self, verb_id: &str, verb: &VerbData, now: DateTime<Utc>) {
        self.register_verbs_at([(verb_id, verb)], now)
    }

    /// Register a whole set of verbs, then collect stale stats once
    pub fn register_verbs<I, S, V>(&mut self, verbs: I)
    where
        I: IntoIterator<Item = (S, V)>,
        S: AsRef<str>,
        V: std::borrow::Borrow<VerbData>,
    {
        self.register_verbs_at(verbs, Utc::now())
    }

    pub fn register_verbs_at<I, S, V>(&mut self, verbs: I, now: DateTime<Utc>)
    where
        I: IntoIterator<Item = (S, V)>,
        S: AsRef<str>,
        V: std::borrow::Borrow<VerbData>,
    {
        let mut registered = 0;
        for (verb_id, verb) in verbs {
            let verb_id = verb_id.as_ref();
            if verb_id.is_empty() {
                continue;
            }

            let count = self.registry.upsert_verb(verb_id, verb.borrow());
            for card in self.registry.cards().filter(|c| c.verb_id == verb_id) {
                self.stats.get(&card.card_id, now);
            }
            log::info!("Registered verb '{}' with {} cards", verb_id, count);
            registered += 1;
        }

        if registered == 0 {
            return;
        }

        let registry = &self.registry;
        let removed = self.stats.retain(|card_id| registry.contains(card_id));
        if removed > 0 {
            log::info!("Removed {} stale stats", removed);
        }

        self.persist_stats();
        self.reset_queue();
    }

    pub fn has_registered_cards(&self) -> bool {
        !self.registry.is_empty()
    }

    /// Whether any registered card survives the tense filter
    pub fn has_cards(&self) -> bool {
        self.registry
            .cards()
            .any(|card| !self.filter.is_excluded(&card.tense_id))
    }

    pub fn card(&self, card_id: &str) -> Option<&Card> {
        self.registry.get(card_id)
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.registry.cards()
    }

    pub fn tense_catalog(&self) -> Vec<(String, String)> {
        self.registry.tense_catalog()
    }

    // ==================== Tense filter ====================

    pub fn set_excluded_tenses<I, S>(&mut self, tense_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.filter.set(tense_ids);
        self.filter
            .persist(self.store.as_ref(), &excluded_key(&self.storage_key));
        self.reset_queue();
    }

    pub fn is_excluded(&self, tense_id: &str) -> bool {
        self.filter.is_excluded(tense_id)
    }

    pub fn excluded_tenses(&self) -> Vec<String> {
        self.filter.excluded()
    }

    // ==================== Statistics ====================

    /// Current stat for a card, created on first access
    pub fn stat(&mut self, card_id: &str) -> ReviewStat {
        self.stats.get(card_id, Utc::now()).clone()
    }

    pub fn record_answer(&mut self, card_id: &str, correct: bool) -> ReviewStat {
        self.record_answer_at(card_id, correct, Utc::now())
    }

    pub fn record_answer_at(
        &mut self,
        card_id: &str,
        correct: bool,
        now: DateTime<Utc>,
    ) -> ReviewStat {
        let stat = self.stats.record(card_id, correct, now);
        self.persist_stats();
        stat
    }

    pub fn summary(&self) -> Summary {
        self.summary_at(Utc::now())
    }

    pub fn summary_at(&self, now: DateTime<Utc>) -> Summary {
        let eligible = self
            .registry
            .cards()
            .filter(|card| !self.filter.is_excluded(&card.tense_id))
            .map(|card| card.card_id.as_str());
        self.stats.summary(eligible, now)
    }

    /// Forget all statistics, in memory and in storage
    pub fn reset_stats(&mut self) {
        self.stats.reset(self.store.as_ref(), &self.storage_key);
        self.reset_queue();
        log::info!("Review stats reset for '{}'", self.storage_key);
    }

    fn persist_stats(&self) {
        self.stats.persist(self.store.as_ref(), &self.storage_key);
    }

    // ==================== Session ====================

    pub fn reset_queue(&mut self) {
        self.session.reset();
    }

    pub fn current_card_id(&self) -> Option<&str> {
        self.session.current_card_id()
    }

    /// Next card to practice, `None` when nothing is eligible
    pub fn next_card(&mut self) -> Option<PresentedCard> {
        self.next_card_at(Utc::now())
    }

    pub fn next_card_at(&mut self, now: DateTime<Utc>) -> Option<PresentedCard> {
        if self.registry.is_empty() {
            return None;
        }

        if self.session.is_empty() {
            self.refill_queue(now);
        }

        let card = loop {
            let card_id = self.session.pop()?;
            match self.registry.get(&card_id) {
                Some(card) if !self.filter.is_excluded(&card.tense_id) => break card.clone(),
                _ => continue,
            }
        };

        self.session.present(&card.card_id, &card.verb_id);

        let stats = self.stats.get(&card.card_id, now).clone();
        let suggestions = self.suggestions_for(&card);

        Some(PresentedCard {
            card,
            suggestions,
            stats,
        })
    }

    fn refill_queue(&mut self, now: DateTime<Utc>) {
        let mut candidates = Vec::new();
        for card in self.registry.cards() {
            if self.filter.is_excluded(&card.tense_id) {
                continue;
            }
            let stat = self.stats.get(&card.card_id, now);
            candidates.push(Candidate {
                card_id: card.card_id.clone(),
                verb_id: card.verb_id.clone(),
                due: stat.due,
            });
        }

        if candidates.is_empty() {
            return;
        }

        let pool = select_pool(candidates, now);
        let batch = build_batch(pool, self.session.last_verb_id(), self.rng.as_mut());
        log::debug!("Session queue refilled with {} cards", batch.len());
        self.session.enqueue(batch);
    }

    /// Shuffled candidate endings for `card`
    pub fn suggestions_for(&mut self, card: &Card) -> Vec<String> {
        suggestions_for(card, self.registry.cards(), &self.filter, self.rng.as_mut())
    }

    // ==================== Answers ====================

    /// Check an answer and record the outcome. The session is left untouched.
    pub fn evaluate(&mut self, card: &Card, raw_input: &str) -> Evaluation {
        self.evaluate_at(card, raw_input, Utc::now())
    }

    pub fn evaluate_at(&mut self, card: &Card, raw_input: &str, now: DateTime<Utc>) -> Evaluation {
        let evaluation = check_answer(card, raw_input);
        self.record_answer_at(&card.card_id, evaluation.correct, now);
        evaluation
    }

    /// Evaluate against the card currently on screen, if any
    pub fn evaluate_current(&mut self, raw_input: &str) -> Option<Evaluation> {
        let card = self.session.current_card_id().and_then(|id| self.registry.get(id))?.clone();
        Some(self.evaluate(&card, raw_input))
    }
}

fn excluded_key(storage_key: &str) -> String {
    format!("{}-excluded", storage_key)
}
