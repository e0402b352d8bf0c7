//! Card registry: flattens verb documents into reviewable cards

use std::collections::HashSet;

use indexmap::IndexMap;

use super::algorithm::{parse_form, slugify, strip_brackets};
use super::models::{Card, TenseData, VerbData};

/// Build the stable identity of a card
pub fn card_id(verb_id: &str, tense_id: &str, pronoun: Option<&str>, index: usize) -> String {
    let pronoun_slug = match pronoun.map(str::trim).filter(|p| !p.is_empty()) {
        Some(pronoun) => slugify(pronoun),
        None => slugify(&format!("idx-{}", index)),
    };
    format!("{}::{}::{}", verb_id, tense_id, pronoun_slug)
}

/// Tense id: explicit id, else `mood-tense` (tense falling back to its position)
pub fn tense_id(tense: &TenseData, index: usize) -> String {
    match &tense.id {
        Some(id) => slugify(id),
        None => {
            let mood = tense.mood.as_deref().unwrap_or("");
            let name = tense
                .tense
                .clone()
                .unwrap_or_else(|| index.to_string());
            slugify(&format!("{}-{}", mood, name))
        }
    }
}

pub fn tense_label(tense: &TenseData) -> String {
    match &tense.label {
        Some(label) => label.clone(),
        None => format!(
            "{} {}",
            tense.mood.as_deref().unwrap_or(""),
            tense.tense.as_deref().unwrap_or("")
        )
        .trim()
        .to_string(),
    }
}

/// All registered cards in first-registration order
#[derive(Debug, Default)]
pub struct CardRegistry {
    cards: IndexMap<String, Card>,
}

impl CardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert every card derived from `verb`.
    ///
    /// Cards of `verb_id` that the new data no longer produces are dropped.
    /// Returns the number of cards derived from this verb.
    pub fn upsert_verb(&mut self, verb_id: &str, verb: &VerbData) -> usize {
        let infinitive = strip_brackets(&verb.infinitive);
        let mut produced = HashSet::new();

        for (tense_index, tense) in verb.tenses.iter().enumerate() {
            let tense_id = tense_id(tense, tense_index);
            let tense_label = tense_label(tense);

            for (form_index, form) in tense.forms.iter().enumerate() {
                let id = card_id(verb_id, &tense_id, form.pronoun.as_deref(), form_index);
                let (stem, ending, tail) = parse_form(&form.form);

                let card = Card {
                    card_id: id.clone(),
                    verb_id: verb_id.to_string(),
                    infinitive: infinitive.clone(),
                    raw_infinitive: verb.infinitive.clone(),
                    tense_id: tense_id.clone(),
                    tense_label: tense_label.clone(),
                    description: tense.description.clone(),
                    verb_family: verb.metadata.family.clone(),
                    emoji: verb.emoji.clone(),
                    pronoun: form.pronoun.clone().unwrap_or_default(),
                    stem,
                    ending,
                    tail,
                    full_form: form.form.clone(),
                    context_ru: form.ru.trim().to_string(),
                    context_eng: form.eng.trim().to_string(),
                };

                self.cards.insert(id.clone(), card);
                produced.insert(id);
            }
        }

        self.cards
            .retain(|id, card| card.verb_id != verb_id || produced.contains(id));

        produced.len()
    }

    pub fn get(&self, card_id: &str) -> Option<&Card> {
        self.cards.get(card_id)
    }

    pub fn contains(&self, card_id: &str) -> bool {
        self.cards.contains_key(card_id)
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Distinct tenses as `(tense_id, label)`, sorted by label
    pub fn tense_catalog(&self) -> Vec<(String, String)> {
        let mut catalog: IndexMap<&str, &str> = IndexMap::new();
        for card in self.cards.values() {
            catalog
                .entry(card.tense_id.as_str())
                .or_insert(card.tense_label.as_str());
        }

        let mut entries: Vec<(String, String)> = catalog
            .into_iter()
            .map(|(id, label)| {
                let label = if label.is_empty() { id } else { label };
                (id.to_string(), label.to_string())
            })
            .collect();
        entries.sort_by_key(|(_, label)| label.to_lowercase());
        entries
    }
}
