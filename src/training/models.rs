//! Data models for the conjugation trainer

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ==================== Source data ====================

/// One verb as supplied by the host, typically parsed from a JSON file.
///
/// Every field is optional on the wire; values of the wrong type degrade to
/// empty rather than failing the whole document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VerbData {
    #[serde(deserialize_with = "lenient_string")]
    pub infinitive: String,
    #[serde(deserialize_with = "lenient_string")]
    pub emoji: String,
    #[serde(deserialize_with = "lenient_default")]
    pub metadata: VerbMetadata,
    #[serde(deserialize_with = "lenient_vec")]
    pub tenses: Vec<TenseData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VerbMetadata {
    /// Grouping tag shared by verbs with the same conjugation pattern
    #[serde(deserialize_with = "lenient_string")]
    pub family: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TenseData {
    #[serde(deserialize_with = "lenient_opt_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub mood: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub tense: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub label: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_vec")]
    pub forms: Vec<FormData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FormData {
    #[serde(deserialize_with = "lenient_opt_string")]
    pub pronoun: Option<String>,
    /// Conjugated form with the ending in brackets, e.g. `habl[a]`
    #[serde(deserialize_with = "lenient_string")]
    pub form: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ru: String,
    #[serde(deserialize_with = "lenient_string")]
    pub eng: String,
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string).unwrap_or_default())
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

fn lenient_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Keeps element positions stable: a garbage element becomes a default one
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}

// ==================== Cards ====================

/// One atomic (verb, tense, pronoun) review item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// `{verb_id}::{tense_id}::{pronoun slug}`
    pub card_id: String,
    pub verb_id: String,
    /// Infinitive with ending brackets removed
    pub infinitive: String,
    pub raw_infinitive: String,
    pub tense_id: String,
    pub tense_label: String,
    pub description: String,
    pub verb_family: String,
    pub emoji: String,
    pub pronoun: String,
    pub stem: String,
    pub ending: String,
    pub tail: String,
    /// Source form string as supplied, brackets included
    pub full_form: String,
    pub context_ru: String,
    pub context_eng: String,
}

impl Card {
    /// The conjugated form without brackets
    pub fn composed_form(&self) -> String {
        format!("{}{}{}", self.stem, self.ending, self.tail)
    }

    /// Example sentence in the preferred language, falling back to the other one
    pub fn example(&self, language: ExampleLanguage) -> &str {
        let (primary, fallback) = match language {
            ExampleLanguage::Ru => (&self.context_ru, &self.context_eng),
            ExampleLanguage::Eng => (&self.context_eng, &self.context_ru),
        };
        if primary.trim().is_empty() {
            fallback.trim()
        } else {
            primary.trim()
        }
    }
}

/// Language of the example sentence shown next to a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExampleLanguage {
    #[default]
    Ru,
    Eng,
}

// ==================== Review state ====================

/// Spaced repetition state for a single card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStat {
    /// Index into the interval ladder
    #[serde(default)]
    pub stage: usize,
    /// When the card is due for review
    #[serde(with = "chrono::serde::ts_milliseconds", default = "Utc::now")]
    pub due: DateTime<Utc>,
    #[serde(default)]
    pub correct: u32,
    #[serde(default)]
    pub incorrect: u32,
    /// Consecutive correct answers
    #[serde(default)]
    pub streak: u32,
    #[serde(with = "chrono::serde::ts_milliseconds_option", default)]
    pub last_review: Option<DateTime<Utc>>,
}

impl ReviewStat {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            stage: 0,
            due: now,
            correct: 0,
            incorrect: 0,
            streak: 0,
            last_review: None,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due <= now
    }

    pub fn attempts(&self) -> u32 {
        self.correct + self.incorrect
    }
}

/// Counts over the cards that are currently eligible for training
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_count: usize,
    pub due_count: usize,
    /// `None` until at least one answer has been recorded
    pub accuracy: Option<f64>,
}

/// A card handed out by the scheduler, with its hints and current state
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentedCard {
    #[serde(flatten)]
    pub card: Card,
    pub suggestions: Vec<String>,
    pub stats: ReviewStat,
}

/// Outcome of checking one answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub correct: bool,
    /// `stem + ending + tail`
    pub full_form: String,
}
