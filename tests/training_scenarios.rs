//! End-to-end training scenarios through the public engine API.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

use verbos_lib::storage::{FileStorage, KeyValueStore, MemoryStorage};
use verbos_lib::training::algorithm::MAX_STAGE;
use verbos_lib::training::{TrainingEngine, VerbData, DEFAULT_STORAGE_KEY};

fn now() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(1_750_000_000_000).unwrap()
}

fn seeded(store: Box<dyn KeyValueStore>, seed: u64) -> TrainingEngine {
    TrainingEngine::with_rng(store, DEFAULT_STORAGE_KEY, Box::new(StdRng::seed_from_u64(seed)))
}

fn hablar() -> VerbData {
    serde_json::from_str(
        r#"{
            "infinitive": "habl[ar]",
            "tenses": [
                { "id": "pres-ind", "forms": [
                    { "pronoun": "yo", "form": "habl[a]" },
                    { "pronoun": "tú", "form": "habl[as]" }
                ] }
            ]
        }"#,
    )
    .unwrap()
}

fn family_verb(stem: &str) -> VerbData {
    serde_json::from_str(&format!(
        r#"{{
            "infinitive": "{stem}[ar]",
            "metadata": {{ "family": "regular-ar" }},
            "tenses": [
                {{ "mood": "Indicativo", "tense": "Presente", "forms": [
                    {{ "pronoun": "yo", "form": "{stem}[o]" }},
                    {{ "pronoun": "tú", "form": "{stem}[as]" }},
                    {{ "pronoun": "él", "form": "{stem}[a]" }}
                ] }},
                {{ "mood": "Indicativo", "tense": "Pretérito", "forms": [
                    {{ "pronoun": "yo", "form": "{stem}[é]" }},
                    {{ "pronoun": "tú", "form": "{stem}[aste]" }}
                ] }}
            ]
        }}"#
    ))
    .unwrap()
}

#[test]
fn test_basic_answer_flow() {
    let mut engine = seeded(Box::new(MemoryStorage::new()), 11);
    engine.register_verb_at("hablar", &hablar(), now());

    let presented = engine.next_card_at(now()).unwrap();
    assert_eq!(presented.card.stem, "habl");
    assert_eq!(presented.card.tail, "");
    assert!(["a", "as"].contains(&presented.card.ending.as_str()));

    let right = engine.evaluate_at(&presented.card, &presented.card.ending, now());
    assert!(right.correct);

    let wrong = engine.evaluate_at(&presented.card, "x", now());
    assert!(!wrong.correct);
    assert_eq!(engine.stat(&presented.card.card_id).stage, 0);
}

#[test]
fn test_excluding_only_tense() {
    let mut engine = seeded(Box::new(MemoryStorage::new()), 1);
    engine.register_verb_at("hablar", &hablar(), now());

    engine.set_excluded_tenses(["pres-ind"]);

    assert!(!engine.has_cards());
    assert!(engine.next_card_at(now()).is_none());
}

#[test]
fn test_reset_makes_everything_due() {
    let mut engine = seeded(Box::new(MemoryStorage::new()), 2);
    engine.register_verb_at("hablar", &hablar(), now());
    let card = engine.next_card_at(now()).unwrap().card;
    engine.evaluate_at(&card, &card.ending, now());

    engine.reset_stats();

    let summary = engine.summary_at(now());
    assert_eq!(summary.accuracy, None);
    assert_eq!(summary.due_count, summary.total_count);
    assert_eq!(summary.total_count, 2);
}

#[test]
fn test_stage_stays_in_ladder() {
    let mut engine = seeded(Box::new(MemoryStorage::new()), 3);
    engine.register_verb_at("hablar", &hablar(), now());

    let mut clock = now();
    let mut previous_due = clock;
    for _ in 0..12 {
        let stat = engine.record_answer_at("hablar::pres-ind::yo", true, clock);
        assert!(stat.stage <= MAX_STAGE);
        assert!(stat.due >= previous_due);
        previous_due = stat.due;
        clock = clock + Duration::seconds(1);
    }
    assert_eq!(engine.stat("hablar::pres-ind::yo").stage, MAX_STAGE);
}

#[test]
fn test_suggestions_pool_across_family() {
    let mut engine = seeded(Box::new(MemoryStorage::new()), 4);
    engine.register_verb_at("hablar", &family_verb("habl"), now());
    engine.register_verb_at("cantar", &family_verb("cant"), now());
    engine.set_excluded_tenses(["Indicativo Pretérito"]);

    for _ in 0..8 {
        let presented = engine.next_card_at(now()).unwrap();
        assert_eq!(presented.card.tense_id, "indicativo-presente");

        let mut suggestions = presented.suggestions.clone();
        suggestions.sort();
        assert_eq!(suggestions, vec!["a", "as", "o"]);
    }
}

#[test]
fn test_first_card_of_new_batch_avoids_last_verb() {
    let mut engine = seeded(Box::new(MemoryStorage::new()), 5);
    engine.register_verb_at("hablar", &family_verb("habl"), now());
    engine.register_verb_at("cantar", &family_verb("cant"), now());

    // Batches of two distinct verbs; each new batch starts away from the last verb
    let mut last_verb: Option<String> = None;
    for round in 0..10 {
        let first = engine.next_card_at(now()).unwrap();
        let second = engine.next_card_at(now()).unwrap();

        if let Some(last) = &last_verb {
            assert_ne!(&first.card.verb_id, last, "round {}", round);
        }
        assert_ne!(first.card.verb_id, second.card.verb_id);
        last_verb = Some(second.card.verb_id.clone());
    }
}

#[test]
fn test_same_seed_gives_same_order() {
    let run = |seed| {
        let mut engine = seeded(Box::new(MemoryStorage::new()), seed);
        engine.register_verb_at("hablar", &family_verb("habl"), now());
        engine.register_verb_at("cantar", &family_verb("cant"), now());
        (0..6)
            .map(|_| engine.next_card_at(now()).unwrap().card.card_id)
            .collect::<Vec<_>>()
    };

    assert_eq!(run(99), run(99));
}

#[test]
fn test_file_storage_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().to_path_buf();

    {
        let mut engine = seeded(Box::new(FileStorage::new(data_dir.clone())), 6);
        engine.register_verb_at("hablar", &hablar(), now());
        engine.record_answer_at("hablar::pres-ind::tu", true, now());
        engine.record_answer_at("hablar::pres-ind::tu", false, now());
        engine.set_excluded_tenses(["imperativo"]);
    }

    let mut engine = seeded(Box::new(FileStorage::new(data_dir)), 7);
    engine.register_verb_at("hablar", &hablar(), now());

    let stat = engine.stat("hablar::pres-ind::tu");
    assert_eq!(stat.correct, 1);
    assert_eq!(stat.incorrect, 1);
    assert_eq!(stat.last_review, Some(now()));
    assert_eq!(engine.excluded_tenses(), vec!["imperativo"]);
    assert_eq!(engine.summary_at(now()).accuracy, Some(0.5));
}

#[test]
fn test_stats_of_every_verb_survive_restart() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().to_path_buf();
    let verbs = || vec![("cantar", family_verb("cant")), ("hablar", family_verb("habl"))];

    {
        let mut engine = seeded(Box::new(FileStorage::new(data_dir.clone())), 12);
        engine.register_verbs_at(verbs(), now());
        engine.record_answer_at("hablar::indicativo-presente::yo", true, now());
    }

    let mut engine = seeded(Box::new(FileStorage::new(data_dir)), 13);
    engine.register_verbs_at(verbs(), now());

    let stat = engine.stat("hablar::indicativo-presente::yo");
    assert_eq!(stat.correct, 1);
    assert_eq!(stat.stage, 1);
    assert_eq!(engine.summary_at(now()).total_count, 10);
}

#[test]
fn test_corrupt_storage_is_ignored() {
    let store = Arc::new(MemoryStorage::new());
    store.save(DEFAULT_STORAGE_KEY, "{\"truncated\": {\"stage\":").unwrap();
    store
        .save(&format!("{}-excluded", DEFAULT_STORAGE_KEY), "\"pres-ind\"")
        .unwrap();

    let mut engine = seeded(Box::new(store), 8);
    engine.register_verb_at("hablar", &hablar(), now());

    assert!(engine.excluded_tenses().is_empty());
    let summary = engine.summary_at(now());
    assert_eq!(summary.total_count, 2);
    assert_eq!(summary.accuracy, None);
}

/// Storage that refuses every operation
struct BrokenStorage;

impl KeyValueStore for BrokenStorage {
    fn load(&self, _key: &str) -> verbos_lib::storage::Result<Option<String>> {
        Err(verbos_lib::storage::StorageError::Unavailable("offline".into()))
    }

    fn save(&self, _key: &str, _value: &str) -> verbos_lib::storage::Result<()> {
        Err(verbos_lib::storage::StorageError::Unavailable("quota exceeded".into()))
    }

    fn remove(&self, _key: &str) -> verbos_lib::storage::Result<()> {
        Err(verbos_lib::storage::StorageError::Unavailable("offline".into()))
    }
}

#[test]
fn test_storage_failures_keep_memory_state() {
    let mut engine = seeded(Box::new(BrokenStorage), 9);
    engine.register_verb_at("hablar", &hablar(), now());
    engine.set_excluded_tenses(["otro"]);

    let stat = engine.record_answer_at("hablar::pres-ind::yo", true, now());
    assert_eq!(stat.stage, 1);
    assert_eq!(engine.stat("hablar::pres-ind::yo").stage, 1);
    assert_eq!(engine.excluded_tenses(), vec!["otro"]);

    engine.reset_stats();
    assert_eq!(engine.summary_at(now()).accuracy, None);
}

#[test]
fn test_engine_can_be_shared_behind_a_mutex() {
    let engine = Arc::new(Mutex::new(seeded(Box::new(MemoryStorage::new()), 10)));
    engine.lock().unwrap().register_verb_at("hablar", &hablar(), now());

    let worker = {
        let engine = Arc::clone(&engine);
        std::thread::spawn(move || engine.lock().unwrap().next_card_at(now()).is_some())
    };

    assert!(worker.join().unwrap());
}
