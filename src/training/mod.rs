//! Conjugation training engine
//!
//! This module provides:
//! - Card registry (verb documents flattened into verb/tense/pronoun cards)
//! - Interval ladder spaced repetition
//! - Tense exclusion filter
//! - Session scheduling with balanced review batches
//! - Multiple-guess ending suggestions
//! - Answer evaluation

pub mod algorithm;
pub mod engine;
pub mod evaluator;
pub mod filter;
pub mod models;
pub mod registry;
pub mod scheduler;
pub mod stats;
pub mod suggestions;

pub use engine::{TrainingEngine, DEFAULT_STORAGE_KEY};
pub use models::*;
