//! Interval ladder scheduling and text normalization
//!
//! A card climbs one rung of the ladder per correct answer and drops back to
//! the bottom on a mistake:
//!
//! | stage | next review |
//! |-------|-------------|
//! | 0     | immediately |
//! | 1     | 1 minute    |
//! | 2     | 5 minutes   |
//! | 3     | 25 minutes  |
//! | 4     | 4 hours     |
//! | 5     | 24 hours    |
//!
//! A wrong answer schedules a retry after 30 seconds.

use std::sync::OnceLock;

use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::models::ReviewStat;

/// Review delay per stage, in milliseconds
pub const INTERVALS_MS: [i64; 6] = [
    0,
    60 * 1000,
    5 * 60 * 1000,
    25 * 60 * 1000,
    4 * 60 * 60 * 1000,
    24 * 60 * 60 * 1000,
];

/// Delay before a failed card comes back, in milliseconds
pub const RETRY_INTERVAL_MS: i64 = 30 * 1000;

/// Highest reachable stage
pub const MAX_STAGE: usize = INTERVALS_MS.len() - 1;

/// Delay for a given stage; out-of-range stages use the top rung
pub fn interval_for_stage(stage: usize) -> Duration {
    Duration::milliseconds(INTERVALS_MS[stage.min(MAX_STAGE)])
}

/// Apply one answer to a review state
pub fn apply_answer(stat: &mut ReviewStat, correct: bool, now: DateTime<Utc>) {
    if correct {
        stat.correct += 1;
        stat.streak += 1;
        stat.stage = (stat.stage + 1).min(MAX_STAGE);
        stat.due = now + interval_for_stage(stat.stage);
    } else {
        stat.incorrect += 1;
        stat.streak = 0;
        stat.stage = 0;
        stat.due = now + Duration::milliseconds(RETRY_INTERVAL_MS);
    }

    stat.last_review = Some(now);
}

/// Preview of the delays a correct and a wrong answer would give
pub fn preview_intervals(stat: &ReviewStat) -> [Duration; 2] {
    [
        interval_for_stage(stat.stage + 1),
        Duration::milliseconds(RETRY_INTERVAL_MS),
    ]
}

/// Decompose `prefix[marked]suffix` into `(stem, ending, tail)`.
///
/// Without a bracketed span the whole string is the stem.
pub fn parse_form(form: &str) -> (String, String, String) {
    static FORM_PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = FORM_PATTERN.get_or_init(|| Regex::new(r"^(.*)\[(.*)\](.*)$").unwrap());

    match pattern.captures(form) {
        Some(caps) => (
            caps[1].to_string(),
            caps[2].to_string(),
            caps[3].to_string(),
        ),
        None => (form.to_string(), String::new(), String::new()),
    }
}

pub fn strip_brackets(text: &str) -> String {
    text.chars().filter(|c| *c != '[' && *c != ']').collect()
}

fn strip_diacritics(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd().filter(|c| !is_combining_mark(*c))
}

/// Lower-case ASCII slug: accents dropped, other runs collapsed to `-`
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;

    for c in strip_diacritics(value).flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Canonical form used to compare answers
pub fn normalize_answer(value: &str) -> String {
    let stripped: String = strip_diacritics(value)
        .filter(|c| *c != '\'' && *c != '\u{2019}')
        .collect();
    stripped.trim().to_lowercase()
}

/// Format a delay to a short human-readable string
pub fn format_interval(delay: Duration) -> String {
    let seconds = delay.num_seconds();
    if seconds <= 0 {
        "now".to_string()
    } else if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 60 * 60 {
        format!("{}m", seconds / 60)
    } else if seconds < 24 * 60 * 60 {
        format!("{}h", seconds / (60 * 60))
    } else {
        format!("{}d", seconds / (24 * 60 * 60))
    }
}
