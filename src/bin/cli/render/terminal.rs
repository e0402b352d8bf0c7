use chrono::{DateTime, Utc};

use verbos_lib::training::algorithm::{format_interval, preview_intervals};
use verbos_lib::training::{Evaluation, ExampleLanguage, PresentedCard, ReviewStat, Summary};

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const UNDERLINE: &str = "\x1b[4m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Header, blanked form and example sentence for a card
pub fn render_prompt(presented: &PresentedCard, language: ExampleLanguage, use_color: bool) -> String {
    let card = &presented.card;
    let mut lines = Vec::new();

    let mut header = String::new();
    if !card.emoji.is_empty() {
        header.push_str(&card.emoji);
        header.push(' ');
    }
    header.push_str(&paint(&card.infinitive, Color::BOLD, use_color));
    if !card.tense_label.is_empty() {
        header.push_str(" · ");
        header.push_str(&card.tense_label);
    }
    lines.push(header);

    let blank = "_".repeat(card.ending.chars().count().max(3));
    let mut form = String::new();
    if !card.pronoun.is_empty() {
        form.push_str(&paint(&card.pronoun, Color::CYAN, use_color));
        form.push(' ');
    }
    form.push_str(&card.stem);
    form.push_str(&paint(&blank, Color::UNDERLINE, use_color));
    form.push_str(&card.tail);
    lines.push(format!("  {}", form));

    let example = card.example(language);
    if !example.is_empty() {
        lines.push(format!("  {}", paint(example, Color::GRAY, use_color)));
    }

    lines.join("\n")
}

/// Numbered hint list, e.g. `[1] as  [2] o  [3] a`
pub fn render_suggestions(suggestions: &[String], use_color: bool) -> String {
    if suggestions.is_empty() {
        return paint("(no hints for this card)", Color::DIM, use_color);
    }

    suggestions
        .iter()
        .enumerate()
        .map(|(i, ending)| format!("[{}] {}", i + 1, ending))
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn render_feedback(
    evaluation: &Evaluation,
    stat: &ReviewStat,
    now: DateTime<Utc>,
    use_color: bool,
) -> String {
    let verdict = if evaluation.correct {
        paint(&format!("Correct! {}", evaluation.full_form), Color::GREEN, use_color)
    } else {
        paint(
            &format!("Incorrect. Correct form: {}", evaluation.full_form),
            Color::RED,
            use_color,
        )
    };

    let next = format!(
        "next review in {} · streak {}",
        format_interval(stat.due - now),
        stat.streak
    );
    format!("{}  {}", verdict, paint(&next, Color::DIM, use_color))
}

/// Delays each outcome would give, e.g. `correct → 5m · wrong → 30s`
pub fn render_preview(stat: &ReviewStat, use_color: bool) -> String {
    let [good, again] = preview_intervals(stat);
    let line = format!(
        "correct → {} · wrong → {}",
        format_interval(good),
        format_interval(again)
    );
    paint(&line, Color::DIM, use_color)
}

pub fn format_accuracy(accuracy: Option<f64>) -> String {
    match accuracy {
        Some(value) => format!("{:.0}%", value * 100.0),
        None => "—".to_string(),
    }
}

pub fn render_summary(summary: &Summary, use_color: bool) -> String {
    format!(
        "{} cards · {} due · accuracy {}",
        summary.total_count,
        paint(&summary.due_count.to_string(), Color::YELLOW, use_color),
        format_accuracy(summary.accuracy)
    )
}
