use std::io::{self, BufRead, Write};

use anyhow::Result;
use chrono::Utc;

use crate::app::App;
use crate::render::terminal::{self, paint, Color};

/// What the learner typed at the prompt
#[derive(Debug, PartialEq)]
enum Reply {
    Quit,
    Hints,
    Answer(String),
}

/// Blank input asks for hints, `:q` quits, `1`..`n` picks a shown hint
fn parse_reply(line: &str, suggestions: &[String], hints_shown: bool) -> Reply {
    let trimmed = line.trim();
    if trimmed == ":q" {
        return Reply::Quit;
    }
    if trimmed.is_empty() {
        return Reply::Hints;
    }

    if hints_shown {
        if let Ok(index) = trimmed.parse::<usize>() {
            if let Some(ending) = index.checked_sub(1).and_then(|i| suggestions.get(i)) {
                return Reply::Answer(ending.clone());
            }
        }
    }

    Reply::Answer(trimmed.to_string())
}

fn prompt(stdin: &mut impl BufRead) -> Result<Option<String>> {
    print!("> ");
    io::stdout().flush()?;

    let mut line = String::new();
    if stdin.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Interactive training loop on stdin/stdout
pub fn run(app: &mut App, use_color: bool) -> Result<()> {
    if !app.engine.has_cards() {
        println!("{}", app.no_cards_message());
        return Ok(());
    }

    app.engine.reset_queue();
    println!("{}", terminal::render_summary(&app.engine.summary(), use_color));
    println!(
        "{}",
        paint("Type the ending or the full form. Empty line shows hints, :q quits.", Color::DIM, use_color)
    );

    let stdin = io::stdin();
    let mut stdin = stdin.lock();

    loop {
        let presented = match app.engine.next_card() {
            Some(presented) => presented,
            None => {
                println!("No cards due right now. Come back later.");
                break;
            }
        };

        println!();
        println!(
            "{}",
            terminal::render_prompt(&presented, app.config.example_language, use_color)
        );
        println!("  {}", terminal::render_preview(&presented.stats, use_color));

        let mut hints_shown = false;
        let answer = loop {
            let Some(line) = prompt(&mut stdin)? else {
                return Ok(());
            };

            match parse_reply(&line, &presented.suggestions, hints_shown) {
                Reply::Quit => {
                    println!("{}", terminal::render_summary(&app.engine.summary(), use_color));
                    return Ok(());
                }
                Reply::Hints => {
                    println!(
                        "  {}",
                        terminal::render_suggestions(&presented.suggestions, use_color)
                    );
                    hints_shown = true;
                }
                Reply::Answer(answer) => break answer,
            }
        };

        let evaluation = app.engine.evaluate(&presented.card, &answer);
        let stat = app.engine.stat(&presented.card.card_id);
        println!(
            "{}",
            terminal::render_feedback(&evaluation, &stat, Utc::now(), use_color)
        );
        println!("{}", terminal::render_summary(&app.engine.summary(), use_color));
    }

    Ok(())
}
