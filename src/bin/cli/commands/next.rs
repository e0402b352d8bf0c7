use anyhow::Result;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

/// Print the card the scheduler would present next, without answering it
pub fn run(app: &mut App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let presented = app.engine.next_card();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&presented)?);
        }
        OutputFormat::Plain => match presented {
            Some(presented) => {
                println!(
                    "{}",
                    terminal::render_prompt(&presented, app.config.example_language, use_color)
                );
                println!(
                    "  {}",
                    terminal::render_suggestions(&presented.suggestions, use_color)
                );
            }
            None if !app.engine.has_cards() => println!("{}", app.no_cards_message()),
            None => println!("No cards due right now."),
        },
    }

    Ok(())
}
