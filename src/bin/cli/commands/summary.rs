use anyhow::Result;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let summary = app.engine.summary();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "totalCount": summary.total_count,
                "dueCount": summary.due_count,
                "accuracy": summary.accuracy,
                "excludedTenses": app.engine.excluded_tenses(),
                "dataDir": app.data_dir.to_string_lossy(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if !app.engine.has_cards() {
                println!("{}", app.no_cards_message());
                return Ok(());
            }
            println!("{}", terminal::render_summary(&summary, use_color));
        }
    }

    Ok(())
}
