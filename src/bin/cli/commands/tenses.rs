use anyhow::Result;

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let catalog = app.engine.tense_catalog();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = catalog
                .iter()
                .map(|(id, label)| {
                    serde_json::json!({
                        "id": id,
                        "label": label,
                        "excluded": app.engine.is_excluded(id),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if catalog.is_empty() {
                println!("No tenses registered.");
                return Ok(());
            }

            let max_id_len = catalog.iter().map(|(id, _)| id.len()).max().unwrap_or(2).max(2);

            for (id, label) in &catalog {
                if app.engine.is_excluded(id) {
                    let line = format!("[ ] {:<width$}  {}", id, label, width = max_id_len);
                    println!("{}", paint(&line, Color::DIM, use_color));
                } else {
                    println!("[x] {:<width$}  {}", id, label, width = max_id_len);
                }
            }

            let excluded = catalog.iter().filter(|(id, _)| app.engine.is_excluded(id)).count();
            println!("\n{} tenses, {} excluded", catalog.len(), excluded);
        }
    }

    Ok(())
}
