use anyhow::Result;

use crate::app::App;

pub fn run(app: &mut App, yes: bool) -> Result<()> {
    if !yes {
        println!("This erases all review statistics. Re-run with --yes to confirm.");
        return Ok(());
    }

    app.engine.reset_stats();
    println!("Statistics reset. Start a new session with `verbos-cli train`.");
    Ok(())
}
