mod app;
mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "verbos-cli", about = "Verb conjugation trainer", version)]
struct Cli {
    /// Data directory for stats and config (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory of verb JSON files (overrides verbsDir in config.toml)
    #[arg(long, global = true)]
    verbs: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive training session (default)
    Train,

    /// Show the next card without answering it
    Next,

    /// Card, due and accuracy counts
    Summary,

    /// List tenses and whether they are excluded
    Tenses,

    /// Exclude tenses from training
    Exclude {
        /// Tense ids or labels (case-insensitive prefix match)
        #[arg(required = true)]
        tenses: Vec<String>,
    },

    /// Include previously excluded tenses again
    Include {
        /// Tense ids or labels (case-insensitive prefix match)
        #[arg(required = true)]
        tenses: Vec<String>,
    },

    /// Erase all review statistics
    Reset {
        /// Skip the confirmation notice
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();

    let mut app = app::App::new(cli.data_dir.as_deref(), cli.verbs.as_deref())?;

    match cli.command.unwrap_or(Command::Train) {
        Command::Train => commands::train::run(&mut app, use_color)?,
        Command::Next => commands::next::run(&mut app, &cli.format, use_color)?,
        Command::Summary => commands::summary::run(&app, &cli.format, use_color)?,
        Command::Tenses => commands::tenses::run(&app, &cli.format, use_color)?,
        Command::Exclude { tenses } => commands::filter::run_exclude(&mut app, &tenses)?,
        Command::Include { tenses } => commands::filter::run_include(&mut app, &tenses)?,
        Command::Reset { yes } => commands::reset::run(&mut app, yes)?,
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}
