use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use verbos_lib::training::VerbData;
use verbos_lib::{FileStorage, TrainerConfig, TrainingEngine};

/// Shared application state for CLI commands
pub struct App {
    pub config: TrainerConfig,
    pub data_dir: PathBuf,
    pub engine: TrainingEngine,
}

impl App {
    /// Initialize from the given or default data directory and load all verbs
    pub fn new(data_dir: Option<&Path>, verbs_dir: Option<&Path>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => FileStorage::default_data_dir().context("Failed to get data directory")?,
        };

        let config = TrainerConfig::load(&data_dir).context("Failed to load config")?;

        let storage = FileStorage::new(data_dir.clone());
        storage.init().context("Failed to initialize storage")?;

        let mut engine = TrainingEngine::new(Box::new(storage), config.storage_key.clone());

        let verbs_dir = verbs_dir
            .map(Path::to_path_buf)
            .or_else(|| config.verbs_dir.clone());
        if let Some(dir) = verbs_dir {
            let count = load_verbs(&mut engine, &dir)?;
            log::info!("Loaded {} verbs from {:?}", count, dir);
        }

        Ok(Self {
            config,
            data_dir,
            engine,
        })
    }

    /// Resolve a tense by id or label (case-insensitive prefix match)
    pub fn find_tense(&self, query: &str) -> Result<String> {
        let catalog = self.engine.tense_catalog();
        let query_lower = query.trim().to_lowercase();

        // Exact match first
        if let Some((id, _)) = catalog
            .iter()
            .find(|(id, label)| *id == query_lower || label.to_lowercase() == query_lower)
        {
            return Ok(id.clone());
        }

        // Prefix match
        let matches: Vec<&(String, String)> = catalog
            .iter()
            .filter(|(id, label)| {
                id.starts_with(&query_lower) || label.to_lowercase().starts_with(&query_lower)
            })
            .collect();

        match matches.len() {
            0 => bail!(
                "No tense matching '{}'. Available tenses:\n{}",
                query,
                catalog
                    .iter()
                    .map(|(id, label)| format!("  - {} ({})", id, label))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
            1 => Ok(matches[0].0.clone()),
            _ => bail!(
                "Ambiguous tense '{}'. Matches:\n{}",
                query,
                matches
                    .iter()
                    .map(|(id, label)| format!("  - {} ({})", id, label))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }

    /// Message for when there is nothing to practice at all
    pub fn no_cards_message(&self) -> &'static str {
        if self.engine.has_registered_cards() {
            "No active tenses in the trainer. Include more tenses with `verbos-cli include`."
        } else {
            "Add verbs to start practicing (see --verbs)."
        }
    }
}

/// Register every `*.json` file in `dir`; the file stem is the verb id.
///
/// Unreadable or invalid files are logged and skipped.
pub fn load_verbs(engine: &mut TrainingEngine, dir: &Path) -> Result<usize> {
    let entries = fs::read_dir(dir).with_context(|| format!("Failed to read verbs directory {:?}", dir))?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map_or(false, |ext| ext == "json"))
        .collect();
    paths.sort();

    let mut verbs = Vec::with_capacity(paths.len());
    for path in paths {
        let verb_id = match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => stem.to_string(),
            None => continue,
        };

        let verb = fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|content| serde_json::from_str::<VerbData>(&content).map_err(Into::into));

        match verb {
            Ok(verb) => verbs.push((verb_id, verb)),
            Err(e) => log::warn!("Skipping verb file {:?}: {}", path, e),
        }
    }

    // One registration pass, so stats of later files survive the stale-stat sweep
    let count = verbs.len();
    engine.register_verbs(verbs);
    Ok(count)
}
