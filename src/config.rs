//! Trainer configuration, read from `{data_dir}/config.toml`
//!
//! ```toml
//! storageKey = "losVerbos-srs-v1"
//! verbsDir = "/home/me/verbos/data"
//! exampleLanguage = "eng"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::training::{ExampleLanguage, DEFAULT_STORAGE_KEY};

pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerConfig {
    /// Key under which review stats are persisted
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Directory of verb JSON files, one file per verb
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbs_dir: Option<PathBuf>,
    #[serde(default)]
    pub example_language: ExampleLanguage,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            verbs_dir: None,
            example_language: ExampleLanguage::default(),
        }
    }
}

impl TrainerConfig {
    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE_NAME)
    }

    /// Load the config from a data directory; a missing file gives defaults
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = Self::path_in(data_dir);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: TrainerConfig = toml::from_str(&content)?;
        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }
}
