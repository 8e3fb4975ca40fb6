//! Configuration file loading and parsing.

use crate::errors::Error;
use crate::finder::{DEFAULT_DUPLICATE_THRESHOLD, DEFAULT_SIMILAR_THRESHOLD};
use crate::similarity::FieldWeights;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::DEFAULT_SEED_USED_COUNT;

/// Configuration loaded from TOML file.
#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub database_path: PathBuf,

    #[serde(default)]
    pub questions_path: PathBuf,

    #[serde(default = "default_duplicate_threshold")]
    pub duplicate_threshold: f64,

    #[serde(default = "default_similar_threshold")]
    pub similar_threshold: f64,

    #[serde(default)]
    pub weights: FieldWeights,

    #[serde(default = "default_seed_used_count")]
    pub seed_used_count: usize,
}

fn default_duplicate_threshold() -> f64 {
    DEFAULT_DUPLICATE_THRESHOLD
}

fn default_similar_threshold() -> f64 {
    DEFAULT_SIMILAR_THRESHOLD
}

fn default_seed_used_count() -> usize {
    DEFAULT_SEED_USED_COUNT
}

/// Load configuration from `$CONFIG_DIR/quizdup/config.toml`, if present.
pub fn load_from_file() -> Result<Option<ConfigFile>, Error> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let config_dir = dirs::config_dir().unwrap_or_else(|| home.join(".config"));

    load_from_path(&config_dir.join("quizdup/config.toml"))
}

/// Load configuration from a TOML file; `None` if the file does not exist.
pub fn load_from_path(config_path: &Path) -> Result<Option<ConfigFile>, Error> {
    if !config_path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(config_path).map_err(|e| {
        Error::Config(format!(
            "Failed to read config file {}: {e}",
            config_path.display()
        ))
    })?;

    let config: ConfigFile = toml::from_str(&content).map_err(|e| {
        Error::Config(format!(
            "Failed to parse config file {}: {e}",
            config_path.display()
        ))
    })?;

    Ok(Some(config))
}
