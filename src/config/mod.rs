//! Configuration system for quizdup.

mod env_parser;
mod loader;
mod overrides;
mod paths;
mod validation;

#[cfg(test)]
mod tests_utils;
#[cfg(test)]
use tests_utils::ENV_MUTEX;

use crate::errors::Error;
use crate::finder::{DEFAULT_DUPLICATE_THRESHOLD, DEFAULT_SIMILAR_THRESHOLD};
use crate::similarity::FieldWeights;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use loader::ConfigFile;

/// Number of leading questions flagged as used when seeding the store.
pub const DEFAULT_SEED_USED_COUNT: usize = 8;

/// Configuration values with priority: defaults < config file < env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path to the SQLite question store.
    #[serde(default)]
    pub database_path: PathBuf,

    /// Path to the JSON question collection.
    #[serde(default)]
    pub questions_path: PathBuf,

    /// Content similarity at or above which a question duplicates a used one.
    #[serde(default)]
    pub duplicate_threshold: f64,

    /// Minimum overall score for similar-question search and reports.
    #[serde(default)]
    pub similar_threshold: f64,

    /// Field weights for the overall score.
    #[serde(default)]
    pub weights: FieldWeights,

    /// Questions flagged as used by `init`.
    #[serde(default)]
    pub seed_used_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        // Use home directory with sensible fallback for systems without HOME
        let home = dirs::home_dir().unwrap_or_else(|| {
            std::env::var("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
        });
        let quizdup_dir = home.join(".quizdup");

        Self {
            database_path: quizdup_dir.join("questions.db"),
            questions_path: quizdup_dir.join("questions.json"),
            duplicate_threshold: DEFAULT_DUPLICATE_THRESHOLD,
            similar_threshold: DEFAULT_SIMILAR_THRESHOLD,
            weights: FieldWeights::default(),
            seed_used_count: DEFAULT_SEED_USED_COUNT,
        }
    }
}

impl Config {
    /// Load configuration with defaults, file values, and environment overrides.
    pub fn load() -> Result<Self, Error> {
        Self::load_with(loader::load_from_file()?)
    }

    /// Load configuration from an explicit TOML file plus environment overrides.
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        Self::load_with(loader::load_from_path(path)?)
    }

    fn load_with(file_config: Option<ConfigFile>) -> Result<Self, Error> {
        let mut config = Config::default();

        if let Some(mut file) = file_config {
            paths::expand_tilde(&mut file.database_path);
            paths::expand_tilde(&mut file.questions_path);
            config.merge_from_file(file);
        }

        overrides::apply_env_overrides(&mut config)?;

        config.validate()?;

        Ok(config)
    }

    /// Merge configuration from a file into this config.
    fn merge_from_file(&mut self, file: ConfigFile) {
        if !file.database_path.as_os_str().is_empty() {
            self.database_path = file.database_path;
        }
        if !file.questions_path.as_os_str().is_empty() {
            self.questions_path = file.questions_path;
        }
        self.duplicate_threshold = file.duplicate_threshold;
        self.similar_threshold = file.similar_threshold;
        self.weights = file.weights;
        self.seed_used_count = file.seed_used_count;
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), Error> {
        let validator = validation::ConfigValidator {
            database_path: self.database_path.clone(),
            questions_path: self.questions_path.clone(),
            duplicate_threshold: self.duplicate_threshold,
            similar_threshold: self.similar_threshold,
            weights: self.weights,
        };

        validator.validate()
    }

    /// Ensure parent directories for the database and collection exist.
    pub fn ensure_directories(&self) -> Result<(), Error> {
        for path in [&self.database_path, &self.questions_path] {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        Error::Config(format!(
                            "Failed to create directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
            }
        }

        Ok(())
    }
}
