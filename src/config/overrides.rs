//! Environment variable overrides for configuration.

use crate::errors::Error;

use super::env_parser::{apply_float_override, apply_path_override, apply_usize_override};
use super::Config;

#[cfg(test)]
use super::tests_utils::{cleanup_env_vars, CONFIG_ENV_VARS, ENV_MUTEX};

/// Apply `QUIZDUP_*` environment variable overrides to configuration.
pub fn apply_env_overrides(config: &mut Config) -> Result<(), Error> {
    apply_path_override("QUIZDUP_DATABASE_PATH", &mut config.database_path)?;
    apply_path_override("QUIZDUP_QUESTIONS_PATH", &mut config.questions_path)?;
    apply_float_override(
        "QUIZDUP_DUPLICATE_THRESHOLD",
        &mut config.duplicate_threshold,
    )?;
    apply_float_override("QUIZDUP_SIMILAR_THRESHOLD", &mut config.similar_threshold)?;
    apply_float_override("QUIZDUP_WEIGHT_CONTENT", &mut config.weights.content)?;
    apply_float_override(
        "QUIZDUP_WEIGHT_EXPLANATION",
        &mut config.weights.explanation,
    )?;
    apply_float_override("QUIZDUP_WEIGHT_ANSWER", &mut config.weights.answer)?;
    apply_usize_override("QUIZDUP_SEED_USED_COUNT", &mut config.seed_used_count)?;
    Ok(())
}
