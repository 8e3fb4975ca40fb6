//! Shared test utilities for config module tests.

use std::sync::Mutex;

/// Mutex to serialize environment variable tests and prevent race conditions.
pub static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Environment variables read by `Config::load`.
pub const CONFIG_ENV_VARS: &[&str] = &[
    "QUIZDUP_DATABASE_PATH",
    "QUIZDUP_QUESTIONS_PATH",
    "QUIZDUP_DUPLICATE_THRESHOLD",
    "QUIZDUP_SIMILAR_THRESHOLD",
    "QUIZDUP_WEIGHT_CONTENT",
    "QUIZDUP_WEIGHT_EXPLANATION",
    "QUIZDUP_WEIGHT_ANSWER",
    "QUIZDUP_SEED_USED_COUNT",
];

/// Clean up environment variables used by quizdup config.
pub fn cleanup_env_vars(vars: &[&str]) {
    for var in vars {
        // SAFETY: callers hold ENV_MUTEX
        unsafe { std::env::remove_var(var) };
    }
}
