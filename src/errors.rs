//! Error types for quizdup.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for quizdup operations.
///
/// The similarity engine and match finder are total and never produce these;
/// they come from the store, file I/O, configuration and the CLI layer.
#[derive(Error, Debug)]
pub enum Error {
    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// The question database has not been created yet.
    #[error("Question store not initialized: {0} (run `quizdup init` first)")]
    StoreNotInitialized(PathBuf),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// SQLite error.
    #[error("SQLite error: {0}")]
    SQLite(#[from] rusqlite::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Field weights that cannot form a weighted average.
    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    /// Empty or whitespace-only question content.
    #[error("Question content cannot be empty")]
    EmptyInput,

    /// Stored question not found.
    #[error("Question not found: {0}")]
    NotFound(i64),
}
