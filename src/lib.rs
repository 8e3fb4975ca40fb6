//! quizdup - Detect duplicate and similar quiz questions.
//!
//! Questions are compared field by field with a sequence-matching ratio
//! (the same measure as Python's `difflib.SequenceMatcher.ratio`), and the
//! field scores are combined with configurable weights.
//! All operations are synchronous.
//!
//! # Example
//!
//! ```no_run
//! use quizdup::{check_duplicate, Config, Database, DuplicateOptions};
//!
//! let config = Config::load().expect("Failed to load config");
//! let db = Database::open_existing(&config.database_path).expect("Store not initialized");
//! let used = db.used_questions().expect("Failed to read store");
//!
//! let report = check_duplicate("What is ownership in Rust?", &used, &DuplicateOptions::default());
//! if report.is_duplicate {
//!     for m in &report.matches {
//!         println!("{:.4}: [{}] {}", m.similarity, m.id, m.content);
//!     }
//! }
//! ```

pub mod config;
pub mod errors;
pub mod finder;
pub mod import;
pub mod question;
pub mod similarity;
pub mod sqlite;

// Re-export public API
pub use config::Config;
pub use errors::Error;
pub use finder::{
    check_duplicate, compare_one, compare_pairs, find_similar_questions, DuplicateMatch,
    DuplicateOptions, DuplicateReport, PairReport, RankedMatch, SimilarOptions,
};
pub use question::{Question, StoredQuestion, UsedQuestion};
pub use similarity::{question_similarity, string_similarity, FieldWeights, SimilarityBundle};
pub use sqlite::Database;
