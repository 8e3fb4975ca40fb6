//! Question collection I/O: the JSON collection file and CSV batch imports.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::Error;
use crate::question::Question;

/// Header names accepted for the question text, in priority order.
const CONTENT_HEADERS: &[&str] = &["相似题目", "题目", "content"];
const EXPLANATION_HEADERS: &[&str] = &["解析", "explanation"];
const ANSWER_HEADERS: &[&str] = &["答案", "answer"];

/// Import statistics for reporting.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    /// Data rows read from the CSV file.
    pub total_rows: usize,
    /// Rows appended to the collection.
    pub imported: usize,
    /// Rows skipped because their question text was empty.
    pub skipped_empty: usize,
    /// Collection size after the import.
    pub collection_size: usize,
}

/// Load the JSON question collection.
///
/// # Errors
///
/// Returns `Error::FileNotFound` if the file does not exist, or a JSON error
/// if it is not an array of question objects.
pub fn load_questions(path: &Path) -> Result<Vec<Question>, Error> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    let questions: Vec<Question> = serde_json::from_str(&content)?;
    debug!(path = %path.display(), count = questions.len(), "loaded question collection");
    Ok(questions)
}

/// Write the JSON question collection, replacing the file.
///
/// Output is pretty-printed with non-ASCII text kept as-is.
pub fn save_questions(path: &Path, questions: &[Question]) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(questions)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Read questions from a CSV file with a header row.
///
/// The question text comes from the first non-empty `相似题目`, `题目` or
/// `content` cell of each row, in that order; the optional `解析`/`explanation` and `答案`/`answer` columns fill the other
/// fields. Other columns are ignored, cells are trimmed and rows without
/// question text are skipped.
///
/// Returns the parsed questions and the number of skipped rows.
///
/// # Errors
///
/// Returns `Error::InvalidInput` if no question text column exists.
pub fn load_csv(path: &Path) -> Result<(Vec<Question>, usize), Error> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let content_columns = find_columns(&headers, CONTENT_HEADERS);
    if content_columns.is_empty() {
        return Err(Error::InvalidInput(format!(
            "{}: no question column (expected one of {})",
            path.display(),
            CONTENT_HEADERS.join(", ")
        )));
    }
    let explanation_idx = find_column(&headers, EXPLANATION_HEADERS);
    let answer_idx = find_column(&headers, ANSWER_HEADERS);

    let mut questions = Vec::new();
    let mut skipped = 0usize;
    for record in reader.records() {
        let record = record?;
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .unwrap_or("")
                .trim()
                .to_string()
        };

        let content = content_columns
            .iter()
            .map(|&idx| cell(Some(idx)))
            .find(|value| !value.is_empty())
            .unwrap_or_default();
        if content.is_empty() {
            skipped += 1;
            continue;
        }
        questions.push(Question {
            content,
            answer: cell(answer_idx),
            explanation: cell(explanation_idx),
        });
    }

    if skipped > 0 {
        warn!(path = %path.display(), skipped, "skipped CSV rows without question text");
    }
    Ok((questions, skipped))
}

/// Append the questions of a CSV file to the JSON collection.
///
/// A missing collection file is treated as an empty collection. The
/// collection is left untouched when the CSV yields no questions.
pub fn import_csv(csv_path: &Path, json_path: &Path) -> Result<ImportStats, Error> {
    let (new_questions, skipped) = load_csv(csv_path)?;

    let mut collection = if json_path.exists() {
        load_questions(json_path)?
    } else {
        Vec::new()
    };

    let mut stats = ImportStats {
        total_rows: new_questions.len() + skipped,
        imported: new_questions.len(),
        skipped_empty: skipped,
        collection_size: collection.len(),
    };
    if new_questions.is_empty() {
        return Ok(stats);
    }

    collection.extend(new_questions);
    save_questions(json_path, &collection)?;
    stats.collection_size = collection.len();

    info!(
        source = %csv_path.display(),
        imported = stats.imported,
        total = stats.collection_size,
        "imported questions"
    );
    Ok(stats)
}

/// Index of the first header matching a name, by name priority.
fn find_column(headers: &[String], names: &[&str]) -> Option<usize> {
    names.iter().find_map(|name| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
    })
}

/// Indexes of every header matching a name, in name priority order.
fn find_columns(headers: &[String], names: &[&str]) -> Vec<usize> {
    names
        .iter()
        .filter_map(|name| headers.iter().position(|h| h.eq_ignore_ascii_case(name)))
        .collect()
}
