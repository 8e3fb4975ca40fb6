//! JSON response types and formatting for CLI output.

use serde::Serialize;

use quizdup::finder::{DuplicateMatch, PairReport, RankedMatch};
use quizdup::question::Question;
use quizdup::similarity::SimilarityBundle;

/// Response for a duplicate check.
#[derive(Serialize)]
pub struct CheckResponse {
    pub query: String,
    pub threshold: f64,
    pub is_duplicate: bool,
    pub matches: Vec<DuplicateMatch>,
}

/// Response for similar-question search.
#[derive(Serialize)]
pub struct SimilarResponse<'a> {
    pub threshold: f64,
    pub compared: usize,
    pub results: Vec<SimilarItem<'a>>,
}

/// Individual similar-question result.
#[derive(Serialize)]
pub struct SimilarItem<'a> {
    pub position: usize,
    #[serde(flatten)]
    pub question: &'a Question,
    pub similarity: SimilarityBundle,
}

impl<'a> From<RankedMatch<'a>> for SimilarItem<'a> {
    fn from(m: RankedMatch<'a>) -> Self {
        Self {
            position: m.position,
            question: m.question,
            similarity: m.similarity,
        }
    }
}

/// Response for a pairwise similarity report.
#[derive(Serialize)]
pub struct ReportResponse {
    pub total_questions: usize,
    pub threshold: f64,
    pub pairs: Vec<PairItem>,
}

/// Individual pair in a report.
#[derive(Serialize)]
pub struct PairItem {
    pub first: usize,
    pub second: usize,
    pub similarity: SimilarityBundle,
}

impl From<&PairReport<'_>> for PairItem {
    fn from(pair: &PairReport<'_>) -> Self {
        Self {
            first: pair.first,
            second: pair.second,
            similarity: pair.similarity,
        }
    }
}

/// Response for CSV imports.
#[derive(Serialize)]
pub struct ImportResponse {
    pub status: String,
    pub total_rows: usize,
    pub imported: usize,
    pub skipped_empty: usize,
    pub collection_size: usize,
}

/// Response for store initialization.
#[derive(Serialize)]
pub struct InitResponse {
    pub status: String,
    pub database_path: String,
    pub inserted: usize,
    pub used: usize,
}

/// Response for used-flag updates.
#[derive(Serialize)]
pub struct MarkUsedResponse {
    pub status: String,
    pub id: i64,
    pub content: String,
    pub used: bool,
}

/// Response for errors.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Print a value as formatted JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Score as a percentage with two decimals, e.g. `87.50%`.
pub fn percent(score: f64) -> String {
    format!("{:.2}%", score * 100.0)
}

/// Trimmed text cut to `max_chars` characters, with `...` when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.875), "87.50%");
        assert_eq!(percent(1.0), "100.00%");
        assert_eq!(percent(0.0), "0.00%");
    }

    #[test]
    fn test_preview_short_text() {
        assert_eq!(preview("  short  ", 10), "short");
    }

    #[test]
    fn test_preview_cuts_on_chars() {
        assert_eq!(preview("列表和元组的区别", 4), "列表和元...");
        assert_eq!(preview("abcdef", 6), "abcdef");
    }

    #[test]
    fn test_serialize_check_response() {
        let response = CheckResponse {
            query: "q".to_string(),
            threshold: 0.75,
            is_duplicate: true,
            matches: vec![DuplicateMatch {
                id: 3,
                content: "q".to_string(),
                similarity: 1.0,
            }],
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"is_duplicate\":true"));
        assert!(json.contains("\"id\":3"));
    }

    #[test]
    fn test_serialize_similar_item_flattens_question() {
        let question = Question::new("c").with_answer("a");
        let item = SimilarItem {
            position: 2,
            question: &question,
            similarity: SimilarityBundle {
                content: 1.0,
                explanation: 1.0,
                answer: 0.5,
                overall: 0.9,
            },
        };
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"position\":2"));
        assert!(json.contains("\"content\":\"c\""));
        assert!(json.contains("\"overall\":0.9"));
    }
}
