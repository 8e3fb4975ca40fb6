//! Duplicate detection and similar-question ranking over a corpus.
//!
//! Every function here is a read-only pass over borrowed records: nothing is
//! cached between calls and inputs are never modified. Results are sorted by
//! score, highest first, with ties kept in corpus order.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use crate::errors::Error;
use crate::question::{Question, UsedQuestion};
use crate::similarity::{
    question_similarity, round4, similarity_upper_bound, string_similarity, FieldWeights,
    SimilarityBundle,
};

/// Default threshold for the used-question duplicate check.
pub const DEFAULT_DUPLICATE_THRESHOLD: f64 = 0.75;
/// Default threshold on the overall score for similar-question search.
pub const DEFAULT_SIMILAR_THRESHOLD: f64 = 0.3;
/// Maximum number of matches a duplicate check reports.
pub const MAX_DUPLICATE_MATCHES: usize = 10;

/// Options for [`check_duplicate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuplicateOptions {
    /// Content similarity at or above this counts as a duplicate.
    pub threshold: f64,
    /// Skip the used question with this id (re-checking an edited question).
    pub exclude_id: Option<i64>,
}

impl Default for DuplicateOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_DUPLICATE_THRESHOLD,
            exclude_id: None,
        }
    }
}

/// A used question whose content is close to the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateMatch {
    pub id: i64,
    pub content: String,
    /// Content similarity, rounded to 4 decimal digits.
    pub similarity: f64,
}

/// Outcome of a duplicate check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateReport {
    /// True if any used question reached the threshold, even if the match
    /// list was truncated.
    pub is_duplicate: bool,
    /// At most [`MAX_DUPLICATE_MATCHES`] matches, highest similarity first.
    pub matches: Vec<DuplicateMatch>,
}

/// Check question text against the used questions of the store.
///
/// Compares content only. `corpus` is expected in ascending id order, which
/// is the order ties are reported in. Questions whose length alone rules out
/// reaching the threshold are skipped without alignment.
pub fn check_duplicate(
    query: &str,
    corpus: &[UsedQuestion],
    options: &DuplicateOptions,
) -> DuplicateReport {
    let mut matches: Vec<DuplicateMatch> = Vec::new();
    let mut skipped = 0usize;

    for used in corpus {
        if options.exclude_id == Some(used.id) {
            continue;
        }
        if similarity_upper_bound(query, &used.content) < options.threshold {
            skipped += 1;
            continue;
        }
        let similarity = string_similarity(query, &used.content);
        if similarity >= options.threshold {
            matches.push(DuplicateMatch {
                id: used.id,
                content: used.content.clone(),
                similarity: round4(similarity),
            });
        }
    }

    matches.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
    });

    debug!(
        corpus = corpus.len(),
        skipped,
        matched = matches.len(),
        threshold = options.threshold,
        "duplicate check finished"
    );

    let is_duplicate = !matches.is_empty();
    matches.truncate(MAX_DUPLICATE_MATCHES);
    DuplicateReport {
        is_duplicate,
        matches,
    }
}

/// Options for [`find_similar_questions`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarOptions {
    /// Minimum overall score to keep.
    pub threshold: f64,
    /// Keep at most this many results; `None` keeps all.
    pub top_k: Option<usize>,
    pub weights: FieldWeights,
}

impl Default for SimilarOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILAR_THRESHOLD,
            top_k: None,
            weights: FieldWeights::default(),
        }
    }
}

/// A corpus question ranked against a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMatch<'a> {
    /// 1-based position of the question in the input corpus.
    pub position: usize,
    pub question: &'a Question,
    pub similarity: SimilarityBundle,
}

/// Rank the questions of a flat corpus by weighted similarity to `query`.
///
/// Keeps entries whose overall score is at least the threshold, sorted by
/// overall score, then truncated to `top_k` if given.
pub fn find_similar_questions<'a>(
    query: &Question,
    corpus: &'a [Question],
    options: &SimilarOptions,
) -> Vec<RankedMatch<'a>> {
    let mut results: Vec<RankedMatch<'a>> = corpus
        .iter()
        .enumerate()
        .filter_map(|(index, question)| {
            let similarity = question_similarity(query, question, &options.weights);
            (similarity.overall >= options.threshold).then_some(RankedMatch {
                position: index + 1,
                question,
                similarity,
            })
        })
        .collect();

    sort_by_overall(&mut results, |m| m.similarity.overall);

    if let Some(top_k) = options.top_k {
        results.truncate(top_k);
    }

    debug!(
        corpus = corpus.len(),
        matched = results.len(),
        threshold = options.threshold,
        "similar question search finished"
    );
    results
}

/// Similarity between two questions of the same corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairReport<'a> {
    /// 1-based position of the first question.
    pub first: usize,
    /// 1-based position of the second question.
    pub second: usize,
    #[serde(skip)]
    pub first_question: &'a Question,
    #[serde(skip)]
    pub second_question: &'a Question,
    pub similarity: SimilarityBundle,
}

/// Compare every unordered pair of a corpus.
///
/// Pairs with an overall score at or above `threshold` are returned in
/// position order: (1, 2), (1, 3), ..., (2, 3), ...
pub fn compare_pairs<'a>(
    corpus: &'a [Question],
    threshold: f64,
    weights: &FieldWeights,
) -> Vec<PairReport<'a>> {
    let mut pairs = Vec::new();
    for (i, first) in corpus.iter().enumerate() {
        for (offset, second) in corpus[i + 1..].iter().enumerate() {
            let similarity = question_similarity(first, second, weights);
            if similarity.overall >= threshold {
                pairs.push(PairReport {
                    first: i + 1,
                    second: i + offset + 2,
                    first_question: first,
                    second_question: second,
                    similarity,
                });
            }
        }
    }
    debug!(
        corpus = corpus.len(),
        reported = pairs.len(),
        "pairwise comparison finished"
    );
    pairs
}

/// Compare the question at a 1-based `position` against every other one.
///
/// No threshold is applied; results follow corpus order.
///
/// # Errors
///
/// Returns `Error::InvalidInput` if `position` is outside `1..=corpus.len()`.
pub fn compare_one<'a>(
    corpus: &'a [Question],
    position: usize,
    weights: &FieldWeights,
) -> Result<Vec<PairReport<'a>>, Error> {
    if position == 0 || position > corpus.len() {
        return Err(Error::InvalidInput(format!(
            "question position must be between 1 and {}, got {position}",
            corpus.len()
        )));
    }

    let selected = &corpus[position - 1];
    Ok(corpus
        .iter()
        .enumerate()
        .filter(|(index, _)| index + 1 != position)
        .map(|(index, other)| PairReport {
            first: position,
            second: index + 1,
            first_question: selected,
            second_question: other,
            similarity: question_similarity(selected, other, weights),
        })
        .collect())
}

/// Stable sort, highest score first.
fn sort_by_overall<T>(items: &mut [T], score: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| {
        score(b)
            .partial_cmp(&score(a))
            .unwrap_or(Ordering::Equal)
    });
}
