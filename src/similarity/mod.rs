//! Similarity engine: pairwise string scores and weighted question scores.
//!
//! All functions here are pure. They never fail: empty strings and missing
//! fields have defined scores, so callers can run them over any corpus.

mod matcher;

pub use matcher::{Block, SequenceMatcher};

use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::question::Question;

/// Weight sums this close to 1.0 are used as given.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Similarity of two strings in `[0.0, 1.0]`.
///
/// Both inputs are trimmed. Two empty strings score 1.0, one empty string
/// scores 0.0, otherwise the longest-matching-blocks ratio `2*M / T` over
/// Unicode scalar values. No case folding or whitespace collapsing is done.
///
/// The pair is aligned in a canonical order, so the score does not depend on
/// argument order.
pub fn string_similarity(a: &str, b: &str) -> f64 {
    let (a, b) = (a.trim(), b.trim());
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        (false, false) => {}
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (first, second) = if a <= b { (&a, &b) } else { (&b, &a) };
    SequenceMatcher::new(first, second).ratio()
}

/// Cheap upper bound of [`string_similarity`] from lengths alone.
///
/// `string_similarity(a, b) <= similarity_upper_bound(a, b)` always holds, so a
/// pair whose bound is below a threshold can be skipped without alignment.
pub fn similarity_upper_bound(a: &str, b: &str) -> f64 {
    let la = a.trim().chars().count();
    let lb = b.trim().chars().count();
    match (la, lb) {
        (0, 0) => 1.0,
        (0, _) | (_, 0) => 0.0,
        _ => 2.0 * la.min(lb) as f64 / (la + lb) as f64,
    }
}

/// Round to 4 decimal digits for stable reporting, ties to even.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round_ties_even() / 10_000.0
}

/// Per-field weights for the overall question score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldWeights {
    pub content: f64,
    pub explanation: f64,
    pub answer: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            content: 0.5,
            explanation: 0.3,
            answer: 0.2,
        }
    }
}

impl FieldWeights {
    /// Create validated weights.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidWeights` if any weight is negative, NaN or
    /// infinite, or if all weights are zero.
    pub fn new(content: f64, explanation: f64, answer: f64) -> Result<Self, Error> {
        let weights = Self {
            content,
            explanation,
            answer,
        };
        weights.validate()?;
        Ok(weights)
    }

    /// Check that the weights can form a weighted average.
    pub fn validate(&self) -> Result<(), Error> {
        for (name, value) in [
            ("content", self.content),
            ("explanation", self.explanation),
            ("answer", self.answer),
        ] {
            if !value.is_finite() {
                return Err(Error::InvalidWeights(format!(
                    "{name} weight must be finite, got {value}"
                )));
            }
            if value < 0.0 {
                return Err(Error::InvalidWeights(format!(
                    "{name} weight must not be negative, got {value}"
                )));
            }
        }
        if self.sum() <= 0.0 {
            return Err(Error::InvalidWeights(
                "at least one weight must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn sum(&self) -> f64 {
        self.content + self.explanation + self.answer
    }

    /// Weights scaled proportionally to sum to 1.0.
    ///
    /// Weights already summing to 1.0 (or that cannot be scaled) are
    /// returned unchanged.
    pub fn normalized(&self) -> Self {
        let sum = self.sum();
        if !sum.is_finite() || sum <= 0.0 || (sum - 1.0).abs() <= WEIGHT_SUM_TOLERANCE {
            return *self;
        }
        Self {
            content: self.content / sum,
            explanation: self.explanation / sum,
            answer: self.answer / sum,
        }
    }
}

/// Per-field and overall similarity of two questions, each rounded to 4
/// decimal digits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarityBundle {
    pub content: f64,
    pub explanation: f64,
    pub answer: f64,
    pub overall: f64,
}

/// Compare two questions field by field and combine the field scores.
///
/// `overall` is the weighted average of the unrounded field scores. Weights
/// that do not sum to 1.0 are scaled proportionally, so `overall` always lies
/// between the lowest and highest field score.
pub fn question_similarity(
    a: &Question,
    b: &Question,
    weights: &FieldWeights,
) -> SimilarityBundle {
    let content = string_similarity(&a.content, &b.content);
    let explanation = string_similarity(&a.explanation, &b.explanation);
    let answer = string_similarity(&a.answer, &b.answer);

    let w = weights.normalized();
    let overall = w.content * content + w.explanation * explanation + w.answer * answer;

    SimilarityBundle {
        content: round4(content),
        explanation: round4(explanation),
        answer: round4(answer),
        overall: round4(overall),
    }
}
