//! Question record types.

use serde::{Deserialize, Deserializer, Serialize};

/// A quiz question as held in a flat collection (JSON file, CSV import batch).
///
/// Absent or `null` fields deserialize to empty strings, so a record with only
/// `content` compares as if its explanation and answer were blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub answer: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub explanation: String,
}

impl Question {
    /// Create a question with content only.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.answer = answer.into();
        self
    }
}

/// A question row from the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredQuestion {
    pub id: i64,
    pub content: String,
    pub answer: String,
    pub explanation: String,
    /// Whether the question has already been administered.
    pub used: bool,
    pub created_at: String,
}

/// An `{id, content}` pair for a question flagged as used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsedQuestion {
    pub id: i64,
    pub content: String,
}

impl UsedQuestion {
    pub fn new(id: i64, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
