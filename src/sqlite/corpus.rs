//! Corpus reads and bulk seeding.

use tracing::info;

use super::{insert_question, Database, Result};
use crate::question::{Question, UsedQuestion};

impl Database {
    /// All questions flagged as used, ascending by id.
    ///
    /// This is the corpus for duplicate checks.
    pub fn used_questions(&self) -> Result<Vec<UsedQuestion>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, content FROM questions WHERE used = 1 ORDER BY id")?;

        let used = stmt
            .query_map([], |row| {
                Ok(UsedQuestion {
                    id: row.get(0)?,
                    content: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(used)
    }

    /// Insert a batch of questions in one transaction.
    ///
    /// The first `used_count` questions are flagged as used. Returns the
    /// number of inserted rows.
    pub fn seed(&mut self, questions: &[Question], used_count: usize) -> Result<usize> {
        let tx = self.conn.transaction()?;
        for (index, question) in questions.iter().enumerate() {
            insert_question(&tx, question, index < used_count)?;
        }
        tx.commit()?;

        info!(
            inserted = questions.len(),
            used = used_count.min(questions.len()),
            "seeded question store"
        );
        Ok(questions.len())
    }
}
