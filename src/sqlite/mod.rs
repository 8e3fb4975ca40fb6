//! SQLite backend for the question store.
//!
//! This module provides:
//! - `Database`: connection, schema management and single-row operations
//! - `corpus`: bulk reads (used-question corpus) and seeding

pub mod corpus;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use tracing::debug;

use crate::errors::Error;
use crate::question::{Question, StoredQuestion};

pub type Result<T> = std::result::Result<T, Error>;

/// SQLite question store.
pub struct Database {
    conn: Connection,
}

/// Create the `questions` table if it does not exist.
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS questions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            content TEXT NOT NULL,
            answer TEXT,
            explanation TEXT,
            used INTEGER DEFAULT 0,
            created_at TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_questions_used ON questions(used);
        "#,
    )?;
    Ok(())
}

/// Map a `SELECT id, content, answer, explanation, used, created_at` row.
fn row_to_question(row: &Row<'_>) -> rusqlite::Result<StoredQuestion> {
    Ok(StoredQuestion {
        id: row.get(0)?,
        content: row.get(1)?,
        answer: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        explanation: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        used: row.get::<_, Option<i64>>(4)?.unwrap_or(0) != 0,
        created_at: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
    })
}

impl Database {
    /// Open or create a SQLite database at the given path.
    ///
    /// Initializes the schema if the database is new.
    ///
    /// # Errors
    ///
    /// Returns error if the database cannot be opened or schema initialization fails.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        create_schema(&conn)?;
        debug!(path = %path.display(), "opened question store");
        Ok(Self { conn })
    }

    /// Open a database that must already exist.
    ///
    /// # Errors
    ///
    /// Returns `Error::StoreNotInitialized` if there is no file at `path`.
    pub fn open_existing(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::StoreNotInitialized(path.to_path_buf()));
        }
        Self::open(path)
    }

    /// Insert a question, returning its new id.
    pub fn insert(&self, question: &Question, used: bool) -> Result<i64> {
        insert_question(&self.conn, question, used)
    }

    /// Retrieve a single question by id.
    ///
    /// Returns None if the question does not exist.
    pub fn get(&self, id: i64) -> Result<Option<StoredQuestion>> {
        let result = self
            .conn
            .query_row(
                r#"
                SELECT id, content, answer, explanation, used, created_at
                FROM questions
                WHERE id = ?1
                "#,
                [id],
                row_to_question,
            )
            .optional()?;
        Ok(result)
    }

    /// Set or clear the used flag.
    ///
    /// Returns false if no question has this id.
    pub fn set_used(&self, id: i64, used: bool) -> Result<bool> {
        let rows = self.conn.execute(
            "UPDATE questions SET used = ?1 WHERE id = ?2",
            params![used as i64, id],
        )?;
        Ok(rows > 0)
    }

    #[cfg(test)]
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

fn insert_question(conn: &Connection, question: &Question, used: bool) -> Result<i64> {
    let now = Utc::now().to_rfc3339();
    conn.execute(
        r#"
        INSERT INTO questions (content, answer, explanation, used, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
        params![
            &question.content,
            &question.answer,
            &question.explanation,
            used as i64,
            &now
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_db() -> Database {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::open(&path).unwrap();
        std::mem::forget(dir);
        db
    }

    #[test]
    fn test_insert_and_get() {
        let db = create_test_db();
        let q = Question::new("What is a tuple?")
            .with_explanation("An immutable sequence")
            .with_answer("tuple");
        let id = db.insert(&q, true).unwrap();

        let stored = db.get(id).unwrap().unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.content, q.content);
        assert_eq!(stored.explanation, q.explanation);
        assert_eq!(stored.answer, q.answer);
        assert!(stored.used);
        assert!(!stored.created_at.is_empty());
    }

    #[test]
    fn test_ids_ascend() {
        let db = create_test_db();
        let first = db.insert(&Question::new("one"), false).unwrap();
        let second = db.insert(&Question::new("two"), false).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_get_nonexistent() {
        let db = create_test_db();
        assert!(db.get(42).unwrap().is_none());
    }

    #[test]
    fn test_set_used() {
        let db = create_test_db();
        let id = db.insert(&Question::new("q"), false).unwrap();
        assert!(db.set_used(id, true).unwrap());
        assert!(db.get(id).unwrap().unwrap().used);
        assert!(!db.set_used(id + 100, true).unwrap());
    }

    #[test]
    fn test_null_columns_read_as_empty() {
        let db = create_test_db();
        db.conn()
            .execute(
                "INSERT INTO questions (content, answer, explanation) VALUES ('q', NULL, NULL)",
                [],
            )
            .unwrap();
        let stored = db.get(1).unwrap().unwrap();
        assert!(stored.answer.is_empty());
        assert!(stored.explanation.is_empty());
        assert!(!stored.used);
    }

    #[test]
    fn test_open_existing_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.db");
        let result = Database::open_existing(&path);
        assert!(matches!(result, Err(Error::StoreNotInitialized(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_database_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.db");

        {
            let db = Database::open(&path).unwrap();
            db.insert(&Question::new("persistent"), true).unwrap();
        }

        {
            let db = Database::open_existing(&path).unwrap();
            assert_eq!(db.get(1).unwrap().unwrap().content, "persistent");
        }
    }
}
