//! Integration tests testing quizdup library API from external crate perspective.

use quizdup::errors::Error;
use quizdup::import::{import_csv, load_questions, save_questions};
use quizdup::{
    check_duplicate, compare_pairs, find_similar_questions, question_similarity, Database,
    DuplicateOptions, FieldWeights, Question, SimilarOptions,
};
use tempfile::TempDir;

fn sample_collection() -> Vec<Question> {
    vec![
        Question::new("What is the capital of France?")
            .with_explanation("Paris has been the capital since the 10th century.")
            .with_answer("Paris"),
        Question::new("Which planet is known as the Red Planet?")
            .with_explanation("Iron oxide on the surface gives Mars its color.")
            .with_answer("Mars"),
        Question::new("What is the capital city of France?")
            .with_explanation("Paris is the capital of France.")
            .with_answer("Paris"),
    ]
}

/// Seed a store, then check a query against its used questions.
#[test]
fn test_seeded_store_flags_duplicate_of_used_question() {
    let dir = TempDir::new().unwrap();
    let mut db = Database::open(&dir.path().join("questions.db")).expect("Failed to open store");

    let inserted = db.seed(&sample_collection(), 2).expect("Failed to seed");
    assert_eq!(inserted, 3);

    let used = db.used_questions().expect("Failed to read used questions");
    assert_eq!(used.len(), 2);

    let report = check_duplicate(
        "What is the capital of France?",
        &used,
        &DuplicateOptions::default(),
    );
    assert!(report.is_duplicate);
    assert_eq!(report.matches[0].similarity, 1.0);
    assert_eq!(report.matches[0].content, "What is the capital of France?");

    // The near-identical third question is not flagged as used.
    assert_eq!(report.matches.len(), 1);
}

/// Excluding the only matching question clears the duplicate flag.
#[test]
fn test_exclude_id_skips_edited_question() {
    let dir = TempDir::new().unwrap();
    let db = Database::open(&dir.path().join("questions.db")).unwrap();
    let id = db
        .insert(&Question::new("What is the capital of France?"), true)
        .unwrap();

    let used = db.used_questions().unwrap();
    let options = DuplicateOptions {
        exclude_id: Some(id),
        ..DuplicateOptions::default()
    };
    let report = check_duplicate("What is the capital of France?", &used, &options);

    assert!(!report.is_duplicate);
    assert!(report.matches.is_empty());
}

/// Marking a question used makes it part of the duplicate corpus.
#[test]
fn test_mark_used_adds_to_corpus() {
    let dir = TempDir::new().unwrap();
    let db = Database::open(&dir.path().join("questions.db")).unwrap();
    let id = db.insert(&Question::new("Define a closure."), false).unwrap();

    let report = check_duplicate(
        "Define a closure.",
        &db.used_questions().unwrap(),
        &DuplicateOptions::default(),
    );
    assert!(!report.is_duplicate);

    assert!(db.set_used(id, true).unwrap());
    let report = check_duplicate(
        "Define a closure.",
        &db.used_questions().unwrap(),
        &DuplicateOptions::default(),
    );
    assert!(report.is_duplicate);
    assert_eq!(report.matches[0].id, id);
}

/// Checking against a store that was never initialized fails clearly.
#[test]
fn test_open_existing_missing_store() {
    let dir = TempDir::new().unwrap();
    let result = Database::open_existing(&dir.path().join("missing.db"));
    assert!(matches!(result, Err(Error::StoreNotInitialized(_))));
}

/// Save a collection to JSON, reload it and search it.
#[test]
fn test_json_collection_similar_search() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("questions.json");
    save_questions(&path, &sample_collection()).expect("Failed to save");

    let questions = load_questions(&path).expect("Failed to load");
    assert_eq!(questions, sample_collection());

    let query = Question::new("What is the capital of France?")
        .with_explanation("Paris is the capital of France.")
        .with_answer("Paris");
    let results = find_similar_questions(&query, &questions, &SimilarOptions::default());

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].position, 3);
    assert!(results.iter().all(|m| m.similarity.overall >= 0.3));
    assert!(results
        .windows(2)
        .all(|w| w[0].similarity.overall >= w[1].similarity.overall));

    let best = &results[0];
    assert_eq!(best.question.content, questions[best.position - 1].content);
}

/// Unrelated query against unrelated questions finds nothing.
#[test]
fn test_unrelated_query_finds_nothing() {
    let corpus = vec![
        Question::new("aaaa").with_explanation("bbbb").with_answer("cc"),
        Question::new("dddd").with_explanation("eeee").with_answer("ff"),
        Question::new("gggg").with_explanation("hhhh").with_answer("ii"),
    ];
    let query = Question::new("zzzz").with_explanation("yyyy").with_answer("xx");
    let results = find_similar_questions(&query, &corpus, &SimilarOptions::default());
    assert!(results.is_empty());
}

/// Import a CSV into an empty collection, then report pairs.
#[test]
fn test_import_then_report() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("new.csv");
    std::fs::write(
        &csv_path,
        "题目,解析,答案\n\
         What is the capital of France?,Paris is the capital.,Paris\n\
         ,,\n\
         What is the capital city of France?,Paris is the capital.,Paris\n",
    )
    .unwrap();
    let json_path = dir.path().join("questions.json");

    let stats = import_csv(&csv_path, &json_path).expect("Failed to import");
    assert_eq!(stats.imported, 2);
    assert_eq!(stats.skipped_empty, 1);
    assert_eq!(stats.collection_size, 2);

    let questions = load_questions(&json_path).unwrap();
    let pairs = compare_pairs(&questions, 0.3, &FieldWeights::default());
    assert_eq!(pairs.len(), 1);
    assert_eq!((pairs[0].first, pairs[0].second), (1, 2));
    assert_eq!(
        pairs[0].similarity,
        question_similarity(&questions[0], &questions[1], &FieldWeights::default())
    );
}

/// Missing collection files are reported as not found.
#[test]
fn test_load_missing_collection() {
    let dir = TempDir::new().unwrap();
    let result = load_questions(&dir.path().join("none.json"));
    assert!(matches!(result, Err(Error::FileNotFound(_))));
}
