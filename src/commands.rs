//! Command handlers for quizdup CLI.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::info;

use quizdup::config::Config;
use quizdup::errors::Error;
use quizdup::finder::{
    check_duplicate, compare_one, compare_pairs, find_similar_questions, DuplicateOptions,
    PairReport, SimilarOptions,
};
use quizdup::import::{import_csv, load_questions};
use quizdup::question::Question;
use quizdup::sqlite::Database;

use crate::output::*;

/// Preview lengths for human-readable output.
const MATCH_PREVIEW_CHARS: usize = 60;
const RESULT_PREVIEW_CHARS: usize = 70;
const PAIR_PREVIEW_CHARS: usize = 50;

/// Commands supported by quizdup CLI.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Check question text against the used questions in the store
    Check {
        /// Question text
        text: String,

        /// Similarity threshold (default from config: 0.75)
        #[arg(short = 't', long)]
        threshold: Option<f64>,

        /// Ignore the stored question with this id (re-checking an edit)
        #[arg(long)]
        exclude_id: Option<i64>,
    },
    /// Find questions in the collection similar to a new question
    Similar {
        /// Question text; prompts for all fields on stdin when omitted
        #[arg(short = 'c', long)]
        content: Option<String>,

        /// Explanation text
        #[arg(short = 'e', long)]
        explanation: Option<String>,

        /// Answer text
        #[arg(short = 'a', long)]
        answer: Option<String>,

        /// Overall similarity threshold (default from config: 0.3)
        #[arg(short = 't', long)]
        threshold: Option<f64>,

        /// Maximum number of results
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },
    /// Report similarity between questions of the collection
    Report {
        /// Compare only this question (1-based) against all others
        position: Option<usize>,

        /// Overall similarity threshold for the all-pairs report
        #[arg(short = 't', long)]
        threshold: Option<f64>,
    },
    /// Append questions from a CSV file to the collection
    Import {
        /// CSV file with a question column (相似题目/题目/content)
        csv: PathBuf,
    },
    /// Recreate the question store from the collection
    Init {
        /// Number of leading questions to flag as used
        #[arg(long)]
        used_count: Option<usize>,
    },
    /// Flag a stored question as used
    MarkUsed {
        /// Question id
        id: i64,

        /// Clear the flag instead
        #[arg(long)]
        unset: bool,
    },
    /// Show version information
    Version,
}

/// Execute a CLI command.
pub fn execute(command: &Commands, config: &Config, json: bool) -> Result<ExitCode, Error> {
    match command {
        Commands::Check {
            text,
            threshold,
            exclude_id,
        } => {
            let options = DuplicateOptions {
                threshold: resolve_threshold(*threshold, config.duplicate_threshold)?,
                exclude_id: *exclude_id,
            };
            handle_check(&config.database_path, text, &options, json)
        }
        Commands::Similar {
            content,
            explanation,
            answer,
            threshold,
            top_k,
        } => {
            let query = match content {
                Some(content) => Question {
                    content: content.trim().to_string(),
                    explanation: explanation.as_deref().unwrap_or("").trim().to_string(),
                    answer: answer.as_deref().unwrap_or("").trim().to_string(),
                },
                None => read_question(&mut std::io::stdin().lock(), &mut std::io::stderr())?,
            };
            let options = SimilarOptions {
                threshold: resolve_threshold(*threshold, config.similar_threshold)?,
                top_k: *top_k,
                weights: config.weights,
            };
            handle_similar(&config.questions_path, &query, &options, json)
        }
        Commands::Report {
            position,
            threshold,
        } => {
            let threshold = resolve_threshold(*threshold, config.similar_threshold)?;
            handle_report(config, *position, threshold, json)
        }
        Commands::Import { csv } => handle_import(csv, &config.questions_path, json),
        Commands::Init { used_count } => {
            handle_init(config, used_count.unwrap_or(config.seed_used_count), json)
        }
        Commands::MarkUsed { id, unset } => {
            handle_mark_used(&config.database_path, *id, !*unset, json)
        }
        Commands::Version => handle_version(json),
    }
}

/// Use the command-line threshold if given, else the configured one.
fn resolve_threshold(arg: Option<f64>, configured: f64) -> Result<f64, Error> {
    let threshold = arg.unwrap_or(configured);
    if !(0.0..=1.0).contains(&threshold) {
        return Err(Error::InvalidInput(format!(
            "threshold must be between 0.0 and 1.0, got {threshold}"
        )));
    }
    Ok(threshold)
}

/// Prompt for content, explanation and answer, one line each.
///
/// # Errors
///
/// Returns `Error::InvalidInput` if input ends early and `Error::EmptyInput`
/// if the content line is blank.
pub fn read_question<R: BufRead, W: Write>(input: &mut R, prompt: &mut W) -> Result<Question, Error> {
    let mut fields = Vec::with_capacity(3);
    for label in ["Content", "Explanation", "Answer"] {
        write!(prompt, "{label}: ")?;
        prompt.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(Error::InvalidInput("input ended before all fields were read".into()));
        }
        let value = line.trim().to_string();
        if fields.is_empty() && value.is_empty() {
            return Err(Error::EmptyInput);
        }
        fields.push(value);
    }

    let answer = fields.pop().unwrap_or_default();
    let explanation = fields.pop().unwrap_or_default();
    let content = fields.pop().unwrap_or_default();
    Ok(Question {
        content,
        answer,
        explanation,
    })
}

fn handle_check(
    database_path: &Path,
    text: &str,
    options: &DuplicateOptions,
    json: bool,
) -> Result<ExitCode, Error> {
    if text.trim().is_empty() {
        return Err(Error::EmptyInput);
    }

    let db = Database::open_existing(database_path)?;
    let used = db.used_questions()?;
    let report = check_duplicate(text, &used, options);

    if json {
        print_json(&CheckResponse {
            query: text.to_string(),
            threshold: options.threshold,
            is_duplicate: report.is_duplicate,
            matches: report.matches.clone(),
        });
    } else {
        println!("Question: {}", text);
        println!("Duplicate of a used question: {}", report.is_duplicate);
        if report.matches.is_empty() {
            println!("No similar used questions found.");
        } else {
            println!("Matching used questions:");
            for m in &report.matches {
                println!("  [id={}] similarity {}", m.id, percent(m.similarity));
                println!("    {}", preview(&m.content, MATCH_PREVIEW_CHARS));
            }
        }
    }

    if report.is_duplicate {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn handle_similar(
    questions_path: &Path,
    query: &Question,
    options: &SimilarOptions,
    json: bool,
) -> Result<ExitCode, Error> {
    if query.content.trim().is_empty() {
        return Err(Error::EmptyInput);
    }

    let questions = load_questions(questions_path)?;
    let results = find_similar_questions(query, &questions, options);

    if json {
        print_json(&SimilarResponse {
            threshold: options.threshold,
            compared: questions.len(),
            results: results.into_iter().map(SimilarItem::from).collect(),
        });
        return Ok(ExitCode::SUCCESS);
    }

    if questions.is_empty() {
        println!("The question collection is empty.");
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "Compared against {} questions; overall similarity >= {}:",
        questions.len(),
        percent(options.threshold)
    );
    if results.is_empty() {
        println!("No similar questions found.");
        return Ok(ExitCode::SUCCESS);
    }
    for m in &results {
        let s = &m.similarity;
        println!("--- #{} (overall {}) ---", m.position, percent(s.overall));
        println!(
            "  content {}  explanation {}  answer {}",
            percent(s.content),
            percent(s.explanation),
            percent(s.answer)
        );
        println!("  {}", preview(&m.question.content, RESULT_PREVIEW_CHARS));
        println!();
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_report(
    config: &Config,
    position: Option<usize>,
    threshold: f64,
    json: bool,
) -> Result<ExitCode, Error> {
    let questions = load_questions(&config.questions_path)?;
    if questions.len() < 2 {
        return Err(Error::InvalidInput(
            "at least 2 questions are needed for a report".to_string(),
        ));
    }

    let (pairs, threshold) = match position {
        Some(position) => (compare_one(&questions, position, &config.weights)?, 0.0),
        None => (compare_pairs(&questions, threshold, &config.weights), threshold),
    };

    if json {
        print_json(&ReportResponse {
            total_questions: questions.len(),
            threshold,
            pairs: pairs.iter().map(PairItem::from).collect(),
        });
        return Ok(ExitCode::SUCCESS);
    }

    match position {
        Some(position) => println!(
            "Question #{position} against the other {}:\n",
            questions.len() - 1
        ),
        None => println!(
            "{} questions; pairs with overall similarity >= {}:\n",
            questions.len(),
            percent(threshold)
        ),
    }
    for pair in &pairs {
        print_pair(pair);
    }
    if pairs.is_empty() {
        println!("No pairs reached the threshold.");
    }
    Ok(ExitCode::SUCCESS)
}

fn print_pair(pair: &PairReport<'_>) {
    let s = &pair.similarity;
    println!("--- #{} vs #{} ---", pair.first, pair.second);
    println!("  content:     {}", percent(s.content));
    println!("  explanation: {}", percent(s.explanation));
    println!("  answer:      {}", percent(s.answer));
    println!("  overall:     {}", percent(s.overall));
    println!(
        "  A: {}",
        preview(&pair.first_question.content, PAIR_PREVIEW_CHARS)
    );
    println!(
        "  B: {}",
        preview(&pair.second_question.content, PAIR_PREVIEW_CHARS)
    );
    println!();
}

fn handle_import(csv: &Path, questions_path: &Path, json: bool) -> Result<ExitCode, Error> {
    let stats = import_csv(csv, questions_path)?;
    if json {
        print_json(&ImportResponse {
            status: "imported".to_string(),
            total_rows: stats.total_rows,
            imported: stats.imported,
            skipped_empty: stats.skipped_empty,
            collection_size: stats.collection_size,
        });
    } else if stats.imported == 0 {
        println!("No questions found in {}.", csv.display());
    } else {
        println!(
            "Imported {} questions into {} ({} total).",
            stats.imported,
            questions_path.display(),
            stats.collection_size
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_init(config: &Config, used_count: usize, json: bool) -> Result<ExitCode, Error> {
    let questions = load_questions(&config.questions_path)?;

    if config.database_path.exists() {
        std::fs::remove_file(&config.database_path)?;
        info!(path = %config.database_path.display(), "removed existing question store");
    }

    let mut db = Database::open(&config.database_path)?;
    let inserted = db.seed(&questions, used_count)?;
    let used = used_count.min(inserted);

    if json {
        print_json(&InitResponse {
            status: "initialized".to_string(),
            database_path: config.database_path.display().to_string(),
            inserted,
            used,
        });
    } else {
        println!(
            "Imported {} questions ({} marked used) into {}",
            inserted,
            used,
            config.database_path.display()
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_mark_used(
    database_path: &Path,
    id: i64,
    used: bool,
    json: bool,
) -> Result<ExitCode, Error> {
    let db = Database::open_existing(database_path)?;
    let question = db.get(id)?.ok_or(Error::NotFound(id))?;
    db.set_used(id, used)?;

    if json {
        print_json(&MarkUsedResponse {
            status: "updated".to_string(),
            id,
            content: question.content,
            used,
        });
    } else {
        let state = if used { "used" } else { "unused" };
        println!("Marked question {} as {}", id, state);
        println!("  {}", preview(&question.content, MATCH_PREVIEW_CHARS));
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_version(json: bool) -> Result<ExitCode, Error> {
    if json {
        print_json(&serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "name": env!("CARGO_PKG_NAME")
        }));
    } else {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    }
    Ok(ExitCode::SUCCESS)
}
