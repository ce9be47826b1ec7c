//! TOML answer-key and answer-sheet loading.
//!
//! Loads answer keys (batch shorthand plus explicit questions) and student
//! answer sheets from TOML files and directories, and validates keys.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use rand::Rng;
use serde::Deserialize;

use crate::batch::BatchKeyParser;
use crate::error::{AnswerKeyError, BatchKeyError};
use crate::model::{
    default_question_text, AnswerKey, AnswerSheet, Question, QuestionType, DEFAULT_POINTS,
};

/// Intermediate TOML structure for answer-key files.
#[derive(Debug, Deserialize)]
struct TomlAnswerKeyFile {
    answer_key: TomlAnswerKeyHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlAnswerKeyHeader {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_points")]
    default_points: u32,
    #[serde(default)]
    batch: Option<String>,
}

fn default_points() -> u32 {
    DEFAULT_POINTS
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(rename = "type", default = "default_type_str")]
    question_type: String,
    correct_answer: String,
    #[serde(default)]
    points: Option<u32>,
    #[serde(default)]
    options: Option<Vec<String>>,
}

fn default_type_str() -> String {
    "short_answer".to_string()
}

/// Parse a single TOML file into an `AnswerKey`.
pub fn load_answer_key(path: &Path) -> Result<AnswerKey> {
    load_answer_key_with(path, &mut rand::thread_rng())
}

/// [`load_answer_key`] with a caller-supplied RNG for batch option shuffling.
pub fn load_answer_key_with<R: Rng + ?Sized>(path: &Path, rng: &mut R) -> Result<AnswerKey> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answer key file: {}", path.display()))?;

    parse_answer_key_str(&content, path, rng)
}

/// Parse a TOML string into an `AnswerKey` (useful for testing).
///
/// Batch lines expand first; explicit `[[questions]]` follow and are
/// numbered after them.
pub fn parse_answer_key_str<R: Rng + ?Sized>(
    content: &str,
    source_path: &Path,
    rng: &mut R,
) -> Result<AnswerKey> {
    let parsed: TomlAnswerKeyFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let header = parsed.answer_key;
    let mut questions = match &header.batch {
        Some(batch) => BatchKeyParser::new(header.default_points)
            .parse_with(batch, 0, rng)
            .map_err(|e| match e {
                BatchKeyError::NoRecognizedLines => AnswerKeyError::EmptyBatch {
                    source_name: source_path.display().to_string(),
                },
            })?,
        None => Vec::new(),
    };

    for q in parsed.questions {
        let number = questions.len() + 1;
        let question_type: QuestionType =
            q.question_type
                .parse()
                .map_err(|_| AnswerKeyError::UnknownQuestionType {
                    kind: q.question_type.clone(),
                    number,
                })?;

        questions.push(Question {
            id: q.id.unwrap_or_else(|| format!("q{number}")),
            text: q.text.unwrap_or_else(|| default_question_text(number)),
            question_type,
            options: q.options,
            correct_answer: q.correct_answer,
            points: q.points.unwrap_or(header.default_points),
        });
    }

    Ok(AnswerKey {
        id: header.id,
        title: header.title,
        description: header.description,
        questions,
        created_at: Utc::now(),
    })
}

/// Recursively load all `.toml` answer-key files from a directory.
pub fn load_answer_key_directory(dir: &Path) -> Result<Vec<AnswerKey>> {
    let mut keys = Vec::new();

    for path in toml_files(dir)? {
        match load_answer_key(&path) {
            Ok(key) => keys.push(key),
            Err(e) => {
                tracing::warn!("skipping {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(keys)
}

/// Parse a single answer-sheet TOML file.
pub fn load_answer_sheet(path: &Path) -> Result<AnswerSheet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answer sheet: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("failed to parse answer sheet: {}", path.display()))
}

/// Recursively load every answer sheet under `dir`, in path order.
pub fn load_answer_sheet_directory(dir: &Path) -> Result<Vec<AnswerSheet>> {
    let mut sheets = Vec::new();

    for path in toml_files(dir)? {
        match load_answer_sheet(&path) {
            Ok(sheet) => sheets.push(sheet),
            Err(e) => {
                tracing::warn!("skipping {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(sheets)
}

/// All `.toml` files below `dir`, sorted by path.
fn toml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_dir() {
            files.extend(toml_files(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// A warning from answer-key validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn for_question(question: &Question, message: impl Into<String>) -> Self {
        Self {
            question_id: Some(question.id.clone()),
            message: message.into(),
        }
    }
}

/// Validate an answer key for common authoring mistakes.
pub fn validate_answer_key(key: &AnswerKey) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if key.questions.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "answer key has no questions".into(),
        });
    }

    // Check for duplicate question IDs
    let mut seen_ids = HashSet::new();
    for q in &key.questions {
        if !seen_ids.insert(&q.id) {
            warnings.push(ValidationWarning::for_question(
                q,
                format!("duplicate question ID: {}", q.id),
            ));
        }
    }

    for q in &key.questions {
        if q.correct_answer.trim().is_empty() {
            warnings.push(ValidationWarning::for_question(q, "correct answer is empty"));
        }
        if q.points == 0 {
            warnings.push(ValidationWarning::for_question(q, "question is worth 0 points"));
        }
    }

    // Multiple-choice option checks
    for q in &key.questions {
        if q.question_type != QuestionType::MultipleChoice {
            continue;
        }
        let Some(options) = &q.options else {
            warnings.push(ValidationWarning::for_question(
                q,
                "multiple-choice question has no options",
            ));
            continue;
        };
        let answer = q.correct_answer.trim();
        if !options.iter().any(|o| o.trim() == answer) {
            warnings.push(ValidationWarning::for_question(
                q,
                format!("correct answer '{answer}' is not among the options"),
            ));
        }
        let mut seen_options = HashSet::new();
        for option in options {
            if !seen_options.insert(option.trim()) {
                warnings.push(ValidationWarning::for_question(
                    q,
                    format!("duplicate option: {option}"),
                ));
            }
        }
    }

    warnings
}
