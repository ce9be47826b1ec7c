//! Typed errors for answer-key authoring.
//!
//! Comparison, normalization and distractor generation never fail: every
//! step there has a fallback branch. Only authoring surfaces can reject
//! their input.

use thiserror::Error;

/// Errors from the line-oriented batch answer-key shorthand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchKeyError {
    /// No line of the batch matched any of the shorthand forms.
    #[error("no recognizable answer lines (use `a 3`, `b <answer>` or bare digits 1-5)")]
    NoRecognizedLines,
}

/// Errors while assembling an answer key from a TOML document.
#[derive(Debug, Error)]
pub enum AnswerKeyError {
    /// The `batch` block was present but produced no questions.
    #[error("batch block in {source_name} has no recognizable lines")]
    EmptyBatch { source_name: String },

    /// A question declared a `type` that is not known.
    #[error("unknown question type '{kind}' for question {number}")]
    UnknownQuestionType { kind: String, number: usize },

    /// The batch shorthand itself was rejected.
    #[error(transparent)]
    Batch(#[from] BatchKeyError),
}

impl AnswerKeyError {
    /// Returns `true` if the error comes from the batch shorthand rather
    /// than from explicit question tables.
    pub fn is_batch_error(&self) -> bool {
        matches!(
            self,
            AnswerKeyError::EmptyBatch { .. } | AnswerKeyError::Batch(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_error_message_has_format_hint() {
        let msg = BatchKeyError::NoRecognizedLines.to_string();
        assert!(msg.contains("a 3"));
    }

    #[test]
    fn classifies_batch_errors() {
        let err = AnswerKeyError::from(BatchKeyError::NoRecognizedLines);
        assert!(err.is_batch_error());
        let err = AnswerKeyError::UnknownQuestionType {
            kind: "essay".into(),
            number: 2,
        };
        assert!(!err.is_batch_error());
        assert_eq!(err.to_string(), "unknown question type 'essay' for question 2");
    }
}
