//! Batch answer-key shorthand.
//!
//! One answer specification per line:
//!
//! - `a 3` — multiple choice, answer 3 of the standard options `1`-`5`.
//! - `b a>3` — short answer turned into multiple choice with generated
//!   distractors.
//! - `2 4, 1` — legacy form, one multiple-choice question per digit.
//!
//! Question numbers continue from the number of questions already authored.

use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;
use uuid::Uuid;

use crate::distractor::{generate_distractors_with, make_shuffled_options_with};
use crate::error::BatchKeyError;
use crate::model::{default_question_text, Question, QuestionType, DEFAULT_POINTS};

static CHOICE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[aA]\s+([1-5])$").expect("choice line pattern"));

static SHORT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[bB]\s+(.+)$").expect("short answer line pattern"));

static TOKEN_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,]+").expect("token separator pattern"));

/// Parser for the batch shorthand.
#[derive(Debug, Clone, Copy)]
pub struct BatchKeyParser {
    /// Points assigned to every generated question.
    pub points: u32,
}

impl Default for BatchKeyParser {
    fn default() -> Self {
        Self {
            points: DEFAULT_POINTS,
        }
    }
}

/// What a single line of the batch turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LineSpec {
    Choice(String),
    Short(String),
    Legacy(Vec<String>),
}

impl LineSpec {
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if let Some(caps) = CHOICE_LINE.captures(line) {
            return Some(LineSpec::Choice(caps[1].to_string()));
        }
        if let Some(caps) = SHORT_LINE.captures(line) {
            return Some(LineSpec::Short(caps[1].trim().to_string()));
        }
        let digits: Vec<String> = TOKEN_SEPARATOR
            .split(line)
            .filter(|token| matches!(*token, "1" | "2" | "3" | "4" | "5"))
            .map(String::from)
            .collect();
        (!digits.is_empty()).then_some(LineSpec::Legacy(digits))
    }
}

impl BatchKeyParser {
    pub fn new(points: u32) -> Self {
        Self { points }
    }

    /// Parse a batch using the thread-local RNG for option shuffling.
    pub fn parse(&self, text: &str, existing: usize) -> Result<Vec<Question>, BatchKeyError> {
        self.parse_with(text, existing, &mut rand::thread_rng())
    }

    /// Parse a batch with a caller-supplied RNG.
    ///
    /// `existing` is the number of questions already in the key; the first
    /// new question is numbered `existing + 1`.
    pub fn parse_with<R: Rng + ?Sized>(
        &self,
        text: &str,
        existing: usize,
        rng: &mut R,
    ) -> Result<Vec<Question>, BatchKeyError> {
        let mut questions = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            let Some(spec) = LineSpec::parse(line) else {
                if !line.trim().is_empty() {
                    tracing::debug!(line = line_no + 1, "skipping unrecognized batch line");
                }
                continue;
            };

            match spec {
                LineSpec::Choice(answer) => {
                    let number = existing + questions.len() + 1;
                    questions.push(Question::numbered_choice(number, answer, self.points));
                }
                LineSpec::Short(answer) => {
                    let number = existing + questions.len() + 1;
                    let distractors = generate_distractors_with(&answer, rng);
                    let options = make_shuffled_options_with(&answer, &distractors, rng);
                    questions.push(Question {
                        id: Uuid::new_v4().to_string(),
                        text: default_question_text(number),
                        question_type: QuestionType::MultipleChoice,
                        options: Some(options),
                        correct_answer: answer,
                        points: self.points,
                    });
                }
                LineSpec::Legacy(digits) => {
                    for digit in digits {
                        let number = existing + questions.len() + 1;
                        questions.push(Question::numbered_choice(number, digit, self.points));
                    }
                }
            }
        }

        if questions.is_empty() {
            return Err(BatchKeyError::NoRecognizedLines);
        }

        tracing::debug!(count = questions.len(), "parsed batch answer key");
        Ok(questions)
    }
}

/// Parse a batch with default points, numbering after `starting_index`
/// existing questions.
pub fn parse_batch_answer_key(
    text: &str,
    starting_index: usize,
) -> Result<Vec<Question>, BatchKeyError> {
    BatchKeyParser::default().parse(text, starting_index)
}

/// Reroll the options of a question whose answer is not a standard digit.
///
/// Returns `false` (and leaves the question alone) for a bare `1`-`5`
/// answer with the standard option set.
pub fn regenerate_options(question: &mut Question) -> bool {
    regenerate_options_with(question, &mut rand::thread_rng())
}

/// [`regenerate_options`] with a caller-supplied RNG.
pub fn regenerate_options_with<R: Rng + ?Sized>(question: &mut Question, rng: &mut R) -> bool {
    if question.has_standard_options() {
        return false;
    }
    let distractors = generate_distractors_with(&question.correct_answer, rng);
    question.options = Some(make_shuffled_options_with(
        &question.correct_answer,
        &distractors,
        rng,
    ));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distractor::seeded_rng;
    use crate::model::standard_options;

    #[test]
    fn mixed_batch() {
        let questions = parse_batch_answer_key("a 3\nb 55\n2", 0).unwrap();
        assert_eq!(questions.len(), 3);

        assert_eq!(questions[0].question_type, QuestionType::MultipleChoice);
        assert_eq!(questions[0].correct_answer, "3");
        assert_eq!(questions[0].options, Some(standard_options()));

        assert_eq!(questions[1].question_type, QuestionType::MultipleChoice);
        assert_eq!(questions[1].correct_answer, "55");
        let options = questions[1].options.as_ref().unwrap();
        assert_eq!(options.len(), 5);
        assert_eq!(options.iter().filter(|o| *o == "55").count(), 1);

        assert_eq!(questions[2].correct_answer, "2");
        assert_eq!(questions[2].options, Some(standard_options()));
    }

    #[test]
    fn numbering_continues_from_existing() {
        let questions = parse_batch_answer_key("1 2, 3\na 5", 4).unwrap();
        let texts: Vec<&str> = questions.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, vec!["5번 문제", "6번 문제", "7번 문제", "8번 문제"]);
        let answers: Vec<&str> = questions.iter().map(|q| q.correct_answer.as_str()).collect();
        assert_eq!(answers, vec!["1", "2", "3", "5"]);
    }

    #[test]
    fn legacy_line_drops_out_of_range_tokens() {
        let questions = parse_batch_answer_key("1 7 0 5,,2", 0).unwrap();
        let answers: Vec<&str> = questions.iter().map(|q| q.correct_answer.as_str()).collect();
        assert_eq!(answers, vec!["1", "5", "2"]);
    }

    #[test]
    fn choice_line_out_of_range_falls_back_to_legacy() {
        // "a 7" is not a choice line and contains no 1-5 tokens.
        assert_eq!(
            parse_batch_answer_key("a 7", 0),
            Err(BatchKeyError::NoRecognizedLines)
        );
    }

    #[test]
    fn short_answer_tail_is_trimmed() {
        let questions = parse_batch_answer_key("B   a < -3 또는 a > 2  ", 0).unwrap();
        assert_eq!(questions[0].correct_answer, "a < -3 또는 a > 2");
    }

    #[test]
    fn empty_batch_is_a_format_error() {
        assert_eq!(
            parse_batch_answer_key("\n  \nhello\n", 0),
            Err(BatchKeyError::NoRecognizedLines)
        );
    }

    #[test]
    fn custom_points() {
        let parser = BatchKeyParser::new(4);
        let questions = parser.parse("a 1", 0).unwrap();
        assert_eq!(questions[0].points, 4);
    }

    #[test]
    fn seeded_parse_is_reproducible() {
        let parser = BatchKeyParser::default();
        let a = parser.parse_with("b ㄱ, ㄴ", 0, &mut seeded_rng(9)).unwrap();
        let b = parser.parse_with("b ㄱ, ㄴ", 0, &mut seeded_rng(9)).unwrap();
        assert_eq!(a[0].options, b[0].options);
    }

    #[test]
    fn regenerate_skips_standard_questions() {
        let mut q = Question::numbered_choice(1, "3", DEFAULT_POINTS);
        assert!(!regenerate_options(&mut q));
        assert_eq!(q.options, Some(standard_options()));
    }

    #[test]
    fn regenerate_rerolls_custom_answers() {
        let mut q = parse_batch_answer_key("b 3/4", 0).unwrap().remove(0);
        assert!(regenerate_options_with(&mut q, &mut seeded_rng(5)));
        let options = q.options.unwrap();
        assert_eq!(options.len(), 5);
        assert!(options.contains(&"3/4".to_string()));
    }

    #[test]
    fn regenerate_fills_short_answer_without_options() {
        let mut q = Question {
            id: "q1".into(),
            text: "1번 문제".into(),
            question_type: QuestionType::ShortAnswer,
            options: None,
            correct_answer: "광합성".into(),
            points: DEFAULT_POINTS,
        };
        assert!(regenerate_options(&mut q));
        assert_eq!(q.options.map(|o| o.len()), Some(5));
    }
}
