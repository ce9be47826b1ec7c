//! Core data model types for gradekey.
//!
//! These are the value types that authoring, grading and reporting share:
//! questions, answer keys, answer sheets and graded submissions.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The standard option labels of a numbered multiple-choice question.
pub const STANDARD_OPTIONS: [&str; 5] = ["1", "2", "3", "4", "5"];

/// Points awarded per question unless the author says otherwise.
pub const DEFAULT_POINTS: u32 = 10;

/// A single gradable question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier for this question.
    pub id: String,
    /// Prompt or label shown to students (e.g. "3번 문제").
    pub text: String,
    /// How the question is answered.
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// Options for multiple-choice questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// The canonical answer, as authored.
    pub correct_answer: String,
    /// Points awarded for a correct answer.
    #[serde(default = "default_points")]
    pub points: u32,
}

impl Question {
    /// A multiple-choice question numbered `number` with the standard options.
    pub fn numbered_choice(number: usize, answer: impl Into<String>, points: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: default_question_text(number),
            question_type: QuestionType::MultipleChoice,
            options: Some(standard_options()),
            correct_answer: answer.into(),
            points,
        }
    }

    /// Returns `true` for a bare `1`-`5` answer over the standard option set.
    pub fn has_standard_options(&self) -> bool {
        let standard_answer = STANDARD_OPTIONS.contains(&self.correct_answer.as_str());
        let standard_set = self
            .options
            .as_ref()
            .is_some_and(|opts| opts.iter().map(String::as_str).eq(STANDARD_OPTIONS));
        standard_answer && standard_set
    }
}

/// Default label for the `number`-th question.
pub fn default_question_text(number: usize) -> String {
    format!("{number}번 문제")
}

/// `["1", "2", "3", "4", "5"]` as owned strings.
pub fn standard_options() -> Vec<String> {
    STANDARD_OPTIONS.iter().map(|s| s.to_string()).collect()
}

fn default_points() -> u32 {
    DEFAULT_POINTS
}

/// Supported question types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    ShortAnswer,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::MultipleChoice => write!(f, "multiple_choice"),
            QuestionType::ShortAnswer => write!(f, "short_answer"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "multiple_choice" | "mc" | "choice" => Ok(QuestionType::MultipleChoice),
            "short_answer" | "sa" | "short" => Ok(QuestionType::ShortAnswer),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// An answer key: the ordered questions of one test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerKey {
    /// Unique identifier for this answer key.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Questions in paper order.
    #[serde(default)]
    pub questions: Vec<Question>,
    /// When the key was authored.
    pub created_at: DateTime<Utc>,
}

impl AnswerKey {
    /// Sum of all question points.
    pub fn total_points(&self) -> u32 {
        self.questions.iter().map(|q| q.points).sum()
    }
}

/// One student's raw answers, positional by question order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerSheet {
    /// Who submitted the sheet.
    pub student_name: String,
    /// Answer `i` is for question `i`; missing trailing answers are blank.
    #[serde(default)]
    pub answers: Vec<String>,
}

impl AnswerSheet {
    /// The answer for question `index`, or `""` if it was left out.
    pub fn answer_at(&self, index: usize) -> &str {
        self.answers.get(index).map_or("", String::as_str)
    }
}

/// A graded answer sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// Unique submission identifier.
    pub id: Uuid,
    /// The answer key this submission was graded against.
    pub answer_key_id: String,
    /// Who submitted.
    pub student_name: String,
    /// Question id to the trimmed answer given.
    pub answers: BTreeMap<String, String>,
    /// Points earned.
    pub score: u32,
    /// Points available.
    pub total_possible: u32,
    /// When the submission was graded.
    pub submitted_at: DateTime<Utc>,
    /// Question id to verdict.
    pub graded_results: BTreeMap<String, bool>,
}

impl Submission {
    /// Number of questions answered correctly.
    pub fn correct_count(&self) -> usize {
        self.graded_results.values().filter(|ok| **ok).count()
    }

    /// Score as a fraction of the points available (0.0 when nothing is).
    pub fn ratio(&self) -> f64 {
        if self.total_possible == 0 {
            0.0
        } else {
            self.score as f64 / self.total_possible as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_type_display_and_parse() {
        assert_eq!(QuestionType::MultipleChoice.to_string(), "multiple_choice");
        assert_eq!(
            "short-answer".parse::<QuestionType>().unwrap(),
            QuestionType::ShortAnswer
        );
        assert_eq!("MC".parse::<QuestionType>().unwrap(), QuestionType::MultipleChoice);
        assert!("essay".parse::<QuestionType>().is_err());
    }

    #[test]
    fn numbered_choice_uses_standard_options() {
        let q = Question::numbered_choice(3, "4", DEFAULT_POINTS);
        assert_eq!(q.text, "3번 문제");
        assert!(q.has_standard_options());
        assert_eq!(q.options.as_deref().map(<[String]>::len), Some(5));
    }

    #[test]
    fn custom_answer_is_not_standard() {
        let mut q = Question::numbered_choice(1, "55", DEFAULT_POINTS);
        assert!(!q.has_standard_options());
        q.correct_answer = "2".into();
        q.options = Some(vec!["2".into(), "1".into()]);
        assert!(!q.has_standard_options());
    }

    #[test]
    fn question_serde_uses_type_tag() {
        let q = Question::numbered_choice(1, "2", 5);
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["type"], "multiple_choice");
        let back: Question = serde_json::from_value(json).unwrap();
        assert_eq!(back, q);
    }

    #[test]
    fn sheet_answers_are_positional() {
        let sheet = AnswerSheet {
            student_name: "민지".into(),
            answers: vec!["3".into()],
        };
        assert_eq!(sheet.answer_at(0), "3");
        assert_eq!(sheet.answer_at(4), "");
    }

    #[test]
    fn total_points_sums_questions() {
        let key = AnswerKey {
            id: "k".into(),
            title: "Key".into(),
            description: String::new(),
            questions: vec![
                Question::numbered_choice(1, "1", 10),
                Question::numbered_choice(2, "2", 5),
            ],
            created_at: Utc::now(),
        };
        assert_eq!(key.total_points(), 15);
    }
}
