//! Grading answer sheets against an answer key.

use std::collections::BTreeMap;

use chrono::Utc;
use uuid::Uuid;

use crate::compare::compare_answers;
use crate::model::{AnswerKey, AnswerSheet, Submission};

/// The verdict for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionVerdict {
    pub question_id: String,
    pub answer: String,
    pub correct: bool,
    pub points_awarded: u32,
}

/// Judge every question of `key` against the positional answers in `sheet`.
pub fn grade_answers(key: &AnswerKey, sheet: &AnswerSheet) -> Vec<QuestionVerdict> {
    key.questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let answer = sheet.answer_at(index).trim().to_string();
            let correct = compare_answers(&answer, &question.correct_answer);
            QuestionVerdict {
                question_id: question.id.clone(),
                answer,
                correct,
                points_awarded: if correct { question.points } else { 0 },
            }
        })
        .collect()
}

/// Grade a sheet into a [`Submission`].
pub fn grade_submission(key: &AnswerKey, sheet: &AnswerSheet) -> Submission {
    let verdicts = grade_answers(key, sheet);

    let score = verdicts.iter().map(|v| v.points_awarded).sum();
    let mut answers = BTreeMap::new();
    let mut graded_results = BTreeMap::new();
    for verdict in verdicts {
        graded_results.insert(verdict.question_id.clone(), verdict.correct);
        answers.insert(verdict.question_id, verdict.answer);
    }

    if sheet.answers.len() > key.questions.len() {
        tracing::warn!(
            student = %sheet.student_name,
            extra = sheet.answers.len() - key.questions.len(),
            "answer sheet has more answers than questions; extras ignored"
        );
    }

    Submission {
        id: Uuid::new_v4(),
        answer_key_id: key.id.clone(),
        student_name: sheet.student_name.clone(),
        answers,
        score,
        total_possible: key.total_points(),
        submitted_at: Utc::now(),
        graded_results,
    }
}
