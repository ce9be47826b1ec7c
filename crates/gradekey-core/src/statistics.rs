//! Answer-key statistics across graded submissions.

use serde::{Deserialize, Serialize};

use crate::model::{AnswerKey, Submission};

/// Score distribution and per-question correctness for one answer key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerKeyStats {
    /// Submissions counted.
    pub submission_count: usize,
    /// Mean score, rounded to the nearest point.
    pub average_score: u32,
    /// Highest score (0 with no submissions).
    pub max_score: u32,
    /// Lowest score (0 with no submissions).
    pub min_score: u32,
    /// Points available on the key.
    pub total_possible: u32,
    /// One entry per question, in key order.
    pub per_question: Vec<QuestionStats>,
}

/// How many students got one question right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionStats {
    pub question_id: String,
    /// Zero-based position in the key.
    pub index: usize,
    pub correct_count: usize,
    /// Percent correct, rounded (0 with no submissions).
    pub correct_rate: u32,
}

/// Compute statistics for `key` from the submissions graded against it.
///
/// Submissions for other answer keys are ignored.
pub fn compute_answer_key_stats(key: &AnswerKey, submissions: &[Submission]) -> AnswerKeyStats {
    let relevant: Vec<&Submission> = submissions
        .iter()
        .filter(|s| s.answer_key_id == key.id)
        .collect();
    let n = relevant.len();

    let scores: Vec<u32> = relevant.iter().map(|s| s.score).collect();
    let average_score = if n == 0 {
        0
    } else {
        let total: u64 = scores.iter().map(|&s| s as u64).sum();
        (total as f64 / n as f64).round() as u32
    };

    let per_question = key
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let correct_count = relevant
                .iter()
                .filter(|s| s.graded_results.get(&question.id).copied().unwrap_or(false))
                .count();
            let correct_rate = if n == 0 {
                0
            } else {
                (correct_count as f64 / n as f64 * 100.0).round() as u32
            };
            QuestionStats {
                question_id: question.id.clone(),
                index,
                correct_count,
                correct_rate,
            }
        })
        .collect();

    AnswerKeyStats {
        submission_count: n,
        average_score,
        max_score: scores.iter().copied().max().unwrap_or(0),
        min_score: scores.iter().copied().min().unwrap_or(0),
        total_possible: key.total_points(),
        per_question,
    }
}

impl AnswerKeyStats {
    /// Questions sorted from hardest (lowest correct rate) to easiest.
    pub fn hardest_questions(&self) -> Vec<&QuestionStats> {
        let mut sorted: Vec<&QuestionStats> = self.per_question.iter().collect();
        sorted.sort_by_key(|q| (q.correct_rate, q.index));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::grade_submission;
    use crate::model::{AnswerSheet, Question, DEFAULT_POINTS};
    use chrono::Utc;

    fn key() -> AnswerKey {
        let mut questions = vec![
            Question::numbered_choice(1, "1", DEFAULT_POINTS),
            Question::numbered_choice(2, "2", DEFAULT_POINTS),
            Question::numbered_choice(3, "3", DEFAULT_POINTS),
        ];
        for (i, q) in questions.iter_mut().enumerate() {
            q.id = format!("q{}", i + 1);
        }
        AnswerKey {
            id: "quiz".into(),
            title: "Quiz".into(),
            description: String::new(),
            questions,
            created_at: Utc::now(),
        }
    }

    fn submit(key: &AnswerKey, answers: &[&str]) -> Submission {
        grade_submission(
            key,
            &AnswerSheet {
                student_name: "학생".into(),
                answers: answers.iter().map(|a| a.to_string()).collect(),
            },
        )
    }

    #[test]
    fn empty_submissions() {
        let stats = compute_answer_key_stats(&key(), &[]);
        assert_eq!(stats.submission_count, 0);
        assert_eq!(stats.average_score, 0);
        assert_eq!(stats.max_score, 0);
        assert_eq!(stats.min_score, 0);
        assert_eq!(stats.total_possible, 30);
        assert!(stats.per_question.iter().all(|q| q.correct_rate == 0));
    }

    #[test]
    fn score_distribution_and_rates() {
        let key = key();
        let subs = vec![
            submit(&key, &["1", "2", "3"]),
            submit(&key, &["1", "5", "3"]),
            submit(&key, &["1", "4", "4"]),
        ];
        let stats = compute_answer_key_stats(&key, &subs);
        assert_eq!(stats.submission_count, 3);
        assert_eq!(stats.max_score, 30);
        assert_eq!(stats.min_score, 10);
        assert_eq!(stats.average_score, 20);
        assert_eq!(stats.per_question[0].correct_rate, 100);
        assert_eq!(stats.per_question[1].correct_rate, 33);
        assert_eq!(stats.per_question[2].correct_rate, 67);
        assert_eq!(stats.hardest_questions()[0].question_id, "q2");
    }

    #[test]
    fn other_keys_are_ignored() {
        let key = key();
        let mut stray = submit(&key, &["1", "2", "3"]);
        stray.answer_key_id = "other".into();
        let stats = compute_answer_key_stats(&key, &[stray]);
        assert_eq!(stats.submission_count, 0);
    }
}
