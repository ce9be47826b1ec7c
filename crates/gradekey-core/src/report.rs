//! Grading report types with JSON persistence and markdown rendering.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{AnswerKey, Submission};
use crate::statistics::AnswerKeyStats;

/// A complete grading report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the answer key.
    pub answer_key: AnswerKeySummary,
    /// Graded submissions, in sheet order.
    pub submissions: Vec<Submission>,
    /// Score and per-question statistics.
    pub stats: AnswerKeyStats,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Summary of an answer key (without the full question definitions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerKeySummary {
    pub id: String,
    pub title: String,
    pub question_count: usize,
    pub total_points: u32,
}

impl From<&AnswerKey> for AnswerKeySummary {
    fn from(key: &AnswerKey) -> Self {
        Self {
            id: key.id.clone(),
            title: key.title.clone(),
            question_count: key.questions.len(),
            total_points: key.total_points(),
        }
    }
}

impl GradingReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: GradingReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        let stats = &self.stats;

        md.push_str(&format!("# {}\n\n", self.answer_key.title));
        md.push_str(&format!(
            "**Summary:** {} submissions, average {} / {}, max {}, min {}\n\n",
            stats.submission_count,
            stats.average_score,
            stats.total_possible,
            stats.max_score,
            stats.min_score
        ));

        if !self.submissions.is_empty() {
            md.push_str("### Students\n\n");
            md.push_str("| Student | Score | Correct |\n");
            md.push_str("|---------|-------|---------|\n");
            for s in &self.submissions {
                md.push_str(&format!(
                    "| {} | {} / {} | {} / {} |\n",
                    s.student_name,
                    s.score,
                    s.total_possible,
                    s.correct_count(),
                    s.graded_results.len()
                ));
            }
            md.push('\n');
        }

        if !stats.per_question.is_empty() {
            md.push_str("### Questions\n\n");
            md.push_str("| # | Question | Correct | Rate |\n");
            md.push_str("|---|----------|---------|------|\n");
            for q in &stats.per_question {
                md.push_str(&format!(
                    "| {} | {} | {} | {}% |\n",
                    q.index + 1,
                    q.question_id,
                    q.correct_count,
                    q.correct_rate
                ));
            }
        }

        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::grade_submission;
    use crate::model::{AnswerSheet, Question, DEFAULT_POINTS};
    use crate::statistics::compute_answer_key_stats;

    fn make_report() -> GradingReport {
        let mut questions = vec![
            Question::numbered_choice(1, "4", DEFAULT_POINTS),
            Question::numbered_choice(2, "1", DEFAULT_POINTS),
        ];
        questions[0].id = "q1".into();
        questions[1].id = "q2".into();
        let key = AnswerKey {
            id: "final".into(),
            title: "기말고사".into(),
            description: String::new(),
            questions,
            created_at: Utc::now(),
        };
        let submissions = vec![grade_submission(
            &key,
            &AnswerSheet {
                student_name: "하은".into(),
                answers: vec!["4".into(), "2".into()],
            },
        )];
        let stats = compute_answer_key_stats(&key, &submissions);

        GradingReport {
            id: Uuid::nil(),
            created_at: Utc::now(),
            answer_key: AnswerKeySummary::from(&key),
            submissions,
            stats,
            duration_ms: 0,
        }
    }

    #[test]
    fn json_roundtrip() {
        let report = make_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");

        report.save_json(&path).unwrap();
        let loaded = GradingReport::load_json(&path).unwrap();

        assert_eq!(loaded.answer_key.id, "final");
        assert_eq!(loaded.submissions.len(), 1);
        assert_eq!(loaded.stats, report.stats);
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(GradingReport::load_json(&dir.path().join("absent.json")).is_err());
    }

    #[test]
    fn markdown_output() {
        let md = make_report().to_markdown();
        assert!(md.starts_with("# 기말고사"));
        assert!(md.contains("| 하은 | 10 / 20 | 1 / 2 |"));
        assert!(md.contains("| 2 | q2 | 0 | 0% |"));
    }
}
