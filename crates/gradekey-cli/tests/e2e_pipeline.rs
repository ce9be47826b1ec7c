//! End-to-end pipeline tests over the library API.
//!
//! These tests verify that the grading pipeline (batch key → answer sheets →
//! concurrent grading → statistics → report) holds together on realistic
//! classroom data.

use std::path::Path;

use gradekey_core::batch::{regenerate_options_with, BatchKeyParser};
use gradekey_core::compare::compare_answers;
use gradekey_core::distractor::seeded_rng;
use gradekey_core::engine::{GradingEngine, GradingEngineConfig, NoopReporter};
use gradekey_core::model::{AnswerKey, AnswerSheet};
use gradekey_core::parser::{load_answer_key_with, load_answer_sheet_directory, validate_answer_key};
use gradekey_core::report::GradingReport;

fn sheet(name: &str, answers: &[&str]) -> AnswerSheet {
    AnswerSheet {
        student_name: name.into(),
        answers: answers.iter().map(|a| a.to_string()).collect(),
    }
}

fn batch_key(batch: &str) -> AnswerKey {
    let questions = BatchKeyParser::default()
        .parse_with(batch, 0, &mut seeded_rng(42))
        .unwrap();
    AnswerKey {
        id: "pipeline".into(),
        title: "Pipeline".into(),
        description: String::new(),
        questions,
        created_at: chrono::Utc::now(),
    }
}

#[tokio::test]
async fn e2e_batch_key_to_report() {
    let key = batch_key("a 2\nb -1/2\nb x<=5\nb ①, ③\n");
    assert!(validate_answer_key(&key).is_empty());

    // Every generated question offers its own answer exactly once.
    for q in &key.questions {
        let options = q.options.as_ref().unwrap();
        assert_eq!(options.len(), 5);
        assert_eq!(options.iter().filter(|o| **o == q.correct_answer).count(), 1);
    }

    let sheets = vec![
        sheet("A", &["2", "-1/2", "5 >= x", "①, ③"]),
        sheet("B", &["2", "1/2", "x<5", "①,③"]),
        sheet("C", &[]),
    ];

    let engine = GradingEngine::new(GradingEngineConfig { parallelism: 3 });
    let report = engine.grade_all(&key, sheets, &NoopReporter).await.unwrap();

    let scores: Vec<u32> = report.submissions.iter().map(|s| s.score).collect();
    assert_eq!(scores, vec![40, 20, 0]);
    assert_eq!(report.stats.average_score, 20);
    assert_eq!(report.stats.per_question[0].correct_rate, 67);
    assert_eq!(report.stats.per_question[1].correct_rate, 33);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    report.save_json(&path).unwrap();
    let loaded = GradingReport::load_json(&path).unwrap();
    assert_eq!(loaded.stats, report.stats);
    assert!(loaded.to_markdown().contains("| C | 0 / 40 | 0 / 4 |"));
}

#[tokio::test]
async fn e2e_sample_files() {
    let root = Path::new("../../answer-keys");
    let key = load_answer_key_with(&root.join("sample-math.toml"), &mut seeded_rng(1)).unwrap();
    let sheets = load_answer_sheet_directory(&root.join("sheets")).unwrap();
    assert_eq!(sheets.len(), 3);

    let engine = GradingEngine::new(GradingEngineConfig::default());
    let report = engine.grade_all(&key, sheets, &NoopReporter).await.unwrap();

    assert_eq!(report.answer_key.total_points, 100);
    assert_eq!(report.stats.max_score, 100);
    assert_eq!(report.stats.min_score, 20);
    let hardest = report.stats.hardest_questions();
    assert_eq!(hardest[0].correct_rate, 33);
}

#[test]
fn e2e_regenerated_options_still_grade() {
    let mut key = batch_key("b 0.5\nb 제1사분면, 제3사분면\n");

    let mut rng = seeded_rng(99);
    for q in &mut key.questions {
        assert!(regenerate_options_with(q, &mut rng));
    }
    for q in &key.questions {
        let options = q.options.as_ref().unwrap();
        assert!(options.contains(&q.correct_answer));
    }

    // Regenerating options never changes what counts as correct.
    assert!(compare_answers(" 0.5 ", &key.questions[0].correct_answer));
    assert!(compare_answers(
        "제1사분면,제3사분면",
        &key.questions[1].correct_answer
    ));
}
