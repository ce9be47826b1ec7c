//! The `gradekey grade` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use rand::RngCore;

use gradekey_core::distractor::seeded_rng;
use gradekey_core::engine::{GradingEngine, GradingEngineConfig, ProgressReporter};
use gradekey_core::model::Submission;
use gradekey_core::parser;
use gradekey_core::report::GradingReport;

use crate::config::load_config_from;

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_sheet_complete(&self, submission: &Submission) {
        eprintln!(
            "  Graded: {} {}/{}",
            submission.student_name, submission.score, submission.total_possible
        );
    }

    fn on_sheet_error(&self, student_name: &str, error: &str) {
        eprintln!("  ERROR: {student_name}: {error}");
    }

    fn on_run_complete(&self, total: usize, completed: usize, failed: usize, elapsed: Duration) {
        eprintln!(
            "\nComplete: {completed}/{total} graded, {failed} failed ({:.1}s)",
            elapsed.as_secs_f64()
        );
    }
}

pub async fn execute(
    key_path: PathBuf,
    sheets_path: PathBuf,
    output: Option<PathBuf>,
    format: Option<String>,
    parallelism: Option<usize>,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let parallelism = parallelism.unwrap_or(config.parallelism);
    anyhow::ensure!(parallelism >= 1, "parallelism must be at least 1");
    let format = format.unwrap_or_else(|| config.report_format.clone());
    let output = output.unwrap_or_else(|| config.output_dir.clone());
    let seed = seed
        .or(config.seed)
        .unwrap_or_else(|| rand::thread_rng().next_u64());

    let key = parser::load_answer_key_with(&key_path, &mut seeded_rng(seed))?;
    let sheets = if sheets_path.is_dir() {
        parser::load_answer_sheet_directory(&sheets_path)?
    } else {
        vec![parser::load_answer_sheet(&sheets_path)?]
    };
    anyhow::ensure!(
        !sheets.is_empty(),
        "no answer sheets found in {}",
        sheets_path.display()
    );

    eprintln!(
        "gradekey v{}: grading {} sheet(s) against '{}' ({} questions)",
        env!("CARGO_PKG_VERSION"),
        sheets.len(),
        key.title,
        key.questions.len()
    );

    let engine = GradingEngine::new(GradingEngineConfig { parallelism });
    let report = engine.grade_all(&key, sheets, &ConsoleReporter).await?;

    print_summary(&report);

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
    match format.as_str() {
        "json" => {
            let path = output.join(format!("report-{timestamp}.json"));
            report.save_json(&path)?;
            eprintln!("Results saved to: {}", path.display());
        }
        "markdown" | "md" => {
            std::fs::create_dir_all(&output)?;
            let path = output.join(format!("report-{timestamp}.md"));
            std::fs::write(&path, report.to_markdown())?;
            eprintln!("Markdown report: {}", path.display());
        }
        "text" => {}
        other => anyhow::bail!("unknown format '{other}' (expected json, markdown or text)"),
    }

    Ok(())
}

fn print_summary(report: &GradingReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Student", "Score", "Correct", "Percent"]);

    for s in &report.submissions {
        table.add_row(vec![
            Cell::new(&s.student_name),
            Cell::new(format!("{}/{}", s.score, s.total_possible)),
            Cell::new(format!("{}/{}", s.correct_count(), s.graded_results.len())),
            Cell::new(format!("{:.1}%", s.ratio() * 100.0)),
        ]);
    }

    let stats = &report.stats;
    println!("{table}");
    println!(
        "Average: {} / {}  Max: {}  Min: {}",
        stats.average_score, stats.total_possible, stats.max_score, stats.min_score
    );

    if let Some(hardest) = stats.hardest_questions().first() {
        println!(
            "Hardest question: #{} ({}% correct)",
            hardest.index + 1,
            hardest.correct_rate
        );
    }
}
