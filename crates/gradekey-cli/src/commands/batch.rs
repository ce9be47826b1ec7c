//! The `gradekey batch` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use rand::RngCore;
use serde::Serialize;

use gradekey_core::batch::BatchKeyParser;
use gradekey_core::distractor::seeded_rng;
use gradekey_core::model::Question;

use crate::config::load_config_from;

/// TOML output wraps the list so it can be pasted under `[[questions]]`.
#[derive(Serialize)]
struct QuestionList<'a> {
    questions: &'a [Question],
}

pub fn execute(
    input: PathBuf,
    start: usize,
    points: Option<u32>,
    seed: Option<u64>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let text = std::fs::read_to_string(&input)
        .with_context(|| format!("failed to read batch file: {}", input.display()))?;

    let parser = BatchKeyParser::new(points.unwrap_or(config.default_points));
    let seed = seed
        .or(config.seed)
        .unwrap_or_else(|| rand::thread_rng().next_u64());
    let questions = parser
        .parse_with(&text, start, &mut seeded_rng(seed))
        .with_context(|| format!("invalid batch file: {}", input.display()))?;

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&questions)?);
        }
        "toml" => {
            let list = QuestionList {
                questions: &questions,
            };
            print!("{}", toml::to_string_pretty(&list)?);
        }
        "text" => print_table(&questions),
        other => anyhow::bail!("unknown format '{other}' (expected text, json or toml)"),
    }

    Ok(())
}

fn print_table(questions: &[Question]) {
    let mut table = Table::new();
    table.set_header(vec!["Question", "Type", "Answer", "Options", "Points"]);

    for q in questions {
        let options = q.options.as_ref().map(|o| o.join(" | ")).unwrap_or_default();
        table.add_row(vec![
            Cell::new(&q.text),
            Cell::new(q.question_type),
            Cell::new(&q.correct_answer),
            Cell::new(options),
            Cell::new(q.points),
        ]);
    }

    println!("{table}");
    println!("{} question(s)", questions.len());
}
