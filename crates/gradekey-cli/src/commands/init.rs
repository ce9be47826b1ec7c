//! The `gradekey init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("gradekey.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("answer-keys/sheets")?;
    write_if_missing(Path::new("answer-keys/example.toml"), EXAMPLE_ANSWER_KEY)?;
    write_if_missing(
        Path::new("answer-keys/sheets/example.toml"),
        EXAMPLE_ANSWER_SHEET,
    )?;

    println!("\nNext steps:");
    println!("  1. Edit answer-keys/example.toml with your answers");
    println!("  2. Run: gradekey validate --key answer-keys/example.toml");
    println!(
        "  3. Run: gradekey grade --key answer-keys/example.toml --sheets answer-keys/sheets"
    );

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradekey configuration

default_points = 10
parallelism = 4
output_dir = "./gradekey-results"
report_format = "json"
# seed = 42
"#;

const EXAMPLE_ANSWER_KEY: &str = r#"[answer_key]
id = "example"
title = "Example Quiz"
description = "A short quiz to get started"
default_points = 10

# One answer per line:
#   a 3      multiple choice, option 3 of 1-5
#   b <ans>  short answer, wrong options are generated
#   2 4 1    one multiple-choice question per digit
batch = """
a 3
b 12
b x >= 2
b ㄱ, ㄷ
4 1
"""

[[questions]]
id = "capital"
text = "What is the capital of Korea?"
correct_answer = "Seoul"
points = 5
"#;

const EXAMPLE_ANSWER_SHEET: &str = r#"student_name = "Example Student"
answers = ["3", "12", "2 <= x", "ㄱ,ㄷ", "4", "2", "seoul"]
"#;
