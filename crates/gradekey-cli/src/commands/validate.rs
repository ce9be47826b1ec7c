//! The `gradekey validate` command.

use std::path::PathBuf;

use anyhow::Result;

use gradekey_core::parser;

pub fn execute(key_path: PathBuf) -> Result<()> {
    let keys = if key_path.is_dir() {
        parser::load_answer_key_directory(&key_path)?
    } else {
        vec![parser::load_answer_key(&key_path)?]
    };

    let mut total_warnings = 0;

    for key in &keys {
        println!(
            "Answer key: {} ({} questions, {} points)",
            key.title,
            key.questions.len(),
            key.total_points()
        );

        let warnings = parser::validate_answer_key(key);
        for w in &warnings {
            let prefix = w
                .question_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All answer keys valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
