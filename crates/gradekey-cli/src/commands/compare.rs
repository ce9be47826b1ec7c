//! The `gradekey compare` command.

use anyhow::Result;

use gradekey_core::compare::compare_answers;
use gradekey_core::inequality::format_for_display;

pub fn execute(student: String, correct: String) -> Result<()> {
    let verdict = if compare_answers(&student, &correct) {
        "correct"
    } else {
        "incorrect"
    };

    println!("{verdict}");
    println!("  student: {}", format_for_display(&student));
    println!("  correct: {}", format_for_display(&correct));

    Ok(())
}
