//! The `gradekey normalize` command.

use anyhow::Result;

use gradekey_core::inequality::{format_for_display, normalize_answer};

pub fn execute(answer: String, display: bool) -> Result<()> {
    if display {
        println!("{}", format_for_display(&answer));
    } else {
        println!("{}", normalize_answer(&answer));
    }
    Ok(())
}
