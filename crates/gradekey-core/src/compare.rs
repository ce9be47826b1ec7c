//! Answer equivalence.

use crate::inequality::{is_inequality, normalize_answer, strip_whitespace};

/// Decide whether a student's answer earns credit against the key.
///
/// Order matters:
/// 1. a blank student answer never matches,
/// 2. a verbatim match (after trimming) always does,
/// 3. if either side is an inequality, canonical forms are compared,
/// 4. otherwise case and whitespace are ignored.
pub fn compare_answers(student: &str, correct: &str) -> bool {
    let student = student.trim();
    let correct = correct.trim();

    if student.is_empty() {
        return false;
    }

    if student == correct {
        return true;
    }

    if is_inequality(student) || is_inequality(correct) {
        return normalize_answer(student) == normalize_answer(correct);
    }

    loose_form(student) == loose_form(correct)
}

fn loose_form(text: &str) -> String {
    strip_whitespace(text).to_lowercase()
}
