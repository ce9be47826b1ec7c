//! gradekey-core — Answer equivalence, distractor generation, and grading.
//!
//! This crate decides whether a student's free-text answer matches an
//! answer key (including compound inequalities written in different
//! orders), generates plausible wrong options for multiple-choice
//! questions, expands the batch answer-key shorthand, and grades answer
//! sheets into reports.

pub mod batch;
pub mod compare;
pub mod distractor;
pub mod engine;
pub mod error;
pub mod grading;
pub mod inequality;
pub mod model;
pub mod parser;
pub mod report;
pub mod statistics;
pub mod symbols;

pub use batch::parse_batch_answer_key;
pub use compare::compare_answers;
pub use distractor::{generate_distractors, make_shuffled_options};
pub use inequality::{format_for_display, normalize_answer};
