//! The `gradekey distractors` command.

use anyhow::Result;
use comfy_table::{Cell, Table};
use rand::RngCore;

use gradekey_core::distractor::{
    generate_distractors_with, make_shuffled_options_with, seeded_rng, AnswerShape,
};

pub fn execute(answer: String, seed: Option<u64>, shuffle: bool) -> Result<()> {
    let answer = answer.trim().to_string();
    anyhow::ensure!(!answer.is_empty(), "answer must not be empty");

    let mut rng = seeded_rng(seed.unwrap_or_else(|| rand::thread_rng().next_u64()));
    let shape = AnswerShape::classify(&answer);
    let distractors = generate_distractors_with(&answer, &mut rng);

    let mut table = Table::new();
    if shuffle {
        let options = make_shuffled_options_with(&answer, &distractors, &mut rng);
        table.set_header(vec!["#", "Option", ""]);
        for (i, option) in options.iter().enumerate() {
            let marker = if *option == answer { "correct" } else { "" };
            table.add_row(vec![
                Cell::new(i + 1),
                Cell::new(option),
                Cell::new(marker),
            ]);
        }
    } else {
        table.set_header(vec!["#", "Distractor"]);
        for (i, distractor) in distractors.iter().enumerate() {
            table.add_row(vec![Cell::new(i + 1), Cell::new(distractor)]);
        }
    }

    println!("Answer: {answer} ({})", shape.name());
    println!("{table}");

    Ok(())
}
