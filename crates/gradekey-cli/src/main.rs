//! gradekey CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(
    name = "gradekey",
    version,
    about = "Answer keys, distractors and grading for short-answer tests"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a student answer matches the correct answer
    Compare {
        /// The student's answer
        #[arg(long, allow_hyphen_values = true)]
        student: String,

        /// The answer-key answer
        #[arg(long, allow_hyphen_values = true)]
        correct: String,
    },

    /// Print the canonical (or display) form of an answer
    Normalize {
        /// Answer text
        #[arg(allow_hyphen_values = true)]
        answer: String,

        /// Print the human-friendly display form instead
        #[arg(long)]
        display: bool,
    },

    /// Generate wrong options for an answer
    Distractors {
        /// The correct answer
        #[arg(allow_hyphen_values = true)]
        answer: String,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Also print the five shuffled options
        #[arg(long)]
        shuffle: bool,
    },

    /// Expand the batch answer-key shorthand
    Batch {
        /// File with one answer specification per line
        #[arg(long)]
        input: PathBuf,

        /// Number of questions already in the key
        #[arg(long, default_value = "0")]
        start: usize,

        /// Points per question (default: from config)
        #[arg(long)]
        points: Option<u32>,

        /// RNG seed for reproducible option shuffling
        #[arg(long)]
        seed: Option<u64>,

        /// Output format: text, json, toml
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Grade answer sheets against an answer key
    Grade {
        /// Path to the .toml answer key
        #[arg(long)]
        key: PathBuf,

        /// Answer sheet .toml file or directory of sheets
        #[arg(long)]
        sheets: PathBuf,

        /// Output directory (default: from config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: json, markdown, text (default: from config)
        #[arg(long)]
        format: Option<String>,

        /// Max sheets graded concurrently (default: from config)
        #[arg(long)]
        parallelism: Option<usize>,

        /// RNG seed for batch option shuffling
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate answer-key TOML files
    Validate {
        /// Path to answer key file or directory
        #[arg(long)]
        key: PathBuf,
    },

    /// Create starter config, answer key and answer sheet
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradekey=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compare { student, correct } => commands::compare::execute(student, correct),
        Commands::Normalize { answer, display } => commands::normalize::execute(answer, display),
        Commands::Distractors {
            answer,
            seed,
            shuffle,
        } => commands::distractors::execute(answer, seed, shuffle),
        Commands::Batch {
            input,
            start,
            points,
            seed,
            format,
            config,
        } => commands::batch::execute(input, start, points, seed, format, config),
        Commands::Grade {
            key,
            sheets,
            output,
            format,
            parallelism,
            seed,
            config,
        } => {
            commands::grade::execute(key, sheets, output, format, parallelism, seed, config).await
        }
        Commands::Validate { key } => commands::validate::execute(key),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
