//! Terminal customer feedback survey.
//!
//! Run with: cargo run -p feedback-survey-ratatui -- --store survey-store.json

mod cli;

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use feedback_survey::{FileStore, SurveyRunner, catalog};
use feedback_survey_ratatui::RatatuiFrontend;

use crate::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let store = FileStore::open(&cli.store)
        .with_context(|| format!("opening store {}", cli.store.display()))?;
    let mut runner = SurveyRunner::mount(catalog::default_survey(), store, cli.runner_config())?;

    let frontend = RatatuiFrontend::new().with_title(cli.title.clone());
    let submissions = frontend.run(&mut runner)?;

    println!("\n=== {} submission(s) this session ===", submissions.len());
    for (n, submission) in submissions.iter().enumerate() {
        println!("Submission {}:", n + 1);
        for answer in &submission.answers {
            let prompt = runner
                .definition()
                .question(answer.question_id)
                .map_or("?", |question| question.prompt());
            println!("  {prompt} {}", answer.value);
        }
    }

    Ok(())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cli.log_file)
        .with_context(|| format!("opening log file {}", cli.log_file.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(cli.log_level)
        .init();
    Ok(())
}
