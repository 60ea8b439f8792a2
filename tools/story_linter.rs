//! Story Linter: checks story templates against the questions that fill them.
//!
//! Usage: story_linter [<stories_dir>] [--questions <file>]
//!
//! Without arguments the built-in questions and stories are checked.
//! Exits non-zero when any error is found.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process;

use metime::core::lint::lint;
use metime::core::question::QuestionSet;
use metime::core::story::StoryLibrary;

#[derive(Debug, Parser)]
#[command(name = "story_linter", about = "Validate story templates and question files")]
struct Args {
    /// Directory of story `.ron` files, checked on their own.
    stories_dir: Option<PathBuf>,

    /// Question file to check against instead of the built-in flow.
    #[arg(long)]
    questions: Option<PathBuf>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("ERROR: {:#}", err);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let questions = match &args.questions {
        Some(path) => QuestionSet::load_from_ron(path)
            .with_context(|| format!("failed to load question file {}", path.display()))?,
        None => QuestionSet::builtin()?,
    };
    println!("Loaded {} questions", questions.len());

    let stories = match &args.stories_dir {
        Some(dir) => {
            let mut library = StoryLibrary::default();
            library
                .load_from_dir(dir)
                .with_context(|| format!("failed to load stories from {}", dir.display()))?;
            library
        }
        None => StoryLibrary::builtin()?,
    };
    println!("Loaded {} stories", stories.len());

    let report = lint(&questions, &stories);

    println!("\n=== Story Lint Report ===\n");
    if report.is_clean() {
        println!("All checks passed!");
    }
    for finding in &report.findings {
        println!("{finding}");
    }
    println!(
        "\nSummary: {} errors, {} warnings",
        report.errors().count(),
        report.warnings().count()
    );

    if report.has_errors() {
        process::exit(1);
    }
    Ok(())
}
