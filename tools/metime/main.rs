mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use metime::core::lint::lint;
use metime::core::view::StoryView;
use metime::core::wizard::Wizard;
use metime::schema::story_kind::StoryKind;
use metime::{AppConfig, Session};

/// Personalized story sessions in the terminal.
#[derive(Debug, Parser)]
#[command(name = "metime")]
#[command(about = "MeTime Stories: answer a few questions, then read a story about you", long_about = None)]
struct Cli {
    /// Config file. Defaults to `$XDG_CONFIG_HOME/metime/config.ron`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for the "surprise me" pick, overriding the config.
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start an interactive session (the default).
    Play,

    /// Answer the wizard from a file, one response per line, and print a story.
    Replay {
        /// Response file.
        file: PathBuf,

        /// Story to render: a name, slug or menu number. Random if omitted.
        #[arg(long)]
        story: Option<String>,
    },

    /// Check the configured questions and stories for problems.
    Lint,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("metime error: {:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Cli::parse();
    let config = load_config(args.config.as_deref())?;
    let log_path = logging::init_logging(config.log_filter.as_deref());
    tracing::debug!(?config, ?log_path, "starting metime");

    let seed = args.seed.or(config.seed).unwrap_or_else(rand::random);
    let questions = Arc::new(config.question_set().context("loading questions")?);
    let stories = Arc::new(config.story_library().context("loading stories")?);

    match args.command.unwrap_or(Command::Play) {
        Command::Play => {
            let session = Session::new(questions, stories).with_seed(seed);
            let summary = cli::run(session)?.end();
            if !summary.stories_read.is_empty() {
                println!(
                    "You read {} stories for {} minutes today.",
                    summary.stories_read.len(),
                    summary.reading_minutes
                );
            }
        }
        Command::Replay { file, story } => {
            let contents = std::fs::read_to_string(&file)
                .with_context(|| format!("reading responses from {}", file.display()))?;
            let answers = Wizard::replay(questions, contents.lines());
            tracing::info!(answers = answers.len(), "replayed responses");

            let kind = match story {
                Some(name) => StoryKind::parse(&name)
                    .with_context(|| format!("unknown story '{name}'"))?,
                None => StoryKind::pick(&mut StdRng::seed_from_u64(seed)),
            };
            let rendered = stories.render(kind, &answers)?;
            print!("{}", StoryView(&rendered));
        }
        Command::Lint => {
            let report = lint(&questions, &stories);
            for finding in &report.findings {
                println!("{finding}");
            }
            println!(
                "\nSummary: {} errors, {} warnings",
                report.errors().count(),
                report.warnings().count()
            );
            if report.has_errors() {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}

/// `--config` if given, else the XDG config file if present, else defaults.
fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        return AppConfig::load(path).with_context(|| format!("loading {}", path.display()));
    }
    let xdg_dirs = xdg::BaseDirectories::with_prefix("metime")?;
    match xdg_dirs.find_config_file("config.ron") {
        Some(path) => AppConfig::load(&path).with_context(|| format!("loading {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}
