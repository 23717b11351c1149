//! qcm CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use qcm_core::error::QuizError;

mod commands;

/// Exit code used when the user stops a quiz with Ctrl-C.
const EXIT_INTERRUPTED: i32 = 130;

#[derive(Parser)]
#[command(name = "qcm", version, about = "Timed multiple-choice practice exams")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a quiz
    Run {
        /// Path to a .json/.toml question bank or a directory of banks
        #[arg(long)]
        questions: PathBuf,

        /// Number of questions to draw (default from config: 100)
        #[arg(long)]
        count: Option<usize>,

        /// Per-question time limit in seconds (0 disables)
        #[arg(long)]
        time_limit: Option<u64>,

        /// Seed for a reproducible question order
        #[arg(long)]
        seed: Option<u64>,

        /// Only draw questions with one of these tags (comma-separated)
        #[arg(long)]
        tag: Option<String>,

        /// Ask questions in bank order
        #[arg(long)]
        no_shuffle: bool,

        /// Output directory for reports
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report formats: text, json, all (comma-separated)
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Skip the startup banner
        #[arg(long)]
        no_banner: bool,
    },

    /// Validate question bank files
    Validate {
        /// Path to a question bank file or directory
        #[arg(long)]
        questions: PathBuf,
    },

    /// Create starter config and example question bank
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("qcm=info".parse().unwrap())
                .add_directive("qcm_core=info".parse().unwrap())
                .add_directive("qcm_term=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            questions,
            count,
            time_limit,
            seed,
            tag,
            no_shuffle,
            output,
            format,
            config,
            no_banner,
        } => commands::run::execute(commands::run::RunArgs {
            questions,
            count,
            time_limit,
            seed,
            tag,
            no_shuffle,
            output,
            format,
            config,
            no_banner,
        }),
        Commands::Validate { questions } => commands::validate::execute(questions),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        if e
            .downcast_ref::<QuizError>()
            .is_some_and(QuizError::is_user_abort)
        {
            println!();
            println!("Quiz interrupted.");
            process::exit(EXIT_INTERRUPTED);
        }
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
