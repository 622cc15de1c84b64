//! quizmaster CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizmaster", version, about = "Trivia quizzes in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz
    Play {
        /// Category id (e.g. "biology") or a custom id like "custom-my-quiz"
        #[arg(long)]
        category: String,

        /// Directory holding question-bank files
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// State file for progress and statistics
        #[arg(long)]
        state: Option<PathBuf>,

        /// Discard any saved progress and start fresh
        #[arg(long)]
        fresh: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate question-bank files
    Validate {
        /// Path to a question file or a directory of them
        #[arg(long)]
        bank: PathBuf,
    },

    /// List declared and custom categories
    ListCategories {
        /// Directory holding question-bank files
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show cumulative quiz statistics
    Stats {
        /// State file for progress and statistics
        #[arg(long)]
        state: Option<PathBuf>,

        /// Reset all statistics
        #[arg(long)]
        reset: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Ask the quiz assistant
    Chat {
        /// Message to send; interactive when omitted
        message: Vec<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and sample question file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizmaster=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            category,
            data_dir,
            state,
            fresh,
            config,
        } => commands::play::execute(category, data_dir, state, fresh, config),
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::ListCategories { data_dir, config } => {
            commands::list_categories::execute(data_dir, config)
        }
        Commands::Stats {
            state,
            reset,
            config,
        } => commands::stats::execute(state, reset, config),
        Commands::Chat { message, config } => commands::chat::execute(message, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
