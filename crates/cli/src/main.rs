//! Study agent CLI: the main entry point.
//!
//! Commands:
//! - `chat`: Interactive question loop (default)
//! - `ask`: Answer a single question
//! - `notes`: Index or search the note collection
//! - `config`: Show the effective configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "studyagent",
    about = "Study agent — plans, gathers evidence, reflects, and answers with sources",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ~/.studyagent/config.toml)
    #[arg(short, long, global = true, env = "STUDYAGENT_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask questions interactively
    Chat,

    /// Answer one question and exit
    Ask {
        /// The question
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,

        /// Also print the scratchpad and evidence sources
        #[arg(long)]
        trace: bool,
    },

    /// Manage the note collection
    Notes {
        #[command(subcommand)]
        action: NotesAction,
    },

    /// Show the effective configuration (secrets masked)
    Config,
}

#[derive(Subcommand)]
enum NotesAction {
    /// Compute and store embeddings for notes that lack one
    Index,

    /// Rank notes by similarity to a query
    Search {
        query: String,

        /// Number of results
        #[arg(short, default_value_t = 4)]
        k: usize,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Credentials may live in a project `.env`; real environment variables win
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => commands::chat::run(config).await?,
        Commands::Ask { question, trace } => {
            commands::ask::run(config, &question.join(" "), trace).await?
        }
        Commands::Notes { action } => match action {
            NotesAction::Index => commands::notes::index(config).await?,
            NotesAction::Search { query, k } => commands::notes::search(config, &query, k).await?,
        },
        Commands::Config => commands::config_cmd::show(&config)?,
    }

    Ok(())
}
