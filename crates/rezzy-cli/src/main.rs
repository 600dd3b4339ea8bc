use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "rezzy")]
#[command(about = "Ask Rezzy - medical education Q&A from the terminal", long_about = None)]
struct Cli {
    /// Answer from built-in mock data instead of the API
    #[arg(long, global = true)]
    mock: bool,

    /// Path to config.toml (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log at info level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a question in the active chat session
    Ask {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,

        /// Reveal the answer word by word
        #[arg(long)]
        stream: bool,
    },
    /// List stored chat sessions
    Sessions {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Replay a stored chat session and make it active
    Show { session_id: String },
    /// Start a new chat
    New,
    /// Show starter prompts and popular sessions
    Suggestions,
    /// Look up questions and flashcards for a topic
    Study {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Take a multiple-choice quiz on a topic
    Quiz {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Check that the API is reachable
    Health,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = commands::AppContext::load(cli.config, cli.mock)?;

    match cli.command {
        Commands::Ask { message, stream } => commands::chat::ask(&ctx, &message.join(" "), stream).await?,
        Commands::Sessions { page, limit } => commands::sessions::list(&ctx, page, limit).await?,
        Commands::Show { session_id } => commands::sessions::show(&ctx, &session_id).await?,
        Commands::New => commands::chat::new_chat(&ctx).await?,
        Commands::Suggestions => commands::chat::suggestions(&ctx).await?,
        Commands::Study { query } => commands::study::search(&ctx, &query.join(" ")).await?,
        Commands::Quiz { query } => commands::quiz::run(&ctx, &query.join(" ")).await?,
        Commands::Health => commands::health::check(&ctx).await?,
    }

    Ok(())
}
