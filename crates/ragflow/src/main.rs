//! ragflow - command-line client for RAGFlow
//!
//! Main entry point for the ragflow CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::Style;

mod commands;

use commands::{
    ConnectionFlags, agents, chat, chats, chunks, config, datasets, documents, retrieve, sessions,
};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// ragflow - command-line client for the RAGFlow retrieval-augmented generation server
#[derive(Parser)]
#[command(name = "ragflow")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Server URL (default: http://localhost:9380)
    #[arg(long, global = true, env = "RAGFLOW_SERVER_URL")]
    pub server: Option<String>,

    /// API key sent as a bearer token
    #[arg(long, global = true, env = "RAGFLOW_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Use this context from client.yaml instead of the current one
    #[arg(long, global = true)]
    pub context: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Dataset management
    Datasets(datasets::DatasetsArgs),

    /// Upload, list and parse documents
    Documents(documents::DocumentsArgs),

    /// Inspect and edit document chunks
    Chunks(chunks::ChunksArgs),

    /// Search datasets for chunks relevant to a question
    Retrieve(retrieve::RetrieveArgs),

    /// Chat assistant management
    Chats(chats::ChatsArgs),

    /// Chat session management
    Sessions(sessions::SessionsArgs),

    /// List and query agents
    Agents(agents::AgentsArgs),

    /// Enter interactive chat mode (REPL)
    Chat(chat::ChatArgs),

    /// Connection context management
    Config(config::ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Console (human-readable) + rotating JSON file
    let filter = if cli.verbose {
        "ragflow=debug,ragflow_client=debug,ragflow_config=debug,info"
    } else {
        "ragflow=info,ragflow_client=info,warn"
    };

    let log_dir = ragflow_config::log_dir().unwrap_or_else(|| std::path::PathBuf::from("logs"));
    let file_appender = tracing_appender::rolling::daily(&log_dir, "ragflow.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "ragflow=trace,ragflow_client=trace,ragflow_config=trace,info",
                )),
        )
        .init();

    let result = run(cli).await;
    // Flush the log file before a possible exit
    drop(guard);

    if let Err(e) = result {
        let red = Style::new().red();
        eprintln!("{} {:#}", red.apply_to("Error:"), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Config commands work without a reachable server or valid context
    if let Commands::Config(args) = cli.command {
        return config::run(args, cli.json).await;
    }

    let flags = ConnectionFlags {
        server: cli.server,
        api_key: cli.api_key,
        context: cli.context,
    };
    let ctx = commands::Context::connect(&flags, cli.json, cli.verbose)?;

    tracing::debug!(server = %ctx.server_url, "dispatching command");

    // Dispatch to command handlers
    match cli.command {
        Commands::Datasets(args) => datasets::run(args, &ctx).await,
        Commands::Documents(args) => documents::run(args, &ctx).await,
        Commands::Chunks(args) => chunks::run(args, &ctx).await,
        Commands::Retrieve(args) => retrieve::run(args, &ctx).await,
        Commands::Chats(args) => chats::run(args, &ctx).await,
        Commands::Sessions(args) => sessions::run(args, &ctx).await,
        Commands::Agents(args) => agents::run(args, &ctx).await,
        Commands::Chat(args) => chat::run(args, &ctx).await,
        Commands::Config(_) => unreachable!("config commands return before connecting"),
    }
}
