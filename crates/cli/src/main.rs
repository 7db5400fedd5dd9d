//! Foliochat CLI — the main entry point.
//!
//! Commands:
//! - `onboard`  — Initialize the config file
//! - `chat`     — Interactive chat or single-message mode
//! - `compose`  — Print the composed context for a message (budget debugging)
//! - `gateway`  — Start the HTTP server
//! - `doctor`   — Diagnose configuration and upstream health

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "foliochat",
    about = "Foliochat — portfolio assistant backend",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the configuration file
    Onboard,

    /// Chat with the assistant
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,

        /// Reply language tag ("en", "fr")
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Print the composed context for a message
    Compose {
        /// The user message to compose for
        message: String,

        /// Override the prompt budget in characters
        #[arg(short, long)]
        budget: Option<usize>,
    },

    /// Start the HTTP gateway server
    Gateway {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Diagnose configuration and upstream health
    Doctor,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Chat { message, language } => commands::chat::run(message, language).await?,
        Commands::Compose { message, budget } => commands::compose::run(&message, budget).await?,
        Commands::Gateway { port } => commands::gateway::run(port).await?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
