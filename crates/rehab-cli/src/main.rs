use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod console;

use commands::analyze::AnalyzeArgs;
use commands::config::ConfigAction;
use commands::replay::ReplayArgs;

#[derive(Parser)]
#[command(name = "rehab")]
#[command(about = "Rehability - guided hand rehabilitation sessions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay recorded classification results through a session
    Replay(ReplayArgs),
    /// Classify recorded hand poses through the backend
    Analyze(AnalyzeArgs),
    /// List saved session summaries
    History,
    /// Show or edit the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Commands::Replay(args) => commands::replay::run(args).await?,
        Commands::Analyze(args) => commands::analyze::run(args).await?,
        Commands::History => commands::history::run().await?,
        Commands::Config { action } => commands::config::run(action)?,
    }

    Ok(())
}
