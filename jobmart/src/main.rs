// jobmart/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug jobmart run ... pour voir les détails
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            project,
            stage,
            strict,
        } => commands::run::execute(project, stage, strict).await,
        Commands::Summary { project } => commands::summary::execute(project).await,
        Commands::Inspect {
            project,
            table,
            limit,
        } => commands::inspect::execute(project, table, limit).await,
        Commands::Clean { project } => commands::clean::execute(project),
    }
}
