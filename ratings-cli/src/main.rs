//! ratings CLI - teacher ratings backend
//!
//! Subcommands:
//! - `serve`: run the HTTP API and landing page
//! - `init-db`: create the SQLite schema and exit

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "ratings",
    author,
    version,
    about = "Record teachers and student reviews, keep running average ratings"
)]
struct Cli {
    /// Log filter used when RUST_LOG is unset (e.g. "debug", "ratings_server=trace")
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::ServeArgs),
    /// Create the database schema and exit
    InitDb(commands::InitDbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env values never override variables already set
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    setup_tracing(&cli.log_level)?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::InitDb(args) => commands::run_init_db(args).await?,
    }
    Ok(())
}

fn setup_tracing(log_level: &str) -> Result<()> {
    init_tracing(&TracingConfig {
        default_filter: log_level.to_string(),
    })
    .context("failed to install tracing subscriber")
}
