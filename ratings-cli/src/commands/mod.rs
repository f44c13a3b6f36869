//! Command implementations for the ratings CLI

use std::path::PathBuf;

use clap::Args;

pub mod init_db;
pub mod serve;

pub use init_db::{run_init_db, InitDbArgs};
pub use serve::{run_serve, ServeArgs};

/// Database location shared by every command
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Path to the SQLite database file (created on first run)
    #[arg(long, short = 'd', env = "RATINGS_DATABASE", default_value = "ratings.db")]
    pub database: PathBuf,
}
