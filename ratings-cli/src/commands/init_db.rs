//! Schema setup command

use anyhow::{Context, Result};
use clap::Parser;

use ratings_server::db::{create_pool, ensure_schema};

use super::DatabaseArgs;

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Create the database file and tables, then exit
pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let path = &args.db.database;

    let pool = create_pool(path)
        .await
        .with_context(|| format!("Failed to open database {}", path.display()))?;

    ensure_schema(&pool)
        .await
        .context("Failed to create database schema")?;

    pool.close().await;
    println!("Schema ready in {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(path: PathBuf) -> InitDbArgs {
        InitDbArgs {
            db: DatabaseArgs { database: path },
        }
    }

    #[tokio::test]
    async fn creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("ratings.db");

        run_init_db(args(path.clone())).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn running_twice_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ratings.db");

        run_init_db(args(path.clone())).await.unwrap();
        run_init_db(args(path)).await.unwrap();
    }
}
