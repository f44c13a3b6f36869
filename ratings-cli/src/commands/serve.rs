//! HTTP server command

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ratings_server::db::{create_pool, ensure_schema};
use ratings_server::http::{run_server, ServerConfig};

use super::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "RATINGS_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Directory with the static landing page, served at /
    #[arg(long, env = "RATINGS_PUBLIC_DIR", default_value = "public")]
    pub public_dir: PathBuf,

    /// Do not serve static files
    #[arg(long)]
    pub no_static: bool,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            cors_permissive: self.cors_permissive,
            public_dir: (!self.no_static).then(|| self.public_dir.clone()),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!(database = %args.db.database.display(), "Starting ratings server on {}", args.bind);

    let pool = create_pool(&args.db.database)
        .await
        .with_context(|| format!("Failed to open database {}", args.db.database.display()))?;

    ensure_schema(&pool)
        .await
        .context("Failed to create database schema")?;

    if let Some(dir) = args.server_config().public_dir {
        if !dir.is_dir() {
            tracing::warn!(public_dir = %dir.display(), "Public directory missing; / will return 404");
        }
    }

    // Blocks until shutdown
    run_server(pool, args.server_config())
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        serve: ServeArgs,
    }

    #[test]
    fn defaults() {
        let args = Wrapper::parse_from(["ratings"]).serve;
        let config = args.server_config();
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.public_dir, Some(PathBuf::from("public")));
        assert!(!config.cors_permissive);
    }

    #[test]
    fn no_static_disables_public_dir() {
        let args = Wrapper::parse_from(["ratings", "--no-static", "--bind", "0.0.0.0:8080"]).serve;
        let config = args.server_config();
        assert_eq!(config.public_dir, None);
        assert_eq!(config.bind_addr.port(), 8080);
    }
}
