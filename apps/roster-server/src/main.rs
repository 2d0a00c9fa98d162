//! # Roster Server Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration (defaults → server.toml → environment)
//! 3. Open the database & run migrations (fatal on failure)
//! 4. Seed empty tables (if enabled)
//! 5. Serve HTTP until Ctrl+C / SIGTERM
//!
//! ## Usage
//! ```bash
//! roster-server                       # default config location
//! roster-server --config ./server.toml
//! RUST_LOG=debug ROSTER_PORT=9000 roster-server
//! ```

use std::path::PathBuf;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use roster_db::seed::seed_if_empty;
use roster_db::Database;
use roster_server::{AppState, ServerConfig};

const DEFAULT_LOG_FILTER: &str = "info,roster=debug,sqlx=warn";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config_path = parse_config_arg(std::env::args().skip(1))?;
    let config = ServerConfig::load(config_path).context("Failed to load configuration")?;

    info!(
        bind = %config.bind_address(),
        db = %config.database_path().display(),
        "Configuration loaded"
    );

    let db = Database::new(config.db_config())
        .await
        .context("Database unavailable")?;

    if config.database.seed {
        seed_if_empty(&db).await.context("Failed to seed database")?;
    }

    let state = AppState::new(db.clone());
    roster_server::serve(state, &config.bind_address(), shutdown_signal()).await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Initializes tracing with `RUST_LOG`, falling back to [`DEFAULT_LOG_FILTER`].
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Reads `--config <path>` (or `-c <path>`) from the command line.
fn parse_config_arg<I>(args: I) -> anyhow::Result<Option<PathBuf>>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let value = args.next().context("--config requires a path")?;
                path = Some(PathBuf::from(value));
            }
            other => anyhow::bail!("Unknown argument: {}", other),
        }
    }

    Ok(path)
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_config_arg() {
        assert_eq!(parse_config_arg(args(&[])).unwrap(), None);
        assert_eq!(
            parse_config_arg(args(&["--config", "a.toml"])).unwrap(),
            Some(PathBuf::from("a.toml"))
        );
        assert!(parse_config_arg(args(&["--config"])).is_err());
        assert!(parse_config_arg(args(&["--port"])).is_err());
    }
}
