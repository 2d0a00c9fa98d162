//! # Roster Console Entry Point
//!
//! ## Usage
//! ```bash
//! roster                    # $ROSTER_DB_PATH or the platform data directory
//! roster --db ./roster.db
//! RUST_LOG=debug roster     # logs go to stderr
//! ```

use std::path::PathBuf;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use roster_db::seed::seed_if_empty;
use roster_db::{Database, DbConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Keep the menu readable: warnings only unless RUST_LOG says otherwise
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let db_path = parse_db_arg(std::env::args().skip(1))?.unwrap_or_else(DbConfig::default_path);

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .with_context(|| format!("Cannot open database {}", db_path.display()))?;
    seed_if_empty(&db).await.context("Failed to seed database")?;

    println!("Roster ({})", db_path.display());
    let result = roster_console::menu::run(&db).await;

    db.close().await;
    result
}

fn parse_db_arg<I>(args: I) -> anyhow::Result<Option<PathBuf>>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" | "-d" => {
                let value = args.next().context("--db requires a path")?;
                path = Some(PathBuf::from(value));
            }
            other => anyhow::bail!("Unknown argument: {}", other),
        }
    }

    Ok(path)
}
