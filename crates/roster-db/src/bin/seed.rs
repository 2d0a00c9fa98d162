//! # Seed Sample Data
//!
//! Creates (or opens) a database, applies migrations, and fills empty
//! tables with the sample students, courses and enrollment.
//!
//! ## Usage
//! ```bash
//! # Default location (ROSTER_DB_PATH or the platform data directory)
//! cargo run -p roster-db --bin seed
//!
//! # Specify database path
//! cargo run -p roster-db --bin seed -- --db ./data/roster.db
//! ```

use std::env;
use std::path::PathBuf;

use roster_db::seed::seed_if_empty;
use roster_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Roster seed data");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: $ROSTER_DB_PATH or data dir)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let db_path = db_path.unwrap_or_else(DbConfig::default_path);

    println!("Roster seed data");
    println!("================");
    println!("Database: {}", db_path.display());

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected, migrations applied");

    let outcome = seed_if_empty(&db).await?;
    if outcome.is_noop() {
        println!("⚠ Tables already populated, nothing inserted");
    } else {
        println!(
            "✓ Inserted {} students, {} courses, {} enrollments",
            outcome.students, outcome.courses, outcome.enrollments
        );
    }

    let summary = db.reports().summary().await?;
    println!(
        "  Totals: {} students, {} courses, {} enrollments",
        summary.students, summary.courses, summary.enrollments
    );

    db.close().await;
    Ok(())
}
