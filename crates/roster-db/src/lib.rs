//! # roster-db: Database Layer for Roster
//!
//! This crate provides database access for the Roster academic records
//! system. It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Roster Data Flow                                │
//! │                                                                         │
//! │  roster-server (JSON + HTML)        roster-console (menu)              │
//! │       │                                   │                             │
//! │       └─────────────────┬─────────────────┘                             │
//! │                         ▼                                               │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     roster-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐   │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │    │                │   │  (embedded)  │   │   │
//! │  │   │               │    │ StudentRepo    │   │              │   │   │
//! │  │   │ SqlitePool    │◄───│ CourseRepo     │   │ 001_initial  │   │   │
//! │  │   │               │    │ EnrollmentRepo │   │              │   │   │
//! │  │   │               │    │ ReportRepo     │   │              │   │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                         │                                               │
//! │                         ▼                                               │
//! │                 roster.db (SQLite, WAL)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repositories and the report catalog
//! - [`seed`] - First-run sample data
//!
//! ## Usage
//!
//! ```rust,ignore
//! use roster_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("roster.db")).await?;
//! roster_db::seed::seed_if_empty(&db).await?;
//!
//! let counts = db.reports().students_with_enrollment_counts().await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::course::CourseRepository;
pub use repository::enrollment::EnrollmentRepository;
pub use repository::report::ReportRepository;
pub use repository::student::StudentRepository;
