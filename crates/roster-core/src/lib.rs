//! # roster-core: Pure Domain Model for Roster
//!
//! This crate is the **schema** of Roster: the three record types
//! (Student, Course, Enrollment), the report row shapes, and the input
//! validation rules. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Roster Architecture                            │
//! │                                                                         │
//! │  ┌───────────────────┐  ┌───────────────────┐  ┌───────────────────┐   │
//! │  │   JSON API        │  │   HTML pages      │  │   Console menu    │   │
//! │  │  (roster-server)  │  │  (roster-server)  │  │ (roster-console)  │   │
//! │  └─────────┬─────────┘  └─────────┬─────────┘  └─────────┬─────────┘   │
//! │            └──────────────────────┼──────────────────────┘             │
//! │                                   ▼                                     │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    roster-db (Database Layer)                   │   │
//! │  │        repositories, report queries, migrations, seeding        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                ▼                                        │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               ★ roster-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐      ┌────────────┐      ┌──────────────┐      │   │
//! │  │   │   types   │      │ validation │      │    error     │      │   │
//! │  │   │  Student  │      │   rules    │      │ Validation-  │      │   │
//! │  │   │  Course   │      │   checks   │      │ Error        │      │   │
//! │  │   └───────────┘      └────────────┘      └──────────────┘      │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities, creation inputs and report rows
//! - [`error`] - Validation error type
//! - [`validation`] - Field and query-parameter rules
//!
//! ## Example Usage
//!
//! ```rust
//! use roster_core::validation::{validate_age, validate_search_fragment};
//!
//! assert!(validate_age(20).is_ok());
//! assert!(validate_age(121).is_err());
//!
//! // Search fragments are trimmed before use
//! assert_eq!(validate_search_fragment("  Anna ").unwrap(), "Anna");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length (in characters) of a student's full name or a course title.
pub const MAX_NAME_LEN: usize = 80;

/// Inclusive age range for a student.
pub const MIN_AGE: i64 = 1;
pub const MAX_AGE: i64 = 120;

/// Inclusive credit range for a course.
pub const MIN_CREDITS: i64 = 1;
pub const MAX_CREDITS: i64 = 60;

/// Number of rows returned by the "latest enrollments" report.
///
/// ## Why a constant?
/// This is a fixed top-N report, not pagination. Every front end shows the
/// same ten rows.
pub const LATEST_ENROLLMENTS_LIMIT: i64 = 10;
