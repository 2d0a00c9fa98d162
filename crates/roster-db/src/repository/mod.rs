//! # Repository Module
//!
//! Database repository implementations for Roster.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repositories and who calls them                      │
//! │                                                                         │
//! │  JSON handler / HTML page / console menu entry                         │
//! │       │                                                                 │
//! │       │  db.reports().top_courses()                                    │
//! │       ▼                                                                 │
//! │  ReportRepository        read-only SELECTs, ordered Vec results        │
//! │  StudentRepository       create / get / delete students                │
//! │  CourseRepository        create / get / delete courses                 │
//! │  EnrollmentRepository    enroll / delete enrollments                   │
//! │       │                                                                 │
//! │       │  parameterized SQL, rows mapped with FromRow                    │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Relationship data (student names, course titles on enrollments) is always
//! fetched with an explicit JOIN; nothing is loaded lazily.
//!
//! ## Available Repositories
//!
//! - [`StudentRepository`](student::StudentRepository) - Student inserts and lookups
//! - [`CourseRepository`](course::CourseRepository) - Course inserts and lookups
//! - [`EnrollmentRepository`](enrollment::EnrollmentRepository) - Enroll and unenroll
//! - [`ReportRepository`](report::ReportRepository) - The report catalog

pub mod course;
pub mod enrollment;
pub mod report;
pub mod student;
