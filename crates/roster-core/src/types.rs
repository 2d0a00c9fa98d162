//! # Domain Types
//!
//! Core domain types used throughout Roster.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Student      │   │   Enrollment    │   │     Course      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │◄──│  student_id     │   │  id (i64)       │       │
//! │  │  full_name      │   │  course_id      │──►│  title          │       │
//! │  │  age            │   │  enrolled_at    │   │  credits        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Report rows (read-only projections):                                  │
//! │  EnrollmentRow, StudentEnrollmentCount, CourseEnrollmentCount, Summary │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity has a surrogate integer `id` assigned by SQLite on insert.
//! Enrollment is the only join between Student and Course, and the pair
//! (student_id, course_id) is unique.
//!
//! ## Serialization
//! All types serialize with camelCase field names; this is the JSON API
//! contract (`fullName`, `enrollmentCount`, `enrolledAt`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{
    validate_age, validate_credits, validate_full_name, validate_title, ValidationResult,
};

// =============================================================================
// Student
// =============================================================================

/// A student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Surrogate id.
    pub id: i64,

    /// Full name, 1-80 characters.
    pub full_name: String,

    /// Age in years, 1-120.
    pub age: i64,
}

/// Input for creating a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub full_name: String,
    pub age: i64,
}

impl NewStudent {
    pub fn new(full_name: impl Into<String>, age: i64) -> Self {
        NewStudent {
            full_name: full_name.into(),
            age,
        }
    }

    /// Checks the schema constraints and returns the normalized input
    /// (name trimmed).
    pub fn validate(&self) -> ValidationResult<NewStudent> {
        let full_name = validate_full_name(&self.full_name)?;
        validate_age(self.age)?;
        Ok(NewStudent {
            full_name,
            age: self.age,
        })
    }
}

// =============================================================================
// Course
// =============================================================================

/// A course record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Surrogate id.
    pub id: i64,

    /// Title, 1-80 characters.
    pub title: String,

    /// Credit points, 1-60.
    pub credits: i64,
}

/// Input for creating a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub title: String,
    pub credits: i64,
}

impl NewCourse {
    pub fn new(title: impl Into<String>, credits: i64) -> Self {
        NewCourse {
            title: title.into(),
            credits,
        }
    }

    /// Checks the schema constraints and returns the normalized input
    /// (title trimmed).
    pub fn validate(&self) -> ValidationResult<NewCourse> {
        let title = validate_title(&self.title)?;
        validate_credits(self.credits)?;
        Ok(NewCourse {
            title,
            credits: self.credits,
        })
    }
}

// =============================================================================
// Enrollment
// =============================================================================

/// A student's enrollment in a course.
///
/// Enrollments are never updated: they are created by the enroll operation
/// and removed either individually or by cascade from their student/course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    /// When the enrollment was created (UTC).
    pub enrolled_at: DateTime<Utc>,
}

// =============================================================================
// Report Rows
// =============================================================================

/// An enrollment joined with its student's name and course's title.
///
/// Used by "enrollments by student", "latest enrollments" and the full
/// enrollment listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRow {
    /// Enrollment id.
    pub id: i64,
    /// Student full name.
    pub student: String,
    /// Course title.
    pub course: String,
    pub enrolled_at: DateTime<Utc>,
}

/// A student with the number of enrollments referencing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct StudentEnrollmentCount {
    pub id: i64,
    pub full_name: String,
    pub age: i64,
    pub enrollment_count: i64,
}

/// A course with the number of enrollments referencing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct CourseEnrollmentCount {
    pub id: i64,
    pub title: String,
    pub credits: i64,
    pub enrollment_count: i64,
}

/// Row counts of the three tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub students: i64,
    pub courses: i64,
    pub enrollments: i64,
}

impl Summary {
    /// True when none of the tables hold any rows.
    pub fn is_empty(&self) -> bool {
        self.students == 0 && self.courses == 0 && self.enrollments == 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;

    #[test]
    fn test_new_student_validate_trims_name() {
        let input = NewStudent::new("  Jānis Kalniņš  ", 22);
        let valid = input.validate().unwrap();
        assert_eq!(valid.full_name, "Jānis Kalniņš");
        assert_eq!(valid.age, 22);
    }

    #[test]
    fn test_new_student_validate_rejects_age() {
        let err = NewStudent::new("Anna", 0).validate().unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
        assert_eq!(err.field(), "age");
    }

    #[test]
    fn test_new_course_validate() {
        assert!(NewCourse::new("Web tehnoloģijas", 6).validate().is_ok());
        assert!(NewCourse::new("", 6).validate().is_err());
        assert!(NewCourse::new("Web", 61).validate().is_err());
    }

    #[test]
    fn test_serializes_camel_case() {
        let row = StudentEnrollmentCount {
            id: 1,
            full_name: "Anna".to_string(),
            age: 20,
            enrollment_count: 1,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["fullName"], "Anna");
        assert_eq!(json["enrollmentCount"], 1);
    }

    #[test]
    fn test_summary_is_empty() {
        assert!(Summary::default().is_empty());
        let summary = Summary {
            students: 1,
            ..Summary::default()
        };
        assert!(!summary.is_empty());
    }
}
