//! # Enrollment Repository
//!
//! Enrolling a student in a course and removing enrollments.
//!
//! ## Enroll Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  enroll(student_id, course_id)                                         │
//! │                                                                         │
//! │  1. ids > 0?                      no  → DbError::Validation            │
//! │  2. student exists?               no  → DbError::NotFound (Student)    │
//! │  3. course exists?                no  → DbError::NotFound (Course)     │
//! │  4. pair already enrolled?        yes → DbError::AlreadyExists         │
//! │  5. INSERT ... enrolled_at = now                                       │
//! │        UNIQUE violation           → DbError::AlreadyExists             │
//! │        FOREIGN KEY violation      → DbError::NotFound                  │
//! │                                                                         │
//! │  Steps 2-4 are advisory. Two callers can both pass step 4; the unique  │
//! │  index on (student_id, course_id) rejects the second insert.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use crate::repository::course::CourseRepository;
use crate::repository::student::StudentRepository;
use roster_core::validation::validate_id;
use roster_core::Enrollment;

/// Repository for enrollment database operations.
#[derive(Debug, Clone)]
pub struct EnrollmentRepository {
    pool: SqlitePool,
}

impl EnrollmentRepository {
    /// Creates a new EnrollmentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        EnrollmentRepository { pool }
    }

    /// Enrolls a student in a course, stamping the current UTC time.
    ///
    /// ## Errors
    /// * `DbError::Validation` - either id is not positive
    /// * `DbError::NotFound` - the student or the course doesn't exist
    /// * `DbError::AlreadyExists` - the student is already enrolled in the course
    pub async fn enroll(&self, student_id: i64, course_id: i64) -> DbResult<Enrollment> {
        validate_id("student_id", student_id)?;
        validate_id("course_id", course_id)?;

        if !self.students().exists(student_id).await? {
            warn!(student_id, "Enrollment rejected: unknown student");
            return Err(DbError::not_found("Student", student_id));
        }
        if !self.courses().exists(course_id).await? {
            warn!(course_id, "Enrollment rejected: unknown course");
            return Err(DbError::not_found("Course", course_id));
        }
        if self.is_enrolled(student_id, course_id).await? {
            warn!(student_id, course_id, "Enrollment rejected: duplicate");
            return Err(duplicate_enrollment(student_id, course_id));
        }

        // Stored as fixed-width RFC 3339 so text ordering matches time ordering
        let enrolled_at = Utc::now().trunc_subsecs(6);

        debug!(student_id, course_id, "Inserting enrollment");

        let result = sqlx::query(
            "INSERT INTO enrollments (student_id, course_id, enrolled_at) VALUES (?1, ?2, ?3)",
        )
        .bind(student_id)
        .bind(course_id)
        .bind(format_timestamp(&enrolled_at))
        .execute(&self.pool)
        .await;

        let result = match result {
            Ok(result) => result,
            Err(err) => {
                return Err(match DbError::from(err) {
                    DbError::AlreadyExists { .. } => {
                        warn!(student_id, course_id, "Enrollment lost insert race");
                        duplicate_enrollment(student_id, course_id)
                    }
                    DbError::ForeignKeyViolation { .. } => {
                        self.missing_parent(student_id, course_id).await
                    }
                    other => other,
                });
            }
        };

        Ok(Enrollment {
            id: result.last_insert_rowid(),
            student_id,
            course_id,
            enrolled_at,
        })
    }

    /// Deletes an enrollment by id.
    ///
    /// Any id without a row behind it, zero and negative ids included, is
    /// reported as missing.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - no enrollment has this id
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting enrollment");

        let result = sqlx::query("DELETE FROM enrollments WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Enrollment", id));
        }

        Ok(())
    }

    /// Gets an enrollment by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Enrollment>> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            "SELECT id, student_id, course_id, enrolled_at FROM enrollments WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(enrollment)
    }

    /// True if the student is already enrolled in the course.
    pub async fn is_enrolled(&self, student_id: i64, course_id: i64) -> DbResult<bool> {
        let found: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM enrollments WHERE student_id = ?1 AND course_id = ?2)",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(found)
    }

    /// Counts all enrollments.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM enrollments")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    fn students(&self) -> StudentRepository {
        StudentRepository::new(self.pool.clone())
    }

    fn courses(&self) -> CourseRepository {
        CourseRepository::new(self.pool.clone())
    }

    /// A parent row vanished between the existence checks and the insert.
    async fn missing_parent(&self, student_id: i64, course_id: i64) -> DbError {
        match self.students().exists(student_id).await {
            Ok(false) => DbError::not_found("Student", student_id),
            Ok(true) => DbError::not_found("Course", course_id),
            Err(err) => err,
        }
    }
}

fn duplicate_enrollment(student_id: i64, course_id: i64) -> DbError {
    DbError::duplicate(
        "enrollment",
        format!("student {} in course {}", student_id, course_id),
    )
}

fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}
