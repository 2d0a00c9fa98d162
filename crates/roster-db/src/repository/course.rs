//! # Course Repository
//!
//! Inserts, lookups and deletes for courses. Same shape as the student
//! repository; deleting a course cascades to its enrollments.

use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use roster_core::{Course, NewCourse};

/// Repository for course database operations.
#[derive(Debug, Clone)]
pub struct CourseRepository {
    pool: SqlitePool,
}

impl CourseRepository {
    /// Creates a new CourseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CourseRepository { pool }
    }

    /// Validates and inserts a course, returning the stored record.
    ///
    /// ## Errors
    /// * `DbError::Validation` - title empty or longer than 80 characters,
    ///   credits outside 1-60
    pub async fn create(&self, input: &NewCourse) -> DbResult<Course> {
        let input = input.validate().map_err(|e| {
            warn!(error = %e, "Rejected course");
            e
        })?;

        debug!(title = %input.title, credits = input.credits, "Inserting course");

        let result = sqlx::query("INSERT INTO courses (title, credits) VALUES (?1, ?2)")
            .bind(&input.title)
            .bind(input.credits)
            .execute(&self.pool)
            .await?;

        Ok(Course {
            id: result.last_insert_rowid(),
            title: input.title,
            credits: input.credits,
        })
    }

    /// Gets a course by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Course>> {
        let course =
            sqlx::query_as::<_, Course>("SELECT id, title, credits FROM courses WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(course)
    }

    /// True if a course with this id exists.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let found: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM courses WHERE id = ?1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(found)
    }

    /// Deletes a course and, by cascade, all of its enrollments.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting course");

        let result = sqlx::query("DELETE FROM courses WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Course", id));
        }

        Ok(())
    }

    /// Counts all courses.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
