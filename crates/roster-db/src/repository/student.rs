//! # Student Repository
//!
//! Inserts, lookups and deletes for students.
//!
//! Students are never updated in place. Deleting a student removes its
//! enrollments through the `ON DELETE CASCADE` foreign key; no front end
//! exposes student deletion.

use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use roster_core::{NewStudent, Student};

/// Repository for student database operations.
///
/// ## Usage
/// ```rust,ignore
/// let anna = db.students().create(&NewStudent::new("Anna Bērziņa", 20)).await?;
/// let same = db.students().get_by_id(anna.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct StudentRepository {
    pool: SqlitePool,
}

impl StudentRepository {
    /// Creates a new StudentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StudentRepository { pool }
    }

    /// Validates and inserts a student, returning the stored record.
    ///
    /// ## Errors
    /// * `DbError::Validation` - name empty or longer than 80 characters,
    ///   age outside 1-120. Nothing is written.
    pub async fn create(&self, input: &NewStudent) -> DbResult<Student> {
        let input = input.validate().map_err(|e| {
            warn!(error = %e, "Rejected student");
            e
        })?;

        debug!(full_name = %input.full_name, age = input.age, "Inserting student");

        let result = sqlx::query("INSERT INTO students (full_name, age) VALUES (?1, ?2)")
            .bind(&input.full_name)
            .bind(input.age)
            .execute(&self.pool)
            .await?;

        Ok(Student {
            id: result.last_insert_rowid(),
            full_name: input.full_name,
            age: input.age,
        })
    }

    /// Gets a student by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT id, full_name, age FROM students WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    /// True if a student with this id exists.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let found: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM students WHERE id = ?1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(found)
    }

    /// Deletes a student and, by cascade, all of its enrollments.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting student");

        let result = sqlx::query("DELETE FROM students WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Student", id));
        }

        Ok(())
    }

    /// Counts all students.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
