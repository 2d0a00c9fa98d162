//! # Report Repository
//!
//! The fixed catalog of read-only queries behind every front end.
//!
//! ## Catalog
//! | Method                              | Ordering                          |
//! |-------------------------------------|-----------------------------------|
//! | `search_students(fragment)`         | full name ASC                     |
//! | `courses_with_min_credits(min)`     | credits ASC, title ASC            |
//! | `enrollments_by_student(id)`        | enrolled_at DESC, id DESC         |
//! | `students_with_enrollment_counts()` | count DESC, full name ASC         |
//! | `top_courses()`                     | count DESC, title ASC             |
//! | `latest_enrollments()`              | enrolled_at DESC, id DESC, max 10 |
//!
//! Every method returns a possibly empty `Vec`; an empty result is never an
//! error. Parameter checks happen before any SQL is issued.
//!
//! ## Counting
//! Enrollment counts come from one `LEFT JOIN ... GROUP BY` per report, so
//! entities without enrollments appear with a count of 0.
//! ```text
//! students s ──LEFT JOIN── enrollments e ON e.student_id = s.id
//!            GROUP BY s.id → COUNT(e.id)
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use roster_core::validation::{validate_id, validate_min_credits, validate_search_fragment};
use roster_core::{
    Course, CourseEnrollmentCount, EnrollmentRow, Student, StudentEnrollmentCount, Summary,
    LATEST_ENROLLMENTS_LIMIT,
};

const ENROLLMENT_ROW_SELECT: &str = r#"
    SELECT
        e.id,
        s.full_name AS student,
        c.title     AS course,
        e.enrolled_at
    FROM enrollments e
    INNER JOIN students s ON s.id = e.student_id
    INNER JOIN courses  c ON c.id = e.course_id
"#;

/// Read-only report queries.
///
/// ## Usage
/// ```rust,ignore
/// let hits = db.reports().search_students("jān").await?;
/// let busiest = db.reports().top_courses().await?;
/// ```
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Students whose full name contains `fragment`, ignoring case.
    ///
    /// Case folding uses Unicode lowercase on both sides, so "jān" matches
    /// "Jānis". SQLite's `LOWER()` only folds ASCII, which is why the
    /// filter runs on the decoded rows.
    ///
    /// ## Errors
    /// * `DbError::Validation` - fragment empty or whitespace only
    pub async fn search_students(&self, fragment: &str) -> DbResult<Vec<Student>> {
        let fragment = validate_search_fragment(fragment)?;
        let needle = fragment.to_lowercase();

        let students = sqlx::query_as::<_, Student>(
            "SELECT id, full_name, age FROM students ORDER BY full_name ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let matches: Vec<Student> = students
            .into_iter()
            .filter(|s| s.full_name.to_lowercase().contains(&needle))
            .collect();

        debug!(fragment = %fragment, count = matches.len(), "Student search");
        Ok(matches)
    }

    /// Courses worth at least `min_credits` credits.
    ///
    /// ## Errors
    /// * `DbError::Validation` - `min_credits` below 1
    pub async fn courses_with_min_credits(&self, min_credits: i64) -> DbResult<Vec<Course>> {
        validate_min_credits(min_credits)?;

        let courses = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, title, credits
            FROM courses
            WHERE credits >= ?1
            ORDER BY credits ASC, title ASC
            "#,
        )
        .bind(min_credits)
        .fetch_all(&self.pool)
        .await?;

        debug!(min_credits, count = courses.len(), "Courses by min credits");
        Ok(courses)
    }

    /// Enrollments of one student, newest first.
    ///
    /// An id with no student behind it yields an empty list.
    ///
    /// ## Errors
    /// * `DbError::Validation` - `student_id` not positive
    pub async fn enrollments_by_student(&self, student_id: i64) -> DbResult<Vec<EnrollmentRow>> {
        validate_id("student_id", student_id)?;

        let sql = format!(
            "{} WHERE e.student_id = ?1 ORDER BY e.enrolled_at DESC, e.id DESC",
            ENROLLMENT_ROW_SELECT
        );

        let rows = sqlx::query_as::<_, EnrollmentRow>(&sql)
            .bind(student_id)
            .fetch_all(&self.pool)
            .await?;

        debug!(student_id, count = rows.len(), "Enrollments by student");
        Ok(rows)
    }

    /// Every student with the number of courses they are enrolled in.
    pub async fn students_with_enrollment_counts(&self) -> DbResult<Vec<StudentEnrollmentCount>> {
        let rows = sqlx::query_as::<_, StudentEnrollmentCount>(
            r#"
            SELECT
                s.id,
                s.full_name,
                s.age,
                COUNT(e.id) AS enrollment_count
            FROM students s
            LEFT JOIN enrollments e ON e.student_id = s.id
            GROUP BY s.id, s.full_name, s.age
            ORDER BY enrollment_count DESC, s.full_name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Student enrollment counts");
        Ok(rows)
    }

    /// Every course ranked by how many students are enrolled in it.
    pub async fn top_courses(&self) -> DbResult<Vec<CourseEnrollmentCount>> {
        let rows = sqlx::query_as::<_, CourseEnrollmentCount>(
            r#"
            SELECT
                c.id,
                c.title,
                c.credits,
                COUNT(e.id) AS enrollment_count
            FROM courses c
            LEFT JOIN enrollments e ON e.course_id = c.id
            GROUP BY c.id, c.title, c.credits
            ORDER BY enrollment_count DESC, c.title ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Top courses");
        Ok(rows)
    }

    /// The most recent enrollments, at most [`LATEST_ENROLLMENTS_LIMIT`].
    pub async fn latest_enrollments(&self) -> DbResult<Vec<EnrollmentRow>> {
        let sql = format!(
            "{} ORDER BY e.enrolled_at DESC, e.id DESC LIMIT ?1",
            ENROLLMENT_ROW_SELECT
        );

        let rows = sqlx::query_as::<_, EnrollmentRow>(&sql)
            .bind(LATEST_ENROLLMENTS_LIMIT)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Latest enrollments");
        Ok(rows)
    }

    // =========================================================================
    // Listings
    // =========================================================================

    /// All students in id order.
    pub async fn list_students(&self) -> DbResult<Vec<Student>> {
        let students =
            sqlx::query_as::<_, Student>("SELECT id, full_name, age FROM students ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(students)
    }

    /// All courses in id order.
    pub async fn list_courses(&self) -> DbResult<Vec<Course>> {
        let courses =
            sqlx::query_as::<_, Course>("SELECT id, title, credits FROM courses ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(courses)
    }

    /// All enrollments in id order, with student and course names.
    pub async fn list_enrollments(&self) -> DbResult<Vec<EnrollmentRow>> {
        let sql = format!("{} ORDER BY e.id", ENROLLMENT_ROW_SELECT);

        let rows = sqlx::query_as::<_, EnrollmentRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Row counts of the three tables.
    pub async fn summary(&self) -> DbResult<Summary> {
        let summary = sqlx::query_as::<_, Summary>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM students)    AS students,
                (SELECT COUNT(*) FROM courses)     AS courses,
                (SELECT COUNT(*) FROM enrollments) AS enrollments
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }
}
