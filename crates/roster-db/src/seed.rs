//! # First-Run Seeding
//!
//! Sample data for a fresh database. Each table is checked on its own and
//! filled only when empty, so running the seed twice changes nothing.
//!
//! | Table       | Rows                                                |
//! |-------------|-----------------------------------------------------|
//! | students    | Anna Bērziņa (20), Jānis Kalniņš (22)               |
//! | courses     | Web tehnoloģijas (6 credits), Datubāzes (4 credits) |
//! | enrollments | first student in first course                       |

use tracing::info;

use crate::error::DbResult;
use crate::pool::Database;
use roster_core::{NewCourse, NewStudent};

/// Sample students as (full name, age).
pub const SAMPLE_STUDENTS: &[(&str, i64)] = &[("Anna Bērziņa", 20), ("Jānis Kalniņš", 22)];

/// Sample courses as (title, credits).
pub const SAMPLE_COURSES: &[(&str, i64)] = &[("Web tehnoloģijas", 6), ("Datubāzes", 4)];

/// Rows inserted by one seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    pub students: usize,
    pub courses: usize,
    pub enrollments: usize,
}

impl SeedOutcome {
    /// True when nothing was inserted.
    pub fn is_noop(&self) -> bool {
        self.students == 0 && self.courses == 0 && self.enrollments == 0
    }
}

/// Fills each empty table with its sample rows.
///
/// The sample enrollment links the lowest-id student to the lowest-id
/// course, and is only added when both exist.
pub async fn seed_if_empty(db: &Database) -> DbResult<SeedOutcome> {
    let mut outcome = SeedOutcome::default();

    if db.students().count().await? == 0 {
        for (full_name, age) in SAMPLE_STUDENTS {
            db.students()
                .create(&NewStudent::new(*full_name, *age))
                .await?;
            outcome.students += 1;
        }
    }

    if db.courses().count().await? == 0 {
        for (title, credits) in SAMPLE_COURSES {
            db.courses().create(&NewCourse::new(*title, *credits)).await?;
            outcome.courses += 1;
        }
    }

    if db.enrollments().count().await? == 0 {
        let reports = db.reports();
        let first_student = reports.list_students().await?.into_iter().next();
        let first_course = reports.list_courses().await?.into_iter().next();

        if let (Some(student), Some(course)) = (first_student, first_course) {
            db.enrollments().enroll(student.id, course.id).await?;
            outcome.enrollments += 1;
        }
    }

    if outcome.is_noop() {
        info!("Database already populated, seed skipped");
    } else {
        info!(
            students = outcome.students,
            courses = outcome.courses,
            enrollments = outcome.enrollments,
            "Seeded sample data"
        );
    }

    Ok(outcome)
}
