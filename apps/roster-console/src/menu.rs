//! # Console Menu
//!
//! The numbered menu loop. Each entry reads its input with [`prompt`],
//! makes one repository call and prints a table or a one-line message.
//! Domain failures (validation, not found, duplicate) are printed and the
//! loop continues; only terminal I/O errors end the session.

use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;

use roster_core::{NewCourse, NewStudent, MAX_AGE, MAX_CREDITS, MIN_AGE, MIN_CREDITS};
use roster_db::{Database, DbError};

use crate::{prompt, view};

/// Menu entries in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    ListStudents,
    ListCourses,
    ListEnrollments,
    AddStudent,
    AddCourse,
    AddEnrollment,
    SearchStudents,
    CoursesMinCredits,
    EnrollmentsByStudent,
    StudentEnrollmentCounts,
    TopCourses,
    LatestEnrollments,
    DeleteEnrollment,
    Exit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 14] = [
        MenuItem::ListStudents,
        MenuItem::ListCourses,
        MenuItem::ListEnrollments,
        MenuItem::AddStudent,
        MenuItem::AddCourse,
        MenuItem::AddEnrollment,
        MenuItem::SearchStudents,
        MenuItem::CoursesMinCredits,
        MenuItem::EnrollmentsByStudent,
        MenuItem::StudentEnrollmentCounts,
        MenuItem::TopCourses,
        MenuItem::LatestEnrollments,
        MenuItem::DeleteEnrollment,
        MenuItem::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::ListStudents => "Show all students",
            MenuItem::ListCourses => "Show all courses",
            MenuItem::ListEnrollments => "Show all enrollments",
            MenuItem::AddStudent => "Add student",
            MenuItem::AddCourse => "Add course",
            MenuItem::AddEnrollment => "Add enrollment (student -> course)",
            MenuItem::SearchStudents => "Search students by name",
            MenuItem::CoursesMinCredits => "Courses with minimum credits",
            MenuItem::EnrollmentsByStudent => "Enrollments by student",
            MenuItem::StudentEnrollmentCounts => "Students with enrollment counts",
            MenuItem::TopCourses => "Top courses",
            MenuItem::LatestEnrollments => "Latest enrollments",
            MenuItem::DeleteEnrollment => "Delete enrollment",
            MenuItem::Exit => "Exit",
        }
    }
}

/// Numbered labels as shown in the menu ("1) Show all students", ...).
///
/// Exit is numbered 0.
pub fn menu_labels() -> Vec<String> {
    MenuItem::ALL
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let number = if *item == MenuItem::Exit { 0 } else { i + 1 };
            format!("{}) {}", number, item.label())
        })
        .collect()
}

/// One-line message for a failed repository call.
pub fn describe_error(err: &DbError) -> String {
    match err {
        DbError::Validation(e) => format!("Invalid input: {}", e),
        DbError::NotFound { entity, id } => format!("{} {} was not found", entity, id),
        DbError::AlreadyExists { .. } => "This enrollment already exists".to_string(),
        other => format!("Database error: {}", other),
    }
}

/// Runs the menu until Exit is chosen.
pub async fn run(db: &Database) -> anyhow::Result<()> {
    let labels = menu_labels();

    loop {
        println!();
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Roster")
            .items(&labels[..])
            .default(0)
            .interact()?;

        let item = MenuItem::ALL[choice];
        if item == MenuItem::Exit {
            println!("Goodbye!");
            return Ok(());
        }

        match handle(db, item).await {
            Ok(()) => {}
            Err(Failure::Db(err)) => {
                tracing::warn!(error = %err, "Menu action failed");
                println!("{}", describe_error(&err));
            }
            Err(Failure::Io(err)) => return Err(err.into()),
        }
    }
}

enum Failure {
    Db(DbError),
    Io(dialoguer::Error),
}

impl From<DbError> for Failure {
    fn from(err: DbError) -> Self {
        Failure::Db(err)
    }
}

impl From<dialoguer::Error> for Failure {
    fn from(err: dialoguer::Error) -> Self {
        Failure::Io(err)
    }
}

async fn handle(db: &Database, item: MenuItem) -> Result<(), Failure> {
    let reports = db.reports();

    match item {
        MenuItem::ListStudents => print_or_empty(view::students(&reports.list_students().await?)),
        MenuItem::ListCourses => print_or_empty(view::courses(&reports.list_courses().await?)),
        MenuItem::ListEnrollments => {
            print_or_empty(view::enrollments(&reports.list_enrollments().await?))
        }
        MenuItem::AddStudent => {
            let full_name = prompt::text("Full name")?;
            let age = prompt::number("Age", MIN_AGE, MAX_AGE)?;
            let student = db
                .students()
                .create(&NewStudent::new(full_name, age))
                .await?;
            println!("Student added (id {}).", student.id);
        }
        MenuItem::AddCourse => {
            let title = prompt::text("Title")?;
            let credits = prompt::number("Credits", MIN_CREDITS, MAX_CREDITS)?;
            let course = db.courses().create(&NewCourse::new(title, credits)).await?;
            println!("Course added (id {}).", course.id);
        }
        MenuItem::AddEnrollment => {
            let students = reports.list_students().await?;
            let courses = reports.list_courses().await?;
            if students.is_empty() || courses.is_empty() {
                println!("No students or courses yet. Add a student and a course first.");
                return Ok(());
            }

            println!("Students:");
            view::students(&students).printstd();
            println!("Courses:");
            view::courses(&courses).printstd();

            let student_id = prompt::number("Student id", 1, i64::MAX)?;
            let course_id = prompt::number("Course id", 1, i64::MAX)?;
            let enrollment = db.enrollments().enroll(student_id, course_id).await?;
            println!("Enrollment added (id {}).", enrollment.id);
        }
        MenuItem::SearchStudents => {
            let fragment = prompt::text("Name contains")?;
            print_or_empty(view::students(&reports.search_students(&fragment).await?));
        }
        MenuItem::CoursesMinCredits => {
            let min = prompt::number("Minimum credits", MIN_CREDITS, i64::MAX)?;
            print_or_empty(view::courses(&reports.courses_with_min_credits(min).await?));
        }
        MenuItem::EnrollmentsByStudent => {
            let student_id = prompt::number("Student id", 1, i64::MAX)?;
            print_or_empty(view::enrollments(
                &reports.enrollments_by_student(student_id).await?,
            ));
        }
        MenuItem::StudentEnrollmentCounts => print_or_empty(view::student_counts(
            &reports.students_with_enrollment_counts().await?,
        )),
        MenuItem::TopCourses => print_or_empty(view::course_counts(&reports.top_courses().await?)),
        MenuItem::LatestEnrollments => {
            print_or_empty(view::enrollments(&reports.latest_enrollments().await?))
        }
        MenuItem::DeleteEnrollment => {
            let id = prompt::number("Enrollment id", 1, i64::MAX)?;
            db.enrollments().delete(id).await?;
            println!("Enrollment {} deleted.", id);
        }
        MenuItem::Exit => {}
    }

    Ok(())
}

fn print_or_empty(table: prettytable::Table) {
    if table.is_empty() {
        println!("(no records)");
    } else {
        table.printstd();
    }
}
