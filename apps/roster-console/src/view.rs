//! Terminal tables for every listing and report.

use chrono::{DateTime, Utc};
use prettytable::{format, row, Table};

use roster_core::{Course, CourseEnrollmentCount, EnrollmentRow, Student, StudentEnrollmentCount};

fn new_table() -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

pub fn students(rows: &[Student]) -> Table {
    let mut table = new_table();
    table.set_titles(row!["ID", "FULL NAME", "AGE"]);
    for s in rows {
        table.add_row(row![s.id, s.full_name, s.age]);
    }
    table
}

pub fn courses(rows: &[Course]) -> Table {
    let mut table = new_table();
    table.set_titles(row!["ID", "TITLE", "CREDITS"]);
    for c in rows {
        table.add_row(row![c.id, c.title, c.credits]);
    }
    table
}

pub fn enrollments(rows: &[EnrollmentRow]) -> Table {
    let mut table = new_table();
    table.set_titles(row!["ID", "STUDENT", "COURSE", "ENROLLED AT"]);
    for e in rows {
        table.add_row(row![e.id, e.student, e.course, timestamp(&e.enrolled_at)]);
    }
    table
}

pub fn student_counts(rows: &[StudentEnrollmentCount]) -> Table {
    let mut table = new_table();
    table.set_titles(row!["ID", "FULL NAME", "AGE", "ENROLLMENTS"]);
    for s in rows {
        table.add_row(row![s.id, s.full_name, s.age, s.enrollment_count]);
    }
    table
}

pub fn course_counts(rows: &[CourseEnrollmentCount]) -> Table {
    let mut table = new_table();
    table.set_titles(row!["ID", "TITLE", "CREDITS", "ENROLLMENTS"]);
    for c in rows {
        table.add_row(row![c.id, c.title, c.credits, c.enrollment_count]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_enrollments_table() {
        let rows = vec![EnrollmentRow {
            id: 3,
            student: "Anna Bērziņa".into(),
            course: "Web tehnoloģijas".into(),
            enrolled_at: Utc.with_ymd_and_hms(2026, 2, 1, 8, 30, 0).unwrap(),
        }];
        let text = enrollments(&rows).to_string();
        assert!(text.contains("Anna Bērziņa"));
        assert!(text.contains("2026-02-01 08:30"));
        assert!(text.contains("ENROLLED AT"));
    }

    #[test]
    fn test_counts_table_rows() {
        let rows = vec![
            CourseEnrollmentCount {
                id: 1,
                title: "Web".into(),
                credits: 6,
                enrollment_count: 2,
            },
            CourseEnrollmentCount {
                id: 2,
                title: "Datubāzes".into(),
                credits: 4,
                enrollment_count: 0,
            },
        ];
        let table = course_counts(&rows);
        assert_eq!(table.len(), 2);
    }
}
