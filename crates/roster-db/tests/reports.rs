//! Report catalog behavior, including the seeded sample-data scenario.

use roster_core::{NewCourse, NewStudent, LATEST_ENROLLMENTS_LIMIT};
use roster_db::seed::{seed_if_empty, SeedOutcome};
use roster_db::{Database, DbConfig, DbError};

async fn seeded() -> Database {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    seed_if_empty(&db).await.unwrap();
    db
}

#[tokio::test]
async fn test_seed_scenario() {
    let db = seeded().await;

    let courses = db.reports().courses_with_min_credits(5).await.unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].title, "Web tehnoloģijas");
    assert_eq!(courses[0].credits, 6);

    let counts = db.reports().students_with_enrollment_counts().await.unwrap();
    let view: Vec<(&str, i64)> = counts
        .iter()
        .map(|r| (r.full_name.as_str(), r.enrollment_count))
        .collect();
    assert_eq!(view, vec![("Anna Bērziņa", 1), ("Jānis Kalniņš", 0)]);

    let latest = db.reports().latest_enrollments().await.unwrap();
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0].student, "Anna Bērziņa");
    assert_eq!(latest[0].course, "Web tehnoloģijas");

    db.enrollments().delete(latest[0].id).await.unwrap();
    assert!(db.reports().latest_enrollments().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_seed_is_idempotent() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    let first = seed_if_empty(&db).await.unwrap();
    assert_eq!(
        first,
        SeedOutcome {
            students: 2,
            courses: 2,
            enrollments: 1
        }
    );

    let second = seed_if_empty(&db).await.unwrap();
    assert!(second.is_noop());

    let summary = db.reports().summary().await.unwrap();
    assert_eq!(
        (summary.students, summary.courses, summary.enrollments),
        (2, 2, 1)
    );
}

#[tokio::test]
async fn test_seed_fills_only_empty_tables() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    db.students()
        .create(&NewStudent::new("Zane Ozola", 30))
        .await
        .unwrap();

    let outcome = seed_if_empty(&db).await.unwrap();
    assert_eq!(outcome.students, 0);
    assert_eq!(outcome.courses, 2);
    assert_eq!(outcome.enrollments, 1);

    let rows = db.reports().list_enrollments().await.unwrap();
    assert_eq!(rows[0].student, "Zane Ozola");
}

#[tokio::test]
async fn test_search_is_case_insensitive_and_ordered() {
    let db = seeded().await;
    db.students()
        .create(&NewStudent::new("Jānis Ābols", 19))
        .await
        .unwrap();

    let hits = db.reports().search_students("JĀN").await.unwrap();
    let names: Vec<&str> = hits.iter().map(|s| s.full_name.as_str()).collect();
    assert_eq!(names, vec!["Jānis Kalniņš", "Jānis Ābols"]);

    let none = db.reports().search_students("zzz").await.unwrap();
    assert!(none.is_empty());

    let trimmed = db.reports().search_students("  anna ").await.unwrap();
    assert_eq!(trimmed.len(), 1);
}

#[tokio::test]
async fn test_search_rejects_blank_fragment() {
    let db = seeded().await;

    for fragment in ["", "   ", "\t"] {
        let result = db.reports().search_students(fragment).await;
        assert!(matches!(result, Err(DbError::Validation(_))));
    }
}

#[tokio::test]
async fn test_search_validates_before_storage() {
    let db = seeded().await;
    db.close().await;

    // A closed pool would fail any query; validation must fail first
    let result = db.reports().search_students(" ").await;
    assert!(matches!(result, Err(DbError::Validation(_))));
}

#[tokio::test]
async fn test_min_credits_ordering_and_validation() {
    let db = seeded().await;
    db.courses()
        .create(&NewCourse::new("Algoritmi", 6))
        .await
        .unwrap();

    let rows = db.reports().courses_with_min_credits(1).await.unwrap();
    let view: Vec<(&str, i64)> = rows.iter().map(|c| (c.title.as_str(), c.credits)).collect();
    assert_eq!(
        view,
        vec![("Datubāzes", 4), ("Algoritmi", 6), ("Web tehnoloģijas", 6)]
    );

    assert!(db.reports().courses_with_min_credits(61).await.unwrap().is_empty());
    assert!(matches!(
        db.reports().courses_with_min_credits(0).await,
        Err(DbError::Validation(_))
    ));
}

#[tokio::test]
async fn test_enrollments_by_student() {
    let db = seeded().await;
    let students = db.reports().list_students().await.unwrap();
    let courses = db.reports().list_courses().await.unwrap();
    let anna = students[0].id;

    let second = db
        .enrollments()
        .enroll(anna, courses[1].id)
        .await
        .unwrap();

    let rows = db.reports().enrollments_by_student(anna).await.unwrap();
    assert_eq!(rows.len(), 2);
    // Newest first
    assert_eq!(rows[0].id, second.id);
    assert_eq!(rows[0].course, "Datubāzes");
    assert!(rows[0].enrolled_at >= rows[1].enrolled_at);

    assert!(db.reports().enrollments_by_student(9999).await.unwrap().is_empty());
    assert!(matches!(
        db.reports().enrollments_by_student(0).await,
        Err(DbError::Validation(_))
    ));
}

#[tokio::test]
async fn test_latest_enrollments_capped() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let course = db
        .courses()
        .create(&NewCourse::new("Web", 6))
        .await
        .unwrap();

    let mut ids = Vec::new();
    for n in 0..12 {
        let s = db
            .students()
            .create(&NewStudent::new(format!("Student {:02}", n), 20))
            .await
            .unwrap();
        ids.push(db.enrollments().enroll(s.id, course.id).await.unwrap().id);
    }

    let latest = db.reports().latest_enrollments().await.unwrap();
    assert_eq!(latest.len() as i64, LATEST_ENROLLMENTS_LIMIT);

    let expected: Vec<i64> = ids.iter().rev().take(10).copied().collect();
    let got: Vec<i64> = latest.iter().map(|r| r.id).collect();
    assert_eq!(got, expected);
}

#[tokio::test]
async fn test_reports_on_empty_database() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let reports = db.reports();

    assert!(reports.students_with_enrollment_counts().await.unwrap().is_empty());
    assert!(reports.top_courses().await.unwrap().is_empty());
    assert!(reports.latest_enrollments().await.unwrap().is_empty());
    assert!(reports.list_enrollments().await.unwrap().is_empty());
    assert!(reports.summary().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_enrolled_at_round_trips() {
    let db = seeded().await;
    let row = db.reports().list_enrollments().await.unwrap().remove(0);
    let stored = db.enrollments().get_by_id(row.id).await.unwrap().unwrap();
    assert_eq!(stored.enrolled_at, row.enrolled_at);
}

#[tokio::test]
async fn test_default_stamp_matches_application_width() {
    let db = seeded().await;
    let anna = db.reports().list_students().await.unwrap()[0].id;
    let datubazes = db.reports().list_courses().await.unwrap()[1].id;

    sqlx::query("INSERT INTO enrollments (student_id, course_id) VALUES (?1, ?2)")
        .bind(anna)
        .bind(datubazes)
        .execute(db.pool())
        .await
        .unwrap();

    let stamps: Vec<String> =
        sqlx::query_scalar("SELECT enrolled_at FROM enrollments ORDER BY id")
            .fetch_all(db.pool())
            .await
            .unwrap();
    assert_eq!(stamps.len(), 2);
    // "2026-01-31T09:05:00.000000Z"
    for stamp in &stamps {
        assert_eq!(stamp.len(), 27, "{}", stamp);
        assert!(stamp.ends_with('Z'));
    }

    let latest = db.reports().latest_enrollments().await.unwrap();
    assert_eq!(latest.len(), 2);
}
