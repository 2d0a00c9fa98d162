//! Enrollment invariants against a real (in-memory) SQLite database:
//! uniqueness, cascades, existence checks and count aggregates.

use roster_core::{NewCourse, NewStudent};
use roster_db::{Database, DbConfig, DbError};

async fn open() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

async fn student(db: &Database, name: &str) -> i64 {
    db.students()
        .create(&NewStudent::new(name, 21))
        .await
        .unwrap()
        .id
}

async fn course(db: &Database, title: &str, credits: i64) -> i64 {
    db.courses()
        .create(&NewCourse::new(title, credits))
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn test_duplicate_enrollment_rejected() {
    let db = open().await;
    let s = student(&db, "Anna").await;
    let c = course(&db, "Web", 6).await;

    let first = db.enrollments().enroll(s, c).await.unwrap();
    assert_eq!(first.student_id, s);
    assert_eq!(first.course_id, c);

    let second = db.enrollments().enroll(s, c).await;
    assert!(matches!(second, Err(DbError::AlreadyExists { .. })));
    assert_eq!(db.enrollments().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_unique_index_is_the_authority() {
    let db = open().await;
    let s = student(&db, "Anna").await;
    let c = course(&db, "Web", 6).await;
    db.enrollments().enroll(s, c).await.unwrap();

    // Bypass the advisory check: the storage constraint still rejects it
    let raw = sqlx::query(
        "INSERT INTO enrollments (student_id, course_id, enrolled_at) VALUES (?1, ?2, ?3)",
    )
    .bind(s)
    .bind(c)
    .bind("2026-01-01T00:00:00.000000Z")
    .execute(db.pool())
    .await
    .unwrap_err();

    assert!(matches!(DbError::from(raw), DbError::AlreadyExists { .. }));
}

#[tokio::test]
async fn test_enroll_unknown_student_creates_nothing() {
    let db = open().await;
    let c = course(&db, "Web", 6).await;

    let err = db.enrollments().enroll(999, c).await.unwrap_err();
    match err {
        DbError::NotFound { entity, id } => {
            assert_eq!(entity, "Student");
            assert_eq!(id, "999");
        }
        other => panic!("expected NotFound, got {:?}", other),
    }
    assert_eq!(db.enrollments().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_enroll_unknown_course() {
    let db = open().await;
    let s = student(&db, "Anna").await;

    let err = db.enrollments().enroll(s, 42).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Course"));
}

#[tokio::test]
async fn test_enroll_rejects_non_positive_ids() {
    let db = open().await;

    assert!(matches!(
        db.enrollments().enroll(0, 1).await,
        Err(DbError::Validation(_))
    ));
    assert!(matches!(
        db.enrollments().enroll(1, -3).await,
        Err(DbError::Validation(_))
    ));
}

#[tokio::test]
async fn test_delete_enrollment() {
    let db = open().await;
    let s = student(&db, "Anna").await;
    let c = course(&db, "Web", 6).await;
    let e = db.enrollments().enroll(s, c).await.unwrap();

    db.enrollments().delete(e.id).await.unwrap();
    assert!(db.enrollments().get_by_id(e.id).await.unwrap().is_none());

    let again = db.enrollments().delete(e.id).await;
    assert!(matches!(again, Err(DbError::NotFound { .. })));
}

#[tokio::test]
async fn test_delete_non_positive_id_is_not_found() {
    let db = open().await;

    for id in [0, -1] {
        let err = db.enrollments().delete(id).await.unwrap_err();
        assert!(
            matches!(err, DbError::NotFound { ref entity, .. } if entity == "Enrollment"),
            "delete({}) gave {:?}",
            id,
            err
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_enrolls_for_one_pair_succeed_once() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(DbConfig::new(dir.path().join("race.db")))
        .await
        .unwrap();

    for round in 0..10 {
        let s = student(&db, &format!("Student {}", round)).await;
        let c = course(&db, &format!("Course {}", round), 6).await;

        let handles: Vec<_> = (0..6)
            .map(|_| {
                let db = db.clone();
                tokio::spawn(async move { db.enrollments().enroll(s, c).await })
            })
            .collect();

        let mut ok = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => ok += 1,
                Err(DbError::AlreadyExists { field, value }) => {
                    assert_eq!(field, "enrollment");
                    assert_eq!(value, format!("student {} in course {}", s, c));
                }
                Err(other) => panic!("unexpected error: {:?}", other),
            }
        }
        assert_eq!(ok, 1, "round {}", round);
    }

    assert_eq!(db.enrollments().count().await.unwrap(), 10);
    db.close().await;
}

#[tokio::test]
async fn test_deleting_student_cascades_to_own_enrollments_only() {
    let db = open().await;
    let anna = student(&db, "Anna").await;
    let janis = student(&db, "Jānis").await;
    let web = course(&db, "Web", 6).await;
    let dbs = course(&db, "Datubāzes", 4).await;

    db.enrollments().enroll(anna, web).await.unwrap();
    db.enrollments().enroll(anna, dbs).await.unwrap();
    let kept = db.enrollments().enroll(janis, web).await.unwrap();

    db.students().delete(anna).await.unwrap();

    let remaining = db.reports().list_enrollments().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, kept.id);
    assert_eq!(remaining[0].student, "Jānis");
}

#[tokio::test]
async fn test_deleting_course_cascades_to_own_enrollments_only() {
    let db = open().await;
    let anna = student(&db, "Anna").await;
    let janis = student(&db, "Jānis").await;
    let web = course(&db, "Web", 6).await;
    let dbs = course(&db, "Datubāzes", 4).await;

    db.enrollments().enroll(anna, web).await.unwrap();
    db.enrollments().enroll(janis, web).await.unwrap();
    let kept = db.enrollments().enroll(janis, dbs).await.unwrap();

    db.courses().delete(web).await.unwrap();

    let remaining = db.reports().list_enrollments().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, kept.id);
    assert!(db.courses().exists(dbs).await.unwrap());
    assert!(!db.courses().exists(web).await.unwrap());
}

#[tokio::test]
async fn test_counts_match_enrollment_rows() {
    let db = open().await;
    let anna = student(&db, "Anna").await;
    let janis = student(&db, "Jānis").await;
    let zane = student(&db, "Zane").await;
    let web = course(&db, "Web", 6).await;
    let dbs = course(&db, "Datubāzes", 4).await;
    let _empty = course(&db, "Algoritmi", 5).await;

    for (s, c) in [(anna, web), (anna, dbs), (janis, web)] {
        db.enrollments().enroll(s, c).await.unwrap();
    }

    let students = db.reports().students_with_enrollment_counts().await.unwrap();
    for row in &students {
        let direct: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM enrollments WHERE student_id = ?1")
                .bind(row.id)
                .fetch_one(db.pool())
                .await
                .unwrap();
        assert_eq!(row.enrollment_count, direct);
    }
    let order: Vec<i64> = students.iter().map(|r| r.id).collect();
    assert_eq!(order, vec![anna, janis, zane]);

    let courses = db.reports().top_courses().await.unwrap();
    let ranked: Vec<(&str, i64)> = courses
        .iter()
        .map(|r| (r.title.as_str(), r.enrollment_count))
        .collect();
    assert_eq!(ranked, vec![("Web", 2), ("Datubāzes", 1), ("Algoritmi", 0)]);
}

#[tokio::test]
async fn test_age_boundaries() {
    let db = open().await;

    for age in [0, 121] {
        let result = db.students().create(&NewStudent::new("Edge", age)).await;
        assert!(matches!(result, Err(DbError::Validation(_))), "age {}", age);
    }
    for age in [1, 120] {
        let created = db
            .students()
            .create(&NewStudent::new("Edge", age))
            .await
            .unwrap();
        assert_eq!(created.age, age);
    }
    assert_eq!(db.students().count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_create_student_stores_trimmed_name() {
    let db = open().await;
    let created = db
        .students()
        .create(&NewStudent::new("  Jānis Kalniņš ", 22))
        .await
        .unwrap();

    let stored = db.students().get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(stored.full_name, "Jānis Kalniņš");
    assert_eq!(stored, created);
}

#[tokio::test]
async fn test_course_validation() {
    let db = open().await;

    let long_title = "x".repeat(81);
    assert!(matches!(
        db.courses().create(&NewCourse::new(long_title, 5)).await,
        Err(DbError::Validation(_))
    ));
    assert!(matches!(
        db.courses().create(&NewCourse::new("Web", 0)).await,
        Err(DbError::Validation(_))
    ));
    assert_eq!(db.courses().count().await.unwrap(), 0);
}
