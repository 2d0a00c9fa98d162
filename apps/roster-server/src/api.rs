//! # JSON API
//!
//! Handlers behind `/api`. Each one unpacks its body or path, makes one
//! repository call and returns the rows as JSON.
//!
//! | Method & path                                 | Repository call                     |
//! |-----------------------------------------------|-------------------------------------|
//! | `POST /api/queries/students/search`           | `search_students`                   |
//! | `POST /api/queries/courses/min-credits`       | `courses_with_min_credits`          |
//! | `POST /api/queries/enrollments/by-student`    | `enrollments_by_student`            |
//! | `GET  /api/queries/students/enrollment-counts`| `students_with_enrollment_counts`   |
//! | `GET  /api/queries/courses/top`               | `top_courses`                       |
//! | `GET  /api/queries/enrollments/latest`        | `latest_enrollments`                |
//! | `DELETE /api/queries/enrollments/{id}`        | `EnrollmentRepository::delete`      |
//! | `POST /api/students`                          | `StudentRepository::create`         |
//! | `POST /api/courses`                           | `CourseRepository::create`          |
//! | `POST /api/enrollments`                       | `EnrollmentRepository::enroll`      |
//!
//! Extractors are taken as `Result<_, Rejection>` so malformed input turns
//! into a 400 `ApiError` instead of axum's plain-text rejection.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use roster_core::{
    Course, CourseEnrollmentCount, Enrollment, EnrollmentRow, NewCourse, NewStudent, Student,
    StudentEnrollmentCount,
};

use crate::error::ApiError;
use crate::AppState;

pub type ApiResult<T> = Result<Json<T>, ApiError>;

// =============================================================================
// Request / Response Bodies
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSearchRequest {
    pub name_part: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinCreditsRequest {
    pub min_credits: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentIdRequest {
    pub student_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    pub student_id: i64,
    pub course_id: i64,
}

/// Body of a successful enrollment delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub message: String,
    pub enrollment_id: i64,
}

/// Routes mounted under `/api`.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/queries/students/search", post(search_students))
        .route("/queries/courses/min-credits", post(courses_min_credits))
        .route("/queries/enrollments/by-student", post(enrollments_by_student))
        .route(
            "/queries/students/enrollment-counts",
            get(student_enrollment_counts),
        )
        .route("/queries/courses/top", get(top_courses))
        .route("/queries/enrollments/latest", get(latest_enrollments))
        .route("/queries/enrollments/{id}", delete(delete_enrollment))
        .route("/students", post(create_student))
        .route("/courses", post(create_course))
        .route("/enrollments", post(create_enrollment))
}

// =============================================================================
// Query Handlers
// =============================================================================

pub async fn search_students(
    State(state): State<Arc<AppState>>,
    body: Result<Json<StudentSearchRequest>, JsonRejection>,
) -> ApiResult<Vec<Student>> {
    let Json(req) = body?;
    let rows = state.db.reports().search_students(&req.name_part).await?;
    Ok(Json(rows))
}

pub async fn courses_min_credits(
    State(state): State<Arc<AppState>>,
    body: Result<Json<MinCreditsRequest>, JsonRejection>,
) -> ApiResult<Vec<Course>> {
    let Json(req) = body?;
    let rows = state
        .db
        .reports()
        .courses_with_min_credits(req.min_credits)
        .await?;
    Ok(Json(rows))
}

pub async fn enrollments_by_student(
    State(state): State<Arc<AppState>>,
    body: Result<Json<StudentIdRequest>, JsonRejection>,
) -> ApiResult<Vec<EnrollmentRow>> {
    let Json(req) = body?;
    let rows = state
        .db
        .reports()
        .enrollments_by_student(req.student_id)
        .await?;
    Ok(Json(rows))
}

pub async fn student_enrollment_counts(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Vec<StudentEnrollmentCount>> {
    let rows = state.db.reports().students_with_enrollment_counts().await?;
    Ok(Json(rows))
}

pub async fn top_courses(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Vec<CourseEnrollmentCount>> {
    let rows = state.db.reports().top_courses().await?;
    Ok(Json(rows))
}

pub async fn latest_enrollments(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Vec<EnrollmentRow>> {
    let rows = state.db.reports().latest_enrollments().await?;
    Ok(Json(rows))
}

pub async fn delete_enrollment(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<DeleteResponse> {
    let Path(id) = id?;
    state.db.enrollments().delete(id).await?;
    info!(enrollment_id = id, "Enrollment deleted");

    Ok(Json(DeleteResponse {
        message: "Deleted".to_string(),
        enrollment_id: id,
    }))
}

// =============================================================================
// Create Handlers
// =============================================================================

pub async fn create_student(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewStudent>, JsonRejection>,
) -> ApiResult<Student> {
    let Json(input) = body?;
    let student = state.db.students().create(&input).await?;
    info!(student_id = student.id, "Student created");
    Ok(Json(student))
}

pub async fn create_course(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewCourse>, JsonRejection>,
) -> ApiResult<Course> {
    let Json(input) = body?;
    let course = state.db.courses().create(&input).await?;
    info!(course_id = course.id, "Course created");
    Ok(Json(course))
}

pub async fn create_enrollment(
    State(state): State<Arc<AppState>>,
    body: Result<Json<EnrollRequest>, JsonRejection>,
) -> ApiResult<Enrollment> {
    let Json(req) = body?;
    let enrollment = state
        .db
        .enrollments()
        .enroll(req.student_id, req.course_id)
        .await?;
    info!(enrollment_id = enrollment.id, "Enrollment created");
    Ok(Json(enrollment))
}
