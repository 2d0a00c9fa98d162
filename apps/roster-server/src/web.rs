//! # HTML UI
//!
//! Server-rendered pages for the six reports. Parameterized reports are a
//! GET form plus a POST that renders the result table below the form; the
//! three parameterless reports render directly on GET.
//!
//! Numeric form fields arrive as text and are parsed here. Text that isn't a
//! number re-renders the form with a 400 status and never reaches the
//! repositories. Everything interpolated into markup goes through
//! [`escape`].

use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

use roster_core::{Course, CourseEnrollmentCount, EnrollmentRow, Student, StudentEnrollmentCount};
use roster_db::DbError;

use crate::error::ApiError;
use crate::AppState;

const STUDENT_SEARCH: &str = "/queries/students/search";
const MIN_CREDITS: &str = "/queries/courses/min-credits";
const BY_STUDENT: &str = "/queries/enrollments/by-student";
const ENROLLMENT_COUNTS: &str = "/queries/students/enrollment-counts";
const TOP_COURSES: &str = "/queries/courses/top";
const LATEST: &str = "/queries/enrollments/latest";

/// HTML routes, mounted at the root.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route(STUDENT_SEARCH, get(student_search_form).post(student_search))
        .route(MIN_CREDITS, get(min_credits_form).post(min_credits))
        .route(BY_STUDENT, get(by_student_form).post(by_student))
        .route(ENROLLMENT_COUNTS, get(enrollment_counts))
        .route(TOP_COURSES, get(top_courses))
        .route(LATEST, get(latest_enrollments))
}

// =============================================================================
// Forms
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchForm {
    pub name_part: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MinCreditsForm {
    pub min_credits: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentIdForm {
    pub student_id: String,
}

/// A form field definition: (name, label, input type).
type Field = (&'static str, &'static str, &'static str);

// =============================================================================
// Handlers
// =============================================================================

pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    let summary = match state.db.reports().summary().await {
        Ok(summary) => summary,
        Err(err) => return error_page(err),
    };

    let links = [
        (STUDENT_SEARCH, "Search students by name"),
        (MIN_CREDITS, "Courses with minimum credits"),
        (BY_STUDENT, "Enrollments by student"),
        (ENROLLMENT_COUNTS, "Students with enrollment counts"),
        (TOP_COURSES, "Top courses"),
        (LATEST, "Latest enrollments"),
    ]
    .iter()
    .map(|(href, label)| format!("<li><a href=\"{}\">{}</a></li>", href, label))
    .collect::<String>();

    let body = format!(
        "<p>{} students, {} courses, {} enrollments</p>\n<ul>{}</ul>",
        summary.students, summary.courses, summary.enrollments, links
    );
    Html(page("Roster", &body)).into_response()
}

pub async fn student_search_form() -> Response {
    form_page(
        "Search students",
        STUDENT_SEARCH,
        ("namePart", "Name contains", "text"),
        "",
        None,
        StatusCode::OK,
    )
}

pub async fn student_search(
    State(state): State<Arc<AppState>>,
    form: Result<Form<SearchForm>, FormRejection>,
) -> Response {
    const TITLE: &str = "Search students";
    const FIELD: Field = ("namePart", "Name contains", "text");

    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => return bad_form(TITLE, STUDENT_SEARCH, FIELD, "", rejection),
    };

    match state.db.reports().search_students(&form.name_part).await {
        Ok(rows) => result_page(
            TITLE,
            STUDENT_SEARCH,
            FIELD,
            &form.name_part,
            &students_table(&rows),
        ),
        Err(DbError::Validation(e)) => form_page(
            TITLE,
            STUDENT_SEARCH,
            FIELD,
            &form.name_part,
            Some(&e.to_string()),
            StatusCode::BAD_REQUEST,
        ),
        Err(err) => error_page(err),
    }
}

pub async fn min_credits_form() -> Response {
    form_page(
        "Courses with minimum credits",
        MIN_CREDITS,
        ("minCredits", "Minimum credits", "number"),
        "",
        None,
        StatusCode::OK,
    )
}

pub async fn min_credits(
    State(state): State<Arc<AppState>>,
    form: Result<Form<MinCreditsForm>, FormRejection>,
) -> Response {
    const TITLE: &str = "Courses with minimum credits";
    const FIELD: Field = ("minCredits", "Minimum credits", "number");

    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => return bad_form(TITLE, MIN_CREDITS, FIELD, "", rejection),
    };

    let min = match parse_number(&form.min_credits) {
        Some(min) => min,
        None => {
            return form_page(
                TITLE,
                MIN_CREDITS,
                FIELD,
                &form.min_credits,
                Some("Enter a whole number"),
                StatusCode::BAD_REQUEST,
            )
        }
    };

    match state.db.reports().courses_with_min_credits(min).await {
        Ok(rows) => result_page(
            TITLE,
            MIN_CREDITS,
            FIELD,
            &form.min_credits,
            &courses_table(&rows),
        ),
        Err(DbError::Validation(e)) => form_page(
            TITLE,
            MIN_CREDITS,
            FIELD,
            &form.min_credits,
            Some(&e.to_string()),
            StatusCode::BAD_REQUEST,
        ),
        Err(err) => error_page(err),
    }
}

pub async fn by_student_form() -> Response {
    form_page(
        "Enrollments by student",
        BY_STUDENT,
        ("studentId", "Student id", "number"),
        "",
        None,
        StatusCode::OK,
    )
}

pub async fn by_student(
    State(state): State<Arc<AppState>>,
    form: Result<Form<StudentIdForm>, FormRejection>,
) -> Response {
    const TITLE: &str = "Enrollments by student";
    const FIELD: Field = ("studentId", "Student id", "number");

    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => return bad_form(TITLE, BY_STUDENT, FIELD, "", rejection),
    };

    let student_id = match parse_number(&form.student_id) {
        Some(id) => id,
        None => {
            return form_page(
                TITLE,
                BY_STUDENT,
                FIELD,
                &form.student_id,
                Some("Enter a whole number"),
                StatusCode::BAD_REQUEST,
            )
        }
    };

    match state.db.reports().enrollments_by_student(student_id).await {
        Ok(rows) => result_page(
            TITLE,
            BY_STUDENT,
            FIELD,
            &form.student_id,
            &enrollments_table(&rows),
        ),
        Err(DbError::Validation(e)) => form_page(
            TITLE,
            BY_STUDENT,
            FIELD,
            &form.student_id,
            Some(&e.to_string()),
            StatusCode::BAD_REQUEST,
        ),
        Err(err) => error_page(err),
    }
}

pub async fn enrollment_counts(State(state): State<Arc<AppState>>) -> Response {
    match state.db.reports().students_with_enrollment_counts().await {
        Ok(rows) => report_page("Students with enrollment counts", &student_counts_table(&rows)),
        Err(err) => error_page(err),
    }
}

pub async fn top_courses(State(state): State<Arc<AppState>>) -> Response {
    match state.db.reports().top_courses().await {
        Ok(rows) => report_page("Top courses", &course_counts_table(&rows)),
        Err(err) => error_page(err),
    }
}

pub async fn latest_enrollments(State(state): State<Arc<AppState>>) -> Response {
    match state.db.reports().latest_enrollments().await {
        Ok(rows) => report_page("Latest enrollments", &enrollments_table(&rows)),
        Err(err) => error_page(err),
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn parse_number(input: &str) -> Option<i64> {
    input.trim().parse().ok()
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"lv\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n{body}\n\
         <p><a href=\"/\">Home</a></p>\n</body>\n</html>\n",
        title = escape(title),
        body = body
    )
}

fn form_html(action: &str, (name, label, kind): Field, value: &str, error: Option<&str>) -> String {
    let error = error
        .map(|e| format!("<p class=\"error\">{}</p>\n", escape(e)))
        .unwrap_or_default();
    format!(
        "{error}<form method=\"post\" action=\"{action}\">\n\
         <label for=\"{name}\">{label}</label>\n\
         <input id=\"{name}\" name=\"{name}\" type=\"{kind}\" value=\"{value}\">\n\
         <button type=\"submit\">Show</button>\n</form>",
        error = error,
        action = action,
        name = name,
        label = label,
        kind = kind,
        value = escape(value)
    )
}

fn form_page(
    title: &str,
    action: &str,
    field: Field,
    value: &str,
    error: Option<&str>,
    status: StatusCode,
) -> Response {
    let body = form_html(action, field, value, error);
    (status, Html(page(title, &body))).into_response()
}

fn result_page(title: &str, action: &str, field: Field, value: &str, table: &str) -> Response {
    let body = format!("{}\n{}", form_html(action, field, value, None), table);
    Html(page(title, &body)).into_response()
}

fn report_page(title: &str, table: &str) -> Response {
    Html(page(title, table)).into_response()
}

fn bad_form(
    title: &str,
    action: &str,
    field: Field,
    value: &str,
    rejection: FormRejection,
) -> Response {
    form_page(
        title,
        action,
        field,
        value,
        Some(&rejection.body_text()),
        StatusCode::BAD_REQUEST,
    )
}

fn error_page(err: DbError) -> Response {
    warn!(error = %err, "Page failed");
    let api = ApiError::from(err);
    let body = format!("<p class=\"error\">{}</p>", escape(&api.message));
    (api.status(), Html(page("Error", &body))).into_response()
}

fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    if rows.is_empty() {
        return "<p>No results.</p>".to_string();
    }

    let head = headers
        .iter()
        .map(|h| format!("<th>{}</th>", h))
        .collect::<String>();
    let body = rows
        .iter()
        .map(|cells| {
            let tds = cells
                .iter()
                .map(|c| format!("<td>{}</td>", escape(c)))
                .collect::<String>();
            format!("<tr>{}</tr>\n", tds)
        })
        .collect::<String>();

    format!(
        "<table>\n<thead><tr>{}</tr></thead>\n<tbody>\n{}</tbody>\n</table>",
        head, body
    )
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn students_table(rows: &[Student]) -> String {
    table(
        &["Id", "Full name", "Age"],
        rows.iter()
            .map(|s| vec![s.id.to_string(), s.full_name.clone(), s.age.to_string()])
            .collect(),
    )
}

fn courses_table(rows: &[Course]) -> String {
    table(
        &["Id", "Title", "Credits"],
        rows.iter()
            .map(|c| vec![c.id.to_string(), c.title.clone(), c.credits.to_string()])
            .collect(),
    )
}

fn enrollments_table(rows: &[EnrollmentRow]) -> String {
    table(
        &["Id", "Student", "Course", "Enrolled at"],
        rows.iter()
            .map(|e| {
                vec![
                    e.id.to_string(),
                    e.student.clone(),
                    e.course.clone(),
                    timestamp(&e.enrolled_at),
                ]
            })
            .collect(),
    )
}

fn student_counts_table(rows: &[StudentEnrollmentCount]) -> String {
    table(
        &["Id", "Full name", "Age", "Enrollments"],
        rows.iter()
            .map(|s| {
                vec![
                    s.id.to_string(),
                    s.full_name.clone(),
                    s.age.to_string(),
                    s.enrollment_count.to_string(),
                ]
            })
            .collect(),
    )
}

fn course_counts_table(rows: &[CourseEnrollmentCount]) -> String {
    table(
        &["Id", "Title", "Credits", "Enrollments"],
        rows.iter()
            .map(|c| {
                vec![
                    c.id.to_string(),
                    c.title.clone(),
                    c.credits.to_string(),
                    c.enrollment_count.to_string(),
                ]
            })
            .collect(),
    )
}
