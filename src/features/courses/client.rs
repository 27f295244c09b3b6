//! Client wrappers for `/courses` and its nested collections. Nested listings
//! are returned as raw JSON since the backend shapes them per view.

use super::types::{
    AddInstructorRequest, AddSurveyRequest, Course, CreateCourseRequest, DateFilter,
    UpdateCourseRequest,
};
use crate::{
    client::{ApiClient, AppError},
    features::require_id,
};
use serde_json::Value;
use tracing::instrument;

/// Lists courses.
///
/// # Errors
/// Returns `AppError` if the request fails or the response is invalid.
pub async fn list_courses(api: &ApiClient) -> Result<Vec<Course>, AppError> {
    api.get_items("/courses").await
}

/// # Errors
/// Returns `AppError` if the id is blank or the request fails.
pub async fn get_course(api: &ApiClient, id: &str) -> Result<Course, AppError> {
    let id = require_id("Course", id)?;
    api.get_json(&format!("/courses/{id}")).await
}

/// # Errors
/// Returns `AppError` if the backend rejects the course.
#[instrument(skip_all, fields(name = %data.name))]
pub async fn create_course(api: &ApiClient, data: &CreateCourseRequest) -> Result<Course, AppError> {
    api.post_json("/courses", data).await
}

/// Replaces a course.
///
/// # Errors
/// Returns `AppError` if the id is blank or the backend rejects the course.
#[instrument(skip(api, data))]
pub async fn update_course(
    api: &ApiClient,
    id: &str,
    data: &UpdateCourseRequest,
) -> Result<Course, AppError> {
    let id = require_id("Course", id)?;
    api.put_json(&format!("/courses/{id}"), data).await
}

/// # Errors
/// Returns `AppError` if the id is blank or the request fails.
#[instrument(skip(api))]
pub async fn delete_course(api: &ApiClient, id: &str) -> Result<(), AppError> {
    let id = require_id("Course", id)?;
    api.delete(&format!("/courses/{id}")).await
}

/// # Errors
/// Returns `AppError` if the id is blank or the request fails.
pub async fn list_instructors(api: &ApiClient, course_id: &str) -> Result<Vec<Value>, AppError> {
    let course_id = require_id("Course", course_id)?;
    api.get_json(&format!("/courses/{course_id}/instructors")).await
}

/// Assigns a worker as instructor of a course.
///
/// # Errors
/// Returns `AppError` if an id is blank or the request fails.
#[instrument(skip(api))]
pub async fn add_instructor(api: &ApiClient, course_id: &str, worker_id: &str) -> Result<(), AppError> {
    let course_id = require_id("Course", course_id)?;
    let worker_id = require_id("Worker", worker_id)?;
    api.post_json_empty(
        &format!("/courses/{course_id}/instructors"),
        &AddInstructorRequest { worker_id },
    )
    .await
}

/// # Errors
/// Returns `AppError` if an id is blank or the request fails.
#[instrument(skip(api))]
pub async fn remove_instructor(
    api: &ApiClient,
    course_id: &str,
    worker_id: &str,
) -> Result<(), AppError> {
    let course_id = require_id("Course", course_id)?;
    let worker_id = require_id("Worker", worker_id)?;
    api.delete(&format!("/courses/{course_id}/instructors/{worker_id}"))
        .await
}

/// # Errors
/// Returns `AppError` if the id is blank or the request fails.
pub async fn list_course_enrollments(
    api: &ApiClient,
    course_id: &str,
) -> Result<Vec<Value>, AppError> {
    let course_id = require_id("Course", course_id)?;
    api.get_json(&format!("/courses/{course_id}/enrollments")).await
}

/// Attendance sheet of a course, optionally for a single `date` (YYYY-MM-DD).
///
/// # Errors
/// Returns `AppError` if the id is blank or the request fails.
pub async fn list_course_attendances(
    api: &ApiClient,
    course_id: &str,
    date: Option<&str>,
) -> Result<Vec<Value>, AppError> {
    let course_id = require_id("Course", course_id)?;
    api.get_json_with_query(
        &format!("/courses/{course_id}/attendances"),
        &DateFilter::new(date),
    )
    .await
}

/// # Errors
/// Returns `AppError` if the id is blank or the request fails.
pub async fn list_course_surveys(api: &ApiClient, course_id: &str) -> Result<Vec<Value>, AppError> {
    let course_id = require_id("Course", course_id)?;
    api.get_json(&format!("/courses/{course_id}/surveys")).await
}

/// # Errors
/// Returns `AppError` if an id is blank or the request fails.
#[instrument(skip(api))]
pub async fn add_course_survey(
    api: &ApiClient,
    course_id: &str,
    survey_id: &str,
) -> Result<(), AppError> {
    let course_id = require_id("Course", course_id)?;
    let survey_id = require_id("Survey", survey_id)?;
    api.post_json_empty(
        &format!("/courses/{course_id}/surveys"),
        &AddSurveyRequest { survey_id },
    )
    .await
}

/// # Errors
/// Returns `AppError` if an id is blank or the request fails.
#[instrument(skip(api))]
pub async fn remove_course_survey(
    api: &ApiClient,
    course_id: &str,
    survey_id: &str,
) -> Result<(), AppError> {
    let course_id = require_id("Course", course_id)?;
    let survey_id = require_id("Survey", survey_id)?;
    api.delete(&format!("/courses/{course_id}/surveys/{survey_id}"))
        .await
}
