use super::types::{Attendance, BulkAttendanceRequest, CreateAttendanceRequest};
use crate::{
    client::{ApiClient, AppError},
    features::{courses::types::DateFilter, require_id},
};
use tracing::instrument;

/// # Errors
/// Returns `AppError` if the request fails or the response is invalid.
pub async fn list_attendances(api: &ApiClient) -> Result<Vec<Attendance>, AppError> {
    api.get_items("/attendances").await
}

/// # Errors
/// Returns `AppError` if the id is blank or the request fails.
pub async fn get_attendance(api: &ApiClient, id: &str) -> Result<Attendance, AppError> {
    let id = require_id("Attendance", id)?;
    api.get_json(&format!("/attendances/{id}")).await
}

/// # Errors
/// Returns `AppError` if the backend rejects the record.
#[instrument(skip(api))]
pub async fn create_attendance(
    api: &ApiClient,
    data: &CreateAttendanceRequest,
) -> Result<Attendance, AppError> {
    api.post_json("/attendances", data).await
}

/// Records attendance for every listed worker in one request.
///
/// # Errors
/// Returns `AppError` if no worker is listed or the backend rejects the batch.
#[instrument(skip_all, fields(course_id = %data.course_id, date = %data.date, workers = data.worker_ids.len()))]
pub async fn create_bulk_attendance(
    api: &ApiClient,
    data: &BulkAttendanceRequest,
) -> Result<Vec<Attendance>, AppError> {
    if data.worker_ids.is_empty() {
        return Err(AppError::Config(
            "At least one worker is required.".to_string(),
        ));
    }
    api.post_json("/attendances/bulk", data).await
}

/// # Errors
/// Returns `AppError` if the id is blank or the request fails.
#[instrument(skip(api))]
pub async fn delete_attendance(api: &ApiClient, id: &str) -> Result<(), AppError> {
    let id = require_id("Attendance", id)?;
    api.delete(&format!("/attendances/{id}")).await
}

/// Attendance of a course, optionally restricted to one `date`.
///
/// # Errors
/// Returns `AppError` if the id is blank or the request fails.
pub async fn list_by_course(
    api: &ApiClient,
    course_id: &str,
    date: Option<&str>,
) -> Result<Vec<Attendance>, AppError> {
    let course_id = require_id("Course", course_id)?;
    api.get_json_with_query(
        &format!("/attendances/course/{course_id}"),
        &DateFilter::new(date),
    )
    .await
}
