use super::types::{CreateEnrollmentRequest, EnrollRequest, Enrollment, UpdateGradeRequest};
use crate::{
    client::{ApiClient, AppError},
    features::require_id,
};
use tracing::instrument;

/// Lists all enrollments.
///
/// # Errors
/// Returns `AppError` if the request fails or the response is invalid.
pub async fn list_enrollments(api: &ApiClient) -> Result<Vec<Enrollment>, AppError> {
    api.get_items("/enrollments").await
}

/// # Errors
/// Returns `AppError` if the id is blank or the request fails.
pub async fn get_enrollment(api: &ApiClient, id: &str) -> Result<Enrollment, AppError> {
    let id = require_id("Enrollment", id)?;
    api.get_json(&format!("/enrollments/{id}")).await
}

/// Enrolls any worker in any course.
///
/// # Errors
/// Returns `AppError` if the backend rejects the enrollment.
#[instrument(skip(api))]
pub async fn create_enrollment(
    api: &ApiClient,
    data: &CreateEnrollmentRequest,
) -> Result<Enrollment, AppError> {
    api.post_json("/enrollments", data).await
}

/// Records the final grade of an enrollment.
///
/// # Errors
/// Returns `AppError` if the id is blank or the backend rejects the grade.
#[instrument(skip(api))]
pub async fn update_grade(
    api: &ApiClient,
    id: &str,
    data: UpdateGradeRequest,
) -> Result<Enrollment, AppError> {
    let id = require_id("Enrollment", id)?;
    api.put_json(&format!("/enrollments/{id}"), &data).await
}

/// # Errors
/// Returns `AppError` if the id is blank or the request fails.
#[instrument(skip(api))]
pub async fn delete_enrollment(api: &ApiClient, id: &str) -> Result<(), AppError> {
    let id = require_id("Enrollment", id)?;
    api.delete(&format!("/enrollments/{id}")).await
}

/// Enrollments of the signed-in worker. Not paginated.
///
/// # Errors
/// Returns `AppError` if the request fails or the response is invalid.
pub async fn list_my_enrollments(api: &ApiClient) -> Result<Vec<Enrollment>, AppError> {
    api.get_json("/enrollments/me").await
}

/// Enrolls the signed-in worker in a course.
///
/// # Errors
/// Returns `AppError` if the id is blank or the backend refuses the enrollment.
#[instrument(skip(api))]
pub async fn enroll(api: &ApiClient, course_id: &str) -> Result<Enrollment, AppError> {
    let course_id = require_id("Course", course_id)?;
    api.post_json("/enrollments/enroll", &EnrollRequest { course_id })
        .await
}

/// Drops an enrollment of the signed-in worker.
///
/// # Errors
/// Returns `AppError` if the id is blank or the request fails.
pub async fn unenroll(api: &ApiClient, enrollment_id: &str) -> Result<(), AppError> {
    delete_enrollment(api, enrollment_id).await
}
