use super::types::UpdateWorkerRequest;
use crate::{
    client::{ApiClient, AppError},
    features::{auth::types::Worker, require_id},
};
use tracing::instrument;

/// # Errors
/// Returns `AppError` if the request fails or the response is invalid.
pub async fn list_workers(api: &ApiClient) -> Result<Vec<Worker>, AppError> {
    api.get_items("/workers").await
}

/// # Errors
/// Returns `AppError` if the id is blank or the request fails.
pub async fn get_worker(api: &ApiClient, id: &str) -> Result<Worker, AppError> {
    let id = require_id("Worker", id)?;
    api.get_json(&format!("/workers/{id}")).await
}

/// Applies a partial profile update.
///
/// # Errors
/// Returns `AppError` if the id is blank, nothing is set, or the backend
/// rejects the change.
#[instrument(skip(api, data))]
pub async fn update_worker(
    api: &ApiClient,
    id: &str,
    data: &UpdateWorkerRequest,
) -> Result<Worker, AppError> {
    let id = require_id("Worker", id)?;
    if data.is_empty() {
        return Err(AppError::Config("Nothing to update.".to_string()));
    }
    api.put_json(&format!("/workers/{id}"), data).await
}

/// # Errors
/// Returns `AppError` if the id is blank or the request fails.
#[instrument(skip(api))]
pub async fn delete_worker(api: &ApiClient, id: &str) -> Result<(), AppError> {
    let id = require_id("Worker", id)?;
    api.delete(&format!("/workers/{id}")).await
}

/// Workers of one department.
///
/// # Errors
/// Returns `AppError` if the id is blank or the request fails.
pub async fn list_by_department(
    api: &ApiClient,
    department_id: &str,
) -> Result<Vec<Worker>, AppError> {
    let department_id = require_id("Department", department_id)?;
    api.get_items(&format!("/workers/department/{department_id}"))
        .await
}
