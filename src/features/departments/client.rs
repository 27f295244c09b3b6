use super::types::{Department, DepartmentRequest};
use crate::{
    client::{ApiClient, AppError},
    features::require_id,
};
use tracing::instrument;

/// Lists departments.
///
/// # Errors
/// Returns `AppError` if the request fails or the response is invalid.
pub async fn list_departments(api: &ApiClient) -> Result<Vec<Department>, AppError> {
    api.get_items("/departments").await
}

/// # Errors
/// Returns `AppError` if the id is blank or the request fails.
pub async fn get_department(api: &ApiClient, id: &str) -> Result<Department, AppError> {
    let id = require_id("Department", id)?;
    api.get_json(&format!("/departments/{id}")).await
}

/// # Errors
/// Returns `AppError` if the name is blank or the backend rejects it.
#[instrument(skip_all, fields(name = %data.name))]
pub async fn create_department(
    api: &ApiClient,
    data: &DepartmentRequest,
) -> Result<Department, AppError> {
    if data.name.trim().is_empty() {
        return Err(AppError::Config("Department name is required.".to_string()));
    }
    api.post_json("/departments", data).await
}

/// # Errors
/// Returns `AppError` if the id is blank or the backend rejects the change.
#[instrument(skip(api, data))]
pub async fn update_department(
    api: &ApiClient,
    id: &str,
    data: &DepartmentRequest,
) -> Result<Department, AppError> {
    let id = require_id("Department", id)?;
    api.put_json(&format!("/departments/{id}"), data).await
}

/// # Errors
/// Returns `AppError` if the id is blank or the request fails.
#[instrument(skip(api))]
pub async fn delete_department(api: &ApiClient, id: &str) -> Result<(), AppError> {
    let id = require_id("Department", id)?;
    api.delete(&format!("/departments/{id}")).await
}
