use super::types::{Period, PeriodRequest};
use crate::{
    client::{ApiClient, AppError},
    features::require_id,
};
use tracing::instrument;

/// # Errors
/// Returns `AppError` if the request fails or the response is invalid.
pub async fn list_periods(api: &ApiClient) -> Result<Vec<Period>, AppError> {
    api.get_items("/periods").await
}

/// # Errors
/// Returns `AppError` if the id is blank or the request fails.
pub async fn get_period(api: &ApiClient, id: &str) -> Result<Period, AppError> {
    let id = require_id("Period", id)?;
    api.get_json(&format!("/periods/{id}")).await
}

/// # Errors
/// Returns `AppError` if the backend rejects the period.
#[instrument(skip_all, fields(name = %data.name))]
pub async fn create_period(api: &ApiClient, data: &PeriodRequest) -> Result<Period, AppError> {
    api.post_json("/periods", data).await
}

/// # Errors
/// Returns `AppError` if the id is blank or the backend rejects the period.
#[instrument(skip(api, data))]
pub async fn update_period(
    api: &ApiClient,
    id: &str,
    data: &PeriodRequest,
) -> Result<Period, AppError> {
    let id = require_id("Period", id)?;
    api.put_json(&format!("/periods/{id}"), data).await
}

/// # Errors
/// Returns `AppError` if the id is blank or the request fails.
#[instrument(skip(api))]
pub async fn delete_period(api: &ApiClient, id: &str) -> Result<(), AppError> {
    let id = require_id("Period", id)?;
    api.delete(&format!("/periods/{id}")).await
}
