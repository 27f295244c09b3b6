//! Client wrappers for the auth endpoints. Each call is a single request whose
//! parsed body is returned unchanged; session bookkeeping lives in the store.

use crate::{
    client::{ApiClient, AppError},
    features::auth::types::{
        ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
        Worker,
    },
    storage::{SessionStorage, StorageError, TOKEN_KEY, USER_KEY},
};
use tracing::instrument;

/// Exchanges email and password for an access token.
/// Must never log the request body.
///
/// # Errors
/// Returns `AppError` if the request fails or the credentials are rejected.
#[instrument(skip_all, fields(email = %credentials.email))]
pub async fn login(api: &ApiClient, credentials: &LoginRequest) -> Result<LoginResponse, AppError> {
    api.post_json("/auth/login", credentials).await
}

/// Creates a worker account. Signup goes through the public workers endpoint.
///
/// # Errors
/// Returns `AppError` if the request fails or the backend rejects the data.
#[instrument(skip_all, fields(email = %data.email))]
pub async fn register(api: &ApiClient, data: &RegisterRequest) -> Result<Worker, AppError> {
    api.post_json("/workers", data).await
}

/// Fetches the profile of the worker owning the stored token.
///
/// # Errors
/// Returns `AppError` if the token is missing, expired or the request fails.
pub async fn current_user(api: &ApiClient) -> Result<Worker, AppError> {
    api.get_json("/auth/me").await
}

/// Changes the password of the current worker.
///
/// # Errors
/// Returns `AppError` if the current password is wrong or the request fails.
#[instrument(skip_all)]
pub async fn change_password(
    api: &ApiClient,
    data: &ChangePasswordRequest,
) -> Result<MessageResponse, AppError> {
    api.post_json("/auth/change-password", data).await
}

/// Removes the durable session record. There is no server-side logout.
///
/// # Errors
/// Returns `StorageError` if either key cannot be removed.
pub fn logout(storage: &dyn SessionStorage) -> Result<(), StorageError> {
    storage.remove(TOKEN_KEY)?;
    storage.remove(USER_KEY)
}
