//! HTTP helpers for the JSON API with a consistent timeout and error policy.
//! Feature clients call these helpers instead of building requests themselves.
//! The bearer token is read from durable session storage on every request, so a
//! login or logout takes effect for all subsequent calls without rebuilding the
//! client. Callers must still avoid logging tokens or passwords.

use super::{config::AppConfig, errors::AppError};
use crate::{
    storage::{SessionStorage, TOKEN_KEY},
    APP_USER_AGENT,
};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, sync::Arc};
use tracing::{debug, info_span, warn, Instrument};

/// Maximum number of error body characters surfaced to the user.
const MAX_ERROR_CHARS: usize = 200;

/// Envelope returned by list endpoints.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_count: u64,
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    storage: Arc<dyn SessionStorage>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Builds a client for the configured API.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the base URL is invalid or the HTTP client
    /// cannot be constructed.
    pub fn new(config: &AppConfig, storage: Arc<dyn SessionStorage>) -> Result<Self, AppError> {
        config.validate()?;

        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim().trim_end_matches('/').to_string(),
            storage,
        })
    }

    /// Durable storage this client reads the bearer token from.
    #[must_use]
    pub fn storage(&self) -> &Arc<dyn SessionStorage> {
        &self.storage
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches JSON.
    ///
    /// # Errors
    /// Returns `AppError` on transport failure, non-success status or undecodable body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        handle_json_response(response).await
    }

    /// Fetches JSON with query parameters.
    ///
    /// # Errors
    /// Returns `AppError` on transport failure, non-success status or undecodable body.
    pub async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self
            .send(self.request(Method::GET, path).query(query))
            .await?;
        handle_json_response(response).await
    }

    /// Fetches a paginated list and returns only its items.
    ///
    /// # Errors
    /// Returns `AppError` on transport failure, non-success status or undecodable body.
    pub async fn get_items<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, AppError> {
        let page: Paginated<T> = self.get_json(path).await?;
        Ok(page.items)
    }

    /// Posts JSON and parses a JSON response.
    ///
    /// # Errors
    /// Returns `AppError` on transport failure, non-success status or undecodable body.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(Method::POST, path).json(body)).await?;
        handle_json_response(response).await
    }

    /// Posts JSON and ignores the response body.
    ///
    /// # Errors
    /// Returns `AppError` on transport failure or non-success status.
    pub async fn post_json_empty<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), AppError> {
        let response = self.send(self.request(Method::POST, path).json(body)).await?;
        handle_empty_response(response).await
    }

    /// Replaces a resource with a JSON body and parses the JSON response.
    ///
    /// # Errors
    /// Returns `AppError` on transport failure, non-success status or undecodable body.
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(Method::PUT, path).json(body)).await?;
        handle_json_response(response).await
    }

    /// Deletes a resource.
    ///
    /// # Errors
    /// Returns `AppError` on transport failure or non-success status.
    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        let response = self.send(self.request(Method::DELETE, path)).await?;
        handle_empty_response(response).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = build_url(&self.base_url, path);
        let builder = self.http.request(method, url);

        match self.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn bearer_token(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|token| !token.trim().is_empty()),
            Err(err) => {
                warn!("unable to read session token: {err}");
                None
            }
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, AppError> {
        let request = builder
            .build()
            .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))?;

        let span = info_span!(
            "api.request",
            http.method = %request.method(),
            url = %request.url().path()
        );

        let response = self
            .http
            .execute(request)
            .instrument(span)
            .await
            .map_err(map_request_error)?;

        debug!("response status: {}", response.status());

        Ok(response)
    }
}

/// Joins the base URL and the provided path with exactly one slash.
fn build_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        Err(http_error(response).await)
    }
}

async fn handle_empty_response(response: Response) -> Result<(), AppError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(http_error(response).await)
    }
}

async fn http_error(response: Response) -> AppError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    AppError::Http {
        status,
        detail: extract_detail(&body),
        message: sanitize_body(&body),
    }
}

/// Extracts the server's `detail` message. Validation failures carry a list of
/// objects with a `msg` field; those are joined.
fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let detail = match value.get("detail")? {
        Value::String(message) => message.trim().to_string(),
        Value::Array(entries) => entries
            .iter()
            .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
            .map(str::trim)
            .filter(|msg| !msg.is_empty())
            .collect::<Vec<_>>()
            .join("; "),
        _ => return None,
    };

    if detail.is_empty() {
        None
    } else {
        Some(detail.chars().take(MAX_ERROR_CHARS).collect())
    }
}

/// Trims and truncates error bodies for user-facing messages.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
