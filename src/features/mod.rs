//! Domain features and their API clients. Each resource module keeps endpoint
//! paths in one place and assumes the backend enforces authorization.

pub mod attendances;
pub mod auth;
pub mod courses;
pub mod departments;
pub mod enrollments;
pub mod periods;
pub mod surveys;
pub mod workers;

use crate::client::AppError;

/// Trims an identifier used in a path and rejects blanks before any request
/// is sent.
fn require_id<'a>(label: &str, id: &'a str) -> Result<&'a str, AppError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(AppError::Config(format!("{label} id is required.")))
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::{
        client::{ApiClient, AppConfig},
        storage::{MemoryStorage, TOKEN_KEY},
    };
    use std::{net::TcpListener, sync::Arc};
    use wiremock::MockServer;

    pub fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    /// Client pointed at `server` with a stored bearer token `tok`.
    #[allow(clippy::unwrap_used)]
    pub fn api(server: &MockServer) -> ApiClient {
        let config = AppConfig {
            api_base_url: server.uri(),
            ..AppConfig::default()
        };
        let storage = MemoryStorage::with_entries([(TOKEN_KEY, "tok")]);
        ApiClient::new(&config, Arc::new(storage)).unwrap()
    }
}
