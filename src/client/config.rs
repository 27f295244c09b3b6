//! Client configuration for the API endpoint, session file and request timeout.
//! Values are read from `COURSEDESK_*` environment variables and may be
//! overridden by the caller (the CLI applies its parsed arguments on top).
//! Configuration values are public; do not store secrets here.

use super::errors::AppError;
use std::{env, path::PathBuf, time::Duration};
use url::Url;

pub const ENV_API_URL: &str = "COURSEDESK_API_URL";
pub const ENV_SESSION_FILE: &str = "COURSEDESK_SESSION_FILE";
pub const ENV_TIMEOUT: &str = "COURSEDESK_TIMEOUT";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
/// Default request timeout applied to every HTTP call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub session_path: PathBuf,
    pub timeout: Duration,
}

impl AppConfig {
    /// Loads config from the environment, falling back to defaults for
    /// missing or blank values.
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self::default();
        apply_overrides(
            &mut config,
            Overrides {
                api_base_url: read_env(ENV_API_URL),
                session_path: read_env(ENV_SESSION_FILE),
                timeout_secs: read_env(ENV_TIMEOUT).and_then(|value| value.parse().ok()),
            },
        );
        config
    }

    /// Checks that the API base URL is an absolute http(s) URL.
    ///
    /// # Errors
    /// Returns `AppError::Config` when the URL cannot be parsed or uses another scheme.
    pub fn validate(&self) -> Result<(), AppError> {
        let url = Url::parse(self.api_base_url.trim())
            .map_err(|err| AppError::Config(format!("Invalid API URL: {err}")))?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AppError::Config(format!(
                "Unsupported API URL scheme: {scheme}"
            ))),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            session_path: default_session_path(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Optional values layered over a loaded config.
#[derive(Debug, Default)]
pub struct Overrides {
    pub api_base_url: Option<String>,
    pub session_path: Option<String>,
    pub timeout_secs: Option<u64>,
}

pub fn apply_overrides(config: &mut AppConfig, overrides: Overrides) {
    if let Some(value) = overrides.api_base_url.as_deref().and_then(normalize_value) {
        config.api_base_url = value;
    }
    if let Some(value) = overrides.session_path.as_deref().and_then(normalize_value) {
        config.session_path = PathBuf::from(value);
    }
    if let Some(secs) = overrides.timeout_secs.filter(|secs| *secs > 0) {
        config.timeout = Duration::from_secs(secs);
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().as_deref().and_then(normalize_value)
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn default_session_path() -> PathBuf {
    let base = env::var_os("HOME").map_or_else(|| PathBuf::from("."), PathBuf::from);
    base.join(".coursedesk").join("session.json")
}
