use crate::storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http {
        status: u16,
        message: String,
        /// Human-readable `detail` extracted from the response body, if any.
        detail: Option<String>,
    },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AppError {
    /// Server-supplied message suitable for showing to the user.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            AppError::Http { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for 401/403 responses, i.e. a missing, expired or rejected token.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn detail_only_for_http_errors() {
        let err = AppError::Http {
            status: 400,
            message: "{\"detail\":\"Incorrect email or password\"}".to_string(),
            detail: Some("Incorrect email or password".to_string()),
        };
        assert_eq!(err.detail(), Some("Incorrect email or password"));
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_unauthorized());

        let err = AppError::Network("connection refused".to_string());
        assert_eq!(err.detail(), None);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn unauthorized_statuses() {
        for status in [401, 403] {
            let err = AppError::Http {
                status,
                message: "Request failed.".to_string(),
                detail: None,
            };
            assert!(err.is_unauthorized());
        }
    }

    #[test]
    fn display_includes_status() {
        let err = AppError::Http {
            status: 404,
            message: "Not Found".to_string(),
            detail: None,
        };
        assert_eq!(err.to_string(), "Request failed (404): Not Found");
    }
}
