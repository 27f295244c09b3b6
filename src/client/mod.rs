//! Shared client plumbing: configuration, the HTTP transport and the error type.
//!
//! ## Authentication
//!
//! 1. **Login:** `POST /auth/login` returns an `access_token`.
//! 2. **Persist:** the token is written to session storage under `token`; the
//!    profile from `GET /auth/me` is written under `user`.
//! 3. **Usage:** every request built by [`ApiClient`] reads `token` from storage
//!    and sends it as `Authorization: Bearer`.
//! 4. **Logout:** both keys are removed; there is no server-side logout call.

pub mod api;
pub mod config;
pub mod errors;

pub use api::{ApiClient, Paginated};
pub use config::AppConfig;
pub use errors::AppError;
