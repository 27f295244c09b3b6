//! Auth feature module: request shaping for the auth endpoints, the session
//! store, and the navigation guard. This module handles bearer tokens and
//! passwords and must never log them.
//!
//! Flow Overview: Login posts credentials, persists the returned token, then
//! loads `/auth/me` and persists the profile. Signup creates the worker and
//! logs in with the same credentials. Startup adopts a persisted session and
//! revalidates it; the guard repeats that check on every protected navigation.

pub mod client;
pub mod guards;
pub mod state;
pub mod types;

pub use guards::{before_each, Navigation, LOGIN_PATH, NON_ADMIN_PATH};
pub use state::{SessionPhase, SessionSnapshot, SessionStore};
pub use types::{LoginRequest, LoginResponse, RegisterRequest, Role, Worker};
