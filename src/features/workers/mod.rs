//! Worker administration. Profiles share the `Worker` type with auth.

pub mod client;
pub mod types;

pub use types::UpdateWorkerRequest;
