//! Academic periods that group courses.

pub mod client;
pub mod types;

pub use types::{Period, PeriodRequest};
