pub mod client;
pub mod types;

pub use types::{Attendance, BulkAttendanceRequest, CreateAttendanceRequest};
