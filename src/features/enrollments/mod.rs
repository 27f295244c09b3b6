//! Course enrollments. Admins manage any enrollment; workers enroll
//! themselves through `enroll` and list their own through `list_my_enrollments`.

pub mod client;
pub mod types;

pub use types::{CreateEnrollmentRequest, Enrollment, UpdateGradeRequest};
