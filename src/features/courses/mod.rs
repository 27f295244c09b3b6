//! Courses and everything hanging off a course: instructors, enrollments,
//! attendance sheets and assigned surveys.

pub mod client;
pub mod types;

pub use types::{
    Course, CourseKind, CourseMode, CourseProfile, CreateCourseRequest, UpdateCourseRequest,
};
