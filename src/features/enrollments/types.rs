use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: String,
    pub worker_id: String,
    pub course_id: String,
    /// Absent until the course is graded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_grade: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEnrollmentRequest {
    pub worker_id: String,
    pub course_id: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateGradeRequest {
    pub final_grade: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct EnrollRequest<'a> {
    pub course_id: &'a str,
}
