use serde::{Deserialize, Serialize};

/// One worker present at one course session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: String,
    pub worker_id: String,
    pub course_id: String,
    pub date: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAttendanceRequest {
    pub worker_id: String,
    pub course_id: String,
    pub date: String,
}

/// Marks several workers present for the same course and date.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkAttendanceRequest {
    pub course_id: String,
    pub date: String,
    pub worker_ids: Vec<String>,
}
