use serde::{Deserialize, Serialize};
use std::fmt;

/// Course kind code: `0` diploma program, `1` workshop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum CourseKind {
    Diploma,
    Workshop,
    Unknown(u8),
}

/// Delivery mode code: `0` virtual, `1` on site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum CourseMode {
    Virtual,
    OnSite,
    Unknown(u8),
}

/// Profile code: `0` professional training, `1` teaching update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum CourseProfile {
    Training,
    TeachingUpdate,
    Unknown(u8),
}

macro_rules! coded_enum {
    ($name:ident, $zero:ident, $one:ident, $zero_label:literal, $one_label:literal) => {
        impl From<u8> for $name {
            fn from(code: u8) -> Self {
                match code {
                    0 => $name::$zero,
                    1 => $name::$one,
                    other => $name::Unknown(other),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> Self {
                match value {
                    $name::$zero => 0,
                    $name::$one => 1,
                    $name::Unknown(code) => code,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $name::$zero => f.write_str($zero_label),
                    $name::$one => f.write_str($one_label),
                    $name::Unknown(code) => write!(f, "unknown ({code})"),
                }
            }
        }
    };
}

coded_enum!(CourseKind, Diploma, Workshop, "diploma", "workshop");
coded_enum!(CourseMode, Virtual, OnSite, "virtual", "on site");
coded_enum!(CourseProfile, Training, TeachingUpdate, "training", "teaching update");

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub period_id: String,
    pub target: String,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(rename = "type")]
    pub kind: CourseKind,
    pub mode: CourseMode,
    pub profile: CourseProfile,
    pub goal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCourseRequest {
    pub period_id: String,
    pub target: String,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(rename = "type")]
    pub kind: CourseKind,
    pub mode: CourseMode,
    pub profile: CourseProfile,
    pub goal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Updates replace the whole course.
pub type UpdateCourseRequest = CreateCourseRequest;

#[derive(Debug, Serialize)]
pub(crate) struct AddInstructorRequest<'a> {
    pub worker_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddSurveyRequest<'a> {
    pub survey_id: &'a str,
}

/// Optional `date` filter for attendance listings.
#[derive(Debug, Default, Serialize)]
pub(crate) struct DateFilter<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<&'a str>,
}

impl<'a> DateFilter<'a> {
    pub(crate) fn new(date: Option<&'a str>) -> Self {
        Self {
            date: date.map(str::trim).filter(|date| !date.is_empty()),
        }
    }
}
