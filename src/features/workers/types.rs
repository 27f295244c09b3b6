use crate::features::auth::types::Role;
use serde::{Deserialize, Serialize};

/// Partial worker update; unset fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateWorkerRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father_lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother_lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rfc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl UpdateWorkerRequest {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
