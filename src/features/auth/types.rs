//! Request and response types for auth-related API calls. Requests carry
//! passwords and responses carry bearer tokens, so their `Debug` output is
//! redacted and they must never be logged verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Worker role. The backend sends the code either as a number or as a string,
/// so both are accepted here and nowhere else.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRole", into = "RawRole")]
pub enum Role {
    /// Code `0`: teacher.
    Teacher,
    /// Code `1`: administrator / department head.
    Admin,
    /// Any other code, kept verbatim.
    Other(String),
}

impl Role {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    #[must_use]
    pub fn is_teacher(&self) -> bool {
        matches!(self, Role::Teacher)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Teacher => f.write_str("teacher"),
            Role::Admin => f.write_str("admin"),
            Role::Other(raw) => write!(f, "role {raw}"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum RawRole {
    Code(i64),
    Text(String),
}

impl From<RawRole> for Role {
    fn from(raw: RawRole) -> Self {
        let code = match raw {
            RawRole::Code(code) => code.to_string(),
            RawRole::Text(text) => text.trim().to_string(),
        };
        match code.as_str() {
            "0" => Role::Teacher,
            "1" => Role::Admin,
            _ => Role::Other(code),
        }
    }
}

impl From<Role> for RawRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Teacher => RawRole::Code(0),
            Role::Admin => RawRole::Code(1),
            Role::Other(raw) => raw.parse().map_or(RawRole::Text(raw), RawRole::Code),
        }
    }
}

/// Profile of a worker as returned by `/auth/me` and `/workers`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub father_lastname: String,
    #[serde(default)]
    pub mother_lastname: String,
    pub role: Role,
    #[serde(default)]
    pub department_id: String,
    #[serde(default)]
    pub rfc: String,
    #[serde(default)]
    pub curp: String,
    #[serde(default)]
    pub sex: String,
    #[serde(default)]
    pub phone: String,
}

impl Worker {
    /// Name followed by both last names, skipping blanks.
    #[must_use]
    pub fn full_name(&self) -> String {
        [
            self.name.as_str(),
            self.father_lastname.as_str(),
            self.mother_lastname.as_str(),
        ]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
    pub worker_id: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub department_id: String,
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("access_token", &"***")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("worker_id", &self.worker_id)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("department_id", &self.department_id)
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub father_lastname: String,
    pub mother_lastname: String,
    pub department_id: String,
    pub rfc: String,
    pub curp: String,
    pub sex: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl RegisterRequest {
    /// Credentials used for the automatic login after signup.
    #[must_use]
    pub fn credentials(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .field("name", &self.name)
            .field("department_id", &self.department_id)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangePasswordRequest").finish_non_exhaustive()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}
