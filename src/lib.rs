//! # Coursedesk (Course Management Client)
//!
//! `coursedesk` talks to the course management API used by teachers and
//! department heads: courses, periods, departments, enrollments, attendance and
//! satisfaction surveys.
//!
//! ## Session Model
//!
//! A session is a bearer token plus the profile of the worker it belongs to.
//! Both are persisted in a session file so a later run starts authenticated.
//! The token alone never counts as authenticated; the profile is revalidated
//! against `/auth/me` on startup and whenever a protected route is opened
//! without one loaded.
//!
//! ## Roles
//!
//! Role `0` is a teacher and role `1` an administrator. The backend sends the
//! code as a number or a string; both are normalized when parsed. Admin-only
//! routes send everyone else to `/worker`.
//!
//! ## Authorization
//!
//! Role checks here only decide navigation. The backend remains the authority
//! for every request.

pub mod cli;
pub mod client;
pub mod features;
pub mod routes;
pub mod storage;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(GIT_COMMIT_HASH.len() >= 7);
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with("coursedesk/"));
        assert!(APP_USER_AGENT.ends_with(env!("CARGO_PKG_VERSION")));
    }
}
