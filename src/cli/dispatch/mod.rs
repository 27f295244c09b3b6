//! Command-line argument dispatch.
//!
//! This module maps validated CLI matches to an action carrying the resolved
//! client configuration.

use crate::cli::actions::{
    auth::{self as auth_action, Command as AuthCommand},
    navigate,
    resources::{self as resources_action, CourseView, Query},
    Action,
};
use crate::cli::commands::{api, auth, resources};
use crate::{
    client::config::{apply_overrides, AppConfig},
    features::auth::types::{ChangePasswordRequest, LoginRequest, RegisterRequest, Role},
};
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if the subcommand is unknown or a required argument is missing.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let mut config = AppConfig::load();
    apply_overrides(&mut config, api::Options::parse(matches).into_overrides());
    config.validate().context("invalid --api-url")?;

    let (name, sub) = matches
        .subcommand()
        .ok_or_else(|| anyhow!("missing subcommand"))?;

    let action = match name {
        auth::CMD_LOGIN => auth_action_for(config, AuthCommand::Login(login_request(sub)?)),
        auth::CMD_SIGNUP => auth_action_for(
            config,
            AuthCommand::Signup(Box::new(register_request(sub)?)),
        ),
        auth::CMD_LOGOUT => auth_action_for(config, AuthCommand::Logout),
        auth::CMD_WHOAMI => auth_action_for(config, AuthCommand::WhoAmI),
        auth::CMD_CHANGE_PASSWORD => auth_action_for(
            config,
            AuthCommand::ChangePassword(ChangePasswordRequest {
                current_password: required(sub, auth::ARG_CURRENT_PASSWORD)?,
                new_password: required(sub, auth::ARG_NEW_PASSWORD)?,
            }),
        ),
        resources::CMD_OPEN => Action::Navigate(navigate::Args {
            config,
            path: required(sub, resources::ARG_PATH)?,
        }),
        other => Action::Resources(resources_action::Args {
            config,
            query: query(other, sub)?,
        }),
    };

    Ok(action)
}

fn auth_action_for(config: AppConfig, command: AuthCommand) -> Action {
    Action::Auth(auth_action::Args { config, command })
}

fn login_request(sub: &ArgMatches) -> Result<LoginRequest> {
    Ok(LoginRequest {
        email: required(sub, auth::ARG_EMAIL)?,
        password: required(sub, auth::ARG_PASSWORD)?,
    })
}

fn register_request(sub: &ArgMatches) -> Result<RegisterRequest> {
    Ok(RegisterRequest {
        email: required(sub, auth::ARG_EMAIL)?,
        password: required(sub, auth::ARG_PASSWORD)?,
        name: required(sub, auth::ARG_NAME)?,
        father_lastname: optional(sub, auth::ARG_FATHER_LASTNAME).unwrap_or_default(),
        mother_lastname: optional(sub, auth::ARG_MOTHER_LASTNAME).unwrap_or_default(),
        department_id: required(sub, auth::ARG_DEPARTMENT_ID)?,
        rfc: optional(sub, auth::ARG_RFC).unwrap_or_default(),
        curp: optional(sub, auth::ARG_CURP).unwrap_or_default(),
        sex: optional(sub, auth::ARG_SEX).unwrap_or_default(),
        phone: optional(sub, auth::ARG_PHONE).unwrap_or_default(),
        role: sub.get_one::<Role>(auth::ARG_ROLE).cloned(),
    })
}

fn query(name: &str, sub: &ArgMatches) -> Result<Query> {
    let id = optional(sub, resources::ARG_ID);

    let query = match name {
        resources::CMD_COURSES => Query::Courses {
            id,
            view: optional(sub, resources::ARG_VIEW)
                .map(|view| {
                    CourseView::parse(&view).ok_or_else(|| anyhow!("unknown course view: {view}"))
                })
                .transpose()?,
            date: optional(sub, resources::ARG_DATE),
        },
        resources::CMD_DEPARTMENTS => Query::Departments { id },
        resources::CMD_PERIODS => Query::Periods { id },
        resources::CMD_WORKERS => Query::Workers {
            id,
            department: optional(sub, resources::ARG_DEPARTMENT),
        },
        resources::CMD_ENROLLMENTS => Query::Enrollments {
            id,
            mine: sub.get_flag(resources::ARG_MINE),
        },
        resources::CMD_ATTENDANCES => Query::Attendances {
            id,
            course: optional(sub, resources::ARG_COURSE),
            date: optional(sub, resources::ARG_DATE),
        },
        resources::CMD_SURVEYS => Query::Surveys {
            id,
            questions: sub.get_flag(resources::ARG_QUESTIONS),
        },
        other => return Err(anyhow!("unknown command: {other}")),
    };

    Ok(query)
}

fn optional(matches: &ArgMatches, id: &str) -> Option<String> {
    matches
        .get_one::<String>(id)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required(matches: &ArgMatches, id: &str) -> Result<String> {
    optional(matches, id).with_context(|| format!("missing required argument: --{id}"))
}
