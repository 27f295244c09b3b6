use crate::features::auth::types::Role;
use clap::{builder::ValueParser, Arg, Command};
use regex::Regex;

pub const CMD_LOGIN: &str = "login";
pub const CMD_SIGNUP: &str = "signup";
pub const CMD_LOGOUT: &str = "logout";
pub const CMD_WHOAMI: &str = "whoami";
pub const CMD_CHANGE_PASSWORD: &str = "change-password";

pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_NAME: &str = "name";
pub const ARG_FATHER_LASTNAME: &str = "father-lastname";
pub const ARG_MOTHER_LASTNAME: &str = "mother-lastname";
pub const ARG_DEPARTMENT_ID: &str = "department-id";
pub const ARG_RFC: &str = "rfc";
pub const ARG_CURP: &str = "curp";
pub const ARG_SEX: &str = "sex";
pub const ARG_PHONE: &str = "phone";
pub const ARG_ROLE: &str = "role";
pub const ARG_CURRENT_PASSWORD: &str = "current-password";
pub const ARG_NEW_PASSWORD: &str = "new-password";

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

#[must_use]
pub fn validator_email() -> ValueParser {
    ValueParser::from(move |email: &str| -> std::result::Result<String, String> {
        let re = Regex::new(EMAIL_PATTERN).map_err(|err| err.to_string())?;
        let email = email.trim();
        if re.is_match(email) {
            Ok(email.to_string())
        } else {
            Err("invalid email address".to_string())
        }
    })
}

#[must_use]
pub fn validator_role() -> ValueParser {
    ValueParser::from(move |role: &str| -> std::result::Result<Role, String> {
        match role.trim().to_lowercase().as_str() {
            "0" | "teacher" => Ok(Role::Teacher),
            "1" | "admin" => Ok(Role::Admin),
            _ => Err("role must be teacher (0) or admin (1)".to_string()),
        }
    })
}

fn email_arg() -> Arg {
    Arg::new(ARG_EMAIL)
        .short('e')
        .long(ARG_EMAIL)
        .help("Account email")
        .env("COURSEDESK_EMAIL")
        .required(true)
        .value_parser(validator_email())
}

fn password_arg() -> Arg {
    Arg::new(ARG_PASSWORD)
        .short('p')
        .long(ARG_PASSWORD)
        .help("Account password")
        .env("COURSEDESK_PASSWORD")
        .hide_env_values(true)
        .required(true)
}

fn text_arg(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id).long(id).help(help)
}

#[must_use]
pub fn subcommands() -> Vec<Command> {
    vec![
        Command::new(CMD_LOGIN)
            .about("Sign in and store the session")
            .arg(email_arg())
            .arg(password_arg()),
        Command::new(CMD_SIGNUP)
            .about("Create a worker account and sign in")
            .arg(email_arg())
            .arg(password_arg())
            .arg(
                Arg::new(ARG_NAME)
                    .long(ARG_NAME)
                    .help("Given name")
                    .required(true),
            )
            .arg(text_arg(ARG_FATHER_LASTNAME, "Paternal last name"))
            .arg(text_arg(ARG_MOTHER_LASTNAME, "Maternal last name"))
            .arg(
                Arg::new(ARG_DEPARTMENT_ID)
                    .long(ARG_DEPARTMENT_ID)
                    .help("Department the worker belongs to")
                    .required(true),
            )
            .arg(text_arg(ARG_RFC, "RFC"))
            .arg(text_arg(ARG_CURP, "CURP"))
            .arg(text_arg(ARG_SEX, "Sex"))
            .arg(text_arg(ARG_PHONE, "Phone number"))
            .arg(
                Arg::new(ARG_ROLE)
                    .long(ARG_ROLE)
                    .help("Role: teacher (0) or admin (1); the backend default applies when omitted")
                    .value_parser(validator_role()),
            ),
        Command::new(CMD_LOGOUT).about("Forget the stored session"),
        Command::new(CMD_WHOAMI).about("Revalidate the stored session and print the profile"),
        Command::new(CMD_CHANGE_PASSWORD)
            .about("Change the password of the signed-in worker")
            .arg(
                Arg::new(ARG_CURRENT_PASSWORD)
                    .long(ARG_CURRENT_PASSWORD)
                    .help("Current password")
                    .env("COURSEDESK_CURRENT_PASSWORD")
                    .hide_env_values(true)
                    .required(true),
            )
            .arg(
                Arg::new(ARG_NEW_PASSWORD)
                    .long(ARG_NEW_PASSWORD)
                    .help("New password")
                    .env("COURSEDESK_NEW_PASSWORD")
                    .hide_env_values(true)
                    .required(true),
            ),
    ]
}
