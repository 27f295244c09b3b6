use super::{print_json, session_store};
use crate::{
    client::{AppConfig, AppError},
    features::auth::{
        client,
        state::{LOGIN_FAILED, REGISTER_FAILED},
        types::{ChangePasswordRequest, LoginRequest, RegisterRequest},
        SessionPhase, SessionStore,
    },
};
use anyhow::{anyhow, Result};
use serde_json::{json, Value};
use tracing::debug;

#[derive(Debug)]
pub enum Command {
    Login(LoginRequest),
    Signup(Box<RegisterRequest>),
    Logout,
    WhoAmI,
    ChangePassword(ChangePasswordRequest),
}

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
    pub command: Command,
}

/// Execute an auth command against the stored session.
/// # Errors
/// Returns an error with the server's message when the backend rejects the request.
pub async fn execute(args: Args) -> Result<()> {
    let mut store = session_store(&args.config)?;
    let output = run(args.command, &mut store).await?;
    print_json(&output)
}

/// Runs `command` and returns what should be printed.
///
/// # Errors
/// Returns the message recorded by the store, or a generic one.
pub async fn run(command: Command, store: &mut SessionStore) -> Result<Value> {
    match command {
        Command::Login(credentials) => {
            if let Err(err) = store.login(&credentials).await {
                return Err(failure(store, &err, LOGIN_FAILED));
            }
            Ok(json!({ "user": store.user() }))
        }
        Command::Signup(data) => match store.register(&data).await {
            Ok(worker) => Ok(json!({ "user": worker })),
            Err(err) => Err(failure(store, &err, REGISTER_FAILED)),
        },
        Command::Logout => {
            store.logout();
            Ok(json!({ "message": "Signed out" }))
        }
        Command::WhoAmI => match (store.initialize().await, store.user()) {
            (SessionPhase::Authenticated, Some(user)) => Ok(json!({
                "name": user.full_name(),
                "role": user.role.to_string(),
                "admin": store.is_admin(),
                "user": user,
            })),
            // A rejected token has already been logged out by the store.
            _ => Err(anyhow!("Not signed in. Run `coursedesk login` first.")),
        },
        Command::ChangePassword(data) => {
            let response = client::change_password(store.api(), &data)
                .await
                .map_err(|err| anyhow!(err.detail().map_or_else(|| err.to_string(), str::to_string)))?;
            Ok(serde_json::to_value(response)?)
        }
    }
}

fn failure(store: &SessionStore, err: &AppError, fallback: &str) -> anyhow::Error {
    debug!("{fallback}: {err}");
    anyhow!(store.error().unwrap_or(fallback).to_string())
}
