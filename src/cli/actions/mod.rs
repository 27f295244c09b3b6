pub mod auth;
pub mod navigate;
pub mod resources;

// Internal "interpreter" for `Action`.
// We keep the match in a separate module so `mod.rs` stays small as more actions are added.
mod run;

use crate::{
    client::{ApiClient, AppConfig},
    features::auth::SessionStore,
    storage::FileStorage,
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug)]
pub enum Action {
    Auth(auth::Args),
    Navigate(navigate::Args),
    Resources(resources::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> Result<()> {
        run::execute(self).await
    }
}

/// Builds a session store backed by the configured session file.
///
/// # Errors
/// Returns an error if the API URL is invalid or the HTTP client cannot be built.
pub fn session_store(config: &AppConfig) -> Result<SessionStore> {
    debug!("session file: {}", config.session_path.display());
    let storage = Arc::new(FileStorage::new(config.session_path.clone()));
    let api = ApiClient::new(config, storage).context("failed to configure API client")?;
    Ok(SessionStore::new(api))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to encode output")?;
    println!("{json}");
    Ok(())
}
