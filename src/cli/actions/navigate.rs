use super::{print_json, session_store};
use crate::{
    client::AppConfig,
    features::auth::SessionStore,
    routes::{Router, RouterError},
};
use anyhow::Result;
use serde_json::{json, Value};

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
    pub path: String,
}

/// Open a route with the stored session and print where navigation settled.
/// # Errors
/// Returns an error if the path is unknown or redirects never settle.
pub async fn execute(args: Args) -> Result<()> {
    let mut store = session_store(&args.config)?;
    let mut router = Router::new();
    let output = run(&args.path, &mut router, &mut store).await?;
    print_json(&output)
}

/// Navigates and describes the outcome.
///
/// # Errors
/// Returns `RouterError` from the router.
pub async fn run(
    path: &str,
    router: &mut Router,
    store: &mut SessionStore,
) -> Result<Value, RouterError> {
    let route = router.push(path, store).await?;
    Ok(json!({
        "requested": path,
        "path": route.path,
        "name": route.name.as_str(),
        "user": store.user(),
    }))
}
