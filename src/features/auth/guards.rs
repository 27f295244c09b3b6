use crate::{features::auth::state::SessionStore, routes::RouteMeta, storage::TOKEN_KEY};
use tracing::{debug, info, warn};

/// Where unauthenticated navigations are sent.
pub const LOGIN_PATH: &str = "/login";
/// Where authenticated non-admins land when they hit an admin route.
pub const NON_ADMIN_PATH: &str = "/worker";

/// Outcome of a guarded navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Allow,
    Redirect(&'static str),
}

/// Decides whether a navigation to a route with `meta` may proceed.
///
/// The token is read from durable storage rather than memory, so a session
/// cleared by another process is noticed here. A missing profile is loaded
/// before role checks; a rejected token logs the session out.
pub async fn before_each(meta: RouteMeta, store: &mut SessionStore) -> Navigation {
    if !meta.requires_auth {
        return Navigation::Allow;
    }

    let stored = match store.storage().get(TOKEN_KEY) {
        Ok(token) => token.filter(|token| !token.trim().is_empty()),
        Err(err) => {
            warn!("unable to read stored token: {err}");
            None
        }
    };

    let Some(token) = stored else {
        debug!("no stored token, redirecting to {LOGIN_PATH}");
        return Navigation::Redirect(LOGIN_PATH);
    };

    if store.user().is_none() {
        store.adopt_token(token);
        if let Err(err) = store.fetch_current_user().await {
            info!("token rejected during navigation: {err}");
            store.logout();
            return Navigation::Redirect(LOGIN_PATH);
        }
    }

    if meta.requires_admin && !store.is_admin() {
        debug!("admin route denied, redirecting to {NON_ADMIN_PATH}");
        return Navigation::Redirect(NON_ADMIN_PATH);
    }

    Navigation::Allow
}
