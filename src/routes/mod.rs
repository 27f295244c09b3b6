//! Route table and in-process router. Every navigation runs the auth guard;
//! redirects are followed (and guarded) until a route is allowed.

use crate::features::auth::{before_each, Navigation, SessionStore};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Upper bound on consecutive redirects for a single navigation.
pub const MAX_REDIRECTS: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteName {
    Home,
    Admin,
    Worker,
    Login,
    SignUp,
}

impl RouteName {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RouteName::Home => "home",
            RouteName::Admin => "admin",
            RouteName::Worker => "worker",
            RouteName::Login => "login",
            RouteName::SignUp => "signup",
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static access requirements declared by a route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub requires_admin: bool,
}

impl RouteMeta {
    pub const PUBLIC: Self = Self {
        requires_auth: false,
        requires_admin: false,
    };
    pub const AUTH: Self = Self {
        requires_auth: true,
        requires_admin: false,
    };
    pub const ADMIN: Self = Self {
        requires_auth: true,
        requires_admin: true,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteRecord {
    pub path: &'static str,
    pub name: RouteName,
    pub meta: RouteMeta,
}

pub const ROUTES: [RouteRecord; 5] = [
    RouteRecord {
        path: "/",
        name: RouteName::Home,
        meta: RouteMeta::AUTH,
    },
    RouteRecord {
        path: "/admin",
        name: RouteName::Admin,
        meta: RouteMeta::ADMIN,
    },
    RouteRecord {
        path: "/worker",
        name: RouteName::Worker,
        meta: RouteMeta::AUTH,
    },
    RouteRecord {
        path: "/login",
        name: RouteName::Login,
        meta: RouteMeta::PUBLIC,
    },
    RouteRecord {
        path: "/signup",
        name: RouteName::SignUp,
        meta: RouteMeta::PUBLIC,
    },
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterError {
    #[error("no route matches {0}")]
    NotFound(String),
    #[error("too many redirects while navigating to {0}")]
    RedirectLoop(String),
}

#[derive(Debug)]
pub struct Router {
    routes: Vec<RouteRecord>,
    current: Option<RouteRecord>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self::with_routes(ROUTES.to_vec())
    }

    #[must_use]
    pub fn with_routes(routes: Vec<RouteRecord>) -> Self {
        Self {
            routes,
            current: None,
        }
    }

    #[must_use]
    pub fn routes(&self) -> &[RouteRecord] {
        &self.routes
    }

    /// Route reached by the last successful navigation.
    #[must_use]
    pub fn current(&self) -> Option<&RouteRecord> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&RouteRecord> {
        let path = normalize_path(path);
        self.routes.iter().find(|route| route.path == path)
    }

    #[must_use]
    pub fn by_name(&self, name: RouteName) -> Option<&RouteRecord> {
        self.routes.iter().find(|route| route.name == name)
    }

    /// Navigates to `path`, returning the route finally rendered.
    ///
    /// # Errors
    /// Returns `RouterError::NotFound` for unknown paths (including redirect
    /// targets) and `RouterError::RedirectLoop` when redirects do not settle.
    #[instrument(skip(self, store))]
    pub async fn push(
        &mut self,
        path: &str,
        store: &mut SessionStore,
    ) -> Result<RouteRecord, RouterError> {
        let requested = normalize_path(path);
        let mut target = requested.clone();

        for _ in 0..=MAX_REDIRECTS {
            let route = *self
                .resolve(&target)
                .ok_or_else(|| RouterError::NotFound(target.clone()))?;

            match before_each(route.meta, store).await {
                Navigation::Allow => {
                    info!("navigated to {} ({})", route.path, route.name);
                    self.current = Some(route);
                    return Ok(route);
                }
                Navigation::Redirect(to) => {
                    debug!("redirect {} -> {to}", route.path);
                    target = to.to_string();
                }
            }
        }

        Err(RouterError::RedirectLoop(requested))
    }
}

/// Drops query string, fragment and trailing slashes; an empty path is `/`.
fn normalize_path(path: &str) -> String {
    let path = path.trim();
    let path = path
        .split(|c| c == '?' || c == '#')
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');

    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
