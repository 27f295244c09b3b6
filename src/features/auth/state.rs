//! Session store: the single owned authority for who is signed in. The store
//! mirrors its token and profile into durable storage and publishes a snapshot
//! after every change so a UI can render loading and restoring states.
//!
//! Every mutating operation takes `&mut self`; nothing outside the store can
//! write its fields. Callers that share a store therefore run its operations
//! one at a time.

use crate::{
    client::{ApiClient, AppError},
    features::auth::{
        client,
        types::{LoginRequest, LoginResponse, RegisterRequest, Worker},
    },
    storage::{SessionStorage, TOKEN_KEY, USER_KEY},
};
use secrecy::{ExposeSecret, SecretString};
use std::{fmt, sync::Arc};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

pub const LOGIN_FAILED: &str = "Error signing in";
pub const REGISTER_FAILED: &str = "Error registering user";
pub const FETCH_USER_FAILED: &str = "Error fetching user";

/// Coarse session state for rendering decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Unauthenticated,
    /// A stored session was adopted and is being revalidated with the backend.
    Restoring,
    Authenticated,
}

/// Read-only view of the session published to observers.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub user: Option<Worker>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Unauthenticated,
            user: None,
            loading: false,
            error: None,
        }
    }
}

#[derive(Default)]
struct Session {
    token: Option<SecretString>,
    user: Option<Worker>,
    loading: bool,
    error: Option<String>,
}

pub struct SessionStore {
    api: ApiClient,
    session: Session,
    restoring: bool,
    snapshots: watch::Sender<SessionSnapshot>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("token", &self.session.token.as_ref().map(|_| "***"))
            .field("user", &self.session.user)
            .field("loading", &self.session.loading)
            .field("error", &self.session.error)
            .field("restoring", &self.restoring)
            .finish()
    }
}

impl SessionStore {
    /// Creates an empty (unauthenticated) store. Call [`SessionStore::initialize`]
    /// to adopt a session persisted by an earlier run.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        let (snapshots, _) = watch::channel(SessionSnapshot::default());
        Self {
            api,
            session: Session::default(),
            restoring: false,
            snapshots,
        }
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub fn storage(&self) -> &Arc<dyn SessionStorage> {
        self.api.storage()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.session.token.as_ref().map(|token| token.expose_secret())
    }

    #[must_use]
    pub fn user(&self) -> Option<&Worker> {
        self.session.user.as_ref()
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.session.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.session.error.as_deref()
    }

    /// True only when both a token and a profile are held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.token.is_some() && self.session.user.is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.session.user.as_ref().is_some_and(|user| user.role.is_admin())
    }

    /// Department heads share the admin role code.
    #[must_use]
    pub fn is_coordinator(&self) -> bool {
        self.is_admin()
    }

    #[must_use]
    pub fn is_teacher(&self) -> bool {
        self.session
            .user
            .as_ref()
            .is_some_and(|user| user.role.is_teacher())
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.restoring {
            SessionPhase::Restoring
        } else if self.is_authenticated() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Unauthenticated
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase(),
            user: self.session.user.clone(),
            loading: self.session.loading,
            error: self.session.error.clone(),
        }
    }

    /// Subscribes to snapshots published after every store change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.subscribe()
    }

    /// Signs in, persists the token and loads the profile.
    ///
    /// On failure `error` holds the server's message (or a generic one) and the
    /// error is returned. `loading` is cleared whatever the outcome.
    ///
    /// # Errors
    /// Returns `AppError` if the credentials are rejected, the profile cannot be
    /// fetched or the token cannot be persisted.
    #[instrument(skip_all, fields(email = %credentials.email))]
    pub async fn login(&mut self, credentials: &LoginRequest) -> Result<LoginResponse, AppError> {
        self.begin();
        let result = self.sign_in(credentials).await;
        if let Err(err) = &result {
            self.record_error(err, LOGIN_FAILED);
        }
        self.finish();
        result
    }

    /// Creates an account and signs in with the same credentials.
    ///
    /// # Errors
    /// Returns `AppError` if registration or the follow-up login fails.
    #[instrument(skip_all, fields(email = %data.email))]
    pub async fn register(&mut self, data: &RegisterRequest) -> Result<Worker, AppError> {
        self.begin();
        let registered = client::register(&self.api, data).await;
        let result = match registered {
            Ok(worker) => self.sign_in(&data.credentials()).await.map(|_| worker),
            Err(err) => Err(err),
        };
        if let Err(err) = &result {
            self.record_error(err, REGISTER_FAILED);
        }
        self.finish();
        result
    }

    /// Reloads the profile for the current token and persists it.
    ///
    /// # Errors
    /// Returns `AppError` if the token is rejected or the profile cannot be stored;
    /// the caller decides how to recover.
    pub async fn fetch_current_user(&mut self) -> Result<Worker, AppError> {
        let result = self.load_profile().await;
        if let Err(err) = &result {
            self.record_error(err, FETCH_USER_FAILED);
        }
        self.publish();
        result
    }

    /// Clears durable storage and the in-memory session. Never fails; storage
    /// errors are logged.
    pub fn logout(&mut self) {
        if let Err(err) = client::logout(self.storage().as_ref()) {
            warn!("failed to clear stored session: {err}");
        }
        self.session.token = None;
        self.session.user = None;
        self.session.error = None;
        self.restoring = false;
        self.publish();
    }

    /// Adopts a session persisted by an earlier run and revalidates it.
    ///
    /// The stored profile is trusted while the store is in
    /// [`SessionPhase::Restoring`]; if the backend rejects the token the session
    /// is fully logged out. Missing, partial or unreadable storage leaves the
    /// session empty.
    pub async fn initialize(&mut self) -> SessionPhase {
        let Some((token, user)) = self.read_stored_session() else {
            debug!("no stored session");
            return self.phase();
        };

        self.session.token = Some(SecretString::from(token));
        self.session.user = Some(user);
        self.restoring = true;
        self.publish();

        if let Err(err) = self.fetch_current_user().await {
            info!("stored session rejected: {err}");
            self.logout();
        }

        self.restoring = false;
        self.publish();
        self.phase()
    }

    pub fn clear_error(&mut self) {
        self.session.error = None;
        self.publish();
    }

    /// Places a token read from durable storage into memory ahead of a profile
    /// fetch.
    pub fn adopt_token(&mut self, token: String) {
        self.session.token = Some(SecretString::from(token));
        self.publish();
    }

    async fn sign_in(&mut self, credentials: &LoginRequest) -> Result<LoginResponse, AppError> {
        let response = client::login(&self.api, credentials).await?;

        self.session.token = Some(SecretString::from(response.access_token.clone()));
        let persisted = self.storage().set(TOKEN_KEY, &response.access_token);
        let loaded = match persisted {
            Ok(()) => self.fetch_current_user().await.map(|_| ()),
            Err(err) => Err(AppError::from(err)),
        };

        if let Err(err) = loaded {
            // Never keep a fresh token next to a missing or stale profile.
            self.discard_credentials();
            return Err(err);
        }

        Ok(response)
    }

    async fn load_profile(&mut self) -> Result<Worker, AppError> {
        let user = client::current_user(&self.api).await?;
        self.session.user = Some(user.clone());

        let serialized = serde_json::to_string(&user)
            .map_err(|err| AppError::Serialization(format!("Failed to encode profile: {err}")))?;
        self.storage().set(USER_KEY, &serialized)?;

        Ok(user)
    }

    fn read_stored_session(&self) -> Option<(String, Worker)> {
        let storage = self.storage();
        let read = |key: &str| match storage.get(key) {
            Ok(value) => value.filter(|value| !value.trim().is_empty()),
            Err(err) => {
                warn!("unable to read stored session: {err}");
                None
            }
        };

        let token = read(TOKEN_KEY)?;
        let raw_user = read(USER_KEY)?;

        match serde_json::from_str::<Worker>(&raw_user) {
            Ok(user) => Some((token, user)),
            Err(err) => {
                warn!("ignoring unreadable stored profile: {err}");
                None
            }
        }
    }

    fn discard_credentials(&mut self) {
        if let Err(err) = client::logout(self.storage().as_ref()) {
            warn!("failed to clear stored session: {err}");
        }
        self.session.token = None;
        self.session.user = None;
    }

    fn record_error(&mut self, err: &AppError, fallback: &str) {
        warn!("{fallback}: {err}");
        self.session.error = Some(err.detail().unwrap_or(fallback).to_string());
    }

    fn begin(&mut self) {
        self.session.loading = true;
        self.session.error = None;
        self.publish();
    }

    fn finish(&mut self) {
        self.session.loading = false;
        self.publish();
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.snapshot());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{
        client::AppConfig, features::test_support::can_bind_localhost, storage::MemoryStorage,
    };
    use serde_json::{json, Value};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn profile(role: Value) -> Value {
        json!({
            "id": "w1",
            "email": "a@x.com",
            "name": "Ana",
            "father_lastname": "López",
            "mother_lastname": "Ruiz",
            "role": role,
            "department_id": "d1",
            "rfc": "",
            "curp": "",
            "sex": "F",
            "phone": ""
        })
    }

    fn store(server: &MockServer, storage: Arc<MemoryStorage>) -> SessionStore {
        let config = AppConfig {
            api_base_url: server.uri(),
            ..AppConfig::default()
        };
        SessionStore::new(ApiClient::new(&config, storage).unwrap())
    }

    fn credentials() -> LoginRequest {
        LoginRequest {
            email: "a@x.com".to_string(),
            password: "p".to_string(),
        }
    }

    async fn mount_login(server: &MockServer, token: &str) {
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": token,
                "token_type": "bearer",
                "expires_in": 3600,
                "worker_id": "w1",
                "email": "a@x.com",
                "role": 1,
                "department_id": "d1"
            })))
            .mount(server)
            .await;
    }

    #[test]
    fn new_store_is_unauthenticated() {
        let config = AppConfig::default();
        let api = ApiClient::new(&config, Arc::new(MemoryStorage::new())).unwrap();
        let store = SessionStore::new(api);

        assert!(!store.is_authenticated());
        assert!(!store.is_admin());
        assert!(!store.is_teacher());
        assert_eq!(store.phase(), SessionPhase::Unauthenticated);
        assert_eq!(store.snapshot(), SessionSnapshot::default());
    }

    #[test]
    fn adopted_token_alone_is_not_authenticated() {
        let config = AppConfig::default();
        let api = ApiClient::new(&config, Arc::new(MemoryStorage::new())).unwrap();
        let mut store = SessionStore::new(api);

        store.adopt_token("tok".to_string());
        assert_eq!(store.token(), Some("tok"));
        assert!(!store.is_authenticated());
        assert!(!format!("{store:?}").contains("tok\""));
    }

    #[tokio::test]
    async fn login_reflects_freshly_fetched_role() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        mount_login(&server, "tok").await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(header("Authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile(json!("1"))))
            .expect(1)
            .mount(&server)
            .await;

        let storage = Arc::new(MemoryStorage::new());
        let mut store = store(&server, storage.clone());
        let response = store.login(&credentials()).await.unwrap();

        assert_eq!(response.worker_id, "w1");
        assert!(store.is_authenticated());
        assert!(store.is_admin());
        assert!(store.is_coordinator());
        assert!(!store.is_teacher());
        assert!(!store.loading());
        assert_eq!(store.error(), None);
        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("tok"));
        let stored: Worker =
            serde_json::from_str(&storage.get(USER_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(Some(&stored), store.user());
    }

    #[tokio::test]
    async fn login_failure_surfaces_server_detail() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"detail": "Incorrect email or password"})),
            )
            .mount(&server)
            .await;

        let storage = Arc::new(MemoryStorage::new());
        let mut store = store(&server, storage.clone());
        let err = store.login(&credentials()).await.unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert_eq!(store.error(), Some("Incorrect email or password"));
        assert!(!store.loading());
        assert!(!store.is_authenticated());
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn login_failure_without_detail_uses_fallback() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let mut store = store(&server, Arc::new(MemoryStorage::new()));
        assert!(store.login(&credentials()).await.is_err());
        assert_eq!(store.error(), Some(LOGIN_FAILED));
        assert!(!store.loading());
    }

    #[tokio::test]
    async fn profile_failure_after_login_leaves_no_partial_session() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        mount_login(&server, "tok").await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let storage = Arc::new(MemoryStorage::new());
        let mut store = store(&server, storage.clone());
        assert!(store.login(&credentials()).await.is_err());

        assert_eq!(store.token(), None);
        assert_eq!(store.user(), None);
        assert_eq!(store.error(), Some(LOGIN_FAILED));
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(storage.get(USER_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn snapshots_track_loading_and_phase() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        mount_login(&server, "tok").await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile(json!(0))))
            .mount(&server)
            .await;

        let mut store = store(&server, Arc::new(MemoryStorage::new()));
        let receiver = store.subscribe();
        store.login(&credentials()).await.unwrap();

        let snapshot = receiver.borrow().clone();
        assert_eq!(snapshot.phase, SessionPhase::Authenticated);
        assert!(!snapshot.loading);
        assert_eq!(snapshot.user.map(|user| user.id), Some("w1".to_string()));

        store.logout();
        assert_eq!(*receiver.borrow(), SessionSnapshot::default());
    }

    #[tokio::test]
    async fn clear_error_only_resets_error() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "nope"})))
            .mount(&server)
            .await;

        let storage = Arc::new(MemoryStorage::with_entries([(TOKEN_KEY, "old")]));
        let mut store = store(&server, storage.clone());
        store.adopt_token("old".to_string());
        let _ = store.login(&credentials()).await;
        assert_eq!(store.error(), Some("nope"));

        store.clear_error();
        assert_eq!(store.error(), None);
        assert_eq!(store.token(), Some("old"));
        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("old"));
    }
}
