#![allow(clippy::unwrap_used)]

mod common;

use common::{can_bind_localhost, mount_login, mount_me, mount_me_rejected, persisted, store_with};
use coursedesk::{
    features::auth::{
        state::{FETCH_USER_FAILED, REGISTER_FAILED},
        LoginRequest, RegisterRequest, Role, SessionPhase, SessionStore,
    },
    storage::{FileStorage, MemoryStorage, SessionStorage, TOKEN_KEY, USER_KEY},
};
use serde_json::json;
use std::{sync::Arc, time::Duration};
use tokio::task::JoinHandle;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials() -> LoginRequest {
    LoginRequest {
        email: "ana@itsa.edu.mx".to_string(),
        password: "secret".to_string(),
    }
}

fn signup() -> RegisterRequest {
    RegisterRequest {
        email: "ana@itsa.edu.mx".to_string(),
        password: "secret".to_string(),
        name: "Ana".to_string(),
        father_lastname: "López".to_string(),
        mother_lastname: "Ruiz".to_string(),
        department_id: "d1".to_string(),
        rfc: String::new(),
        curp: String::new(),
        sex: "F".to_string(),
        phone: String::new(),
        role: None,
    }
}

/// Collects the distinct phases published by `store` until it is dropped.
fn record_phases(store: &SessionStore) -> JoinHandle<Vec<SessionPhase>> {
    let mut receiver = store.subscribe();
    tokio::spawn(async move {
        let mut seen: Vec<SessionPhase> = Vec::new();
        while receiver.changed().await.is_ok() {
            let phase = receiver.borrow_and_update().phase;
            if seen.last() != Some(&phase) {
                seen.push(phase);
            }
        }
        seen
    })
}

async fn mount_slow_me(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(response.set_delay(Duration::from_millis(200)))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn initialize_adopts_valid_stored_session() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    mount_me(&server, "stored", json!("1"), 1).await;

    let storage = persisted("stored", json!(0));
    let mut store = store_with(&server, storage.clone());
    let snapshots = store.subscribe();

    assert_eq!(store.initialize().await, SessionPhase::Authenticated);
    assert_eq!(store.token(), Some("stored"));
    // The revalidated profile replaces the stored one.
    assert!(store.is_admin());
    assert!(!store.loading());

    let stored_user: serde_json::Value =
        serde_json::from_str(&storage.get(USER_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(stored_user["role"], json!(1));
    assert_eq!(snapshots.borrow().phase, SessionPhase::Authenticated);
}

#[tokio::test]
async fn initialize_reports_restoring_until_profile_is_confirmed() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    mount_slow_me(
        &server,
        ResponseTemplate::new(200).set_body_json(common::profile(json!(0))),
    )
    .await;

    let mut store = store_with(&server, persisted("stored", json!(0)));
    let phases = record_phases(&store);

    assert_eq!(store.initialize().await, SessionPhase::Authenticated);
    drop(store);

    assert_eq!(
        phases.await.unwrap(),
        vec![SessionPhase::Restoring, SessionPhase::Authenticated]
    );
}

#[tokio::test]
async fn initialize_reports_restoring_before_rejected_session_is_dropped() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    mount_slow_me(
        &server,
        ResponseTemplate::new(401).set_body_json(json!({"detail": "Could not validate credentials"})),
    )
    .await;

    let mut store = store_with(&server, persisted("expired", json!(1)));
    let phases = record_phases(&store);

    assert_eq!(store.initialize().await, SessionPhase::Unauthenticated);
    // Logging out the rejected session also clears the error it recorded.
    assert_eq!(store.error(), None);
    assert!(!store.loading());
    drop(store);

    assert_eq!(
        phases.await.unwrap(),
        vec![SessionPhase::Restoring, SessionPhase::Unauthenticated]
    );
}

#[tokio::test]
async fn initialize_logs_out_when_token_is_rejected() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    mount_me_rejected(&server).await;

    let storage = persisted("expired", json!(1));
    let mut store = store_with(&server, storage.clone());

    assert_eq!(store.initialize().await, SessionPhase::Unauthenticated);
    assert_eq!(store.token(), None);
    assert!(store.user().is_none());
    assert!(!store.is_authenticated());
    assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(storage.get(USER_KEY).unwrap(), None);
}

#[tokio::test]
async fn initialize_ignores_partial_storage() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    let storage = Arc::new(MemoryStorage::with_entries([(TOKEN_KEY, "orphan")]));
    let mut store = store_with(&server, storage);

    assert_eq!(store.initialize().await, SessionPhase::Unauthenticated);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn login_persists_session_across_stores() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    mount_login(&server, "fresh", json!(0)).await;
    mount_me(&server, "fresh", json!(0), 2).await;

    let dir = std::env::temp_dir().join(format!("coursedesk-it-{}", std::process::id()));
    let file = dir.join("session.json");
    let _ = std::fs::remove_file(&file);

    let mut first = store_with(&server, Arc::new(FileStorage::new(&file)));
    first.login(&credentials()).await.unwrap();
    assert!(first.is_teacher());

    let mut second = store_with(&server, Arc::new(FileStorage::new(&file)));
    assert_eq!(second.initialize().await, SessionPhase::Authenticated);
    assert_eq!(second.user().map(|user| user.full_name()), Some("Ana López Ruiz".to_string()));

    second.logout();
    assert!(!file.exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn login_failure_keeps_session_empty_and_surfaces_detail() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Incorrect email or password"})),
        )
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryStorage::new());
    let mut store = store_with(&server, storage.clone());

    assert!(store.login(&credentials()).await.is_err());
    assert_eq!(store.error(), Some("Incorrect email or password"));
    assert!(!store.loading());
    assert!(!store.is_authenticated());
    assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn register_creates_account_then_signs_in_once() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/workers"))
        .respond_with(ResponseTemplate::new(201).set_body_json(common::profile(json!(0))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "ana@itsa.edu.mx", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "new",
            "token_type": "bearer",
            "expires_in": 3600,
            "worker_id": "w1",
            "email": "ana@itsa.edu.mx",
            "role": 0,
            "department_id": "d1"
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_me(&server, "new", json!(0), 1).await;

    let mut store = store_with(&server, Arc::new(MemoryStorage::new()));
    let worker = store.register(&signup()).await.unwrap();

    assert_eq!(worker.role, Role::Teacher);
    assert!(store.is_authenticated());
    assert!(!store.loading());
    assert_eq!(store.error(), None);
}

#[tokio::test]
async fn register_rejection_uses_validation_messages() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/workers"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [
                {"loc": ["body", "email"], "msg": "value is not a valid email address", "type": "value_error"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let mut store = store_with(&server, Arc::new(MemoryStorage::new()));
    assert!(store.register(&signup()).await.is_err());
    assert_eq!(store.error(), Some("value is not a valid email address"));
    assert!(!store.loading());
}

#[tokio::test]
async fn logout_clears_memory_and_storage() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    mount_login(&server, "tok", json!(1)).await;
    mount_me(&server, "tok", json!(1), 1).await;

    let storage = Arc::new(MemoryStorage::new());
    let mut store = store_with(&server, storage.clone());
    store.login(&credentials()).await.unwrap();
    assert!(store.is_admin());

    store.logout();

    assert_eq!(store.token(), None);
    assert!(store.user().is_none());
    assert!(!store.is_authenticated());
    assert!(!store.is_admin());
    assert_eq!(store.phase(), SessionPhase::Unauthenticated);
    assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(storage.get(USER_KEY).unwrap(), None);
}

#[tokio::test]
async fn register_failure_without_detail_uses_fallback() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/workers"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&server)
        .await;

    let mut store = store_with(&server, Arc::new(MemoryStorage::new()));
    assert!(store.register(&signup()).await.is_err());
    assert_eq!(store.error(), Some(REGISTER_FAILED));
    assert!(!store.loading());
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn register_then_failed_login_persists_nothing() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/workers"))
        .respond_with(ResponseTemplate::new(201).set_body_json(common::profile(json!(0))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryStorage::new());
    let mut store = store_with(&server, storage.clone());

    assert!(store.register(&signup()).await.is_err());
    assert_eq!(store.error(), Some(REGISTER_FAILED));
    assert!(!store.loading());
    assert_eq!(store.token(), None);
    assert!(store.user().is_none());
    assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(storage.get(USER_KEY).unwrap(), None);
}

#[tokio::test]
async fn fetch_current_user_failure_records_fallback() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryStorage::with_entries([(TOKEN_KEY, "tok")]));
    let mut store = store_with(&server, storage.clone());
    store.adopt_token("tok".to_string());

    let err = store.fetch_current_user().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(store.error(), Some(FETCH_USER_FAILED));
    assert!(store.user().is_none());
    // The caller decides whether to drop the token.
    assert_eq!(store.token(), Some("tok"));
    assert_eq!(storage.get(USER_KEY).unwrap(), None);
}

#[tokio::test]
async fn logout_clears_a_recorded_error() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Incorrect email or password"})),
        )
        .mount(&server)
        .await;

    let mut store = store_with(&server, Arc::new(MemoryStorage::new()));
    assert!(store.login(&credentials()).await.is_err());
    assert_eq!(store.error(), Some("Incorrect email or password"));

    store.logout();

    assert_eq!(store.error(), None);
    assert!(!store.loading());
    assert_eq!(store.phase(), SessionPhase::Unauthenticated);
}
