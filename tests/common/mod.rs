#![allow(dead_code, clippy::unwrap_used)]

use coursedesk::{
    client::{ApiClient, AppConfig},
    features::auth::SessionStore,
    storage::{MemoryStorage, SessionStorage, TOKEN_KEY, USER_KEY},
};
use serde_json::{json, Value};
use std::{net::TcpListener, sync::Arc};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

pub fn profile(role: Value) -> Value {
    json!({
        "id": "w1",
        "email": "ana@itsa.edu.mx",
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

pub fn store_with(server: &MockServer, storage: Arc<dyn SessionStorage>) -> SessionStore {
    let config = AppConfig {
        api_base_url: server.uri(),
        ..AppConfig::default()
    };
    SessionStore::new(ApiClient::new(&config, storage).unwrap())
}

/// Storage holding a previously persisted session.
pub fn persisted(token: &str, role: Value) -> Arc<MemoryStorage> {
    let user = profile(role).to_string();
    Arc::new(MemoryStorage::with_entries([
        (TOKEN_KEY, token),
        (USER_KEY, user.as_str()),
    ]))
}

pub async fn mount_me(server: &MockServer, token: &str, role: Value, times: u64) {
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("Authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile(role)))
        .expect(times)
        .mount(server)
        .await;
}

pub async fn mount_me_rejected(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Could not validate credentials"})),
        )
        .expect(1)
        .mount(server)
        .await;
}

pub async fn mount_login(server: &MockServer, token: &str, role: Value) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": token,
            "token_type": "bearer",
            "expires_in": 3600,
            "worker_id": "w1",
            "email": "ana@itsa.edu.mx",
            "role": role,
            "department_id": "d1"
        })))
        .expect(1)
        .mount(server)
        .await;
}
