//! Helpers for handler tests: the full router over an in-memory state.

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use time::OffsetDateTime;
use tower::ServiceExt;

use crate::{
    app::build_app,
    auth::{password::hash_password, SessionUser},
    state::AppState,
    users::{
        repo::UserStore,
        repo_types::{NewUser, User},
    },
};

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let state = AppState::fake();
        let router = build_app(state.clone());
        Self { state, router }
    }

    /// Sends a request and returns the raw status, headers and body.
    pub async fn raw(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, HeaderMap, Bytes) {
        request(&self.router, method, uri, cookie, body).await
    }
}

async fn request(
    router: &Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Bytes) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, bytes)
}

/// Sends a request and decodes the body as JSON; an empty body is `Null`.
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let (status, _, bytes) = request(router, method, uri, cookie, body).await;
    if bytes.is_empty() {
        return (status, Value::Null);
    }
    let json = serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("{status}: body is not JSON ({e}): {bytes:?}"));
    (status, json)
}

pub async fn seed_user(state: &AppState, username: &str, password: &str, is_admin: bool) -> User {
    state
        .users
        .create(NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: hash_password(password).unwrap(),
            is_admin,
        })
        .await
        .unwrap()
}

/// `Cookie` header value carrying a fresh session for `user`.
pub fn cookie_for(state: &AppState, user: &User) -> String {
    let token = state
        .jwt
        .sign(&SessionUser::from(user), OffsetDateTime::now_utc())
        .unwrap();
    format!("{}={}", state.config.cookie_name, token)
}

pub fn assert_no_password(value: &Value) {
    match value {
        Value::Object(map) => {
            assert!(!map.contains_key("password"), "password leaked: {value}");
            map.values().for_each(assert_no_password);
        }
        Value::Array(items) => items.iter().for_each(assert_no_password),
        _ => {}
    }
}
