#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use paperdesk::config::AppConfig;
use paperdesk::server::{app, AppState};
use paperdesk::session::{Provider, SessionError, SessionOracle, StaticSessionOracle, User};

pub const ALICE_TOKEN: &str = "alice-token";
pub const KIM_TOKEN: &str = "kim-token";

pub fn alice() -> User {
    User::new("u-alice", "Alice", "alice@x.com")
}

pub fn kim() -> User {
    User::new("u-kim", "Kim", "kim.jisoo@studio.kr").with_provider(Provider::Kakao)
}

/// Router backed by an in-memory oracle that knows alice and kim
pub fn test_app() -> Router {
    let oracle = StaticSessionOracle::new()
        .with_user(ALICE_TOKEN, alice())
        .with_user(KIM_TOKEN, kim());
    app_with_oracle(Arc::new(oracle))
}

pub fn app_with_oracle(oracle: Arc<dyn SessionOracle>) -> Router {
    app_with_oracle_timeout(oracle, Duration::from_millis(100))
}

pub fn app_with_oracle_timeout(oracle: Arc<dyn SessionOracle>, resolve_timeout: Duration) -> Router {
    let mut config = AppConfig::development();
    config.session.resolve_timeout_ms = resolve_timeout.as_millis() as u64;
    let state = AppState::new(oracle, config.session.clone(), config.navigation.clone());
    app(state, &config.security)
}

/// Oracle that never answers
pub struct StalledOracle;

#[async_trait]
impl SessionOracle for StalledOracle {
    async fn lookup(&self, _token: &str) -> Result<Option<User>, SessionError> {
        std::future::pending::<Result<Option<User>, SessionError>>().await
    }
}

/// Oracle whose provider is down
pub struct FailingOracle;

#[async_trait]
impl SessionOracle for FailingOracle {
    async fn lookup(&self, _token: &str) -> Result<Option<User>, SessionError> {
        Err(SessionError::UnexpectedStatus(500))
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
    }
}

pub async fn send(app: Router, request: Request<Body>) -> Result<TestResponse> {
    let response = app.oneshot(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok(TestResponse { status, headers, body })
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Result<TestResponse> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    send(app, builder.body(Body::empty())?).await
}

pub async fn delete(app: Router, uri: &str) -> Result<TestResponse> {
    let request = Request::builder().method(Method::DELETE).uri(uri).body(Body::empty())?;
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Result<TestResponse> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body)?))?;
    send(app, request).await
}
