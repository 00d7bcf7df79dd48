mod common;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::http::StatusCode;
use paperdesk::session::HttpSessionOracle;

use common::{FailingOracle, StalledOracle, ALICE_TOKEN, KIM_TOKEN};

#[tokio::test]
async fn signed_out_visitor_sees_login_form() -> Result<()> {
    let res = common::get(common::test_app(), "/login", None).await?;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.location().is_none());
    assert_eq!(res.body["data"]["page"], "login");
    assert_eq!(res.body["data"]["render"], "primary");
    assert_eq!(res.body["data"]["providers"], serde_json::json!(["email", "google", "kakao", "naver"]));
    Ok(())
}

#[tokio::test]
async fn signed_in_user_is_sent_to_their_workspace() -> Result<()> {
    let res = common::get(common::test_app(), "/login", Some(ALICE_TOKEN)).await?;

    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(res.location(), Some("/t/alice/dashboard"));
    Ok(())
}

#[tokio::test]
async fn signup_redirects_with_sanitized_slug() -> Result<()> {
    let res = common::get(common::test_app(), "/signup", Some(KIM_TOKEN)).await?;

    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(res.location(), Some("/t/kim-jisoo/dashboard"));
    Ok(())
}

#[tokio::test]
async fn unknown_token_renders_login() -> Result<()> {
    let res = common::get(common::test_app(), "/login", Some("stale-token")).await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["page"], "login");
    Ok(())
}

#[tokio::test]
async fn session_cookie_is_honoured() -> Result<()> {
    let request = axum::http::Request::builder()
        .uri("/login")
        .header(axum::http::header::COOKIE, format!("paperdesk-session={}", ALICE_TOKEN))
        .body(axum::body::Body::empty())?;
    let res = common::send(common::test_app(), request).await?;

    assert_eq!(res.location(), Some("/t/alice/dashboard"));
    Ok(())
}

#[tokio::test]
async fn failing_provider_falls_back_to_login_form() -> Result<()> {
    let app = common::app_with_oracle(Arc::new(FailingOracle));
    let res = common::get(app, "/login", Some(ALICE_TOKEN)).await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["render"], "primary");
    Ok(())
}

#[tokio::test]
async fn stalled_provider_does_not_hang_the_page() -> Result<()> {
    let app = common::app_with_oracle(Arc::new(StalledOracle));
    let res = tokio::time::timeout(
        std::time::Duration::from_secs(5),
        common::get(app, "/login", Some(ALICE_TOKEN)),
    )
    .await??;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["page"], "login");
    Ok(())
}

/// Hosted provider answering OAuth users with both `name` and `full_name`
async fn spawn_oauth_provider() -> Result<String> {
    use axum::{routing::get, Json, Router};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let router = Router::new().route(
        "/auth/v1/user",
        get(|| async {
            Json(serde_json::json!({
                "id": "g-42",
                "email": "alice@x.com",
                "user_metadata": { "name": "Alice", "full_name": "Alice Kim" },
                "app_metadata": { "provider": "google" }
            }))
        }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(format!("http://{}", addr))
}

#[tokio::test]
async fn oauth_user_from_hosted_provider_is_redirected() -> Result<()> {
    let base = spawn_oauth_provider().await?;
    let oracle = HttpSessionOracle::new(base, None, Duration::from_secs(5))?;
    let app = common::app_with_oracle_timeout(Arc::new(oracle), Duration::from_secs(5));

    let res = common::get(app, "/login", Some("oauth-token")).await?;

    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(res.location(), Some("/t/alice/dashboard"));
    Ok(())
}
