// handlers/session.rs - GET /api/session
//
// Thin proxy to the auth provider. Unlike page guards, provider failures are
// surfaced to the caller here.

use axum::extract::{Extension, State};
use serde::Serialize;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, SessionToken};
use crate::server::AppState;
use crate::session::{SessionError, User};

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: Option<User>,
}

pub async fn session_get(State(state): State<AppState>, Extension(token): Extension<SessionToken>) -> ApiResult<SessionResponse> {
    let Some(token) = token.as_deref() else {
        return Ok(ApiResponse::success(SessionResponse { user: None }));
    };

    let timeout = state.session.resolve_timeout();
    let user = tokio::time::timeout(timeout, state.oracle.lookup(token))
        .await
        .map_err(|_| ApiError::from(SessionError::Timeout(timeout.as_millis() as u64)))??;

    Ok(ApiResponse::success(SessionResponse { user }))
}
