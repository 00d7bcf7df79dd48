// handlers/pages.rs - session-guarded page routes
//
// Pages render no markup here. A page either redirects (303 See Other, the
// server-side form of a history `replace`) or answers with a JSON descriptor
// of what the client should render.

use axum::{
    extract::{Extension, OriginalUri, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, SessionToken};
use crate::navigation::guard::{self, GuardOutcome, GuardPolicy, RedirectGuard};
use crate::navigation::{Navigation, Page, PageHost, RecordingNavigator, TenantContext, ViewMap};
use crate::server::AppState;
use crate::session::{Provider, Session, SessionFeed, User};

#[derive(Debug, Serialize)]
pub struct AuthPage {
    pub page: &'static str,
    pub render: &'static str,
    pub providers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct WorkspacePage {
    pub page: Page,
    pub render: &'static str,
    pub tenant: TenantContext,
    pub views: ViewMap,
    pub user: Option<User>,
}

/// Outcome of running a page's guard against the request's session
struct GuardedPage {
    session: Session,
    redirect: Option<Navigation>,
}

/// Mount a guard, resolve the session behind `token`, and wait for the
/// guard's decision
async fn run_guard(state: &AppState, token: &SessionToken, policy: GuardPolicy) -> Result<GuardedPage, ApiError> {
    let feed = SessionFeed::new();
    let mounted = guard::mount(RedirectGuard::new(policy), feed.subscribe(), RecordingNavigator::new());

    feed.resolve(state.oracle.as_ref(), token.as_deref(), state.session.resolve_timeout())
        .await;

    let settled = mounted.settled().await?;
    match settled.outcome {
        GuardOutcome::Primary | GuardOutcome::Redirect(_) => Ok(GuardedPage {
            session: feed.current().effective(),
            redirect: settled.navigator.last().cloned(),
        }),
        GuardOutcome::Loading | GuardOutcome::Unmounted => {
            Err(ApiError::internal_server_error("Page session did not resolve"))
        }
    }
}

fn redirect_response(navigation: &Navigation) -> Response {
    match navigation {
        Navigation::Replace(path) => Redirect::to(path).into_response(),
        Navigation::Push(path) => Redirect::temporary(path).into_response(),
    }
}

async fn auth_page(state: AppState, token: SessionToken, page: &'static str) -> Result<Response, ApiError> {
    let guarded = run_guard(&state, &token, GuardPolicy::RedirectAuthenticated).await?;

    if let Some(navigation) = &guarded.redirect {
        return Ok(redirect_response(navigation));
    }

    Ok(ApiResponse::success(AuthPage {
        page,
        render: "primary",
        providers: Provider::KNOWN.into_iter().map(String::from).collect(),
    })
    .into_response())
}

/// GET /login - signed-in users are sent to their workspace
pub async fn sign_in_page(State(state): State<AppState>, Extension(token): Extension<SessionToken>) -> Result<Response, ApiError> {
    auth_page(state, token, "login").await
}

/// GET /signup
pub async fn sign_up_page(State(state): State<AppState>, Extension(token): Extension<SessionToken>) -> Result<Response, ApiError> {
    auth_page(state, token, "signup").await
}

async fn workspace_page(state: AppState, token: SessionToken, uri: OriginalUri, page: Page) -> Result<Response, ApiError> {
    let policy = GuardPolicy::RequireUser {
        sign_in: state.navigation.sign_in_path.clone(),
    };
    let guarded = run_guard(&state, &token, policy).await?;

    if let Some(navigation) = &guarded.redirect {
        return Ok(redirect_response(navigation));
    }

    let host = PageHost::mount(page, uri.0.path(), RecordingNavigator::new());

    Ok(ApiResponse::success(WorkspacePage {
        page,
        render: "primary",
        tenant: host.tenant().clone(),
        views: host.view_map(),
        user: guarded.session.user,
    })
    .into_response())
}

pub async fn dashboard_page(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    uri: OriginalUri,
) -> Result<Response, ApiError> {
    workspace_page(state, token, uri, Page::Dashboard).await
}

pub async fn schedule_page(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    uri: OriginalUri,
) -> Result<Response, ApiError> {
    workspace_page(state, token, uri, Page::Schedule).await
}

pub async fn documents_page(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    uri: OriginalUri,
) -> Result<Response, ApiError> {
    workspace_page(state, token, uri, Page::Documents).await
}

pub async fn finance_page(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    uri: OriginalUri,
) -> Result<Response, ApiError> {
    workspace_page(state, token, uri, Page::Finance).await
}
