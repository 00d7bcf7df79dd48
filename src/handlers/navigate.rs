// handlers/navigate.rs - view navigation for client components
//
// Client components only know abstract view names. These endpoints resolve
// them against the page they are hosted on and the path it is rendered at.

use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::navigation::{Page, PageHost, RecordingNavigator, TenantContext, TenantId};

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    /// Path the hosting page is rendered at
    pub path: String,
    pub page: String,
    pub view: String,
}

#[derive(Debug, Serialize)]
pub struct NavigateResponse {
    pub location: String,
    pub base_path: String,
    pub tenant: Option<TenantId>,
}

/// POST /api/navigate - resolve a view name to a concrete location
pub async fn navigate_post(Json(request): Json<NavigateRequest>) -> ApiResult<NavigateResponse> {
    let page: Page = request.page.parse()?;
    let mut host = PageHost::mount(page, request.path.as_str(), RecordingNavigator::new());
    let location = host.on_navigate(&request.view);

    Ok(ApiResponse::success(NavigateResponse {
        location,
        base_path: host.tenant().base_path().to_string(),
        tenant: host.tenant().tenant_id().cloned(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct ContextQuery {
    pub path: Option<String>,
}

/// GET /api/context?path= - tenant context for a path
pub async fn context_get(Query(query): Query<ContextQuery>) -> ApiResult<TenantContext> {
    let path = query.path.ok_or_else(|| ApiError::bad_request("Missing 'path' query parameter"))?;
    Ok(ApiResponse::success(TenantContext::from_path(&path)))
}
