use axum::response::Json;
use serde_json::{json, Value};

/// GET / - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "paperdesk",
            "version": version,
            "description": "Tenant-aware page routing for the paperdesk freelancer workspace",
            "endpoints": {
                "home": "/ (public)",
                "auth_pages": "/login, /signup (redirect when signed in)",
                "workspace": "[/t/:tenant]/dashboard, /schedule, /documents/*, /finance/* (signed in)",
                "legacy": "[/t/:tenant]/documents, [/t/:tenant]/finance (redirect)",
                "navigate": "/api/navigate, /api/context",
                "session": "/api/session",
                "finance": "/api/payments/:id, /api/tax-invoices/:id (mock)",
            }
        }
    }))
}

/// GET /health - liveness
pub async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
        }
    }))
}
