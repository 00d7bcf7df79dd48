// handlers/finance.rs - mock finance record endpoints
//
// Stand-ins until payments and tax invoices are persisted. Nothing is
// stored or removed; only the id is checked.

use axum::{extract::Path, Json};
use serde::Serialize;

use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct DeletedMessage {
    pub message: String,
}

fn deleted(kind: &str, id: &str) -> Result<Json<DeletedMessage>, ApiError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::bad_request(format!("Missing {} id", kind)));
    }

    tracing::debug!("Mock delete of {} {}", kind, id);
    Ok(Json(DeletedMessage {
        message: format!("{} {} deleted", kind, id),
    }))
}

/// DELETE /api/payments/:id
pub async fn payment_delete(Path(id): Path<String>) -> Result<Json<DeletedMessage>, ApiError> {
    deleted("Payment", &id)
}

/// DELETE /api/tax-invoices/:id
pub async fn tax_invoice_delete(Path(id): Path<String>) -> Result<Json<DeletedMessage>, ApiError> {
    deleted("Tax invoice", &id)
}

/// DELETE without an id segment
pub async fn missing_id() -> ApiError {
    ApiError::bad_request("Missing id")
}
