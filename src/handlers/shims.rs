// handlers/shims.rs - legacy parent routes
//
// `/documents` and `/finance` (and their `/t/:tenant` twins) no longer have
// pages of their own. They always redirect, before any session work.

use axum::{extract::OriginalUri, response::Redirect};

use crate::navigation::{LegacyShim, TenantContext};

fn forward(shim: LegacyShim, uri: &OriginalUri) -> Redirect {
    let ctx = TenantContext::from_path(uri.0.path());
    let target = match ctx.tenant_id() {
        Some(tenant_id) => shim.target(tenant_id),
        None => shim.target_in(&ctx),
    };

    tracing::debug!("Legacy route {} forwarded to {}", uri.0.path(), target);
    Redirect::temporary(&target)
}

/// GET [/t/:tenant]/documents
pub async fn documents_shim(uri: OriginalUri) -> Redirect {
    forward(LegacyShim::Documents, &uri)
}

/// GET [/t/:tenant]/finance
pub async fn finance_shim(uri: OriginalUri) -> Redirect {
    forward(LegacyShim::Finance, &uri)
}
