use serde::Serialize;

use super::routes::Route;
use super::tenant::{TenantContext, TenantId};

/// Parent routes kept only to forward old links to their canonical child
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegacyShim {
    Documents,
    Finance,
}

impl LegacyShim {
    pub const ALL: [LegacyShim; 2] = [LegacyShim::Documents, LegacyShim::Finance];

    /// Path segment the shim is mounted at, below the base path
    pub fn parent_segment(self) -> &'static str {
        match self {
            LegacyShim::Documents => "documents",
            LegacyShim::Finance => "finance",
        }
    }

    pub fn canonical_child(self) -> Route {
        match self {
            LegacyShim::Documents => Route::Quotes,
            LegacyShim::Finance => Route::Payments,
        }
    }

    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|shim| shim.parent_segment() == segment)
    }

    /// `/t/<tenant_id>/<child>`
    pub fn target(self, tenant_id: &TenantId) -> String {
        self.target_in(&TenantContext::for_tenant(tenant_id.clone()))
    }

    /// Child route inside any route tree, scoped or not
    pub fn target_in(self, ctx: &TenantContext) -> String {
        self.canonical_child().under(ctx)
    }
}
