use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Leading path segment that marks a tenant-scoped route tree
pub const TENANT_SEGMENT: &str = "t";

/// Tenant identifier captured from `/t/<id>/...`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    /// Returns `None` for an empty or slash-containing id
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() || id.contains('/') {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tenant id and URL prefix for the route tree a page lives in.
///
/// `base_path` is either empty (unscoped routing) or exactly `/t/<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenantContext {
    tenant_id: Option<TenantId>,
    base_path: String,
}

impl TenantContext {
    pub fn unscoped() -> Self {
        Self { tenant_id: None, base_path: String::new() }
    }

    pub fn for_tenant(tenant_id: TenantId) -> Self {
        let base_path = format!("/{}/{}", TENANT_SEGMENT, tenant_id);
        Self { tenant_id: Some(tenant_id), base_path }
    }

    /// Resolve from a request path or absolute URL
    pub fn from_path(path: &str) -> Self {
        Self::from_segments(&path_segments(path))
    }

    /// Resolve from already split, non-empty path segments
    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> Self {
        match segments {
            [head, id, ..] if head.as_ref() == TENANT_SEGMENT => {
                match TenantId::new(id.as_ref()) {
                    Some(tenant_id) => Self::for_tenant(tenant_id),
                    None => Self::unscoped(),
                }
            }
            _ => Self::unscoped(),
        }
    }

    pub fn tenant_id(&self) -> Option<&TenantId> {
        self.tenant_id.as_ref()
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn is_scoped(&self) -> bool {
        self.tenant_id.is_some()
    }

    /// Prefix `suffix` (which starts with `/`) with the base path
    pub fn join(&self, suffix: &str) -> String {
        format!("{}{}", self.base_path, suffix)
    }
}

impl Default for TenantContext {
    fn default() -> Self {
        Self::unscoped()
    }
}

/// Split a path into its non-empty segments, ignoring query and fragment.
/// Absolute URLs are reduced to their path first.
pub fn path_segments(path: &str) -> Vec<String> {
    let path = match Url::parse(path) {
        Ok(url) if url.has_host() => url.path().to_string(),
        _ => path.split(&['?', '#'][..]).next().unwrap_or_default().to_string(),
    };

    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
