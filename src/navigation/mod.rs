//! Tenant-aware navigation: where a page lives, where its views point, and
//! when it should send the visitor elsewhere.

pub mod guard;
pub mod navigator;
pub mod page;
pub mod routes;
pub mod shims;
pub mod tenant;
pub mod views;

pub use guard::{GuardOutcome, GuardPhase, GuardPolicy, MountedGuard, RedirectGuard};
pub use navigator::{Navigation, Navigator, PathProvider, RecordingNavigator};
pub use page::PageHost;
pub use routes::Route;
pub use shims::LegacyShim;
pub use tenant::{TenantContext, TenantId};
pub use views::{resolve_route, Page, PageViews, ViewMap, ViewTarget};
