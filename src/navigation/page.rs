use super::navigator::{Navigator, PathProvider};
use super::tenant::TenantContext;
use super::views::{Page, ViewMap};

/// A mounted page: its view set, the tenant context derived from where it is
/// rendered, and the navigator its components navigate through.
#[derive(Debug)]
pub struct PageHost<N> {
    page: Page,
    tenant: TenantContext,
    navigator: N,
}

impl<N: Navigator> PageHost<N> {
    pub fn mount<P: PathProvider + ?Sized>(page: Page, location: &P, navigator: N) -> Self {
        Self {
            page,
            tenant: TenantContext::from_path(&location.current_path()),
            navigator,
        }
    }

    pub fn tenant(&self) -> &TenantContext {
        &self.tenant
    }

    /// Recompute the tenant context after the location changed
    pub fn location_changed<P: PathProvider + ?Sized>(&mut self, location: &P) {
        self.tenant = TenantContext::from_path(&location.current_path());
    }

    pub fn view_map(&self) -> ViewMap {
        self.page.view_map(&self.tenant)
    }

    /// Callback handed to shared components. Returns the path navigated to.
    pub fn on_navigate(&mut self, view_name: &str) -> String {
        let path = self.page.resolve(view_name, &self.tenant);
        self.navigator.navigate(&path);
        path
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::navigator::{Navigation, RecordingNavigator};

    #[test]
    fn on_navigate_pushes_resolved_route() {
        let mut host = PageHost::mount(Page::Documents, "/t/acme/documents", RecordingNavigator::new());

        assert_eq!(host.tenant().base_path(), "/t/acme");
        assert_eq!(host.on_navigate("dashboard"), "/t/acme/dashboard");
        assert_eq!(host.navigator().history(), &[Navigation::Push("/t/acme/dashboard".to_string())]);
    }

    #[test]
    fn unknown_view_navigates_to_page_default() {
        let mut host = PageHost::mount(Page::Finance, "/finance/payments", RecordingNavigator::new());
        assert_eq!(host.on_navigate("typo"), "/finance/payments");
    }

    #[test]
    fn tenant_is_recomputed_on_location_change() {
        let mut host = PageHost::mount(Page::Schedule, "/t/acme/schedule", RecordingNavigator::new());
        host.location_changed("/t/beta/schedule");
        assert_eq!(host.on_navigate("finance"), "/t/beta/finance/payments");

        host.location_changed("/schedule");
        assert!(!host.tenant().is_scoped());
        assert_eq!(host.on_navigate("dashboard"), "/dashboard");
    }
}
