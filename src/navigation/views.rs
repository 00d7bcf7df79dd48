//! View-to-route mapping.
//!
//! Shared UI components emit abstract view names ("dashboard", "new-quote",
//! ...). Each hosting page owns a closed set of views and decides which
//! concrete route every view maps to inside its tenant's route tree. Names a
//! page does not know land on that page's default route.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use super::routes::Route;
use super::tenant::TenantContext;

/// A view name parsed against one page's view set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewTarget<V> {
    View(V),
    /// Name outside the page's set; routes to the page default
    Fallback,
}

/// Fixed view set of a page
pub trait PageViews {
    type View: Copy + fmt::Debug + 'static;

    const NAME: &'static str;

    /// Recognised view names, in display order
    const VIEWS: &'static [(&'static str, Self::View)];

    fn route(view: Self::View) -> Route;

    fn default_route() -> Route;

    fn parse(name: &str) -> ViewTarget<Self::View> {
        Self::VIEWS
            .iter()
            .find(|(known, _)| *known == name)
            .map_or(ViewTarget::Fallback, |(_, view)| ViewTarget::View(*view))
    }

    fn target_route(target: ViewTarget<Self::View>) -> Route {
        match target {
            ViewTarget::View(view) => Self::route(view),
            ViewTarget::Fallback => Self::default_route(),
        }
    }
}

/// Concrete path for `view_name` on page `P` inside `ctx`. Never fails.
pub fn resolve_route<P: PageViews>(view_name: &str, ctx: &TenantContext) -> String {
    let target = P::parse(view_name);
    if matches!(target, ViewTarget::Fallback) {
        tracing::debug!("Unknown view '{}' on {} page, using page default", view_name, P::NAME);
    }
    P::target_route(target).under(ctx)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardView {
    Dashboard,
    Documents,
    NewQuote,
    NewContract,
    Schedule,
    Finance,
}

pub struct DashboardPage;

impl PageViews for DashboardPage {
    type View = DashboardView;

    const NAME: &'static str = "dashboard";

    const VIEWS: &'static [(&'static str, DashboardView)] = &[
        ("dashboard", DashboardView::Dashboard),
        ("documents", DashboardView::Documents),
        ("new-quote", DashboardView::NewQuote),
        ("new-contract", DashboardView::NewContract),
        ("schedule", DashboardView::Schedule),
        ("finance", DashboardView::Finance),
    ];

    fn route(view: DashboardView) -> Route {
        match view {
            DashboardView::Dashboard => Route::Dashboard,
            DashboardView::Documents => Route::Quotes,
            DashboardView::NewQuote => Route::NewQuote,
            DashboardView::NewContract => Route::NewContract,
            DashboardView::Schedule => Route::Schedule,
            DashboardView::Finance => Route::Payments,
        }
    }

    fn default_route() -> Route {
        Route::Dashboard
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentsView {
    Documents,
    Quotes,
    Contracts,
    NewQuote,
    NewContract,
    Dashboard,
    Schedule,
    Finance,
}

pub struct DocumentsPage;

impl PageViews for DocumentsPage {
    type View = DocumentsView;

    const NAME: &'static str = "documents";

    const VIEWS: &'static [(&'static str, DocumentsView)] = &[
        ("documents", DocumentsView::Documents),
        ("quotes", DocumentsView::Quotes),
        ("contracts", DocumentsView::Contracts),
        ("new-quote", DocumentsView::NewQuote),
        ("new-contract", DocumentsView::NewContract),
        ("dashboard", DocumentsView::Dashboard),
        ("schedule", DocumentsView::Schedule),
        ("finance", DocumentsView::Finance),
    ];

    fn route(view: DocumentsView) -> Route {
        match view {
            DocumentsView::Documents | DocumentsView::Quotes => Route::Quotes,
            DocumentsView::Contracts => Route::Contracts,
            DocumentsView::NewQuote => Route::NewQuote,
            DocumentsView::NewContract => Route::NewContract,
            DocumentsView::Dashboard => Route::Dashboard,
            DocumentsView::Schedule => Route::Schedule,
            DocumentsView::Finance => Route::Payments,
        }
    }

    fn default_route() -> Route {
        Route::Quotes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinanceView {
    Payments,
    TaxInvoices,
    NewPayment,
    NewTaxInvoice,
    Dashboard,
    Documents,
}

pub struct FinancePage;

impl PageViews for FinancePage {
    type View = FinanceView;

    const NAME: &'static str = "finance";

    const VIEWS: &'static [(&'static str, FinanceView)] = &[
        ("payments", FinanceView::Payments),
        ("tax-invoices", FinanceView::TaxInvoices),
        ("new-payment", FinanceView::NewPayment),
        ("new-tax-invoice", FinanceView::NewTaxInvoice),
        ("dashboard", FinanceView::Dashboard),
        ("documents", FinanceView::Documents),
    ];

    fn route(view: FinanceView) -> Route {
        match view {
            FinanceView::Payments => Route::Payments,
            FinanceView::TaxInvoices => Route::TaxInvoices,
            FinanceView::NewPayment => Route::NewPayment,
            FinanceView::NewTaxInvoice => Route::NewTaxInvoice,
            FinanceView::Dashboard => Route::Dashboard,
            FinanceView::Documents => Route::Quotes,
        }
    }

    fn default_route() -> Route {
        Route::Payments
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleView {
    Schedule,
    Dashboard,
    Documents,
    Finance,
}

pub struct SchedulePage;

impl PageViews for SchedulePage {
    type View = ScheduleView;

    const NAME: &'static str = "schedule";

    const VIEWS: &'static [(&'static str, ScheduleView)] = &[
        ("schedule", ScheduleView::Schedule),
        ("dashboard", ScheduleView::Dashboard),
        ("documents", ScheduleView::Documents),
        ("finance", ScheduleView::Finance),
    ];

    fn route(view: ScheduleView) -> Route {
        match view {
            ScheduleView::Schedule => Route::Schedule,
            ScheduleView::Dashboard => Route::Dashboard,
            ScheduleView::Documents => Route::Quotes,
            ScheduleView::Finance => Route::Payments,
        }
    }

    fn default_route() -> Route {
        Route::Schedule
    }
}

/// Page selector for callers that only know the page by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Dashboard,
    Documents,
    Finance,
    Schedule,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Dashboard, Page::Documents, Page::Finance, Page::Schedule];

    pub fn name(self) -> &'static str {
        match self {
            Page::Dashboard => DashboardPage::NAME,
            Page::Documents => DocumentsPage::NAME,
            Page::Finance => FinancePage::NAME,
            Page::Schedule => SchedulePage::NAME,
        }
    }

    pub fn resolve(self, view_name: &str, ctx: &TenantContext) -> String {
        match self {
            Page::Dashboard => resolve_route::<DashboardPage>(view_name, ctx),
            Page::Documents => resolve_route::<DocumentsPage>(view_name, ctx),
            Page::Finance => resolve_route::<FinancePage>(view_name, ctx),
            Page::Schedule => resolve_route::<SchedulePage>(view_name, ctx),
        }
    }

    pub fn default_route(self) -> Route {
        match self {
            Page::Dashboard => DashboardPage::default_route(),
            Page::Documents => DocumentsPage::default_route(),
            Page::Finance => FinancePage::default_route(),
            Page::Schedule => SchedulePage::default_route(),
        }
    }

    pub fn view_map(self, ctx: &TenantContext) -> ViewMap {
        match self {
            Page::Dashboard => ViewMap::of::<DashboardPage>(ctx),
            Page::Documents => ViewMap::of::<DocumentsPage>(ctx),
            Page::Finance => ViewMap::of::<FinancePage>(ctx),
            Page::Schedule => ViewMap::of::<SchedulePage>(ctx),
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown page '{0}'")]
pub struct UnknownPage(pub String);

impl FromStr for Page {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|page| page.name() == s)
            .ok_or_else(|| UnknownPage(s.to_string()))
    }
}

/// A page's views materialised for one tenant context
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewMap {
    pub views: Vec<ViewEntry>,
    pub default: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewEntry {
    pub view: &'static str,
    pub route: String,
}

impl ViewMap {
    pub fn of<P: PageViews>(ctx: &TenantContext) -> Self {
        let views = P::VIEWS
            .iter()
            .map(|(name, view)| ViewEntry {
                view: *name,
                route: P::route(*view).under(ctx),
            })
            .collect();

        Self {
            views,
            default: P::default_route().under(ctx),
        }
    }

    pub fn resolve(&self, view_name: &str) -> &str {
        self.views
            .iter()
            .find(|entry| entry.view == view_name)
            .map_or(self.default.as_str(), |entry| entry.route.as_str())
    }
}
