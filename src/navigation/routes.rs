use serde::Serialize;

use super::tenant::TenantContext;

/// Canonical routes of the workspace, relative to a tenant base path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    Dashboard,
    Schedule,
    Quotes,
    NewQuote,
    Contracts,
    NewContract,
    Payments,
    NewPayment,
    TaxInvoices,
    NewTaxInvoice,
}

impl Route {
    pub fn suffix(self) -> &'static str {
        match self {
            Route::Dashboard => "/dashboard",
            Route::Schedule => "/schedule",
            Route::Quotes => "/documents/quotes",
            Route::NewQuote => "/documents/quotes/new",
            Route::Contracts => "/documents/contracts",
            Route::NewContract => "/documents/contracts/new",
            Route::Payments => "/finance/payments",
            Route::NewPayment => "/finance/payments/new",
            Route::TaxInvoices => "/finance/tax-invoices",
            Route::NewTaxInvoice => "/finance/tax-invoices/new",
        }
    }

    /// Concrete path for this route inside `ctx`'s route tree
    pub fn under(self, ctx: &TenantContext) -> String {
        ctx.join(self.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::tenant::TenantId;

    #[test]
    fn routes_follow_the_base_path() {
        let acme = TenantContext::for_tenant(TenantId::new("acme").unwrap());
        assert_eq!(Route::NewQuote.under(&acme), "/t/acme/documents/quotes/new");
        assert_eq!(Route::TaxInvoices.under(&TenantContext::unscoped()), "/finance/tax-invoices");
    }
}
