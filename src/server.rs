use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, NavigationConfig, SecurityConfig, SessionConfig};
use crate::handlers;
use crate::middleware::session_token_middleware;
use crate::session::{HttpSessionOracle, SessionError, SessionOracle, StaticSessionOracle};

/// Per-process state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub oracle: Arc<dyn SessionOracle>,
    pub session: SessionConfig,
    pub navigation: NavigationConfig,
}

impl AppState {
    pub fn new(oracle: Arc<dyn SessionOracle>, session: SessionConfig, navigation: NavigationConfig) -> Self {
        Self { oracle, session, navigation }
    }

    /// State for `config`, talking to the hosted provider when one is set
    pub fn from_config(config: &AppConfig) -> Result<Self, SessionError> {
        let oracle: Arc<dyn SessionOracle> = match HttpSessionOracle::from_config(&config.auth)? {
            Some(oracle) => Arc::new(oracle),
            None => {
                tracing::warn!("AUTH_PROVIDER_URL not set, every visitor is signed out");
                Arc::new(StaticSessionOracle::new())
            }
        };

        Ok(Self::new(oracle, config.session.clone(), config.navigation.clone()))
    }
}

pub fn app(state: AppState, security: &SecurityConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(handlers::status::root))
        .route("/health", get(handlers::status::health))
        // Sign-in pages
        .merge(auth_page_routes(&state.navigation))
        // Workspace pages, unscoped and tenant-scoped
        .merge(workspace_routes())
        .nest("/t/:tenant", workspace_routes())
        // API
        .merge(api_routes())
        .layer(middleware::from_fn_with_state(state.clone(), session_token_middleware))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if security.enable_cors {
        router = router.layer(cors_layer(security));
    }

    router
}

fn auth_page_routes(navigation: &NavigationConfig) -> Router<AppState> {
    use handlers::pages;

    Router::new()
        .route(&navigation.sign_in_path, get(pages::sign_in_page))
        .route(&navigation.sign_up_path, get(pages::sign_up_page))
}

fn workspace_routes() -> Router<AppState> {
    use handlers::{pages, shims};

    Router::new()
        .route("/dashboard", get(pages::dashboard_page))
        .route("/schedule", get(pages::schedule_page))
        .route("/documents/quotes", get(pages::documents_page))
        .route("/documents/contracts", get(pages::documents_page))
        .route("/finance/payments", get(pages::finance_page))
        .route("/finance/tax-invoices", get(pages::finance_page))
        // Legacy parents forward to their canonical child
        .route("/documents", get(shims::documents_shim))
        .route("/finance", get(shims::finance_shim))
}

fn api_routes() -> Router<AppState> {
    use handlers::{finance, navigate, session};

    Router::new()
        .route("/api/navigate", post(navigate::navigate_post))
        .route("/api/context", get(navigate::context_get))
        .route("/api/session", get(session::session_get))
        // Mock finance records, no persistence
        .route("/api/payments", delete(finance::missing_id))
        .route("/api/payments/", delete(finance::missing_id))
        .route("/api/payments/:id", delete(finance::payment_delete))
        .route("/api/tax-invoices", delete(finance::missing_id))
        .route("/api/tax-invoices/", delete(finance::missing_id))
        .route("/api/tax-invoices/:id", delete(finance::tax_invoice_delete))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if crate::is_development!() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new().allow_origin(AllowOrigin::list(origins))
}
