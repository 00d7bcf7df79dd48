use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub session: SessionConfig,
    pub navigation: NavigationConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Hosted auth provider the session oracle talks to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Base URL of the provider; `None` falls back to the in-memory oracle
    pub provider_url: Option<String>,
    pub api_key: Option<String>,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub cookie_name: String,
    /// Upper bound on how long a page waits for the session oracle
    pub resolve_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    pub sign_in_path: String,
    pub sign_up_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

impl SessionConfig {
    pub fn resolve_timeout(&self) -> Duration {
        Duration::from_millis(self.resolve_timeout_ms)
    }
}

impl AuthConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("HOST") {
            self.server.host = v;
        }
        if let Some(port) = env::var("PAPERDESK_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        // Auth provider overrides
        if let Ok(v) = env::var("AUTH_PROVIDER_URL") {
            let v = v.trim().trim_end_matches('/').to_string();
            self.auth.provider_url = if v.is_empty() { None } else { Some(v) };
        }
        if let Ok(v) = env::var("AUTH_API_KEY") {
            self.auth.api_key = Some(v);
        }
        if let Ok(v) = env::var("AUTH_REQUEST_TIMEOUT_MS") {
            self.auth.request_timeout_ms = v.parse().unwrap_or(self.auth.request_timeout_ms);
        }

        // Session overrides
        if let Ok(v) = env::var("SESSION_COOKIE_NAME") {
            self.session.cookie_name = v;
        }
        if let Ok(v) = env::var("SESSION_RESOLVE_TIMEOUT_MS") {
            self.session.resolve_timeout_ms = v.parse().unwrap_or(self.session.resolve_timeout_ms);
        }

        // Navigation overrides
        if let Ok(v) = env::var("NAV_SIGN_IN_PATH") {
            self.navigation.sign_in_path = v;
        }
        if let Ok(v) = env::var("NAV_SIGN_UP_PATH") {
            self.navigation.sign_up_path = v;
        }
        self.navigation = self.navigation.validated();

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            auth: AuthConfig {
                provider_url: None,
                api_key: None,
                request_timeout_ms: 5_000,
            },
            session: SessionConfig {
                cookie_name: "paperdesk-session".to_string(),
                resolve_timeout_ms: 5_000,
            },
            navigation: NavigationConfig::default(),
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            auth: AuthConfig {
                provider_url: None,
                api_key: None,
                request_timeout_ms: 3_000,
            },
            session: SessionConfig {
                cookie_name: "paperdesk-session".to_string(),
                resolve_timeout_ms: 3_000,
            },
            navigation: NavigationConfig::default(),
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.paperdesk.app".to_string()],
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            auth: AuthConfig {
                provider_url: None,
                api_key: None,
                request_timeout_ms: 2_000,
            },
            session: SessionConfig {
                cookie_name: "__Host-paperdesk-session".to_string(),
                resolve_timeout_ms: 2_000,
            },
            navigation: NavigationConfig::default(),
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://paperdesk.app".to_string()],
            },
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            sign_in_path: "/login".to_string(),
            sign_up_path: "/signup".to_string(),
        }
    }
}

/// Paths already served by the workspace router
const RESERVED_PATHS: [&str; 7] = ["/health", "/api", "/t", "/dashboard", "/schedule", "/documents", "/finance"];

impl NavigationConfig {
    /// Replace paths the router cannot mount with their defaults
    pub fn validated(self) -> Self {
        let defaults = Self::default();

        let sign_in_path = if is_mountable_page_path(&self.sign_in_path) {
            self.sign_in_path
        } else {
            tracing::warn!("Ignoring invalid sign-in path '{}'", self.sign_in_path);
            defaults.sign_in_path.clone()
        };

        let sign_up_path = if is_mountable_page_path(&self.sign_up_path) && self.sign_up_path != sign_in_path {
            self.sign_up_path
        } else {
            tracing::warn!("Ignoring invalid sign-up path '{}'", self.sign_up_path);
            defaults.sign_up_path.clone()
        };

        if sign_in_path == sign_up_path {
            tracing::warn!("Sign-in and sign-up paths collide, using defaults");
            return defaults;
        }

        Self { sign_in_path, sign_up_path }
    }
}

/// A static absolute path that does not shadow another route
fn is_mountable_page_path(path: &str) -> bool {
    if !path.starts_with('/') || path.len() < 2 || path.ends_with('/') {
        return false;
    }
    if path.contains(|c: char| matches!(c, ':' | '*' | '?' | '#' | '{' | '}') || c.is_whitespace()) {
        return false;
    }
    if path.contains("//") {
        return false;
    }

    !RESERVED_PATHS
        .iter()
        .any(|reserved| path == *reserved || path.strip_prefix(reserved).is_some_and(|rest| rest.starts_with('/')))
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_development {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Development)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.server.port, 3000);
        assert!(config.auth.provider_url.is_none());
        assert_eq!(config.navigation.sign_in_path, "/login");
        assert_eq!(config.session.resolve_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_navigation_paths_are_validated() {
        let nav = NavigationConfig {
            sign_in_path: "/auth/login".to_string(),
            sign_up_path: "/auth/join".to_string(),
        }
        .validated();
        assert_eq!(nav.sign_in_path, "/auth/login");
        assert_eq!(nav.sign_up_path, "/auth/join");

        for bad in ["login", "/", "/dashboard", "/t/acme", "/api/login", "/:page", "/sign in", "/login/"] {
            let nav = NavigationConfig {
                sign_in_path: bad.to_string(),
                sign_up_path: "/join".to_string(),
            }
            .validated();
            assert_eq!(nav.sign_in_path, "/login", "{bad} should be rejected");
            assert_eq!(nav.sign_up_path, "/join");
        }
    }

    #[test]
    fn test_colliding_navigation_paths_fall_back() {
        let nav = NavigationConfig {
            sign_in_path: "/enter".to_string(),
            sign_up_path: "/enter".to_string(),
        }
        .validated();
        assert_eq!(nav.sign_in_path, "/enter");
        assert_eq!(nav.sign_up_path, "/signup");

        // sign-up default clashing with a custom sign-in
        let nav = NavigationConfig {
            sign_in_path: "/signup".to_string(),
            sign_up_path: "/dashboard".to_string(),
        }
        .validated();
        assert_eq!(nav.sign_in_path, "/login");
        assert_eq!(nav.sign_up_path, "/signup");
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.environment, Environment::Production);
        assert!(config.session.resolve_timeout_ms < AppConfig::development().session.resolve_timeout_ms);
        assert_eq!(config.security.cors_origins, vec!["https://paperdesk.app".to_string()]);
    }
}
