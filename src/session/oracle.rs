use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use super::{Provider, SessionError, User};
use crate::config::AuthConfig;

/// Source of truth for "who is signed in" behind a session token
#[async_trait]
pub trait SessionOracle: Send + Sync {
    /// Look up the user behind `token`. `Ok(None)` means the token is not
    /// (or no longer) attached to a session.
    async fn lookup(&self, token: &str) -> Result<Option<User>, SessionError>;
}

/// In-memory oracle keyed by token. Used when no provider is configured.
#[derive(Debug, Clone, Default)]
pub struct StaticSessionOracle {
    users: HashMap<String, User>,
}

impl StaticSessionOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, token: impl Into<String>, user: User) -> Self {
        self.users.insert(token.into(), user);
        self
    }
}

#[async_trait]
impl SessionOracle for StaticSessionOracle {
    async fn lookup(&self, token: &str) -> Result<Option<User>, SessionError> {
        Ok(self.users.get(token).cloned())
    }
}

/// Oracle backed by the hosted auth provider's `/auth/v1/user` endpoint
#[derive(Debug, Clone)]
pub struct HttpSessionOracle {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpSessionOracle {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Result<Self, SessionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SessionError::Unreachable(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Build from config; `None` when no provider URL is set
    pub fn from_config(config: &AuthConfig) -> Result<Option<Self>, SessionError> {
        match &config.provider_url {
            Some(url) => Self::new(url.clone(), config.api_key.clone(), config.request_timeout()).map(Some),
            None => Ok(None),
        }
    }

    fn user_endpoint(&self) -> String {
        format!("{}/auth/v1/user", self.base_url)
    }
}

#[async_trait]
impl SessionOracle for HttpSessionOracle {
    async fn lookup(&self, token: &str) -> Result<Option<User>, SessionError> {
        let mut request = self.client.get(self.user_endpoint()).bearer_auth(token);
        if let Some(key) = &self.api_key {
            request = request.header("apikey", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SessionError::Unreachable(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                tracing::debug!("Auth provider rejected session token");
                Ok(None)
            }
            status if status.is_success() => {
                let payload: ProviderUser = response
                    .json()
                    .await
                    .map_err(|e| SessionError::MalformedResponse(e.to_string()))?;
                Ok(Some(payload.into()))
            }
            status => Err(SessionError::UnexpectedStatus(status.as_u16())),
        }
    }
}

/// User payload as returned by the hosted provider
#[derive(Debug, Deserialize)]
struct ProviderUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    user_metadata: UserMetadata,
    #[serde(default)]
    app_metadata: AppMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    business_name: Option<String>,
    #[serde(default)]
    phone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AppMetadata {
    #[serde(default)]
    provider: Option<String>,
}

impl From<ProviderUser> for User {
    fn from(raw: ProviderUser) -> Self {
        let email = raw.email.unwrap_or_default();
        let non_blank = |n: &String| !n.trim().is_empty();
        let name = raw
            .user_metadata
            .name
            .filter(non_blank)
            .or(raw.user_metadata.full_name.filter(non_blank))
            .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());
        let phone = raw.user_metadata.phone.or(raw.phone).filter(|p| !p.is_empty());

        User {
            id: raw.id,
            name,
            email,
            business_name: raw.user_metadata.business_name,
            phone,
            provider: raw.app_metadata.provider.map(Provider::from).unwrap_or_default(),
        }
    }
}
