//! Session model as seen by pages.
//!
//! Identity is owned by the hosted auth provider. Pages only read a
//! [`Session`] snapshot and react to changes published on a [`SessionFeed`].

pub mod feed;
pub mod oracle;

pub use feed::SessionFeed;
pub use oracle::{HttpSessionOracle, SessionOracle, StaticSessionOracle};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sign-in method recorded by the auth provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Provider {
    #[default]
    Email,
    Google,
    Kakao,
    Naver,
    Other(String),
}

impl Provider {
    /// Sign-in methods offered on the sign-in and sign-up pages
    pub const KNOWN: [Provider; 4] = [Provider::Email, Provider::Google, Provider::Kakao, Provider::Naver];

    pub fn as_str(&self) -> &str {
        match self {
            Provider::Email => "email",
            Provider::Google => "google",
            Provider::Kakao => "kakao",
            Provider::Naver => "naver",
            Provider::Other(name) => name,
        }
    }
}

impl From<&str> for Provider {
    fn from(value: &str) -> Self {
        match value {
            "email" => Provider::Email,
            "google" => Provider::Google,
            "kakao" => Provider::Kakao,
            "naver" => Provider::Naver,
            other => Provider::Other(other.to_string()),
        }
    }
}

impl From<String> for Provider {
    fn from(value: String) -> Self {
        Provider::from(value.as_str())
    }
}

impl From<Provider> for String {
    fn from(value: Provider) -> Self {
        value.as_str().to_string()
    }
}

/// Signed-in user as reported by the auth provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub provider: Provider,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            business_name: None,
            phone: None,
            provider: Provider::Email,
        }
    }

    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.provider = provider;
        self
    }

    /// URL-safe workspace slug for this user.
    ///
    /// Taken from the local part of the email address, lowercased, with
    /// anything outside `[a-z0-9_-]` collapsed to `-`. Falls back to the
    /// same treatment of the user id when the email yields nothing.
    pub fn slug(&self) -> String {
        let local = self.email.split('@').next().unwrap_or_default();
        let slug = slugify(local);
        if slug.is_empty() {
            slugify(&self.id)
        } else {
            slug
        }
    }
}

fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            out.push(ch);
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_matches('-').to_string()
}

/// Snapshot of the session at one point in time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    pub user: Option<User>,
    pub is_loading: bool,
}

impl Session {
    pub fn loading() -> Self {
        Self { user: None, is_loading: true }
    }

    pub fn anonymous() -> Self {
        Self { user: None, is_loading: false }
    }

    pub fn signed_in(user: User) -> Self {
        Self { user: Some(user), is_loading: false }
    }
}

/// What the feed currently knows about the session
#[derive(Debug, Clone)]
pub enum SessionState {
    Ready(Session),
    Failed(SessionError),
}

impl SessionState {
    /// Session as pages should see it; a failed lookup reads as signed out
    pub fn effective(&self) -> Session {
        match self {
            SessionState::Ready(session) => session.clone(),
            SessionState::Failed(_) => Session::anonymous(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Ready(Session { is_loading: true, .. }))
    }
}

#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Auth provider unreachable: {0}")]
    Unreachable(String),

    #[error("Auth provider returned status {0}")]
    UnexpectedStatus(u16),

    #[error("Malformed auth provider response: {0}")]
    MalformedResponse(String),

    #[error("Session lookup timed out after {0} ms")]
    Timeout(u64),

    #[error("Session feed closed before resolving")]
    FeedClosed,
}
