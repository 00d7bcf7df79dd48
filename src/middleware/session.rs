use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::server::AppState;

/// Session token presented by the browser, if any.
///
/// Absence is not an error: pages treat it as a signed-out session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionToken(pub Option<String>);

impl SessionToken {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// Middleware that extracts the session token and injects it into the request
pub async fn session_token_middleware(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let token = extract_session_token(request.headers(), &state.session.cookie_name);
    if token.is_none() {
        tracing::debug!("No session token on request to {}", request.uri().path());
    }
    request.extensions_mut().insert(SessionToken(token));

    next.run(request).await
}

/// Bearer token from `Authorization`, falling back to the session cookie
pub fn extract_session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    bearer_token(headers).or_else(|| cookie_token(headers, cookie_name))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_str = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

fn cookie_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == cookie_name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_header_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.insert(header::COOKIE, HeaderValue::from_static("sid=zzz"));
        assert_eq!(extract_session_token(&headers, "sid"), Some("abc".to_string()));
    }

    #[test]
    fn cookie_is_used_without_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; sid=tok-9; lang=ko"));
        assert_eq!(extract_session_token(&headers, "sid"), Some("tok-9".to_string()));
    }

    #[test]
    fn malformed_or_empty_tokens_are_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic Zm9v"));
        headers.insert(header::COOKIE, HeaderValue::from_static("sid="));
        assert_eq!(extract_session_token(&headers, "sid"), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer   "));
        assert_eq!(extract_session_token(&headers, "sid"), None);
    }
}
