use std::time::Duration;

use tokio::sync::watch;

use super::{Session, SessionError, SessionOracle, SessionState};

/// Per-page observable session. Starts out loading; subscribers are woken
/// on every published change.
#[derive(Debug)]
pub struct SessionFeed {
    tx: watch::Sender<SessionState>,
}

impl SessionFeed {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::Ready(Session::loading()));
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    pub fn publish(&self, session: Session) {
        self.tx.send_replace(SessionState::Ready(session));
    }

    pub fn fail(&self, error: SessionError) {
        tracing::warn!("Session lookup failed, continuing signed out: {}", error);
        self.tx.send_replace(SessionState::Failed(error));
    }

    /// Resolve the session behind `token` and publish the result.
    ///
    /// A missing token resolves to a signed-out session without asking the
    /// oracle. Lookups that exceed `timeout` publish a failure.
    pub async fn resolve(&self, oracle: &dyn SessionOracle, token: Option<&str>, timeout: Duration) {
        let Some(token) = token else {
            self.publish(Session::anonymous());
            return;
        };

        match tokio::time::timeout(timeout, oracle.lookup(token)).await {
            Ok(Ok(Some(user))) => {
                tracing::debug!("Session resolved for user {}", user.id);
                self.publish(Session::signed_in(user));
            }
            Ok(Ok(None)) => self.publish(Session::anonymous()),
            Ok(Err(e)) => self.fail(e),
            Err(_) => self.fail(SessionError::Timeout(timeout.as_millis() as u64)),
        }
    }
}

impl Default for SessionFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{StaticSessionOracle, User};
    use async_trait::async_trait;

    struct StalledOracle;

    #[async_trait]
    impl SessionOracle for StalledOracle {
        async fn lookup(&self, _token: &str) -> Result<Option<User>, SessionError> {
            std::future::pending::<Result<Option<User>, SessionError>>().await
        }
    }

    #[test]
    fn new_feed_is_loading() {
        let feed = SessionFeed::new();
        assert!(feed.current().is_loading());
    }

    #[tokio::test]
    async fn resolve_without_token_is_anonymous() {
        let feed = SessionFeed::new();
        feed.resolve(&StaticSessionOracle::new(), None, Duration::from_secs(1)).await;
        assert_eq!(feed.current().effective(), Session::anonymous());
    }

    #[tokio::test]
    async fn resolve_publishes_known_user() {
        let oracle = StaticSessionOracle::new().with_user("t", User::new("u-1", "Alice", "alice@x.com"));
        let feed = SessionFeed::new();
        let mut rx = feed.subscribe();

        feed.resolve(&oracle, Some("t"), Duration::from_secs(1)).await;

        assert!(rx.has_changed().unwrap());
        let session = rx.borrow_and_update().effective();
        assert_eq!(session.user.map(|u| u.email), Some("alice@x.com".to_string()));
        assert!(!session.is_loading);
    }

    #[tokio::test]
    async fn stalled_oracle_times_out_as_failure() {
        let feed = SessionFeed::new();
        feed.resolve(&StalledOracle, Some("t"), Duration::from_millis(20)).await;

        assert!(matches!(feed.current(), SessionState::Failed(SessionError::Timeout(20))));
        assert_eq!(feed.current().effective(), Session::anonymous());
    }
}
