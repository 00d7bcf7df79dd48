//! Session-gated redirects.
//!
//! A [`RedirectGuard`] is fed every `(user, is_loading)` change a page sees
//! and decides, once loading is over, whether the page should navigate away.
//! [`mount`] runs a guard against a live session feed on a tokio task so a
//! page can unmount before the session resolves.

use serde::Serialize;
use thiserror::Error;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

use super::navigator::Navigator;
use super::routes::Route;
use super::tenant::{TenantContext, TenantId};
use crate::session::{Session, SessionError, SessionState, User};

/// What a page does with a resolved session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardPolicy {
    /// Sign-in and sign-up pages: signed-in users are sent to their workspace
    RedirectAuthenticated,
    /// Workspace pages: signed-out visitors are sent to `sign_in`
    RequireUser { sign_in: String },
}

impl GuardPolicy {
    /// Redirect destination for the resolved `user`, if any
    pub fn destination(&self, user: Option<&User>) -> Option<String> {
        match (self, user) {
            (GuardPolicy::RedirectAuthenticated, Some(user)) => Some(workspace_home(user)),
            (GuardPolicy::RequireUser { sign_in }, None) => Some(sign_in.clone()),
            _ => None,
        }
    }
}

/// Landing route for a signed-in user: their own tenant's dashboard
pub fn workspace_home(user: &User) -> String {
    match TenantId::new(user.slug()) {
        Some(tenant) => Route::Dashboard.under(&TenantContext::for_tenant(tenant)),
        None => Route::Dashboard.under(&TenantContext::unscoped()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardPhase {
    Init,
    Waiting,
    Decided,
}

/// What the page should show after a guard step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "render", content = "location", rename_all = "lowercase")]
pub enum GuardOutcome {
    /// Session still loading; show the placeholder
    Loading,
    /// Show the page's primary content
    Primary,
    /// Navigating away; primary content is not shown
    Redirect(String),
    /// Page is gone; nothing to show or do
    Unmounted,
}

#[derive(Debug)]
pub struct RedirectGuard {
    policy: GuardPolicy,
    phase: GuardPhase,
    navigated: bool,
    mounted: bool,
}

impl RedirectGuard {
    pub fn new(policy: GuardPolicy) -> Self {
        Self {
            policy,
            phase: GuardPhase::Init,
            navigated: false,
            mounted: true,
        }
    }

    pub fn phase(&self) -> GuardPhase {
        self.phase
    }

    pub fn has_navigated(&self) -> bool {
        self.navigated
    }

    /// Transition on the latest session snapshot.
    ///
    /// Never navigates while `is_loading` is set, and issues at most one
    /// `replace` over the guard's lifetime.
    pub fn observe(&mut self, session: &Session, navigator: &mut dyn Navigator) -> GuardOutcome {
        if !self.mounted {
            return GuardOutcome::Unmounted;
        }

        if session.is_loading {
            self.phase = GuardPhase::Waiting;
            return GuardOutcome::Loading;
        }

        self.phase = GuardPhase::Decided;
        match self.policy.destination(session.user.as_ref()) {
            Some(destination) => {
                if !self.navigated {
                    tracing::debug!("Redirect guard replacing location with {}", destination);
                    navigator.replace(&destination);
                    self.navigated = true;
                }
                GuardOutcome::Redirect(destination)
            }
            None => GuardOutcome::Primary,
        }
    }

    /// Failed lookups are decided as a signed-out session
    pub fn observe_state(&mut self, state: &SessionState, navigator: &mut dyn Navigator) -> GuardOutcome {
        self.observe(&state.effective(), navigator)
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
    }
}

#[derive(Debug, Error)]
pub enum GuardError {
    #[error("Redirect guard task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Final state of a mounted guard
#[derive(Debug)]
pub struct GuardSettlement<N> {
    pub outcome: GuardOutcome,
    pub navigator: N,
}

/// A guard running against a live session feed.
///
/// Dropping the handle unmounts the guard.
pub struct MountedGuard<N> {
    unmount: Option<oneshot::Sender<()>>,
    task: JoinHandle<GuardSettlement<N>>,
}

/// Start `guard` on `sessions`, navigating through `navigator`
pub fn mount<N>(guard: RedirectGuard, sessions: watch::Receiver<SessionState>, navigator: N) -> MountedGuard<N>
where
    N: Navigator + Send + 'static,
{
    let (unmount_tx, unmount_rx) = oneshot::channel();
    let task = tokio::spawn(run(guard, sessions, navigator, unmount_rx));

    MountedGuard {
        unmount: Some(unmount_tx),
        task,
    }
}

impl<N> MountedGuard<N> {
    /// Discard any pending navigation. A guard that already decided keeps
    /// its outcome.
    pub fn unmount(&mut self) {
        if let Some(tx) = self.unmount.take() {
            let _ = tx.send(());
        }
    }

    /// Wait for the guard to decide or observe its unmount
    pub async fn settled(self) -> Result<GuardSettlement<N>, GuardError> {
        let MountedGuard { unmount, task } = self;
        let settlement = task.await?;
        drop(unmount);
        Ok(settlement)
    }
}

async fn run<N: Navigator>(
    mut guard: RedirectGuard,
    mut sessions: watch::Receiver<SessionState>,
    mut navigator: N,
    mut unmount: oneshot::Receiver<()>,
) -> GuardSettlement<N> {
    loop {
        if !matches!(unmount.try_recv(), Err(oneshot::error::TryRecvError::Empty)) {
            guard.unmount();
            return GuardSettlement { outcome: GuardOutcome::Unmounted, navigator };
        }

        let state = sessions.borrow_and_update().clone();
        let outcome = guard.observe_state(&state, &mut navigator);
        if guard.phase() == GuardPhase::Decided {
            return GuardSettlement { outcome, navigator };
        }

        tokio::select! {
            biased;

            _ = &mut unmount => {
                guard.unmount();
                tracing::debug!("Page unmounted before session resolved");
                return GuardSettlement { outcome: GuardOutcome::Unmounted, navigator };
            }
            changed = sessions.changed() => {
                if changed.is_err() {
                    let closed = SessionState::Failed(SessionError::FeedClosed);
                    let outcome = guard.observe_state(&closed, &mut navigator);
                    return GuardSettlement { outcome, navigator };
                }
            }
        }
    }
}
