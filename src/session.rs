//! Current-user session cache.
//!
//! ARCHITECTURE
//! ============
//! `AuthState` is a plain value with pure transitions. A `SessionStore`
//! holds the single shared instance (a Leptos signal in the browser, a
//! `tokio::sync::watch` channel natively). `Session` is the only writer: it
//! pairs the store with `AuthApi` and drives the transitions from API
//! results. Readers observe the store and never mutate it.
//!
//! Overlapping `refresh` calls are not coalesced; whichever response settles
//! last wins.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::api::AuthApi;
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::User;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
    /// Set once the first identity check has settled.
    pub resolved: bool,
    /// Last unexpected identity-check failure, for display.
    pub error: Option<String>,
}

/// Derived view of `AuthState` for route guards and rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase<'a> {
    Uninitialized,
    Loading,
    Authenticated(&'a User),
    Anonymous,
}

impl AuthState {
    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Settle an identity check. 401 is the normal "not logged in" answer
    /// and is not recorded as an error.
    pub fn finish_fetch(&mut self, result: Result<User, ApiError>) {
        match result {
            Ok(user) => self.user = Some(user),
            Err(err) => {
                self.user = None;
                if !err.is_unauthorized() {
                    self.error = Some(err.to_string());
                }
            }
        }
        self.loading = false;
        self.resolved = true;
    }

    pub fn sign_out(&mut self) {
        self.user = None;
        self.resolved = true;
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase<'_> {
        if self.loading {
            return SessionPhase::Loading;
        }
        match (&self.user, self.resolved) {
            (Some(user), _) => SessionPhase::Authenticated(user),
            (None, true) => SessionPhase::Anonymous,
            (None, false) => SessionPhase::Uninitialized,
        }
    }

    /// Protected routes send the visitor to login once we know they are anonymous.
    #[must_use]
    pub fn should_redirect_to_login(&self) -> bool {
        matches!(self.phase(), SessionPhase::Anonymous)
    }

    /// The login route forwards an already-authenticated visitor.
    #[must_use]
    pub fn should_redirect_to_dashboard(&self) -> bool {
        matches!(self.phase(), SessionPhase::Authenticated(_))
    }
}

/// Holder of the one shared `AuthState`.
pub trait SessionStore {
    fn snapshot(&self) -> AuthState;
    fn update(&self, apply: impl FnOnce(&mut AuthState));
}

/// Single writer over a `SessionStore`.
#[derive(Clone, Debug)]
pub struct Session<T, S> {
    api: AuthApi<T>,
    store: S,
}

impl<T: Transport, S: SessionStore> Session<T, S> {
    pub fn new(api: AuthApi<T>, store: S) -> Self {
        Self { api, store }
    }

    pub fn state(&self) -> AuthState {
        self.store.snapshot()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mount-time identity check. Only runs from `Uninitialized`, so a
    /// remount or a second provider does not issue a second request.
    pub async fn initialize(&self) {
        if matches!(self.store.snapshot().phase(), SessionPhase::Uninitialized) {
            self.refresh().await;
        }
    }

    /// Re-issue the identity check.
    pub async fn refresh(&self) {
        self.store.update(AuthState::begin_fetch);
        let result = self.api.current_user().await;
        match &result {
            Ok(user) => tracing::debug!(user_id = %user.id, "session resolved"),
            Err(err) if err.is_unauthorized() => tracing::debug!("session anonymous"),
            Err(err) => tracing::warn!(error = %err, "identity check failed"),
        }
        self.store.update(|state| state.finish_fetch(result));
    }

    /// Tell the server to end the session, then clear local identity
    /// whatever the server said.
    pub async fn logout(&self) {
        if let Err(err) = self.api.logout().await {
            tracing::warn!(error = %err, "logout request failed; clearing local session anyway");
        }
        self.store.update(AuthState::sign_out);
    }
}

#[cfg(feature = "native")]
pub use watch_store::WatchStore;

#[cfg(feature = "native")]
mod watch_store {
    use std::sync::Arc;

    use tokio::sync::watch;

    use super::{AuthState, SessionStore};

    /// `SessionStore` on a `tokio::sync::watch` channel; clones share state.
    #[derive(Clone, Debug)]
    pub struct WatchStore {
        tx: Arc<watch::Sender<AuthState>>,
    }

    impl WatchStore {
        #[must_use]
        pub fn new() -> Self {
            let (tx, _rx) = watch::channel(AuthState::default());
            Self { tx: Arc::new(tx) }
        }

        /// Observer handle that sees every published state.
        #[must_use]
        pub fn subscribe(&self) -> watch::Receiver<AuthState> {
            self.tx.subscribe()
        }
    }

    impl Default for WatchStore {
        fn default() -> Self {
            Self::new()
        }
    }

    impl SessionStore for WatchStore {
        fn snapshot(&self) -> AuthState {
            self.tx.borrow().clone()
        }

        fn update(&self, apply: impl FnOnce(&mut AuthState)) {
            self.tx.send_modify(apply);
        }
    }
}
