//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login
//! redirects and identity-dependent rendering. The `RwSignal<AuthState>` is
//! provided once at the root; `AppSession` is its only writer.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use profiteer::{Api, AuthState, Session, SessionStore};

use crate::net::browser::BrowserTransport;

pub type AppApi = Api<BrowserTransport>;
pub type AppSession = Session<BrowserTransport, SignalStore>;

/// `SessionStore` over the context-provided signal, so every reader
/// re-renders when the session settles.
#[derive(Clone, Copy, Debug)]
pub struct SignalStore(pub RwSignal<AuthState>);

impl SessionStore for SignalStore {
    fn snapshot(&self) -> AuthState {
        self.0.get_untracked()
    }

    fn update(&self, apply: impl FnOnce(&mut AuthState)) {
        self.0.update(apply);
    }
}
