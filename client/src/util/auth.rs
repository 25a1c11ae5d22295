//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical redirect behavior. Redirects
//! wait for the first identity check to settle so a reload on a protected
//! page does not bounce through the login screen.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use profiteer::AuthState;
use profiteer::forms::{DASHBOARD_PATH, LOGIN_PATH};

/// Where a protected route should send this visitor, if anywhere.
pub fn unauth_redirect_target(state: &AuthState) -> Option<&'static str> {
    state.should_redirect_to_login().then_some(LOGIN_PATH)
}

/// Where the login route should forward this visitor, if anywhere.
pub fn authed_redirect_target(state: &AuthState) -> Option<&'static str> {
    state.should_redirect_to_dashboard().then_some(DASHBOARD_PATH)
}

/// Redirect to login whenever auth has settled and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    install_redirect(auth, navigate, unauth_redirect_target);
}

/// Redirect to the dashboard once auth has settled with a user present.
pub fn install_authed_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    install_redirect(auth, navigate, authed_redirect_target);
}

fn install_redirect<F>(auth: RwSignal<AuthState>, navigate: F, target: fn(&AuthState) -> Option<&'static str>)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let state = auth.get();
        if let Some(path) = target(&state) {
            navigate(path, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
