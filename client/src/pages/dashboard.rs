//! Dashboard shell for signed-in users.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. It waits for the session check,
//! sends anonymous visitors back to login, and otherwise renders the sidebar
//! layout.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use profiteer::{AuthState, SessionPhase};

use crate::components::app_sidebar::AppSidebar;
use crate::util::auth::install_unauth_redirect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DashboardView {
    Pending,
    Anonymous,
    Ready,
}

/// A known user keeps the layout mounted through background refreshes.
fn dashboard_view(state: &AuthState) -> DashboardView {
    if state.user.is_some() {
        return DashboardView::Ready;
    }
    match state.phase() {
        SessionPhase::Anonymous => DashboardView::Anonymous,
        _ => DashboardView::Pending,
    }
}

/// Dashboard page. Redirects to `/` if the user is not authenticated.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    let current = Memo::new(move |_| auth.with(dashboard_view));
    let greeting = move || {
        auth.with(|s| s.user.as_ref().map(|u| format!("Welcome, {}!", u.fname)).unwrap_or_default())
    };

    view! {
        {move || match current.get() {
            DashboardView::Pending => view! {
                <div class="page-status">
                    <p>"Loading dashboard..."</p>
                    <div class="progress"><div class="progress__bar"></div></div>
                </div>
            }
            .into_any(),
            DashboardView::Anonymous => ().into_any(),
            DashboardView::Ready => view! {
                <div class="layout">
                    <AppSidebar/>
                    <main class="layout__main">
                        <header class="layout__header">
                            <nav class="breadcrumb">"Dashboard"</nav>
                        </header>
                        <section class="layout__content">
                            <h1>{greeting}</h1>
                            <div class="layout__grid">
                                <div class="tile"></div>
                                <div class="tile"></div>
                                <div class="tile"></div>
                            </div>
                        </section>
                    </main>
                </div>
            }
            .into_any(),
        }}
    }
}
