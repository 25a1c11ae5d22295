//! Login page. Signed-in visitors are forwarded to the dashboard.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use profiteer::{AuthState, SessionPhase};

use crate::components::login_card::LoginCard;
use crate::util::auth::install_authed_redirect;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_authed_redirect(auth, use_navigate());

    // Hold the form back until we know whether to redirect.
    let checking = move || auth.with(|s| matches!(s.phase(), SessionPhase::Uninitialized | SessionPhase::Loading));

    view! {
        <div class="auth-page">
            <Show
                when=move || !checking()
                fallback=|| view! { <p class="auth-page__status">"Checking session..."</p> }
            >
                <LoginCard/>
            </Show>
        </div>
    }
}
