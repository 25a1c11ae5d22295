//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};
use profiteer::{Api, ApiConfig, AuthState, Session};

use crate::components::notice_tray::NoticeTray;
use crate::net::browser::BrowserTransport;
use crate::pages::{dashboard::DashboardPage, login::LoginPage, register::RegisterPage};
use crate::state::auth::{AppApi, AppSession, SignalStore};
use crate::state::notice::NoticeState;

/// Baked in at build time; unset means same-origin relative URLs.
const API_URL: Option<&str> = option_env!("PROFITEER_API_URL");

/// Install console logging and the panic hook, then mount `App`.
#[cfg(feature = "csr")]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("console logger unavailable: {e}").into());
    }
    leptos::mount::mount_to_body(App);
}

fn api_config() -> ApiConfig {
    match ApiConfig::new(API_URL) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "ignoring invalid PROFITEER_API_URL; using relative URLs");
            ApiConfig::default()
        }
    }
}

/// Root application component.
///
/// Provides the API facades, the auth signal, the session, and the notice
/// queue, then checks identity once and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let api: AppApi = Api::new(api_config(), BrowserTransport);
    let auth = RwSignal::new(AuthState::default());
    let session: AppSession = Session::new(api.auth.clone(), SignalStore(auth));
    let notices = RwSignal::new(NoticeState::default());

    provide_context(api);
    provide_context(auth);
    provide_context(session.clone());
    provide_context(notices);

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        session.initialize().await;
    });

    view! {
        <Title text="Swine Profiteer"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=LoginPage/>
                <Route path=StaticSegment("register") view=RegisterPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
            </Routes>
        </Router>
        <NoticeTray/>
    }
}
