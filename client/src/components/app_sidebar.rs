//! Dashboard sidebar: identity header, profile entry point, logout.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use profiteer::AuthState;
use profiteer::forms::LOGIN_PATH;

use crate::components::notice_tray::notify;
use crate::components::profile_sheet::ProfileSheet;
use crate::state::auth::{AppApi, AppSession};
use crate::state::notice::{NoticeKind, NoticeState};

/// Initials for the avatar fallback.
fn initials(state: &AuthState) -> String {
    state
        .user
        .as_ref()
        .map(|u| u.fname.chars().take(1).chain(u.lname.chars().take(1)).collect::<String>().to_uppercase())
        .unwrap_or_default()
}

#[component]
pub fn AppSidebar() -> impl IntoView {
    let api = expect_context::<AppApi>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = expect_context::<AppSession>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let navigate = use_navigate();

    let show_profile = RwSignal::new(false);
    let logging_out = RwSignal::new(false);

    let avatar_url = move || {
        auth.get()
            .user
            .and_then(|u| u.profile)
            .map(|file| api.users.profile_image_url(&file))
    };

    let on_logout = move |_| {
        if logging_out.get_untracked() {
            return;
        }
        logging_out.set(true);
        let session = session.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            // Local identity is cleared even when the server call fails.
            session.logout().await;
            notify(notices, NoticeKind::Success, "Logout successful!", Some("You have been logged out successfully."));
            logging_out.set(false);
            navigate(LOGIN_PATH, NavigateOptions::default());
        });
    };

    view! {
        <aside class="sidebar">
            <button class="sidebar__identity" title="Edit profile" on:click=move |_| show_profile.set(true)>
                <span class="avatar">
                    {move || match avatar_url() {
                        Some(src) => view! { <img class="avatar__image" src=src alt="Profile"/> }.into_any(),
                        None => view! { <span class="avatar__initials">{initials(&auth.get())}</span> }.into_any(),
                    }}
                </span>
                <span class="sidebar__who">
                    {move || {
                        let state = auth.get();
                        match (&state.user, state.loading) {
                            (_, true) => view! { <span class="sidebar__muted">"Loading..."</span> }.into_any(),
                            (Some(user), false) => view! {
                                <span class="sidebar__name">{user.display_name()}</span>
                                <span class="sidebar__email">{user.email.clone()}</span>
                            }
                            .into_any(),
                            (None, false) => view! { <span class="sidebar__muted">"Not signed in"</span> }.into_any(),
                        }
                    }}
                </span>
            </button>

            <nav class="sidebar__nav">
                <a class="sidebar__link sidebar__link--active" href="/dashboard">"Dashboard"</a>
            </nav>

            <div class="sidebar__footer">
                <button class="btn sidebar__logout" on:click=on_logout disabled=move || logging_out.get()>
                    {move || if logging_out.get() { "Logging out..." } else { "Log out" }}
                </button>
            </div>

            <Show when=move || show_profile.get()>
                <ProfileSheet on_close=Callback::new(move |()| show_profile.set(false))/>
            </Show>
        </aside>
    }
}
