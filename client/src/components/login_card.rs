//! Username + password sign-in card.

use leptos::prelude::*;
use profiteer::forms::login::{LoginForm, LoginOutcome, submit_login};

use crate::components::notice_tray::notify;
use crate::state::auth::AppApi;
use crate::state::notice::{NoticeKind, NoticeState};
use crate::util::browser::hard_navigate;

#[component]
pub fn LoginCard() -> impl IntoView {
    let api = expect_context::<AppApi>();
    let notices = expect_context::<RwSignal<NoticeState>>();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let form = move || LoginForm { username: username.get(), password: password.get() };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let fields = LoginForm { username: username.get_untracked(), password: password.get_untracked() };
        if !fields.can_submit() {
            return;
        }
        busy.set(true);
        error.set(None);

        let api = api.clone();
        leptos::task::spawn_local(async move {
            let outcome = submit_login(&api.auth, &fields).await;
            match &outcome {
                LoginOutcome::LoggedIn { user, .. } => {
                    let welcome = format!("Welcome back, {}!", user.fname);
                    notify(notices, NoticeKind::Success, "Login successful!", Some(&welcome));
                }
                LoginOutcome::Failed(message) => {
                    notify(notices, NoticeKind::Error, "Login failed", Some(message));
                    error.set(Some(message.clone()));
                }
                LoginOutcome::Incomplete => {}
            }
            // Full reload so the dashboard boots with the fresh cookie.
            match outcome.redirect() {
                Some(path) => hard_navigate(path),
                None => busy.set(false),
            }
        });
    };

    // Editing either field clears the banner.
    let on_username = move |ev: leptos::ev::Event| {
        username.set(event_target_value(&ev));
        error.set(None);
    };
    let on_password = move |ev: leptos::ev::Event| {
        password.set(event_target_value(&ev));
        error.set(None);
    };

    view! {
        <div class="card">
            <h1 class="card__title">"Login to your account"</h1>
            <p class="card__subtitle">"Enter your username and password below"</p>
            <form class="form" on:submit=on_submit>
                <Show when=move || error.get().is_some()>
                    <div class="form__banner" role="alert">{move || error.get().unwrap_or_default()}</div>
                </Show>
                <label class="form__field">
                    <span class="form__label">"Username"</span>
                    <input
                        class="form__input"
                        type="text"
                        name="username"
                        autocomplete="username"
                        required
                        prop:value=move || username.get()
                        on:input=on_username
                        disabled=move || busy.get()
                    />
                </label>
                <label class="form__field">
                    <span class="form__label">"Password"</span>
                    <input
                        class="form__input"
                        type="password"
                        name="password"
                        autocomplete="current-password"
                        required
                        prop:value=move || password.get()
                        on:input=on_password
                        disabled=move || busy.get()
                    />
                </label>
                <button
                    class="btn btn--primary form__submit"
                    type="submit"
                    disabled=move || busy.get() || !form().can_submit()
                >
                    {move || if busy.get() { "Logging in..." } else { "Login" }}
                </button>
            </form>
            <p class="card__footer">
                "Don't have an account? " <a href="/register">"Sign up"</a>
            </p>
        </div>
    }
}
