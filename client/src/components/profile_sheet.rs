//! Side sheet for editing the current user's profile and password.
//!
//! DESIGN
//! ======
//! The profile tab seeds its fields from the session user and re-seeds only
//! when that user record changes, so a background refresh keeps unsaved edits. A picked image is read into memory
//! immediately, so the save flow only deals with plain bytes. The password
//! tab validates locally and then explains that the server cannot change
//! passwords yet.

#[cfg(test)]
#[path = "profile_sheet_test.rs"]
mod profile_sheet_test;

use leptos::prelude::*;
use profiteer::{AuthState, User};
use profiteer::forms::profile::{
    NO_CHANGES_MESSAGE, PASSWORD_UNSUPPORTED_MESSAGE, PasswordChangeForm, ProfileForm, ProfileOutcome, save_profile,
};
#[cfg(feature = "csr")]
use profiteer::forms::profile::check_image;
use profiteer::types::ImageUpload;

use crate::components::notice_tray::notify;
use crate::state::auth::{AppApi, AppSession};
use crate::state::notice::{NoticeKind, NoticeState};
use crate::util::browser::revoke_preview;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SheetTab {
    Profile,
    Password,
}

/// The part of the session the profile form is seeded from.
fn seed_user(state: &AuthState) -> Option<User> {
    state.user.clone()
}

#[component]
pub fn ProfileSheet(on_close: Callback<()>) -> impl IntoView {
    let api = expect_context::<AppApi>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = expect_context::<AppSession>();
    let notices = expect_context::<RwSignal<NoticeState>>();

    let tab = RwSignal::new(SheetTab::Profile);
    let form = RwSignal::new(ProfileForm::default());
    let upload = RwSignal::new(None::<ImageUpload>);
    let preview = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);
    let password = RwSignal::new(PasswordChangeForm::default());

    let image_api = api.clone();
    let seed = Memo::new(move |_| auth.with(seed_user));
    Effect::new(move || {
        if let Some(user) = seed.get() {
            form.set(ProfileForm::from_user(&user));
            if upload.get_untracked().is_none() {
                if let Some(old) = preview.get_untracked() {
                    revoke_preview(&old);
                }
                preview.set(user.profile.as_deref().map(|file| image_api.users.profile_image_url(file)));
            }
        }
    });
    on_cleanup(move || {
        if let Some(url) = preview.get_untracked() {
            revoke_preview(&url);
        }
    });

    let on_backdrop = move |_| on_close.run(());
    let on_keydown = Callback::new(move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            on_close.run(());
        }
    });

    #[cfg_attr(not(feature = "csr"), allow(unused_variables))]
    let on_image = move |ev: leptos::ev::Event| {
        #[cfg(feature = "csr")]
        {
            let Some(file) = crate::util::browser::selected_file(&ev) else {
                return;
            };
            if let Err(rejection) = check_image(&file.type_(), crate::util::browser::file_size(&file)) {
                notify(notices, NoticeKind::Error, rejection.title(), Some(rejection.description()));
                return;
            }
            leptos::task::spawn_local(async move {
                match crate::util::browser::read_image(&file).await {
                    Ok(image) => {
                        if let Some(old) = preview.get_untracked() {
                            revoke_preview(&old);
                        }
                        preview.set(crate::util::browser::preview_url(&file));
                        upload.set(Some(image));
                        notify(
                            notices,
                            NoticeKind::Success,
                            "Image selected!",
                            Some("Click 'Save Changes' to upload your new profile picture."),
                        );
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "reading selected image failed");
                        notify(notices, NoticeKind::Error, "Could not read file", Some(&e));
                    }
                }
            });
        }
    };

    let on_save_profile = move |_| {
        if saving.get_untracked() {
            return;
        }
        saving.set(true);
        let api = api.clone();
        let session = session.clone();
        let fields = form.get_untracked();
        let image = upload.get_untracked();
        leptos::task::spawn_local(async move {
            match save_profile(&api.users, &session, &fields, image).await {
                ProfileOutcome::Unchanged => {
                    notify(notices, NoticeKind::Info, "No changes detected", Some(NO_CHANGES_MESSAGE));
                }
                ProfileOutcome::Saved { message } => {
                    upload.set(None);
                    notify(notices, NoticeKind::Success, "Profile updated!", Some(&message));
                }
                ProfileOutcome::Failed(message) => {
                    notify(notices, NoticeKind::Error, "Failed to update profile", Some(&message));
                }
            }
            saving.set(false);
        });
    };

    let on_save_password = move |_| match password.get_untracked().check() {
        Err(rejection) => {
            notify(notices, NoticeKind::Error, rejection.title(), Some(rejection.description()));
        }
        Ok(()) => {
            password.set(PasswordChangeForm::default());
            notify(notices, NoticeKind::Info, "Password not changed", Some(PASSWORD_UNSUPPORTED_MESSAGE));
        }
    };

    let tab_class = move |which: SheetTab| {
        move || if tab.get() == which { "tabs__tab tabs__tab--active" } else { "tabs__tab" }
    };

    view! {
        <div class="dialog-backdrop" on:click=on_backdrop>
            <div
                class="sheet"
                on:click=move |ev| ev.stop_propagation()
                on:keydown=move |ev| on_keydown.run(ev)
                tabindex="0"
            >
                <header class="sheet__header">
                    <h2>"Edit Profile"</h2>
                    <p class="sheet__description">"Update your personal information"</p>
                    <button class="sheet__close" title="Close" on:click=move |_| on_close.run(())>"×"</button>
                </header>

                <div class="tabs" role="tablist">
                    <button class=tab_class(SheetTab::Profile) on:click=move |_| tab.set(SheetTab::Profile)>"Profile"</button>
                    <button class=tab_class(SheetTab::Password) on:click=move |_| tab.set(SheetTab::Password)>"Password"</button>
                </div>

                <Show when=move || tab.get() == SheetTab::Profile>
                    <section class="sheet__section">
                        <div class="sheet__avatar">
                            {move || match preview.get() {
                                Some(src) => view! { <img class="avatar__image avatar--large" src=src alt="Profile"/> }.into_any(),
                                None => view! { <span class="avatar avatar--large avatar--empty"></span> }.into_any(),
                            }}
                            <label class="btn btn--outline" for="profile-upload">
                                {move || if upload.get().is_some() { "Change Photo" } else { "Upload Photo" }}
                            </label>
                            <input
                                id="profile-upload"
                                class="sheet__file"
                                type="file"
                                accept="image/*"
                                on:change=on_image
                                disabled=move || saving.get()
                            />
                            <Show when=move || upload.get().is_some()>
                                <p class="sheet__hint">
                                    {move || upload.get().map(|u| format!("{} selected", u.filename)).unwrap_or_default()}
                                </p>
                            </Show>
                        </div>

                        <label class="form__field">
                            <span class="form__label">"First Name"</span>
                            <input
                                class="form__input"
                                name="fname"
                                prop:value=move || form.get().fname
                                on:input=move |ev| form.update(|f| f.fname = event_target_value(&ev))
                            />
                        </label>
                        <label class="form__field">
                            <span class="form__label">"Last Name"</span>
                            <input
                                class="form__input"
                                name="lname"
                                prop:value=move || form.get().lname
                                on:input=move |ev| form.update(|f| f.lname = event_target_value(&ev))
                            />
                        </label>
                        <label class="form__field">
                            <span class="form__label">"Username"</span>
                            <input
                                class="form__input"
                                name="username"
                                prop:value=move || form.get().username
                                on:input=move |ev| form.update(|f| f.username = event_target_value(&ev))
                            />
                        </label>

                        <button class="btn btn--primary" on:click=on_save_profile.clone() disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { "Save Changes" }}
                        </button>
                    </section>
                </Show>

                <Show when=move || tab.get() == SheetTab::Password>
                    <section class="sheet__section">
                        <label class="form__field">
                            <span class="form__label">"Current Password"</span>
                            <input
                                class="form__input"
                                type="password"
                                autocomplete="current-password"
                                prop:value=move || password.get().current
                                on:input=move |ev| password.update(|p| p.current = event_target_value(&ev))
                            />
                        </label>
                        <label class="form__field">
                            <span class="form__label">"New Password"</span>
                            <input
                                class="form__input"
                                type="password"
                                autocomplete="new-password"
                                prop:value=move || password.get().new
                                on:input=move |ev| password.update(|p| p.new = event_target_value(&ev))
                            />
                        </label>
                        <label class="form__field">
                            <span class="form__label">"Confirm Password"</span>
                            <input
                                class="form__input"
                                type="password"
                                autocomplete="new-password"
                                prop:value=move || password.get().confirm
                                on:input=move |ev| password.update(|p| p.confirm = event_target_value(&ev))
                            />
                        </label>
                        <button class="btn btn--primary" on:click=on_save_password>
                            "Update Password"
                        </button>
                    </section>
                </Show>
            </div>
        </div>
    }
}
