//! Account registration card with per-field errors.

use leptos::prelude::*;
use profiteer::forms::register::{RegisterErrors, RegisterField, RegisterForm, RegisterOutcome, submit_registration};

use crate::components::notice_tray::notify;
use crate::state::auth::AppApi;
use crate::state::notice::{NoticeKind, NoticeState};

fn label(field: RegisterField) -> &'static str {
    match field {
        RegisterField::FirstName => "First Name",
        RegisterField::LastName => "Last Name",
        RegisterField::Email => "Email",
        RegisterField::Username => "Username",
        RegisterField::Password => "Password",
        RegisterField::ConfirmPassword => "Confirm Password",
    }
}

fn input_type(field: RegisterField) -> &'static str {
    match field {
        RegisterField::Email => "email",
        RegisterField::Password | RegisterField::ConfirmPassword => "password",
        _ => "text",
    }
}

#[component]
fn RegisterInput(
    field: RegisterField,
    form: RwSignal<RegisterForm>,
    errors: RwSignal<RegisterErrors>,
    busy: RwSignal<bool>,
) -> impl IntoView {
    let error = move || errors.with(|e| e.get(field).map(str::to_owned));
    let on_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        form.update(|f| f.set(field, value));
        // Clear eagerly; the next submit re-validates everything.
        if errors.with_untracked(|e| e.get(field).is_some()) {
            errors.update(|e| {
                e.clear(field);
            });
        }
    };

    view! {
        <label class="form__field">
            <span class="form__label">{label(field)}</span>
            <input
                class=move || if error().is_some() { "form__input form__input--invalid" } else { "form__input" }
                type=input_type(field)
                name=field.wire_name()
                prop:value=move || form.with(|f| f.value(field).to_owned())
                on:input=on_input
                disabled=move || busy.get()
            />
            <Show when=move || error().is_some()>
                <span class="form__error">{move || error().unwrap_or_default()}</span>
            </Show>
        </label>
    }
}

#[component]
pub fn RegisterCard() -> impl IntoView {
    let api = expect_context::<AppApi>();
    let notices = expect_context::<RwSignal<NoticeState>>();

    let form = RwSignal::new(RegisterForm::default());
    let errors = RwSignal::new(RegisterErrors::default());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let fields = form.get_untracked();
        let local = fields.validate();
        if !local.is_empty() {
            errors.set(local);
            return;
        }
        busy.set(true);

        let api = api.clone();
        leptos::task::spawn_local(async move {
            match submit_registration(&api.auth, &fields).await {
                RegisterOutcome::Invalid(found) => errors.set(found),
                RegisterOutcome::Registered { message, verification_sent } => {
                    let hint = verification_sent.then_some("Check your inbox to verify your email.");
                    notify(notices, NoticeKind::Success, &message, hint);
                    form.set(RegisterForm::default());
                    errors.set(RegisterErrors::default());
                }
                RegisterOutcome::Rejected { errors: found, notice } => {
                    notify(notices, NoticeKind::Error, &notice, None);
                    errors.set(found);
                }
            }
            busy.set(false);
        });
    };

    view! {
        <div class="card">
            <h1 class="card__title">"Create Account"</h1>
            <p class="card__subtitle">"Enter your information to create a new account"</p>
            <form class="form" on:submit=on_submit novalidate>
                <div class="form__row">
                    <RegisterInput field=RegisterField::FirstName form=form errors=errors busy=busy/>
                    <RegisterInput field=RegisterField::LastName form=form errors=errors busy=busy/>
                </div>
                <RegisterInput field=RegisterField::Email form=form errors=errors busy=busy/>
                <RegisterInput field=RegisterField::Username form=form errors=errors busy=busy/>
                <RegisterInput field=RegisterField::Password form=form errors=errors busy=busy/>
                <RegisterInput field=RegisterField::ConfirmPassword form=form errors=errors busy=busy/>
                <button class="btn btn--primary form__submit" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Creating account..." } else { "Create Account" }}
                </button>
            </form>
            <p class="card__footer">
                "Already have an account? " <a href="/">"Login"</a>
            </p>
        </div>
    }
}
