//! Registration page.

use leptos::prelude::*;

use crate::components::register_card::RegisterCard;

#[component]
pub fn RegisterPage() -> impl IntoView {
    view! {
        <div class="auth-page">
            <RegisterCard/>
        </div>
    }
}
