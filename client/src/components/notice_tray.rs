//! Corner tray for transient notices.

use leptos::prelude::*;

use crate::state::notice::{NoticeKind, NoticeState};

/// Queue a notice and schedule its auto-dismissal. Returns the notice id.
pub fn notify(notices: RwSignal<NoticeState>, kind: NoticeKind, title: &str, description: Option<&str>) -> u64 {
    let mut id = 0;
    notices.update(|s| id = s.push(kind, title, description));

    #[cfg(feature = "csr")]
    gloo_timers::callback::Timeout::new(crate::state::notice::NOTICE_TTL_MS, move || {
        notices.update(|s| {
            s.dismiss(id);
        });
    })
    .forget();

    id
}

#[component]
pub fn NoticeTray() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    view! {
        <div class="notice-tray" role="status" aria-live="polite">
            <For
                each=move || notices.get().items
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div class=notice.kind.class()>
                            <div class="notice__body">
                                <p class="notice__title">{notice.title}</p>
                                {notice.description.map(|d| view! { <p class="notice__description">{d}</p> })}
                            </div>
                            <button
                                class="notice__close"
                                title="Dismiss"
                                on:click=move |_| notices.update(|s| {
                                    s.dismiss(id);
                                })
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
