use api::Backend;
use dioxus::prelude::*;

use crate::auth::use_backend;

/// Signed-in user's details and the sign-out action.
#[component]
pub fn Profile() -> Element {
    let backend = use_backend();
    let mut signing_out = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let user = use_resource({
        let backend = backend.clone();
        move || {
            let backend = backend.clone();
            async move { backend.current_user().await }
        }
    });

    let handle_sign_out = move |_: MouseEvent| {
        let backend = backend.clone();
        async move {
            signing_out.set(true);
            error.set(None);
            // On success the session gate sees the change and swaps in the sign-in view.
            if let Err(e) = backend.sign_out().await {
                tracing::warn!("Sign out failed: {}", e);
                error.set(Some(e.message()));
            }
            signing_out.set(false);
        }
    };

    let content = match &*user.read() {
        None => rsx! { p { class: "muted", "Loading profile..." } },
        Some(Ok(None)) => rsx! {},
        Some(Err(e)) => {
            let message = e.message();
            rsx! {
                div { class: "alert alert-error", "Could not load your profile: {message}" }
            }
        }
        Some(Ok(Some(user))) => {
            let last_sign_in = user
                .last_sign_in_at
                .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
                .unwrap_or_else(|| "Never".to_string());
            let email = user.email.clone().unwrap_or_default();
            rsx! {
                div {
                    class: "profile-details",
                    p { strong { "Email: " } "{email}" }
                    p { strong { "ID: " } "{user.id}" }
                    p { strong { "Last Sign In: " } "{last_sign_in}" }
                }
            }
        }
    };

    rsx! {
        div {
            class: "container narrow",
            div {
                class: "card",
                h2 { "User Profile" }
                {content}
                if let Some(err) = error() {
                    div { class: "alert alert-error", "{err}" }
                }
                button {
                    class: "btn btn-danger",
                    disabled: signing_out(),
                    onclick: handle_sign_out,
                    if signing_out() { "Signing out..." } else { "Sign Out" }
                }
            }
        }
    }
}
