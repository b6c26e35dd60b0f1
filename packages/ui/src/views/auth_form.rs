//! Sign-in / sign-up view shown to visitors without a session.

use api::Backend;
use dioxus::prelude::*;

use crate::auth::{use_auth, use_backend};

/// Minimum password length accepted by the backend's default policy.
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

impl AuthMode {
    fn title(self) -> &'static str {
        match self {
            AuthMode::SignIn => "Sign in to your account",
            AuthMode::SignUp => "Create your account",
        }
    }

    fn action(self) -> &'static str {
        match self {
            AuthMode::SignIn => "Sign in",
            AuthMode::SignUp => "Sign up",
        }
    }

    fn toggled(self) -> Self {
        match self {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        }
    }
}

/// Required-field checks done before calling the backend.
pub fn validate_credentials(mode: AuthMode, email: &str, password: &str) -> Result<(), &'static str> {
    if email.is_empty() || !email.contains('@') {
        return Err("Please enter a valid email");
    }
    if password.is_empty() {
        return Err("Password is required");
    }
    if mode == AuthMode::SignUp && password.len() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters");
    }
    Ok(())
}

#[component]
pub fn AuthForm() -> Element {
    let backend = use_backend();
    let auth = use_auth();
    let mut mode = use_signal(|| AuthMode::SignIn);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(move || auth.load_error.cloned());
    let mut notice = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let backend = backend.clone();
        spawn(async move {
            error.set(None);
            notice.set(None);

            let e = email().trim().to_string();
            let p = password();
            if let Err(msg) = validate_credentials(mode(), &e, &p) {
                error.set(Some(msg.to_string()));
                return;
            }

            loading.set(true);
            // A successful sign-in is pushed to the session gate, which unmounts this view.
            let result = match mode() {
                AuthMode::SignIn => backend.sign_in(&e, &p).await.map(|_| ()),
                AuthMode::SignUp => match backend.sign_up(&e, &p).await {
                    Ok(Some(_)) => Ok(()),
                    Ok(None) => {
                        notice.set(Some(
                            "Check your email to confirm your account, then sign in.".to_string(),
                        ));
                        mode.set(AuthMode::SignIn);
                        Ok(())
                    }
                    Err(err) => Err(err),
                },
            };

            if let Err(err) = result {
                tracing::warn!("Authentication failed: {}", err);
                error.set(Some(err.message()));
            }
            loading.set(false);
        });
    };

    let current = mode();
    let title = current.title();
    let action = current.action();
    let toggle_label = match current {
        AuthMode::SignIn => "Don't have an account? Sign up",
        AuthMode::SignUp => "Already have an account? Sign in",
    };

    rsx! {
        div {
            class: "auth-container",
            div {
                class: "card auth-card",
                h1 { "{title}" }

                form {
                    class: "form",
                    onsubmit: handle_submit,

                    if let Some(err) = error() {
                        div { class: "alert alert-error", "{err}" }
                    }
                    if let Some(msg) = notice() {
                        div { class: "alert alert-success", "{msg}" }
                    }

                    div {
                        class: "field",
                        label { r#for: "email", "Email" }
                        input {
                            id: "email",
                            r#type: "email",
                            required: true,
                            value: email(),
                            oninput: move |evt: FormEvent| email.set(evt.value()),
                        }
                    }

                    div {
                        class: "field",
                        label { r#for: "password", "Password" }
                        input {
                            id: "password",
                            r#type: "password",
                            required: true,
                            value: password(),
                            oninput: move |evt: FormEvent| password.set(evt.value()),
                        }
                    }

                    button {
                        class: "btn btn-primary btn-block",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Please wait..." } else { "{action}" }
                    }
                }

                p {
                    class: "auth-toggle",
                    button {
                        class: "link-button",
                        r#type: "button",
                        onclick: move |_| {
                            mode.set(current.toggled());
                            error.set(None);
                        },
                        "{toggle_label}"
                    }
                }
            }
        }
    }
}
