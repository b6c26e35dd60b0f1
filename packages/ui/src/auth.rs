//! Authentication context and hooks for the UI.

use std::rc::Rc;

use api::Client;
use dioxus::prelude::*;

use crate::routes::Access;
use crate::session::{SessionGate, SessionState};
use crate::views::{AuthForm, LoadingScreen};

/// Reactive handles published by [`SessionProvider`].
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub session: Signal<SessionState>,
    /// Why the startup session fetch failed, if it did.
    pub load_error: Signal<Option<String>>,
}

/// The backend client installed by the app root.
pub fn use_backend() -> Client {
    use_context::<Client>()
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
}

/// Get the current session state.
/// Returns a signal that updates whenever the backend reports a change.
pub fn use_session() -> Signal<SessionState> {
    use_auth().session
}

/// Provider component that owns the session gate.
///
/// The gate is opened on first render, loaded once, and torn down when the provider
/// unmounts.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let backend = use_backend();
    let session = use_signal(SessionState::default);
    let load_error = use_signal(|| Option::<String>::None);

    // Both signals follow every gate change, pushes included.
    let gate = use_hook(|| {
        Rc::new(SessionGate::open(
            &backend,
            move |state: &SessionState, error: Option<&str>| {
                let (mut session, mut load_error) = (session, load_error);
                session.set(state.clone());
                load_error.set(error.map(str::to_string));
            },
        ))
    });

    use_future({
        let gate = gate.clone();
        move || {
            let gate = gate.clone();
            let backend = backend.clone();
            async move { gate.load(&backend).await }
        }
    });

    use_drop(move || gate.teardown());

    use_context_provider(|| AuthContext {
        session,
        load_error,
    });

    rsx! {
        {children}
    }
}

/// Renders its children only for a signed-in user.
#[component]
pub fn SessionGuard(children: Element) -> Element {
    let session = use_session();
    let access = Access::of(&session.read());

    match access {
        Access::Loading => rsx! { LoadingScreen {} },
        Access::SignIn => rsx! { AuthForm {} },
        Access::Open => rsx! { {children} },
    }
}
