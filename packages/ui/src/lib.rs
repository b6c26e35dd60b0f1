//! This crate contains all shared UI for the workspace: the session gate, the
//! routes, the topic submission workflow and every view.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const MAIN_CSS: Asset = asset!("/assets/main.css");

pub mod catalog;
pub mod routes;
pub mod session;
pub mod submission;
pub mod timer;
pub mod views;

pub use routes::{resolve, Access, Route, Surface};
pub use session::{SessionGate, SessionState};
pub use submission::{submit_topic, SubmitError, SubmitStatus, TopicDraft, TopicForm, REDIRECT_DELAY};

mod auth;
pub use auth::{use_auth, use_backend, use_session, AuthContext, SessionGuard, SessionProvider};

mod navbar;
pub use navbar::Navbar;

mod topic_card;
pub use topic_card::TopicCard;

/// Application root shared by every platform.
///
/// Installs the backend client, the session gate and the router. Until the startup
/// session fetch resolves only the loading view renders; without a session only the
/// sign-in view does.
#[component]
pub fn App() -> Element {
    use_context_provider(api::Client::from_env);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        SessionProvider {
            SessionGuard {
                Router::<Route> {}
            }
        }
    }
}
