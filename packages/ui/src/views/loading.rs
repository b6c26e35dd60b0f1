use dioxus::prelude::*;

/// Blocking placeholder shown until the startup session fetch resolves.
#[component]
pub fn LoadingScreen() -> Element {
    rsx! {
        div {
            class: "loading-screen",
            div { class: "loading-text", "Loading..." }
        }
    }
}
