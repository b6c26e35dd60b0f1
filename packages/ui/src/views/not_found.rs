use dioxus::prelude::*;

use crate::routes::Route;

/// Shown for any path outside the fixed route set.
#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));

    rsx! {
        div {
            class: "container narrow",
            div {
                class: "card centered",
                h1 { "Page not found" }
                p { class: "muted", "There is nothing at {path}." }
                Link { class: "btn btn-primary", to: Route::Home {}, "Back to topics" }
            }
        }
    }
}
