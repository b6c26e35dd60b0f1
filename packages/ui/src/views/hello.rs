use dioxus::prelude::*;

#[component]
pub fn Hello() -> Element {
    rsx! {
        div {
            class: "container narrow",
            div {
                class: "card centered",
                h1 { "Hello, World! 👋" }
                p { class: "muted", "Welcome to my first page in this project." }
            }
        }
    }
}
