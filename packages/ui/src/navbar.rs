use dioxus::prelude::*;

use crate::icons::{FaBookOpen, FaUser};
use crate::routes::Route;
use crate::Icon;

/// Fixed top navigation shown on every routed page.
#[component]
pub fn Navbar() -> Element {
    rsx! {
        nav {
            class: "navbar",
            div {
                class: "navbar-inner",
                Link {
                    class: "navbar-brand",
                    to: Route::Home {},
                    Icon { icon: FaBookOpen, width: 28, height: 28 }
                    span { "AICorporateTraining" }
                }
                div {
                    class: "navbar-links",
                    Link { to: Route::Home {}, "Topics" }
                    Link { to: Route::SubmitInterest {}, "Submit Topic" }
                    Link {
                        to: Route::Profile {},
                        title: "Profile",
                        Icon { icon: FaUser, width: 18, height: 18 }
                    }
                }
            }
        }
    }
}
