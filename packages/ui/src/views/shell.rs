use dioxus::prelude::*;

use crate::routes::Route;
use crate::Navbar;

/// Layout shared by every routed page.
#[component]
pub fn Shell() -> Element {
    rsx! {
        Navbar {}
        main {
            class: "page",
            Outlet::<Route> {}
        }
    }
}
