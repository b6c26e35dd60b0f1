use dioxus::prelude::*;

use crate::catalog::{Accordion, TopicId};
use crate::icons::{FaChevronDown, FaChevronUp};
use crate::routes::Route;
use crate::Icon;

#[component]
pub fn AiFundamentals() -> Element {
    rsx! { TopicPage { topic: TopicId::AiFundamentals } }
}

#[component]
pub fn BusinessAi() -> Element {
    rsx! { TopicPage { topic: TopicId::BusinessAi } }
}

#[component]
pub fn Productivity() -> Element {
    rsx! { TopicPage { topic: TopicId::Productivity } }
}

/// A learning path page: hero, FAQ accordion and a call to action.
#[component]
pub fn TopicPage(topic: TopicId) -> Element {
    let info = topic.topic();
    let mut accordion = use_signal(Accordion::default);

    rsx! {
        div {
            class: "topic-hero",
            div {
                class: "container narrow",
                h1 { "{info.title}" }
                p { "{info.intro}" }
            }
        }

        div {
            class: "container narrow",
            div {
                class: "faq",
                for (index, faq) in info.faq.iter().enumerate() {
                    div {
                        key: "{index}",
                        class: "faq-item",
                        button {
                            class: "faq-question",
                            onclick: move |_| accordion.write().toggle(index),
                            span { "{faq.question}" }
                            if accordion.read().is_open(index) {
                                Icon { icon: FaChevronUp, width: 16, height: 16 }
                            } else {
                                Icon { icon: FaChevronDown, width: 16, height: 16 }
                            }
                        }
                        if accordion.read().is_open(index) {
                            div {
                                class: "faq-answer",
                                p { "{faq.answer}" }
                            }
                        }
                    }
                }
            }

            div {
                class: "card next-steps",
                h2 { "Ready to Dive Deeper?" }
                p {
                    "This is just the beginning of your AI journey. "
                    "Tell us what you would like to learn next and we will build it into the curriculum."
                }
                Link { class: "btn btn-primary", to: Route::SubmitInterest {}, "Suggest a Topic" }
            }
        }
    }
}
