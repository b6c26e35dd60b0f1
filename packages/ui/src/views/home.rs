use dioxus::prelude::*;

use crate::catalog::{TopicId, TOPICS};
use crate::icons::{FaArrowRight, FaBookOpen, FaTrophy, FaUsers};
use crate::routes::Route;
use crate::{Icon, TopicCard};

const STATS: [(&str, &str); 3] = [
    ("500+", "Companies Trained"),
    ("50,000+", "Employees Upskilled"),
    ("95%", "Satisfaction Rate"),
];

/// Landing page: hero, stats, learning paths and benefits.
#[component]
pub fn Home() -> Element {
    let nav = use_navigator();

    rsx! {
        section {
            class: "hero",
            h1 { "Transform Your Workforce with AI Training" }
            p {
                "Empower your team with cutting-edge AI knowledge and skills. "
                "Join leading UAE companies in building a future-ready workforce."
            }
            div {
                class: "hero-actions",
                button {
                    class: "btn btn-primary btn-large",
                    onclick: move |_| {
                        nav.push(TopicId::AiFundamentals.route());
                    },
                    "Start Learning Now"
                    Icon { icon: FaArrowRight, width: 18, height: 18 }
                }
                button {
                    class: "btn btn-outline btn-large",
                    onclick: move |_| {
                        nav.push(Route::SubmitInterest {});
                    },
                    "Suggest a Topic"
                }
            }
        }

        section {
            class: "stats",
            for (value, label) in STATS {
                div {
                    key: "{label}",
                    class: "stat",
                    div { class: "stat-value", "{value}" }
                    div { class: "muted", "{label}" }
                }
            }
        }

        section {
            class: "container",
            h2 { class: "section-title", "Learning Paths" }
            div {
                class: "grid",
                for topic in TOPICS.iter() {
                    TopicCard { key: "{topic.title}", topic: topic.id }
                }
            }
        }

        section {
            class: "container benefits",
            h2 { class: "section-title", "Why Choose Us" }
            div {
                class: "grid",
                div {
                    class: "card",
                    Icon { icon: FaUsers, width: 40, height: 40 }
                    h3 { "Expert-Led Training" }
                    p { class: "muted", "Learn from industry experts with real-world AI implementation experience" }
                }
                div {
                    class: "card",
                    Icon { icon: FaBookOpen, width: 40, height: 40 }
                    h3 { "Comprehensive Curriculum" }
                    p { class: "muted", "Structured learning paths designed for all skill levels" }
                }
                div {
                    class: "card",
                    Icon { icon: FaTrophy, width: 40, height: 40 }
                    h3 { "Certification" }
                    p { class: "muted", "Industry-recognized certificates upon completion" }
                }
            }
        }
    }
}
