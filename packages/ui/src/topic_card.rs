use dioxus::prelude::*;

use crate::catalog::TopicId;
use crate::icons::{FaBrain, FaBuilding, FaRocket};
use crate::Icon;

/// Home page card linking to a learning path.
#[component]
pub fn TopicCard(topic: TopicId) -> Element {
    let info = topic.topic();

    rsx! {
        Link {
            class: "topic-card",
            to: topic.route(),
            span {
                class: "topic-card-icon",
                {match topic {
                    TopicId::AiFundamentals => rsx! { Icon { icon: FaBrain, width: 40, height: 40 } },
                    TopicId::BusinessAi => rsx! { Icon { icon: FaBuilding, width: 40, height: 40 } },
                    TopicId::Productivity => rsx! { Icon { icon: FaRocket, width: 40, height: 40 } },
                }}
            }
            h3 { "{info.title}" }
            p { "{info.summary}" }
        }
    }
}
