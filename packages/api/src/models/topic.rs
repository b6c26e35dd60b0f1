use serde::{Deserialize, Serialize};

/// Collection topic suggestions are written to.
pub const TOPICS_COLLECTION: &str = "interest_topics";

/// A topic suggestion as inserted into [`TOPICS_COLLECTION`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTopic {
    pub title: String,
    pub description: String,
    pub user_id: String,
}
