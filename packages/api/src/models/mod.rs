//! Data models exchanged with the backend.

mod topic;
mod user;

pub use topic::{NewTopic, TOPICS_COLLECTION};
pub use user::{Session, User};
