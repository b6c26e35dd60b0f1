//! Session-change notification plumbing shared by every backend.

mod listeners;
mod subscription;

pub use listeners::SessionListeners;
pub use subscription::Subscription;
