//! # Topic submission workflow
//!
//! [`TopicForm`] is the state machine behind the "Submit a Topic" page:
//!
//! ```text
//! Idle ──begin()──▶ Submitting ──finish(Ok)──▶ Success
//!   ▲                    │
//!   └──── Failed ◀──finish(Err)
//! ```
//!
//! [`TopicForm::begin`] is the re-entrancy guard: it hands out a [`TopicDraft`] only
//! from `Idle` or `Failed`, and only when both fields are filled in. While a draft is
//! in flight every further call returns `None`, so at most one insert runs per form.
//!
//! [`submit_topic`] performs the write for a draft: it resolves the current user and
//! inserts exactly one [`NewTopic`] row, or fails closed with
//! [`SubmitError::NotAuthenticated`] without writing when no user is signed in.
//!
//! After a success the page navigates home [`REDIRECT_DELAY`] later through a
//! [`Deferred`] token from [`schedule_redirect`].

use std::future::Future;
use std::time::Duration;

use api::{ApiError, Backend, NewTopic, TOPICS_COLLECTION};
use thiserror::Error;

use crate::timer::Deferred;

/// Delay between a successful submission and the navigation home.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(2000);

const FALLBACK_MESSAGE: &str = "An error occurred";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("You must be logged in to submit a topic")]
    NotAuthenticated,
    /// The insert was rejected.
    #[error("{0}")]
    Write(String),
    /// Resolving the current user failed.
    #[error("{0}")]
    Read(String),
}

impl SubmitError {
    fn write(e: ApiError) -> Self {
        SubmitError::Write(message_or_fallback(e.message()))
    }

    fn read(e: ApiError) -> Self {
        SubmitError::Read(message_or_fallback(e.message()))
    }
}

fn message_or_fallback(message: String) -> String {
    if message.trim().is_empty() {
        FALLBACK_MESSAGE.to_string()
    } else {
        message
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Failed(SubmitError),
}

/// Field values captured when a submission starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicDraft {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TopicForm {
    pub title: String,
    pub description: String,
    status: SubmitStatus,
}

impl TopicForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn error(&self) -> Option<&SubmitError> {
        match &self.status {
            SubmitStatus::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }

    pub fn succeeded(&self) -> bool {
        self.status == SubmitStatus::Success
    }

    pub fn fields_filled(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }

    pub fn can_submit(&self) -> bool {
        self.fields_filled() && matches!(self.status, SubmitStatus::Idle | SubmitStatus::Failed(_))
    }

    /// Enter `Submitting` and return the draft to send, clearing any previous error.
    ///
    /// The draft carries the fields exactly as typed; trimming only decides emptiness.
    ///
    /// Returns `None` without changing anything when a submission is already in
    /// flight, has already succeeded, or a field is empty.
    pub fn begin(&mut self) -> Option<TopicDraft> {
        if !self.can_submit() {
            return None;
        }
        self.status = SubmitStatus::Submitting;
        Some(TopicDraft {
            title: self.title.clone(),
            description: self.description.clone(),
        })
    }

    /// Apply the outcome of the in-flight submission.
    pub fn finish(&mut self, result: Result<(), SubmitError>) {
        if !self.is_submitting() {
            return;
        }
        match result {
            Ok(()) => {
                self.title.clear();
                self.description.clear();
                self.status = SubmitStatus::Success;
            }
            Err(e) => {
                self.status = SubmitStatus::Failed(e);
            }
        }
    }
}

/// Resolve the signed-in user and insert one topic row for `draft`.
pub async fn submit_topic<B: Backend>(backend: &B, draft: TopicDraft) -> Result<(), SubmitError> {
    let user = backend
        .current_user()
        .await
        .map_err(SubmitError::read)?
        .filter(|u| !u.id.is_empty())
        .ok_or(SubmitError::NotAuthenticated)?;

    let record = NewTopic {
        title: draft.title,
        description: draft.description,
        user_id: user.id,
    };

    backend
        .insert_record(TOPICS_COLLECTION, &record)
        .await
        .map_err(|e| {
            tracing::warn!("Topic submission failed: {}", e);
            SubmitError::write(e)
        })?;

    tracing::info!("Submitted topic {:?}", record.title);
    Ok(())
}

/// Schedule `navigate` to run [`REDIRECT_DELAY`] from now.
pub fn schedule_redirect(
    navigate: impl FnOnce() + 'static,
) -> (Deferred, impl Future<Output = ()> + 'static) {
    Deferred::new(REDIRECT_DELAY, navigate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use api::MemoryBackend;

    fn signed_in_backend() -> (MemoryBackend, String) {
        let backend = MemoryBackend::new();
        let user = backend.add_account("ada@example.com", "secret-pass");
        backend.push_session(Some(MemoryBackend::session_for(&user)));
        (backend, user.id)
    }

    fn filled_form(title: &str, description: &str) -> TopicForm {
        TopicForm {
            title: title.to_string(),
            description: description.to_string(),
            ..TopicForm::default()
        }
    }

    #[test]
    fn test_empty_fields_block_submission() {
        let mut form = filled_form("", "Something");
        assert!(!form.can_submit());
        assert_eq!(form.begin(), None);

        let mut form = filled_form("Rust", "   ");
        assert_eq!(form.begin(), None);
        assert_eq!(form.status(), &SubmitStatus::Idle);
    }

    #[test]
    fn test_draft_keeps_text_as_typed() {
        let mut form = filled_form("  Rust ", "Ownership\n");
        let draft = form.begin().unwrap();
        assert_eq!(draft.title, "  Rust ");
        assert_eq!(draft.description, "Ownership\n");
    }

    #[test]
    fn test_begin_is_reentrancy_guard() {
        let mut form = filled_form("Rust", "Ownership");
        assert!(form.begin().is_some());
        assert!(form.is_submitting());
        assert_eq!(form.begin(), None);
    }

    #[test]
    fn test_begin_clears_previous_error() {
        let mut form = filled_form("Rust", "Ownership");
        form.begin();
        form.finish(Err(SubmitError::Write("boom".to_string())));
        assert!(form.error().is_some());

        assert!(form.begin().is_some());
        assert_eq!(form.error(), None);
    }

    #[test]
    fn test_success_is_terminal() {
        let mut form = filled_form("Rust", "Ownership");
        form.begin();
        form.finish(Ok(()));
        assert!(form.succeeded());

        form.title = "Again".to_string();
        form.description = "More".to_string();
        assert_eq!(form.begin(), None);
    }

    #[tokio::test]
    async fn test_empty_fields_never_reach_insert() {
        let (backend, _) = signed_in_backend();
        let mut form = filled_form("", "");

        if let Some(draft) = form.begin() {
            let _ = submit_topic(&backend, draft).await;
        }
        assert_eq!(backend.insert_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_submission() {
        let (backend, user_id) = signed_in_backend();
        let mut form = filled_form("Prompt engineering", "Writing prompts that work");

        let draft = form.begin().unwrap();
        assert_eq!(form.status(), &SubmitStatus::Submitting);

        let result = submit_topic(&backend, draft).await;
        form.finish(result);

        assert_eq!(backend.insert_calls(), 1);
        let records = backend.records(TOPICS_COLLECTION);
        assert_eq!(
            records,
            vec![serde_json::json!({
                "title": "Prompt engineering",
                "description": "Writing prompts that work",
                "user_id": user_id,
            })]
        );

        assert!(form.succeeded());
        assert!(form.title.is_empty());
        assert!(form.description.is_empty());

        let navigated = Rc::new(Cell::new(false));
        let flag = navigated.clone();
        let start = tokio::time::Instant::now();
        let (_token, redirect) = schedule_redirect(move || flag.set(true));
        redirect.await;

        assert!(navigated.get());
        assert!(start.elapsed() >= REDIRECT_DELAY);
    }

    #[tokio::test]
    async fn test_absent_user_fails_closed() {
        let backend = MemoryBackend::new();
        let mut form = filled_form("Rust", "Ownership");

        let draft = form.begin().unwrap();
        let result = submit_topic(&backend, draft).await;
        assert_eq!(result, Err(SubmitError::NotAuthenticated));
        form.finish(result);

        assert_eq!(form.error(), Some(&SubmitError::NotAuthenticated));
        assert_eq!(
            form.error().unwrap().to_string(),
            "You must be logged in to submit a topic"
        );
        assert_eq!(backend.insert_calls(), 0);
    }

    #[tokio::test]
    async fn test_insert_failure_keeps_fields() {
        let (backend, _) = signed_in_backend();
        backend.fail_next_insert("duplicate title");
        let mut form = filled_form("Rust", "Ownership");

        let draft = form.begin().unwrap();
        let result = submit_topic(&backend, draft).await;
        form.finish(result);

        assert_eq!(form.error().map(|e| e.to_string()).as_deref(), Some("duplicate title"));
        assert_eq!(form.title, "Rust");
        assert_eq!(form.description, "Ownership");
        assert!(form.can_submit());

        // Retrying is a fresh explicit submit.
        let draft = form.begin().unwrap();
        let result = submit_topic(&backend, draft).await;
        form.finish(result);
        assert!(form.succeeded());
        assert_eq!(backend.records(TOPICS_COLLECTION).len(), 1);
    }

    #[tokio::test]
    async fn test_empty_failure_message_uses_fallback() {
        let (backend, _) = signed_in_backend();
        backend.fail_next_insert("");

        let result = submit_topic(
            &backend,
            TopicDraft {
                title: "Rust".to_string(),
                description: "Ownership".to_string(),
            },
        )
        .await;
        assert_eq!(result, Err(SubmitError::Write("An error occurred".to_string())));
    }

    #[tokio::test]
    async fn test_user_fetch_failure_is_read_error() {
        let (backend, _) = signed_in_backend();
        backend.fail_user_fetch("connection reset");

        let mut form = filled_form("Rust", "Ownership");
        let draft = form.begin().unwrap();
        let result = submit_topic(&backend, draft).await;

        assert_eq!(result, Err(SubmitError::Read("connection reset".to_string())));
        assert_eq!(backend.insert_calls(), 0);
    }

    #[tokio::test]
    async fn test_double_submit_inserts_once() {
        let (backend, _) = signed_in_backend();
        let form = RefCell::new(filled_form("Rust", "Ownership"));
        let (form, backend) = (&form, &backend);

        // Mirrors the submit handler: guard synchronously, then await the write.
        let submit = || async move {
            let Some(draft) = form.borrow_mut().begin() else {
                return false;
            };
            let result = submit_topic(backend, draft).await;
            form.borrow_mut().finish(result);
            true
        };

        let (first, second) = futures::join!(submit(), submit());
        assert!(first);
        assert!(!second);
        assert_eq!(backend.insert_calls(), 1);
        assert!(form.borrow().succeeded());
    }
}
