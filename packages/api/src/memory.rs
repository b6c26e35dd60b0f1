use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use chrono::Utc;
use serde::Serialize;

use crate::auth::{SessionListeners, Subscription};
use crate::models::{Session, User};
use crate::{ApiError, Backend};

/// In-memory Backend for testing and builds without a configured project.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    state: Rc<RefCell<MemoryState>>,
    listeners: SessionListeners,
}

#[derive(Debug, Default)]
struct MemoryState {
    accounts: HashMap<String, Account>,
    session: Option<Session>,
    records: Vec<(String, serde_json::Value)>,
    insert_calls: usize,
    next_id: u64,
    fail_next_insert: Option<String>,
    fail_session_fetch: Option<String>,
    fail_user_fetch: Option<String>,
}

#[derive(Debug, Clone)]
struct Account {
    password: String,
    user: User,
}

/// Resolves on the second poll, so callers observe a real suspension point.
struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            return Poll::Ready(());
        }
        self.0 = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account and return its user.
    pub fn add_account(&self, email: &str, password: &str) -> User {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let user = User {
            id: format!("00000000-0000-4000-8000-{:012}", state.next_id),
            email: Some(email.to_string()),
            last_sign_in_at: None,
        };
        state.accounts.insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                user: user.clone(),
            },
        );
        user
    }

    /// Replace the session as if the backend pushed a change.
    pub fn push_session(&self, session: Option<Session>) {
        self.state.borrow_mut().session = session.clone();
        self.listeners.notify(session.as_ref());
    }

    /// Build a session for `user` without going through sign-in.
    pub fn session_for(user: &User) -> Session {
        Session {
            access_token: format!("memory-access-{}", user.id),
            refresh_token: format!("memory-refresh-{}", user.id),
            expires_at: None,
            user: user.clone(),
        }
    }

    /// Make the next insert fail with `message`.
    pub fn fail_next_insert(&self, message: impl Into<String>) {
        self.state.borrow_mut().fail_next_insert = Some(message.into());
    }

    /// Make every session fetch fail with `message`.
    pub fn fail_session_fetch(&self, message: impl Into<String>) {
        self.state.borrow_mut().fail_session_fetch = Some(message.into());
    }

    /// Make every user fetch fail with `message`.
    pub fn fail_user_fetch(&self, message: impl Into<String>) {
        self.state.borrow_mut().fail_user_fetch = Some(message.into());
    }

    /// Records stored in `collection`, in insertion order.
    pub fn records(&self, collection: &str) -> Vec<serde_json::Value> {
        self.state
            .borrow()
            .records
            .iter()
            .filter(|(c, _)| c == collection)
            .map(|(_, r)| r.clone())
            .collect()
    }

    /// Number of insert attempts, failed ones included.
    pub fn insert_calls(&self) -> usize {
        self.state.borrow().insert_calls
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Backend for MemoryBackend {
    async fn current_session(&self) -> Result<Option<Session>, ApiError> {
        YieldOnce(false).await;
        let state = self.state.borrow();
        if let Some(message) = &state.fail_session_fetch {
            return Err(ApiError::Backend(message.clone()));
        }
        Ok(state.session.clone())
    }

    fn on_session_change(&self, listener: impl Fn(Option<Session>) + 'static) -> Subscription {
        self.listeners.subscribe(listener)
    }

    async fn current_user(&self) -> Result<Option<User>, ApiError> {
        YieldOnce(false).await;
        let state = self.state.borrow();
        if let Some(message) = &state.fail_user_fetch {
            return Err(ApiError::Backend(message.clone()));
        }
        Ok(state.session.as_ref().map(|s| s.user.clone()))
    }

    async fn insert_record<T: Serialize>(&self, collection: &str, record: &T) -> Result<(), ApiError> {
        let value = serde_json::to_value(record)?;
        self.state.borrow_mut().insert_calls += 1;
        YieldOnce(false).await;

        let mut state = self.state.borrow_mut();
        if let Some(message) = state.fail_next_insert.take() {
            return Err(ApiError::Backend(message));
        }
        state.records.push((collection.to_string(), value));
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        YieldOnce(false).await;
        let session = {
            let mut state = self.state.borrow_mut();
            let account = state
                .accounts
                .get_mut(email)
                .filter(|a| a.password == password)
                .ok_or_else(|| ApiError::Backend("Invalid login credentials".to_string()))?;
            account.user.last_sign_in_at = Some(Utc::now());
            Self::session_for(&account.user)
        };
        tracing::info!("Signed in as {}", session.user.display_name());
        self.push_session(Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, ApiError> {
        YieldOnce(false).await;
        if self.state.borrow().accounts.contains_key(email) {
            return Err(ApiError::Backend("User already registered".to_string()));
        }
        self.add_account(email, password);
        self.sign_in(email, password).await.map(Some)
    }

    async fn sign_out(&self) -> Result<(), ApiError> {
        YieldOnce(false).await;
        tracing::info!("Signed out");
        self.push_session(None);
        Ok(())
    }
}
