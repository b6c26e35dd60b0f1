//! # Session gate
//!
//! [`SessionGate`] owns the one process-wide [`SessionState`] and keeps it in step
//! with the backend:
//!
//! 1. [`SessionGate::open`] subscribes to the backend's session-change stream. The
//!    gate starts out [`SessionState::Loading`].
//! 2. [`SessionGate::load`] performs the single startup fetch. The gate leaves
//!    `Loading` only when this fetch resolves.
//! 3. Every push after that replaces the state unconditionally (last write wins, in
//!    delivery order). A push that arrives while the fetch is still in flight is held
//!    back and wins over the fetched value once the fetch resolves.
//!
//! A failed startup fetch resolves the gate to [`SessionState::Absent`] and keeps the
//! message in [`SessionGate::load_error`].
//!
//! The subscription is released by [`SessionGate::teardown`], which is idempotent and
//! also runs when the gate is dropped.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use api::{ApiError, Backend, Session, Subscription};

/// Current authentication state as seen by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Loading,
    Absent,
    Present(Session),
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }
}

impl From<Option<Session>> for SessionState {
    fn from(session: Option<Session>) -> Self {
        match session {
            Some(session) => SessionState::Present(session),
            None => SessionState::Absent,
        }
    }
}

type Observer = Rc<dyn Fn(&SessionState, Option<&str>)>;

struct GateInner {
    state: SessionState,
    /// Push received before the startup fetch resolved.
    pending: Option<Option<Session>>,
    load_error: Option<String>,
    observer: Observer,
}

impl GateInner {
    fn apply_push(inner: &RefCell<GateInner>, session: Option<Session>) {
        let (state, load_error, observer) = {
            let mut inner = inner.borrow_mut();
            if inner.state.is_loading() {
                inner.pending = Some(session);
                return;
            }
            inner.state = SessionState::from(session);
            inner.load_error = None;
            (inner.state.clone(), inner.load_error.clone(), inner.observer.clone())
        };
        observer(&state, load_error.as_deref());
    }
}

pub struct SessionGate {
    inner: Rc<RefCell<GateInner>>,
    subscription: RefCell<Subscription>,
}

impl SessionGate {
    /// Subscribe to `backend` and start in [`SessionState::Loading`].
    ///
    /// `observer` is called after every state change with the new state and the
    /// current load error.
    pub fn open<B: Backend>(
        backend: &B,
        observer: impl Fn(&SessionState, Option<&str>) + 'static,
    ) -> Self {
        let inner = Rc::new(RefCell::new(GateInner {
            state: SessionState::Loading,
            pending: None,
            load_error: None,
            observer: Rc::new(observer),
        }));

        let weak = Rc::downgrade(&inner);
        let subscription = backend.on_session_change(move |session| {
            if let Some(inner) = weak.upgrade() {
                GateInner::apply_push(&inner, session);
            }
        });

        Self {
            inner,
            subscription: RefCell::new(subscription),
        }
    }

    /// Fetch the current session once and resolve the gate.
    pub async fn load<B: Backend>(&self, backend: &B) {
        let fetched = backend.current_session().await;
        self.resolve(fetched);
    }

    fn resolve(&self, fetched: Result<Option<Session>, ApiError>) {
        let (state, load_error, observer) = {
            let mut inner = self.inner.borrow_mut();
            if !inner.state.is_loading() {
                return;
            }

            let session = match (inner.pending.take(), fetched) {
                (Some(pushed), _) => pushed,
                (None, Ok(session)) => session,
                (None, Err(e)) => {
                    tracing::warn!("Failed to fetch session: {}", e);
                    inner.load_error = Some(e.message());
                    None
                }
            };

            inner.state = SessionState::from(session);
            (inner.state.clone(), inner.load_error.clone(), inner.observer.clone())
        };
        observer(&state, load_error.as_deref());
    }

    pub fn state(&self) -> SessionState {
        self.inner.borrow().state.clone()
    }

    /// Message from a failed startup fetch, cleared by the next push.
    pub fn load_error(&self) -> Option<String> {
        self.inner.borrow().load_error.clone()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.borrow().is_active()
    }

    /// Cancel the push subscription. Safe to call any number of times.
    pub fn teardown(&self) {
        self.subscription.borrow_mut().unsubscribe();
    }
}

impl Drop for SessionGate {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl fmt::Debug for SessionGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionGate")
            .field("state", &self.inner.borrow().state)
            .field("subscribed", &self.is_subscribed())
            .finish()
    }
}
