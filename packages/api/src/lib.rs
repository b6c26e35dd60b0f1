//! # API crate: remote backend client for AI Corporate Training
//!
//! Everything the front end knows about the hosted backend lives here. Authentication
//! and persistence are delegated to Supabase (GoTrue for auth, PostgREST for tables);
//! the UI crate only ever talks to the [`Backend`] trait.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Session-change listeners and the cancellable [`Subscription`] handle |
//! | [`config`] | [`BackendConfig`] loaded from `SUPABASE_URL` / `SUPABASE_ANON_KEY` |
//! | [`models`] | [`Session`], [`User`] and the [`NewTopic`] record |
//! | [`supabase`] | [`SupabaseClient`], the reqwest implementation of [`Backend`] |
//! | [`memory`] | [`MemoryBackend`], an in-memory implementation for tests and unconfigured builds |
//!
//! ## Choosing a backend
//!
//! [`Client::from_env`] returns a Supabase-backed client when the backend is configured
//! and falls back to the in-memory backend otherwise, so the app still boots in a
//! fresh checkout.

use std::future::Future;

use serde::Serialize;

pub mod auth;
pub mod config;
mod error;
pub mod memory;
pub mod models;
pub mod supabase;

pub use auth::{SessionListeners, Subscription};
pub use config::BackendConfig;
pub use error::ApiError;
pub use memory::MemoryBackend;
pub use models::{NewTopic, Session, User, TOPICS_COLLECTION};
pub use supabase::SupabaseClient;

/// Contract the UI consumes from the hosted backend.
///
/// All methods are single-threaded: futures are not required to be `Send`, and
/// listeners are invoked on the caller's thread in delivery order.
pub trait Backend {
    /// Current session, if any. Called once at startup by the session gate.
    fn current_session(&self) -> impl Future<Output = Result<Option<Session>, ApiError>>;

    /// Register a listener invoked with the new session (or `None`) on every change.
    fn on_session_change(&self, listener: impl Fn(Option<Session>) + 'static) -> Subscription;

    /// Fetch the signed-in user fresh from the backend.
    fn current_user(&self) -> impl Future<Output = Result<Option<User>, ApiError>>;

    /// Insert a single record into `collection`.
    fn insert_record<T: Serialize>(
        &self,
        collection: &str,
        record: &T,
    ) -> impl Future<Output = Result<(), ApiError>>;

    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Session, ApiError>>;

    /// Create an account. Returns `None` when the backend requires email
    /// confirmation before issuing a session.
    fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Option<Session>, ApiError>>;

    fn sign_out(&self) -> impl Future<Output = Result<(), ApiError>>;
}

/// Backend selected at launch.
#[derive(Clone)]
pub enum Client {
    Supabase(SupabaseClient),
    Memory(MemoryBackend),
}

impl Client {
    /// Build the Supabase client from the environment, or fall back to memory.
    pub fn from_env() -> Self {
        match BackendConfig::from_env() {
            Ok(config) => {
                tracing::info!("Using Supabase backend at {}", config.url);
                Client::Supabase(SupabaseClient::new(config))
            }
            Err(e) => {
                tracing::warn!("{}; falling back to in-memory backend", e);
                Client::Memory(MemoryBackend::new())
            }
        }
    }
}

impl Backend for Client {
    async fn current_session(&self) -> Result<Option<Session>, ApiError> {
        match self {
            Client::Supabase(c) => c.current_session().await,
            Client::Memory(m) => m.current_session().await,
        }
    }

    fn on_session_change(&self, listener: impl Fn(Option<Session>) + 'static) -> Subscription {
        match self {
            Client::Supabase(c) => c.on_session_change(listener),
            Client::Memory(m) => m.on_session_change(listener),
        }
    }

    async fn current_user(&self) -> Result<Option<User>, ApiError> {
        match self {
            Client::Supabase(c) => c.current_user().await,
            Client::Memory(m) => m.current_user().await,
        }
    }

    async fn insert_record<T: Serialize>(&self, collection: &str, record: &T) -> Result<(), ApiError> {
        match self {
            Client::Supabase(c) => c.insert_record(collection, record).await,
            Client::Memory(m) => m.insert_record(collection, record).await,
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        match self {
            Client::Supabase(c) => c.sign_in(email, password).await,
            Client::Memory(m) => m.sign_in(email, password).await,
        }
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, ApiError> {
        match self {
            Client::Supabase(c) => c.sign_up(email, password).await,
            Client::Memory(m) => m.sign_up(email, password).await,
        }
    }

    async fn sign_out(&self) -> Result<(), ApiError> {
        match self {
            Client::Supabase(c) => c.sign_out().await,
            Client::Memory(m) => m.sign_out().await,
        }
    }
}
