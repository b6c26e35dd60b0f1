//! # Supabase REST client
//!
//! [`SupabaseClient`] implements [`Backend`] against a hosted Supabase project using
//! plain HTTP through `reqwest`, which compiles for both native and WASM targets.
//!
//! | Operation | Request |
//! |-----------|---------|
//! | sign in | `POST /auth/v1/token?grant_type=password` |
//! | refresh | `POST /auth/v1/token?grant_type=refresh_token` |
//! | sign up | `POST /auth/v1/signup` |
//! | current user | `GET /auth/v1/user` |
//! | sign out | `POST /auth/v1/logout` |
//! | insert | `POST /rest/v1/{collection}` with `Prefer: return=minimal` |
//!
//! Every request carries the project's anon key in the `apikey` header. Requests made
//! on behalf of a signed-in user also send `Authorization: Bearer <access_token>`.
//!
//! The client keeps the current [`Session`] in memory only. Before any request that
//! uses it, an expired session is refreshed; if that fails, or the backend rejects the
//! access token, the session is dropped. Every change to it (sign-in, sign-up with an
//! immediate session, refresh, sign-out, or a dropped session) is pushed to
//! [`SessionListeners`].

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::auth::{SessionListeners, Subscription};
use crate::config::BackendConfig;
use crate::models::{Session, User};
use crate::{ApiError, Backend};

#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    config: BackendConfig,
    session: Rc<RefCell<Option<Session>>>,
    listeners: SessionListeners,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

/// Token endpoint payload.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: User,
}

impl TokenResponse {
    fn into_session(self, now: i64) -> Session {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| now + secs));
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

/// Error body shapes returned by GoTrue and PostgREST.
#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        [self.message, self.msg, self.error_description, self.error]
            .into_iter()
            .flatten()
            .find(|m| !m.trim().is_empty())
    }
}

fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Map a non-success response to [`ApiError::Status`], keeping the backend's message.
async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

impl SupabaseClient {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            session: Rc::new(RefCell::new(None)),
            listeners: SessionListeners::new(),
        }
    }

    /// Store `session` and tell every listener.
    fn replace_session(&self, session: Option<Session>) {
        self.session.replace(session.clone());
        self.listeners.notify(session.as_ref());
    }

    /// The held session, refreshed first when it has expired.
    ///
    /// A failed refresh drops the session and tells listeners it is absent.
    async fn fresh_session(&self) -> Option<Session> {
        let current = self.session.borrow().clone()?;
        if !current.is_expired_at(now_secs()) {
            return Some(current);
        }

        match self.refresh_session().await {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("Session expired and refresh failed: {}", e);
                self.replace_session(None);
                None
            }
        }
    }

    async fn fresh_token(&self) -> Option<String> {
        self.fresh_session().await.map(|s| s.access_token)
    }

    async fn token_request<B: Serialize>(&self, grant: &str, body: &B) -> Result<Session, ApiError> {
        let response = self
            .http
            .post(self.config.auth_endpoint(&format!("token?grant_type={grant}")))
            .header("apikey", &self.config.anon_key)
            .json(body)
            .send()
            .await?;
        let token: TokenResponse = check(response).await?.json().await?;
        Ok(token.into_session(now_secs()))
    }

    /// Exchange the refresh token for a new session and push it to listeners.
    pub async fn refresh_session(&self) -> Result<Session, ApiError> {
        let refresh_token = self
            .session
            .borrow()
            .as_ref()
            .map(|s| s.refresh_token.clone())
            .ok_or(ApiError::NotAuthenticated)?;

        let session = self
            .token_request(
                "refresh_token",
                &RefreshGrant {
                    refresh_token: &refresh_token,
                },
            )
            .await?;
        tracing::debug!("Refreshed session for {}", session.user.id);
        self.replace_session(Some(session.clone()));
        Ok(session)
    }
}

impl Backend for SupabaseClient {
    async fn current_session(&self) -> Result<Option<Session>, ApiError> {
        Ok(self.fresh_session().await)
    }

    fn on_session_change(&self, listener: impl Fn(Option<Session>) + 'static) -> Subscription {
        self.listeners.subscribe(listener)
    }

    async fn current_user(&self) -> Result<Option<User>, ApiError> {
        let Some(token) = self.fresh_token().await else {
            return Ok(None);
        };

        let response = self
            .http
            .get(self.config.auth_endpoint("user"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token)
            .send()
            .await?;

        match check(response).await {
            Ok(response) => Ok(Some(response.json().await?)),
            Err(e) if e.is_unauthorized() => {
                // The backend no longer honours this session.
                tracing::warn!("Access token rejected: {}", e);
                self.replace_session(None);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn insert_record<T: Serialize>(&self, collection: &str, record: &T) -> Result<(), ApiError> {
        let token = match self.fresh_token().await {
            Some(token) => token,
            None => self.config.anon_key.clone(),
        };

        let response = self
            .http
            .post(self.config.rest_endpoint(collection))
            .header("apikey", &self.config.anon_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(token)
            .json(record)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let session = self
            .token_request("password", &Credentials { email, password })
            .await?;
        tracing::info!("Signed in as {}", session.user.display_name());
        self.replace_session(Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, ApiError> {
        let response = self
            .http
            .post(self.config.auth_endpoint("signup"))
            .header("apikey", &self.config.anon_key)
            .json(&Credentials { email, password })
            .send()
            .await?;
        let body: serde_json::Value = check(response).await?.json().await?;

        // Projects with email confirmation enabled return the bare user instead of a session.
        if body.get("access_token").is_none() {
            tracing::info!("Signed up {}; awaiting email confirmation", email);
            return Ok(None);
        }

        let token: TokenResponse = serde_json::from_value(body)?;
        let session = token.into_session(now_secs());
        tracing::info!("Signed up and signed in as {}", session.user.display_name());
        self.replace_session(Some(session.clone()));
        Ok(Some(session))
    }

    async fn sign_out(&self) -> Result<(), ApiError> {
        let Some(token) = self.fresh_token().await else {
            self.replace_session(None);
            return Ok(());
        };

        let result = self
            .http
            .post(self.config.auth_endpoint("logout"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token)
            .send()
            .await;

        // The local session is gone either way; a failed revoke only leaves the
        // token to expire on its own.
        self.replace_session(None);
        tracing::info!("Signed out");

        match result {
            Ok(response) => check(response).await.map(|_| ()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_computes_expiry_from_expires_in() {
        let json = r#"{
            "access_token": "a",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "r",
            "user": { "id": "u-1", "email": "ada@example.com" }
        }"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        let session = token.into_session(1_000);
        assert_eq!(session.expires_at, Some(4_600));
        assert_eq!(session.user.id, "u-1");
    }

    #[test]
    fn test_token_response_prefers_expires_at() {
        let json = r#"{
            "access_token": "a",
            "expires_in": 3600,
            "expires_at": 1700000000,
            "refresh_token": "r",
            "user": { "id": "u-1" }
        }"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.into_session(0).expires_at, Some(1_700_000_000));
    }

    #[test]
    fn test_error_body_message_precedence() {
        let gotrue: ErrorBody = serde_json::from_str(
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        )
        .unwrap();
        assert_eq!(gotrue.into_message().as_deref(), Some("Invalid login credentials"));

        let postgrest: ErrorBody = serde_json::from_str(
            r#"{"code":"23505","message":"duplicate key value violates unique constraint","details":null}"#,
        )
        .unwrap();
        assert_eq!(
            postgrest.into_message().as_deref(),
            Some("duplicate key value violates unique constraint")
        );

        assert_eq!(ErrorBody::default().into_message(), None);
    }

    #[tokio::test]
    async fn test_signed_out_client_has_no_session_or_user() {
        let client = SupabaseClient::new(BackendConfig::new("http://127.0.0.1:9", "anon"));
        assert_eq!(client.current_session().await.unwrap(), None);
        assert_eq!(client.current_user().await.unwrap(), None);
    }

    fn expired_session() -> Session {
        Session {
            access_token: "stale".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: Some(0),
            user: User {
                id: "u-1".to_string(),
                email: None,
                last_sign_in_at: None,
            },
        }
    }

    /// A client holding an expired session against an unreachable backend, so every
    /// refresh attempt fails, plus the record of pushes it makes.
    fn expired_client() -> (SupabaseClient, Rc<RefCell<Vec<bool>>>, Subscription) {
        let client = SupabaseClient::new(BackendConfig::new("http://127.0.0.1:9", "anon"));
        client.session.replace(Some(expired_session()));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let sub = client.on_session_change(move |s| sink.borrow_mut().push(s.is_some()));
        (client, seen, sub)
    }

    #[tokio::test]
    async fn test_current_user_drops_unrefreshable_session() {
        let (client, seen, _sub) = expired_client();

        assert_eq!(client.current_user().await.unwrap(), None);
        assert_eq!(*seen.borrow(), vec![false]);
        assert!(client.session.borrow().is_none());
    }

    #[tokio::test]
    async fn test_insert_never_sends_expired_token() {
        let (client, seen, _sub) = expired_client();

        let result = client
            .insert_record("interest_topics", &serde_json::json!({ "title": "Rust" }))
            .await;
        assert!(result.is_err());
        assert_eq!(*seen.borrow(), vec![false]);
        assert!(client.session.borrow().is_none());
    }

    #[tokio::test]
    async fn test_current_session_drops_unrefreshable_session() {
        let (client, seen, _sub) = expired_client();

        assert_eq!(client.current_session().await.unwrap(), None);
        assert_eq!(*seen.borrow(), vec![false]);
    }

    #[tokio::test]
    async fn test_sign_out_with_expired_session_is_local() {
        let (client, seen, _sub) = expired_client();

        client.sign_out().await.unwrap();
        assert!(client.session.borrow().is_none());
        assert!(seen.borrow().iter().all(|signed_in| !signed_in));
    }

    #[tokio::test]
    async fn test_sign_out_without_session_notifies_absent() {
        let client = SupabaseClient::new(BackendConfig::new("http://127.0.0.1:9", "anon"));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = client.on_session_change(move |s| sink.borrow_mut().push(s.is_some()));

        client.sign_out().await.unwrap();
        assert_eq!(*seen.borrow(), vec![false]);
    }
}
