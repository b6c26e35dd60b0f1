//! # User and session models
//!
//! ## [`User`]
//!
//! The subset of the backend's user object the front end reads: the stable `id`
//! (a UUID string, kept as `String` so it crosses into WASM without extra crates),
//! the optional `email`, and `last_sign_in_at`. It is never cached beyond a single
//! fetch; views ask the backend again whenever they need it.
//!
//! ## [`Session`]
//!
//! Proof of authentication issued on sign-in and replaced on token refresh. It
//! embeds the [`User`] it was issued for. `expires_at` is a unix timestamp in
//! seconds; [`Session::is_expired_at`] treats sessions within
//! [`EXPIRY_MARGIN_SECS`] of expiry as already expired so a refresh happens before
//! requests start failing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const EXPIRY_MARGIN_SECS: i64 = 10;

/// Authenticated user as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub last_sign_in_at: Option<DateTime<Utc>>,
}

impl User {
    /// Email for display, or the id when the account has none.
    pub fn display_name(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.id)
    }
}

/// Backend-issued session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: User,
}

impl Session {
    /// Whether the session should be treated as expired at `now` (unix seconds).
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at - EXPIRY_MARGIN_SECS <= now)
    }
}
