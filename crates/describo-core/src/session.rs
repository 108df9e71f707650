//! # Session
//!
//! The authenticated-identity state of the current user.
//!
//! ## Invariant
//! `is_authenticated` is true if and only if a token is present *and* it was
//! accepted by the last login, registration or validation check. The fields
//! are private so that the only ways to reach an authenticated state are
//! [`Session::authenticated`] and [`Session::sign_in`].
//!
//! ```text
//! ┌──────────────┐  login/register ok   ┌────────────────┐
//! │  Anonymous   │ ───────────────────► │ Authenticated  │
//! │  token: none │ ◄─────────────────── │ token: Some(t) │
//! └──────────────┘  logout / invalid    └────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The user record returned by the auth endpoints and persisted next to the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Snapshot of the authentication state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    user: Option<AuthUser>,
    auth_token: Option<String>,
    is_authenticated: bool,
    is_loading: bool,
    last_error: Option<String>,
}

impl Session {
    /// An empty, unauthenticated session.
    pub fn anonymous() -> Self {
        Session::default()
    }

    /// A session for a user whose token was just accepted.
    pub fn authenticated(user: AuthUser, token: impl Into<String>) -> Self {
        Session {
            user: Some(user),
            auth_token: Some(token.into()),
            is_authenticated: true,
            is_loading: false,
            last_error: None,
        }
    }

    /// Replaces identity and token, keeping the loading flag as is.
    pub fn sign_in(&mut self, user: AuthUser, token: impl Into<String>) {
        self.user = Some(user);
        self.auth_token = Some(token.into());
        self.is_authenticated = true;
        self.last_error = None;
    }

    /// Drops identity and token, keeping the loading flag and last error.
    pub fn sign_out(&mut self) {
        self.user = None;
        self.auth_token = None;
        self.is_authenticated = false;
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    pub fn current_user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    pub fn display_name(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.name.as_str())
    }

    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.email.as_str())
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }
}
