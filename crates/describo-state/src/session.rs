//! # Session Manager
//!
//! Owns the [`Session`] of the current user and keeps it in step with the
//! durable storage.
//!
//! ## Flows
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │ restore()    storage ──► token + user? ──► validate_token ──► signed in │
//! │                 │ missing/garbled            │ refused/failed           │
//! │                 └────────────► clear storage ◄┘  (logged, no error)     │
//! │                                                                         │
//! │ login()      ──► POST /auth/login    ──► persist token + user           │
//! │ register()   ──► POST /auth/register ──► persist token + user           │
//! │                   │ failure: last_error = user message                  │
//! │                                                                         │
//! │ logout()     clear storage, anonymous session (synchronous)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No operation returns an error: failures land in `last_error` and in the
//! returned flag or outcome.
//!
//! Every sign-in and sign-out bumps a session epoch. A `restore()` that
//! resolves after the epoch moved leaves both memory and storage alone.

use std::sync::{Arc, RwLock};

use describo_core::{AuthUser, Session};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::error::ServiceResult;
use crate::pending::{read, write, PendingCounter, PendingGuard, TracksPending};
use crate::remote::{AuthResponse, LoginCredentials, RegisterData, RemoteService};
use crate::storage::{KeyValueStorage, AUTH_TOKEN_KEY, AUTH_USER_KEY};

/// Result of a password reset request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetPasswordOutcome {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Default)]
struct SessionState {
    session: Session,
    pending: PendingCounter,
    epoch: u64,
}

impl TracksPending for SessionState {
    fn counter(&mut self) -> &mut PendingCounter {
        &mut self.pending
    }

    fn pending_changed(&mut self) {
        let loading = self.pending.is_loading();
        self.session.set_loading(loading);
    }
}

/// Authentication state holder.
pub struct SessionManager {
    remote: Arc<dyn RemoteService>,
    storage: Arc<dyn KeyValueStorage>,
    state: RwLock<SessionState>,
}

impl SessionManager {
    pub fn new(remote: Arc<dyn RemoteService>, storage: Arc<dyn KeyValueStorage>) -> Self {
        SessionManager {
            remote,
            storage,
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Copy of the current session.
    pub fn snapshot(&self) -> Session {
        read(&self.state).session.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        read(&self.state).session.is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        read(&self.state).session.is_loading()
    }

    pub fn last_error(&self) -> Option<String> {
        read(&self.state).session.last_error().map(str::to_string)
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        read(&self.state).session.user().cloned()
    }

    pub fn clear_error(&self) {
        write(&self.state).session.clear_error();
    }

    // =========================================================================
    // Restore
    // =========================================================================

    /// Rebuilds the session from storage, as on application start.
    ///
    /// Anything short of a stored token the service still accepts ends with
    /// both storage keys cleared and an anonymous session. None of those
    /// outcomes is reported to the user.
    #[instrument(skip(self))]
    pub async fn restore(&self) -> bool {
        let _pending = PendingGuard::enter(&self.state);

        let Some((token, user)) = self.read_persisted() else {
            self.clear_persisted();
            return false;
        };
        let epoch = read(&self.state).epoch;

        match self.remote.validate_token(&token).await {
            Ok(true) => {
                let mut state = write(&self.state);
                if state.epoch != epoch {
                    debug!("Session changed during restore, result dropped");
                    return false;
                }
                info!(user_id = %user.id, "Restored session");
                state.session.sign_in(user, token);
                true
            }
            Ok(false) => {
                info!(user_id = %user.id, "Stored token refused, clearing session");
                self.discard_restored(epoch, &token);
                false
            }
            Err(e) => {
                warn!(error = %e, "Token validation failed, clearing session");
                self.discard_restored(epoch, &token);
                false
            }
        }
    }

    /// Drops a token that failed validation, unless a sign-in or sign-out
    /// happened meanwhile. Storage is cleared only while it still holds
    /// that token.
    fn discard_restored(&self, epoch: u64, token: &str) {
        let mut state = write(&self.state);
        if state.epoch != epoch {
            debug!("Session changed during restore, keeping it");
            return;
        }
        if self.storage_get(AUTH_TOKEN_KEY).as_deref() == Some(token) {
            self.clear_persisted();
        }
        state.session.sign_out();
    }

    fn read_persisted(&self) -> Option<(String, AuthUser)> {
        let token = self.storage_get(AUTH_TOKEN_KEY)?;
        let raw_user = self.storage_get(AUTH_USER_KEY)?;

        match serde_json::from_str::<AuthUser>(&raw_user) {
            Ok(user) => Some((token, user)),
            Err(e) => {
                warn!(error = %e, "Stored user record is malformed");
                None
            }
        }
    }

    fn storage_get(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Failed to read session storage");
                None
            }
        }
    }

    // =========================================================================
    // Login / Register / Reset
    // =========================================================================

    /// Signs in with email and password. Returns true on success.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> bool {
        let _pending = self.begin_request();

        let credentials = LoginCredentials {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let result = self.remote.login(&credentials).await;
        self.complete_auth(result, "login")
    }

    /// Creates an account and signs in with it. Returns true on success.
    ///
    /// Form checks (required fields, password confirmation, minimum length)
    /// belong to the caller; see
    /// [`validate_registration_form`](describo_core::validation::validate_registration_form).
    #[instrument(skip(self, password))]
    pub async fn register(&self, name: &str, email: &str, password: &str) -> bool {
        let _pending = self.begin_request();

        let data = RegisterData {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let result = self.remote.register(&data).await;
        self.complete_auth(result, "register")
    }

    /// Asks the service to send password reset instructions.
    #[instrument(skip(self))]
    pub async fn reset_password(&self, email: &str) -> ResetPasswordOutcome {
        let _pending = self.begin_request();

        match self.remote.reset_password(email.trim()).await {
            Ok(response) => {
                info!("Password reset requested");
                ResetPasswordOutcome {
                    success: true,
                    message: response.message,
                }
            }
            Err(e) => {
                warn!(error = %e, "Password reset failed");
                let message = e.user_message();
                write(&self.state).session.set_error(message.clone());
                ResetPasswordOutcome {
                    success: false,
                    message,
                }
            }
        }
    }

    fn begin_request(&self) -> PendingGuard<'_, SessionState> {
        let guard = PendingGuard::enter(&self.state);
        write(&self.state).session.clear_error();
        guard
    }

    fn complete_auth(&self, result: ServiceResult<AuthResponse>, action: &str) -> bool {
        match result {
            Ok(AuthResponse { token, user }) => {
                self.persist(&token, &user);
                info!(user_id = %user.id, action, "Signed in");
                let mut state = write(&self.state);
                state.epoch += 1;
                state.session.sign_in(user, token);
                true
            }
            Err(e) => {
                warn!(error = %e, action, "Authentication failed");
                write(&self.state).session.set_error(e.user_message());
                false
            }
        }
    }

    /// Writes token and user to storage. A failed write keeps the session
    /// in memory only.
    fn persist(&self, token: &str, user: &AuthUser) {
        let raw_user = match serde_json::to_string(user) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Failed to serialize user, session not persisted");
                return;
            }
        };

        let written = self
            .storage
            .set(AUTH_TOKEN_KEY, token)
            .and_then(|()| self.storage.set(AUTH_USER_KEY, &raw_user));
        if let Err(e) = written {
            warn!(error = %e, "Failed to persist session");
            self.clear_persisted();
        }
    }

    // =========================================================================
    // Logout
    // =========================================================================

    /// Signs out: clears storage and the in-memory session.
    pub fn logout(&self) {
        self.clear_persisted();
        let mut state = write(&self.state);
        state.epoch += 1;
        state.session.sign_out();
        state.session.clear_error();
        info!("Signed out");
    }

    fn clear_persisted(&self) {
        for key in [AUTH_TOKEN_KEY, AUTH_USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!(key, error = %e, "Failed to clear session storage");
            }
        }
        debug!("Session storage cleared");
    }
}
