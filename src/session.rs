//! Session store: one opaque bearer token persisted on disk.
//!
//! The token lives at `~/.relo/auth.json` under a single fixed key; the
//! file's presence is the only session-resume signal. Restore is a single
//! attempt that fails closed: any problem validating the token deletes the
//! file and leaves the store unauthenticated.

use crate::api::{ApiClient, ApiError};
use crate::logging;
use crate::storage;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    Authenticated {
        username: String,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct AuthFile {
    token: String,
}

pub struct SessionStore {
    path: PathBuf,
    state: AuthState,
}

impl SessionStore {
    /// Session store at the default location (`~/.relo/auth.json`).
    pub fn open() -> Result<Self> {
        Ok(Self::at(storage::relo_dir()?.join("auth.json")))
    }

    /// Session store backed by an explicit file. Used by tests.
    pub fn at(path: PathBuf) -> Self {
        Self {
            path,
            state: AuthState::Unauthenticated,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, AuthState::Authenticated { .. })
    }

    pub fn username(&self) -> Option<&str> {
        match &self.state {
            AuthState::Authenticated { username } => Some(username),
            AuthState::Unauthenticated => None,
        }
    }

    fn read_token(&self) -> Option<String> {
        storage::read_json::<AuthFile>(&self.path)
            .ok()
            .map(|f| f.token)
    }

    fn discard_token(&self) {
        let _ = std::fs::remove_file(&self.path);
    }

    /// Resume a persisted session, validating the token against `/auth/me`.
    ///
    /// Single attempt, no retry. On any failure (no file, network error,
    /// rejected token) the persisted token is discarded and `false` is
    /// returned with the store unauthenticated.
    pub async fn restore(&mut self, api: &mut ApiClient) -> bool {
        let Some(token) = self.read_token() else {
            return false;
        };

        api.set_token(token);
        match api.me().await {
            Ok(identity) => {
                self.state = AuthState::Authenticated {
                    username: identity.username,
                };
                true
            }
            Err(e) => {
                logging::info(&format!("Session restore failed, clearing token: {}", e));
                self.discard_token();
                api.clear_token();
                self.state = AuthState::Unauthenticated;
                false
            }
        }
    }

    /// Install a freshly issued token: persist it, attach it to the client,
    /// and mark the store authenticated.
    pub fn adopt(&mut self, api: &mut ApiClient, token: String, username: String) -> Result<()> {
        storage::write_json(&self.path, &AuthFile { token: token.clone() })?;
        api.set_token(token);
        self.state = AuthState::Authenticated { username };
        Ok(())
    }

    /// Authenticate with the backend and persist the session.
    ///
    /// Callers surface any `Err` as one generic invalid-credentials message;
    /// nothing here distinguishes a wrong username from a wrong password.
    pub async fn login(
        &mut self,
        api: &mut ApiClient,
        username: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        let token = api.login(username, password).await?.access_token;

        // Identity fetch populates the display name; a failure there leaves
        // the session authenticated with an empty username, as the original
        // client behaved.
        let mut probe = api.clone();
        probe.set_token(token.clone());
        let username = match probe.me().await {
            Ok(identity) => identity.username,
            Err(e) => {
                logging::warn(&format!("Identity fetch after login failed: {}", e));
                String::new()
            }
        };

        if let Err(e) = self.adopt(api, token, username) {
            logging::error(&format!("Failed to persist session token: {}", e));
        }
        Ok(())
    }

    /// Drop the session unconditionally. No server-side call is made.
    pub fn logout(&mut self, api: &mut ApiClient) {
        self.discard_token();
        api.clear_token();
        self.state = AuthState::Unauthenticated;
    }

    /// First half of the demo reset flow: returns the reset code the backend
    /// issued for `username`.
    pub async fn request_password_reset(
        &self,
        api: &ApiClient,
        username: &str,
    ) -> Result<String, ApiError> {
        Ok(api.request_password_reset(username).await?.reset_code)
    }

    /// Second half of the reset flow. On success the caller returns to the
    /// login screen after a fixed delay.
    pub async fn complete_password_reset(
        &self,
        api: &ApiClient,
        username: &str,
        reset_code: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        api.complete_password_reset(username, reset_code, new_password)
            .await
    }
}
