//! Session gate for the console.
//!
//! Credentials come from the config file: a username and the SHA-256
//! hex digest of the password, so the plaintext never sits on disk. A
//! successful login writes a session record to the store; the session
//! expires after a configurable number of hours.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::config::Config;
use crate::storage::{StorageBackend, StoreError};

pub const AUTH_KEY: &str = "mymanager_auth";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub username: String,
    /// Milliseconds since the Unix epoch, set at login.
    pub timestamp: i64,
}

pub struct AuthService {
    backend: Arc<dyn StorageBackend>,
    username: String,
    password_sha256: String,
    max_age_hours: u64,
}

impl AuthService {
    pub fn new(backend: Arc<dyn StorageBackend>, config: &Config) -> Self {
        AuthService {
            backend,
            username: config.auth.username.clone(),
            password_sha256: config.auth.password_sha256.to_lowercase(),
            max_age_hours: config.behavior.session_max_age_hours,
        }
    }

    /// Checks the credentials and opens a session. Returns `false` on a
    /// mismatch without touching the store.
    pub fn login(&self, username: &str, password: &str) -> Result<bool, StoreError> {
        if username != self.username || sha256_hex(password) != self.password_sha256 {
            info!(target: "auth", "rejected login for {username}");
            return Ok(false);
        }
        let session = Session {
            username: username.to_string(),
            timestamp: Utc::now().timestamp_millis(),
        };
        let raw = serde_json::to_string(&session)
            .map_err(|err| StoreError::Backend(err.to_string()))?;
        self.backend.set(AUTH_KEY, &raw)?;
        info!(target: "auth", "opened session for {username}");
        Ok(true)
    }

    pub fn logout(&self) -> Result<(), StoreError> {
        self.backend.remove(AUTH_KEY)
    }

    /// True while an unexpired session exists. An expired session is
    /// removed on the way out; an unreadable one just fails the check.
    pub fn is_authenticated(&self) -> bool {
        let Some(session) = self.current_user() else {
            return false;
        };
        let max_age_ms = self.max_age_hours as i64 * 60 * 60 * 1000;
        if Utc::now().timestamp_millis() - session.timestamp > max_age_ms {
            if let Err(err) = self.logout() {
                warn!(target: "auth", "could not clear expired session: {err}");
            }
            return false;
        }
        true
    }

    pub fn current_user(&self) -> Option<Session> {
        match self.backend.get(AUTH_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).ok(),
            Ok(None) => None,
            Err(err) => {
                warn!(target: "auth", "could not read session: {err}");
                None
            }
        }
    }
}

pub fn sha256_hex(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    format!("{digest:x}")
}
