//! Login gate for the admin console.
//!
//! A successful login writes a small session marker into the data
//! directory; logging out removes it. The session only counts while it
//! belongs to the currently configured admin user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::AdminCredentials;

const SESSION_FILE: &str = "session.json";

/// Answers whether the console may run, and ends the session.
pub trait AuthGate {
    fn is_authorized(&self) -> bool;
    fn logout(&self) -> Result<(), AuthError>;
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Admin credentials are not configured. Set admin.username and admin.password.")]
    NotConfigured,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Session file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Corrupt session file: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub logged_in_at: DateTime<Utc>,
}

pub struct SessionAuth {
    session_path: PathBuf,
    credentials: AdminCredentials,
}

impl SessionAuth {
    pub fn new(data_dir: &Path, credentials: AdminCredentials) -> Self {
        Self {
            session_path: data_dir.join(SESSION_FILE),
            credentials,
        }
    }

    pub fn session_path(&self) -> &Path {
        &self.session_path
    }

    /// Checks the given credentials and persists a session on success.
    pub fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let (Some(valid_user), Some(valid_pass)) =
            (&self.credentials.username, &self.credentials.password)
        else {
            return Err(AuthError::NotConfigured);
        };
        if username != valid_user || password != valid_pass {
            tracing::warn!(username, "rejected login");
            return Err(AuthError::InvalidCredentials);
        }

        let session = Session {
            username: username.to_string(),
            logged_in_at: Utc::now(),
        };
        if let Some(parent) = self.session_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.session_path, serde_json::to_vec_pretty(&session)?)?;
        tracing::info!(username, "logged in");
        Ok(session)
    }

    /// The stored session, if there is a readable one.
    pub fn current(&self) -> Option<Session> {
        let contents = std::fs::read(&self.session_path).ok()?;
        match serde_json::from_slice(&contents) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("ignoring unreadable session file: {}", e);
                None
            }
        }
    }
}

impl AuthGate for SessionAuth {
    fn is_authorized(&self) -> bool {
        match (self.current(), &self.credentials.username) {
            (Some(session), Some(username)) => &session.username == username,
            _ => false,
        }
    }

    fn logout(&self) -> Result<(), AuthError> {
        match std::fs::remove_file(&self.session_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
