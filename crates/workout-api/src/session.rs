//! Explicit credential context.
//!
//! The bearer token and the signed-in user live in a [`SessionContext`]
//! that is handed to the HTTP client and the interceptor at construction
//! time. Persistence is delegated to a [`CredentialStore`].

use std::sync::{Arc, Mutex, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{AuthResponse, User};

/// Credentials as persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("credential store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("credential store is corrupt: {0}")]
    Format(String),
}

/// Persistent storage for [`Credentials`].
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Option<Credentials>, CredentialError>;

    fn save(&self, credentials: &Credentials) -> Result<(), CredentialError>;

    fn clear(&self) -> Result<(), CredentialError>;
}

/// Non-persistent store; credentials vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<Credentials>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that starts out holding `credentials`.
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            slot: Mutex::new(Some(credentials)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Credentials>, CredentialError> {
        Ok(self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, credentials: &Credentials) -> Result<(), CredentialError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

/// The current user's credentials, cached in memory and mirrored to a store.
pub struct SessionContext {
    store: Arc<dyn CredentialStore>,
    current: RwLock<Option<Credentials>>,
}

impl SessionContext {
    /// Build a context, loading whatever the store already holds.
    ///
    /// An unreadable store is treated as signed out.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        let current = match store.load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable credential store");
                None
            }
        };
        Self {
            store,
            current: RwLock::new(current),
        }
    }

    /// A signed-out context backed by a [`MemoryCredentialStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryCredentialStore::new()))
    }

    /// Bearer token to attach to outgoing requests, if signed in.
    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|c| c.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.read().as_ref().and_then(|c| c.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// Record a successful login or registration and persist it.
    pub fn sign_in(&self, auth: &AuthResponse) -> Result<(), CredentialError> {
        let credentials = Credentials {
            token: auth.token.clone(),
            user: auth.user.clone(),
        };
        self.store.save(&credentials)?;
        *self.write() = Some(credentials);
        debug!("credentials stored");
        Ok(())
    }

    /// Forget the token and user, both in memory and in the store.
    pub fn sign_out(&self) -> Result<(), CredentialError> {
        *self.write() = None;
        self.store.clear()?;
        debug!("credentials cleared");
        Ok(())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<Credentials>> {
        self.current.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<Credentials>> {
        self.current.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
