//! Session-backed credentials
//!
//! Mirrors how a signed-in dashboard keeps its token: a persisted slot (a
//! token file, the equivalent of a browser cookie) that wins when present,
//! and an in-memory token held by the running session as a fallback.

use super::types::CredentialProvider;
use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Credentials for a signed-in session
#[derive(Debug, Clone, Default)]
pub struct SessionCredentials {
    /// Persisted token slot
    token_file: Option<PathBuf>,
    /// In-memory session token
    token: Arc<RwLock<Option<String>>>,
    /// Number of times the session was cleared after a 401
    logouts: Arc<AtomicUsize>,
}

impl SessionCredentials {
    /// Session with no persisted slot and no token
    pub fn new() -> Self {
        Self::default()
    }

    /// Session that reads its token from a file first
    pub fn with_token_file(path: impl AsRef<Path>) -> Self {
        Self {
            token_file: Some(path.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    /// Path of the persisted slot, if any
    pub fn token_file(&self) -> Option<&Path> {
        self.token_file.as_deref()
    }

    /// Set the in-memory token (after a login handled elsewhere)
    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    /// Write the token to the persisted slot
    pub async fn persist_token(&self, token: &str) -> Result<()> {
        if let Some(ref path) = self.token_file {
            tokio::fs::write(path, token).await?;
        }
        Ok(())
    }

    /// Clear both token slots
    pub async fn logout(&self) {
        if let Some(ref path) = self.token_file {
            match tokio::fs::remove_file(path).await {
                Ok(()) => debug!("Removed token file {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!("Failed to remove token file {}: {e}", path.display()),
            }
        }
        *self.token.write().await = None;
    }

    /// How many times a 401 cleared this session
    pub fn logout_count(&self) -> usize {
        self.logouts.load(Ordering::SeqCst)
    }

    async fn read_token_file(&self) -> Option<String> {
        let path = self.token_file.as_ref()?;
        match tokio::fs::read_to_string(path).await {
            Ok(contents) => {
                let token = contents.trim();
                (!token.is_empty()).then(|| token.to_string())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read token file {}: {e}", path.display());
                None
            }
        }
    }
}

#[async_trait]
impl CredentialProvider for SessionCredentials {
    async fn token(&self) -> Option<String> {
        if let Some(token) = self.read_token_file().await {
            return Some(token);
        }
        self.token.read().await.clone()
    }

    async fn session_expired(&self) {
        warn!("Session expired, clearing credentials");
        self.logouts.fetch_add(1, Ordering::SeqCst);
        self.logout().await;
    }
}
