//! Credential provider trait and the trivial providers

use async_trait::async_trait;

/// Source of bearer tokens for authenticated resources
#[async_trait]
pub trait CredentialProvider: Send + Sync + std::fmt::Debug {
    /// Current token, if the user is signed in
    async fn token(&self) -> Option<String>;

    /// Called once per request that the server rejected with 401.
    ///
    /// Implementations clear whatever session they hold (the logout side
    /// effect); subsequent calls to [`token`](Self::token) should return `None`.
    async fn session_expired(&self);
}

/// Provider for anonymous access
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

#[async_trait]
impl CredentialProvider for NoCredentials {
    async fn token(&self) -> Option<String> {
        None
    }

    async fn session_expired(&self) {}
}

/// Fixed token, e.g. from the command line
#[derive(Clone)]
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    /// Wrap a token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticToken")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl CredentialProvider for StaticToken {
    async fn token(&self) -> Option<String> {
        Some(self.token.clone())
    }

    // A fixed token cannot be refreshed; the 401 surfaces as SessionExpired.
    async fn session_expired(&self) {}
}
