//! Authentication provider port

use async_trait::async_trait;
use clinic_domain::{Credentials, LoginGrant, TokenPair};
use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The server refused the credentials or the refresh token.
    #[error("{0}")]
    Rejected(String),

    /// The auth endpoint could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The auth endpoint answered with an unreadable payload.
    #[error("unexpected auth response: {0}")]
    Decode(String),
}

impl AuthError {
    /// True when the server actively refused, as opposed to a failed exchange.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Issues and renews admin tokens.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Exchanges credentials for a token pair and the admin profile.
    async fn login(&self, credentials: &Credentials) -> Result<LoginGrant, AuthError>;

    /// Exchanges a refresh token for a new token pair.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;
}
