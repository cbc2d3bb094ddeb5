//! Application error types

use clinic_domain::{DomainError, EnvelopeError};
use thiserror::Error;

use crate::ports::{AuthError, StorageError, TransportError};

/// Application-level errors.
///
/// Every variant renders as a message fit to show inline next to the
/// action that failed.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Input failed domain validation.
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Login was rejected or could not complete.
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// The refresh token was rejected; the session has been cleared.
    #[error("session expired, please log in again")]
    SessionExpired,

    /// An authenticated call was attempted without a session.
    #[error("not logged in")]
    Unauthenticated,

    /// The request could not complete.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered `success: false`.
    #[error("{0}")]
    Api(String),

    /// The server answered with something other than the expected envelope.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// The requested resource was not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Reading or writing the persisted session failed.
    #[error("session storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApplicationError {
    /// True when the caller must send the admin back to login.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::SessionExpired | Self::Unauthenticated)
    }
}

impl From<TransportError> for ApplicationError {
    fn from(error: TransportError) -> Self {
        Self::Network(error.to_string())
    }
}

impl From<EnvelopeError> for ApplicationError {
    fn from(error: EnvelopeError) -> Self {
        match error {
            EnvelopeError::Failure(message) => Self::Api(message),
            EnvelopeError::MissingData => Self::Decode(error.to_string()),
        }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_envelope_failure_keeps_server_message() {
        let error = ApplicationError::from(EnvelopeError::Failure("Slot taken".to_string()));
        assert_eq!(error.to_string(), "Slot taken");
    }

    #[test]
    fn test_transport_error_is_network() {
        let error = ApplicationError::from(TransportError::Timeout { timeout_ms: 500 });
        assert!(matches!(error, ApplicationError::Network(_)));
    }

    #[test]
    fn test_requires_login() {
        assert!(ApplicationError::SessionExpired.requires_login());
        assert!(ApplicationError::Unauthenticated.requires_login());
        assert!(!ApplicationError::Api("nope".to_string()).requires_login());
    }
}
