//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while validating console input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier is empty or otherwise malformed.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A date or time could not be interpreted.
    #[error("invalid date/time: {0}")]
    InvalidDateTime(String),

    /// A filter keyword is not recognised.
    #[error("unknown filter: {0}")]
    UnknownFilter(String),

    /// An appointment submission cannot be sent as entered.
    #[error("invalid appointment: {0}")]
    InvalidAppointment(String),

    /// Login credentials are incomplete.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
