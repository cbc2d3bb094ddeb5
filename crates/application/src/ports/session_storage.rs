//! Session storage port
//!
//! Defines the interface for persisting the admin session between runs.

use async_trait::async_trait;
use clinic_domain::SessionSnapshot;

/// Errors that can occur while persisting the session.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Key-value persistence for the session fields.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Loads whatever is stored. Returns an empty snapshot if nothing is.
    async fn load(&self) -> Result<SessionSnapshot, StorageError>;

    /// Replaces the stored fields with `snapshot`.
    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StorageError>;

    /// Removes every stored field at once.
    async fn clear(&self) -> Result<(), StorageError>;
}
