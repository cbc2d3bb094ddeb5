//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod auth_provider;
mod clock;
mod http_transport;
mod session_storage;

pub use auth_provider::{AuthError, AuthProvider};
pub use clock::Clock;
pub use http_transport::{HttpTransport, TransportError};
pub use session_storage::{SessionStorage, StorageError};
