//! Clinic Application - Session, API client and use cases
//!
//! This crate defines the application layer with:
//! - Port traits (transport, session storage, auth provider, clock)
//! - The process-wide session store with token refresh
//! - The authenticated API client and its typed resource operations
//! - Use case orchestration for each console view
//! - Application-level error handling

pub mod api;
pub mod auth;
pub mod error;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
mod test_support;

pub use api::ApiClient;
pub use auth::{RemoteAuthProvider, SessionStore};
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{
    AuthError, AuthProvider, Clock, HttpTransport, SessionStorage, StorageError, TransportError,
};
pub use use_cases::{
    AppointmentBoard, ClientDetails, ClientDirectory, LoadClientDetails, ScheduleAppointment,
};
