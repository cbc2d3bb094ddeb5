//! Admin authentication.
//!
//! This module provides:
//! - The process-wide [`SessionStore`] with persisted restore and
//!   coalesced token refresh
//! - [`RemoteAuthProvider`], the login/refresh exchange against the API

mod remote_provider;
mod session_store;

pub use remote_provider::{LOGIN_PATH, REFRESH_PATH, RemoteAuthProvider};
pub use session_store::SessionStore;
