//! Clinic Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod persistence;
pub mod serialization;

pub use adapters::{DEFAULT_TIMEOUT, ReqwestTransport, SystemClock};
pub use persistence::FileSessionStorage;
pub use serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};
