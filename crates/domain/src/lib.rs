//! Clinic Domain - Core types for the clinic admin console
//!
//! This crate defines the data the console reads from the clinic API and
//! the pure logic applied to it client-side. All types here are plain Rust
//! with no I/O dependencies.

pub mod appointment;
pub mod client;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod id;
pub mod listing;
pub mod request;
pub mod response;
pub mod session;
pub mod slot;

pub use appointment::{Appointment, AppointmentStatus, AppointmentUpdate, NewAppointment};
pub use client::{Client, ClientSnapshot, ContactFields};
pub use envelope::{ApiEnvelope, EnvelopeError};
pub use error::{DomainError, DomainResult};
pub use filter::{AppointmentFilter, DateFilter, SearchTerm, StatusFilter};
pub use id::{AppointmentId, ClientId};
pub use listing::{AppointmentHistory, Listing, ListingView};
pub use request::{ApiRequest, HttpMethod};
pub use response::{ApiResponse, StatusCode};
pub use session::{
    AdminProfile, Credentials, LoginGrant, Session, SessionSnapshot, SessionStatus, TokenPair,
};
pub use slot::LocalSlot;
