//! Server-issued identifiers.
//!
//! Clients and appointments are keyed by opaque strings the API hands out.
//! The console never mints identifiers; it only refuses empty ones so a
//! missing argument cannot turn `/clients/{id}` into `/clients/`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

macro_rules! server_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a server identifier, rejecting blank values.
            ///
            /// # Errors
            ///
            /// Returns `DomainError::InvalidIdentifier` if the value is blank.
            pub fn new(value: impl Into<String>) -> DomainResult<Self> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::InvalidIdentifier(concat!($label, " id is empty").to_string()));
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> DomainResult<Self> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

server_id!(
    /// Identifier of a clinic client.
    ClientId,
    "client"
);

server_id!(
    /// Identifier of an appointment.
    AppointmentId,
    "appointment"
);
