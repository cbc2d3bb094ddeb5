//! Clinic client records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::ClientId;

/// A clinic client as served by `/clients`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Server identifier.
    pub id: ClientId,
    /// Full name.
    pub name: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: String,
    /// When the client record was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Client contact details denormalised onto each appointment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSnapshot {
    /// Full name.
    #[serde(default)]
    pub name: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: String,
}

/// Anything with a name, email and phone that the search box can match.
pub trait ContactFields {
    /// Client name.
    fn name(&self) -> &str;
    /// Client email.
    fn email(&self) -> &str;
    /// Client phone.
    fn phone(&self) -> &str;
}

impl ContactFields for Client {
    fn name(&self) -> &str {
        &self.name
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn phone(&self) -> &str {
        &self.phone
    }
}

impl ContactFields for ClientSnapshot {
    fn name(&self) -> &str {
        &self.name
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn phone(&self) -> &str {
        &self.phone
    }
}
