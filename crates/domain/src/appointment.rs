//! Appointment records and their derived status.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ClientSnapshot;
use crate::id::{AppointmentId, ClientId};

/// An appointment as served by `/appointments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Server identifier.
    pub id: AppointmentId,
    /// Owning client.
    pub client_id: ClientId,
    /// Contact details of the client at read time.
    #[serde(default)]
    pub client: ClientSnapshot,
    /// Absolute start time.
    pub time: DateTime<Utc>,
}

impl Appointment {
    /// Derives the status relative to `now`.
    ///
    /// Never cached: callers pass the evaluation instant every time.
    #[must_use]
    pub fn status_at(&self, now: DateTime<Utc>) -> AppointmentStatus {
        AppointmentStatus::at(self.time, now)
    }
}

/// Whether an appointment still lies ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppointmentStatus {
    /// Start time is at or after the evaluation instant.
    Scheduled,
    /// Start time is strictly before the evaluation instant.
    Completed,
}

impl AppointmentStatus {
    /// Completed iff `time < now`.
    #[must_use]
    pub fn at(time: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if time < now {
            Self::Completed
        } else {
            Self::Scheduled
        }
    }

    /// Returns the label shown in listings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Body of `POST /appointments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAppointment {
    /// Client to book.
    pub client_id: ClientId,
    /// Start time, sent as ISO-8601 UTC.
    #[serde(with = "iso_millis")]
    pub time: DateTime<Utc>,
}

/// Body of `PUT /appointments/{id}`; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppointmentUpdate {
    /// New client, if reassigning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    /// New start time, if rescheduling.
    #[serde(skip_serializing_if = "Option::is_none", with = "iso_millis_opt")]
    pub time: Option<DateTime<Utc>>,
}

impl AppointmentUpdate {
    /// Returns true when the update would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.client_id.is_none() && self.time.is_none()
    }
}

/// Formats instants the way browsers' `toISOString` does.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::Serializer;

    pub fn serialize<S: Serializer>(time: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&time.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

mod iso_millis_opt {
    use chrono::{DateTime, Utc};
    use serde::Serializer;

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(time: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error> {
        match time {
            Some(time) => super::iso_millis::serialize(time, s),
            None => s.serialize_none(),
        }
    }
}
