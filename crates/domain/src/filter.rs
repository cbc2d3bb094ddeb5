//! Client-side search and filter predicates.
//!
//! These run over lists the server already returned; they never issue
//! requests and never reorder or mutate the input.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};

use crate::appointment::{Appointment, AppointmentStatus};
use crate::client::ContactFields;
use crate::error::{DomainError, DomainResult};

/// Case-insensitive substring search over name, email and phone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Creates a search term. Whitespace is kept and must match too.
    #[must_use]
    pub fn new(term: impl AsRef<str>) -> Self {
        Self(term.as_ref().to_lowercase())
    }

    /// True when the term is empty or whitespace and matches everything.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Returns true if any contact field contains the term.
    #[must_use]
    pub fn matches(&self, contact: &impl ContactFields) -> bool {
        if self.is_blank() {
            return true;
        }
        [contact.name(), contact.email(), contact.phone()]
            .iter()
            .any(|field| field.to_lowercase().contains(&self.0))
    }
}

/// Filter on derived appointment status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// No status filtering.
    #[default]
    All,
    /// Only appointments that have not started yet.
    Scheduled,
    /// Only appointments in the past.
    Completed,
}

impl StatusFilter {
    /// Returns true if an appointment with `status` passes.
    #[must_use]
    pub fn accepts(self, status: AppointmentStatus) -> bool {
        match self {
            Self::All => true,
            Self::Scheduled => status == AppointmentStatus::Scheduled,
            Self::Completed => status == AppointmentStatus::Completed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            other => Err(DomainError::UnknownFilter(format!("status '{other}'"))),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
        })
    }
}

/// Filter on a date window anchored at local midnight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateFilter {
    /// No date filtering.
    #[default]
    All,
    /// From midnight today, for 24 hours.
    Today,
    /// From midnight tomorrow, for 24 hours.
    Tomorrow,
    /// From midnight today, for 7 days.
    Week,
    /// From midnight today, for 30 days.
    Month,
}

impl DateFilter {
    /// Returns the half-open `[start, end)` window for `now`, or `None` for `All`.
    ///
    /// Midnight is taken in `now`'s own timezone, so pass a `Local` instant
    /// to get the admin's calendar day.
    #[must_use]
    pub fn window<Tz: TimeZone>(self, now: &DateTime<Tz>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let (offset_days, length_days) = match self {
            Self::All => return None,
            Self::Today => (0, 1),
            Self::Tomorrow => (1, 1),
            Self::Week => (0, 7),
            Self::Month => (0, 30),
        };
        let midnight = local_midnight(now);
        let start = midnight + Duration::days(offset_days);
        Some((start, start + Duration::days(length_days)))
    }

    /// Returns true if `time` falls inside the window for `now`.
    #[must_use]
    pub fn accepts<Tz: TimeZone>(self, time: DateTime<Utc>, now: &DateTime<Tz>) -> bool {
        self.window(now)
            .is_none_or(|(start, end)| time >= start && time < end)
    }
}

fn local_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let naive_midnight = now.date_naive().and_time(NaiveTime::MIN);
    now.timezone()
        .from_local_datetime(&naive_midnight)
        .earliest()
        .map_or_else(
            // Midnight skipped by a DST jump: fall back to the wall-clock distance.
            || now.with_timezone(&Utc) - (now.time() - NaiveTime::MIN),
            |midnight| midnight.with_timezone(&Utc),
        )
}

impl FromStr for DateFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "tomorrow" => Ok(Self::Tomorrow),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(DomainError::UnknownFilter(format!("date '{other}'"))),
        }
    }
}

impl fmt::Display for DateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
            Self::Week => "week",
            Self::Month => "month",
        })
    }
}

/// Search, status and date filters combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    /// Text search over the client snapshot.
    pub search: SearchTerm,
    /// Derived-status filter.
    pub status: StatusFilter,
    /// Date window filter.
    pub date: DateFilter,
}

impl AppointmentFilter {
    /// True when any filter narrows the list.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.search.is_blank() || self.status != StatusFilter::All || self.date != DateFilter::All
    }

    /// Resets every filter to its pass-through value.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Returns true if `appointment` passes every filter at `now`.
    #[must_use]
    pub fn matches<Tz: TimeZone>(&self, appointment: &Appointment, now: &DateTime<Tz>) -> bool {
        self.search.matches(&appointment.client)
            && self
                .status
                .accepts(appointment.status_at(now.with_timezone(&Utc)))
            && self.date.accepts(appointment.time, now)
    }
}
