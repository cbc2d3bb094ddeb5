//! Local date and time pickers resolved to an absolute instant.

use std::fmt;

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::error::{DomainError, DomainResult};

/// A wall-clock date and time as the admin typed it, without a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LocalSlot {
    /// Calendar date.
    pub date: NaiveDate,
    /// Time of day.
    pub time: NaiveTime,
}

impl LocalSlot {
    /// Creates a slot from already-parsed parts.
    #[must_use]
    pub const fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self { date, time }
    }

    /// Parses `YYYY-MM-DD` and `HH:MM` (seconds optional).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateTime` naming the field that failed.
    pub fn parse(date: &str, time: &str) -> DomainResult<Self> {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|e| DomainError::InvalidDateTime(format!("date {date:?}: {e}")))?;
        let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%H:%M:%S"))
            .map_err(|e| DomainError::InvalidDateTime(format!("time {time:?}: {e}")))?;
        Ok(Self { date, time })
    }

    /// Splits an instant into the wall-clock slot it shows as in `tz`.
    #[must_use]
    pub fn from_instant<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> Self {
        let local = instant.with_timezone(tz).naive_local();
        Self {
            date: local.date(),
            time: local.time(),
        }
    }

    /// Interprets the slot in `tz`.
    ///
    /// A time repeated by a backward DST shift resolves to its first
    /// occurrence.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateTime` if the time is skipped in `tz`.
    pub fn resolve<Tz: TimeZone>(&self, tz: &Tz) -> DomainResult<DateTime<Utc>> {
        match tz.from_local_datetime(&self.naive()) {
            LocalResult::Single(at) | LocalResult::Ambiguous(at, _) => Ok(at.with_timezone(&Utc)),
            LocalResult::None => Err(DomainError::InvalidDateTime(format!(
                "{self} does not exist in the local timezone"
            ))),
        }
    }

    fn naive(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

impl fmt::Display for LocalSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date.format("%Y-%m-%d"), self.time.format("%H:%M"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_accepts_minutes_and_seconds() {
        let a = LocalSlot::parse("2026-03-12", "14:30").unwrap();
        let b = LocalSlot::parse(" 2026-03-12 ", "14:30:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "2026-03-12 14:30");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            LocalSlot::parse("12/03/2026", "14:30"),
            Err(DomainError::InvalidDateTime(m)) if m.starts_with("date")
        ));
        assert!(matches!(
            LocalSlot::parse("2026-03-12", "25:00"),
            Err(DomainError::InvalidDateTime(m)) if m.starts_with("time")
        ));
    }

    #[test]
    fn test_resolve_applies_offset() {
        let dubai = FixedOffset::east_opt(4 * 3600).unwrap();
        let slot = LocalSlot::parse("2026-03-12", "14:00").unwrap();

        assert_eq!(
            slot.resolve(&dubai).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 12, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_from_instant_inverts_resolve() {
        let offset = FixedOffset::west_opt(3 * 3600).unwrap();
        let instant = Utc.with_ymd_and_hms(2026, 3, 12, 1, 15, 0).unwrap();

        let slot = LocalSlot::from_instant(instant, &offset);

        assert_eq!(slot.to_string(), "2026-03-11 22:15");
        assert_eq!(slot.resolve(&offset).unwrap(), instant);
    }
}
