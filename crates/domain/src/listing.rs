//! Unfiltered lists and the filtered views derived from them.

use chrono::{DateTime, Utc};

use crate::appointment::{Appointment, AppointmentStatus};

/// What a list view should display after filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingView<'a, T> {
    /// The server returned no items at all.
    Empty,
    /// Items exist but none pass the current filters.
    NoResults,
    /// Items that pass, in server order.
    Results(Vec<&'a T>),
}

impl<T> ListingView<'_, T> {
    /// Number of visible items.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Results(items) => items.len(),
            Self::Empty | Self::NoResults => 0,
        }
    }

    /// True when nothing is visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A server-provided list held unfiltered.
///
/// Filtering only ever produces views; the held items change only through
/// [`Listing::replace`] or [`Listing::remove_where`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing<T> {
    items: Vec<T>,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Listing<T> {
    /// Wraps a freshly loaded list.
    #[must_use]
    pub const fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    /// All held items.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of held items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when nothing is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replaces the held items after a reload.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Returns the first item matching `predicate`.
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<&T> {
        self.items.iter().find(|item| predicate(item))
    }

    /// Builds the filtered view without touching the held items.
    pub fn view(&self, predicate: impl Fn(&T) -> bool) -> ListingView<'_, T> {
        if self.items.is_empty() {
            return ListingView::Empty;
        }
        let visible: Vec<&T> = self.items.iter().filter(|item| predicate(item)).collect();
        if visible.is_empty() {
            ListingView::NoResults
        } else {
            ListingView::Results(visible)
        }
    }

    /// Drops matching items and returns how many were removed.
    pub fn remove_where(&mut self, predicate: impl Fn(&T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !predicate(item));
        before - self.items.len()
    }
}

/// A client's appointments split around one evaluation instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentHistory {
    /// Appointments still to come.
    pub upcoming: Vec<Appointment>,
    /// Appointments already past.
    pub past: Vec<Appointment>,
}

impl AppointmentHistory {
    /// Splits `appointments` by their status at `now`.
    #[must_use]
    pub fn split(appointments: Vec<Appointment>, now: DateTime<Utc>) -> Self {
        let (upcoming, past) = appointments
            .into_iter()
            .partition(|a| a.status_at(now) == AppointmentStatus::Scheduled);
        Self { upcoming, past }
    }

    /// Total number of appointments.
    #[must_use]
    pub fn total(&self) -> usize {
        self.upcoming.len() + self.past.len()
    }
}
