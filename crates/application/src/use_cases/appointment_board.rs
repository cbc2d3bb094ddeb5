//! Appointment board use case.
//!
//! Holds the full appointment list once loaded and derives filtered views
//! from it on demand. Status and date windows are evaluated against the
//! clock on every view, never cached.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};
use clinic_domain::{Appointment, AppointmentFilter, AppointmentId, Listing, ListingView};
use tracing::debug;

use crate::api::ApiClient;
use crate::error::ApplicationResult;
use crate::ports::{Clock, HttpTransport};

/// State behind the appointments view.
pub struct AppointmentBoard<T: HttpTransport> {
    api: ApiClient<T>,
    clock: Arc<dyn Clock>,
    listing: Listing<Appointment>,
    /// Active filters. Changing them never refetches.
    pub filter: AppointmentFilter,
}

impl<T: HttpTransport> AppointmentBoard<T> {
    /// Creates an empty board.
    #[must_use]
    pub fn new(api: ApiClient<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            api,
            clock,
            listing: Listing::default(),
            filter: AppointmentFilter::default(),
        }
    }

    /// Replaces the held list with a fresh copy from the server.
    ///
    /// # Errors
    ///
    /// Any error from the list call. The previously held list is kept.
    pub async fn load(&mut self) -> ApplicationResult<usize> {
        let appointments = self.api.list_appointments().await?;
        debug!(count = appointments.len(), "appointments loaded");
        self.listing.replace(appointments);
        Ok(self.listing.len())
    }

    /// Every held appointment, unfiltered.
    #[must_use]
    pub fn appointments(&self) -> &[Appointment] {
        self.listing.items()
    }

    /// Filtered view with date windows anchored in `now`'s timezone.
    #[must_use]
    pub fn view_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> ListingView<'_, Appointment> {
        self.listing.view(|a| self.filter.matches(a, now))
    }

    /// Filtered view at the current instant in the local timezone.
    #[must_use]
    pub fn view(&self) -> ListingView<'_, Appointment> {
        self.view_at(&self.clock.now().with_timezone(&Local))
    }

    /// Looks up a held appointment.
    #[must_use]
    pub fn find(&self, id: &AppointmentId) -> Option<&Appointment> {
        self.listing.find(|a| &a.id == id)
    }

    /// Cancels on the server, then drops the appointment locally.
    ///
    /// # Errors
    ///
    /// Any error from the delete call, in which case the list is untouched.
    pub async fn cancel(&mut self, id: &AppointmentId) -> ApplicationResult<()> {
        self.api.cancel_appointment(id).await?;
        let removed = self.listing.remove_where(|a| &a.id == id);
        debug!(appointment_id = %id, removed, "appointment cancelled");
        Ok(())
    }
}
