//! Load client details use case.

use std::sync::Arc;

use clinic_domain::{AppointmentHistory, Client, ClientId};
use tracing::warn;

use crate::api::ApiClient;
use crate::error::ApplicationResult;
use crate::ports::{Clock, HttpTransport};

/// A client together with their appointment history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientDetails {
    /// The client record.
    pub client: Client,
    /// Appointments split into upcoming and past.
    pub history: AppointmentHistory,
}

/// Use case for the client detail view.
pub struct LoadClientDetails<T: HttpTransport> {
    api: ApiClient<T>,
    clock: Arc<dyn Clock>,
}

impl<T: HttpTransport> LoadClientDetails<T> {
    /// Creates a new `LoadClientDetails` use case.
    #[must_use]
    pub const fn new(api: ApiClient<T>, clock: Arc<dyn Clock>) -> Self {
        Self { api, clock }
    }

    /// Fetches the client and their appointments concurrently.
    ///
    /// The history is a secondary panel: if it fails to load, the details
    /// are still returned with an empty history.
    ///
    /// # Errors
    /// - Returns the client fetch error if the client cannot be loaded
    /// - Returns a session error if either fetch lost the session
    pub async fn execute(&self, id: &ClientId) -> ApplicationResult<ClientDetails> {
        let (client, appointments) = tokio::join!(
            self.api.get_client(id),
            self.api.list_client_appointments(id)
        );
        let client = client?;

        let appointments = match appointments {
            Ok(appointments) => appointments,
            Err(e) if e.requires_login() => return Err(e),
            Err(e) => {
                warn!(client_id = %id, error = %e, "could not load appointment history");
                Vec::new()
            }
        };

        Ok(ClientDetails {
            client,
            history: AppointmentHistory::split(appointments, self.clock.now()),
        })
    }
}
