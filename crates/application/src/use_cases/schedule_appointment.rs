//! Create and edit appointment use case.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use clinic_domain::{
    Appointment, AppointmentId, AppointmentUpdate, ClientId, DomainError, NewAppointment,
};
use tracing::info;

use crate::api::ApiClient;
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{Clock, HttpTransport};

/// Use case behind the create and edit appointment forms.
pub struct ScheduleAppointment<T: HttpTransport> {
    api: ApiClient<T>,
    clock: Arc<dyn Clock>,
}

impl<T: HttpTransport> ScheduleAppointment<T> {
    /// Creates a new `ScheduleAppointment` use case.
    #[must_use]
    pub const fn new(api: ApiClient<T>, clock: Arc<dyn Clock>) -> Self {
        Self { api, clock }
    }

    /// Books `client_id` at `time`.
    ///
    /// # Errors
    /// - Returns `Domain` if `time` is already past
    /// - Returns any error from the create call
    pub async fn create(&self, client_id: &ClientId, time: DateTime<Utc>) -> ApplicationResult<()> {
        self.ensure_future(time)?;
        let appointment = NewAppointment {
            client_id: client_id.clone(),
            time,
        };
        self.api.create_appointment(&appointment).await?;
        info!(client_id = %client_id, %time, "appointment created");
        Ok(())
    }

    /// Finds an appointment to prefill the edit form.
    ///
    /// There is no single-appointment endpoint, so the full list is scanned.
    ///
    /// # Errors
    /// - Returns `NotFound` if no appointment has this id
    /// - Returns any error from the list call
    pub async fn load_for_edit(&self, id: &AppointmentId) -> ApplicationResult<Appointment> {
        self.api
            .list_appointments()
            .await?
            .into_iter()
            .find(|a| &a.id == id)
            .ok_or_else(|| ApplicationError::NotFound(format!("appointment {id}")))
    }

    /// Sends only the changed fields of an existing appointment.
    ///
    /// # Errors
    /// - Returns `Domain` if nothing changes or the new time is already past
    /// - Returns any error from the update call
    pub async fn reschedule(
        &self,
        id: &AppointmentId,
        update: &AppointmentUpdate,
    ) -> ApplicationResult<()> {
        if update.is_empty() {
            return Err(DomainError::InvalidAppointment("nothing to update".to_string()).into());
        }
        if let Some(time) = update.time {
            self.ensure_future(time)?;
        }
        self.api.update_appointment(id, update).await?;
        info!(appointment_id = %id, "appointment updated");
        Ok(())
    }

    fn ensure_future(&self, time: DateTime<Utc>) -> ApplicationResult<()> {
        if time < self.clock.now() {
            return Err(DomainError::InvalidAppointment(
                "appointment time must not be in the past".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::{
        FakeAuthProvider, FixedClock, MockTransport, logged_in_store, noon, ok_json,
    };
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    async fn use_case(transport: MockTransport) -> (ScheduleAppointment<MockTransport>, Arc<MockTransport>) {
        let transport = Arc::new(transport);
        let (session, _) = logged_in_store("current", Arc::new(FakeAuthProvider::accepting())).await;
        let api = ApiClient::new(transport.clone(), session);
        (ScheduleAppointment::new(api, Arc::new(FixedClock(noon()))), transport)
    }

    fn client_id() -> ClientId {
        ClientId::new("c-1").unwrap()
    }

    #[tokio::test]
    async fn test_create_in_future_posts() {
        let (use_case, transport) = use_case(MockTransport::always_ok(json!({"id": "a-9"}))).await;

        use_case
            .create(&client_id(), noon() + Duration::hours(2))
            .await
            .unwrap();

        let sent = &transport.requests()[0];
        assert_eq!(sent.path, "/appointments");
        assert_eq!(
            sent.body,
            Some(json!({"client_id": "c-1", "time": "2026-03-10T14:00:00.000Z"}))
        );
    }

    #[tokio::test]
    async fn test_create_in_past_sends_nothing() {
        let (use_case, transport) = use_case(MockTransport::always_ok(json!({}))).await;

        let error = use_case
            .create(&client_id(), noon() - Duration::minutes(1))
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            ApplicationError::Domain(DomainError::InvalidAppointment(_))
        ));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_create_exactly_now_is_allowed() {
        let (use_case, transport) = use_case(MockTransport::always_ok(json!({}))).await;

        use_case.create(&client_id(), noon()).await.unwrap();

        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_load_for_edit_scans_list() {
        let (use_case, _) = use_case(MockTransport::new(|_| {
            Ok(ok_json(&json!([
                {"id": "a-1", "client_id": "c-1", "time": "2026-03-11T09:00:00.000Z"},
                {"id": "a-2", "client_id": "c-2", "time": "2026-03-12T09:00:00.000Z"}
            ])))
        }))
        .await;

        let found = use_case
            .load_for_edit(&AppointmentId::new("a-2").unwrap())
            .await
            .unwrap();
        assert_eq!(found.client_id.as_str(), "c-2");

        let missing = use_case
            .load_for_edit(&AppointmentId::new("a-404").unwrap())
            .await
            .unwrap_err();
        assert_eq!(missing.to_string(), "appointment a-404 not found");
    }

    #[tokio::test]
    async fn test_reschedule_rejects_empty_update() {
        let (use_case, transport) = use_case(MockTransport::always_ok(json!({}))).await;

        let error = use_case
            .reschedule(&AppointmentId::new("a-1").unwrap(), &AppointmentUpdate::default())
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), "invalid appointment: nothing to update");
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_reschedule_sends_put() {
        let (use_case, transport) = use_case(MockTransport::always_ok(json!({}))).await;
        let update = AppointmentUpdate {
            client_id: None,
            time: Some(noon() + Duration::days(1)),
        };

        use_case
            .reschedule(&AppointmentId::new("a-1").unwrap(), &update)
            .await
            .unwrap();

        let sent = &transport.requests()[0];
        assert_eq!(sent.path, "/appointments/a-1");
        assert_eq!(sent.body, Some(json!({"time": "2026-03-11T12:00:00.000Z"})));
    }
}
