//! Typed operations over the clinic resources.

use clinic_domain::{
    ApiEnvelope, ApiRequest, Appointment, AppointmentId, AppointmentUpdate, Client, ClientId,
    NewAppointment,
};
use serde_json::Value;

use super::ApiClient;
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::HttpTransport;

fn json_request<B: serde::Serialize>(request: ApiRequest, body: &B) -> ApplicationResult<ApiRequest> {
    request
        .with_json(body)
        .map_err(|e| ApplicationError::Decode(format!("could not encode request: {e}")))
}

impl<T: HttpTransport> ApiClient<T> {
    /// `GET /clients`
    ///
    /// # Errors
    ///
    /// Any error from [`ApiClient::authenticated_request`], or `Api` with the
    /// server message.
    pub async fn list_clients(&self) -> ApplicationResult<Vec<Client>> {
        let envelope: ApiEnvelope<Vec<Client>> =
            self.authenticated_request(ApiRequest::get("/clients")).await?;
        Ok(envelope.into_data()?)
    }

    /// `GET /clients/{id}`
    ///
    /// # Errors
    ///
    /// As [`ApiClient::list_clients`].
    pub async fn get_client(&self, id: &ClientId) -> ApplicationResult<Client> {
        let envelope: ApiEnvelope<Client> = self
            .authenticated_request(ApiRequest::get(format!("/clients/{id}")))
            .await?;
        Ok(envelope.into_data()?)
    }

    /// `GET /appointments`
    ///
    /// # Errors
    ///
    /// As [`ApiClient::list_clients`].
    pub async fn list_appointments(&self) -> ApplicationResult<Vec<Appointment>> {
        let envelope: ApiEnvelope<Vec<Appointment>> = self
            .authenticated_request(ApiRequest::get("/appointments"))
            .await?;
        Ok(envelope.into_data()?)
    }

    /// `GET /appointments/client/{id}`
    ///
    /// # Errors
    ///
    /// As [`ApiClient::list_clients`].
    pub async fn list_client_appointments(
        &self,
        client_id: &ClientId,
    ) -> ApplicationResult<Vec<Appointment>> {
        let envelope: ApiEnvelope<Vec<Appointment>> = self
            .authenticated_request(ApiRequest::get(format!("/appointments/client/{client_id}")))
            .await?;
        Ok(envelope.into_data()?)
    }

    /// `POST /appointments`
    ///
    /// # Errors
    ///
    /// As [`ApiClient::list_clients`].
    pub async fn create_appointment(&self, appointment: &NewAppointment) -> ApplicationResult<()> {
        let request = json_request(ApiRequest::post("/appointments"), appointment)?;
        let envelope: ApiEnvelope<Value> = self.authenticated_request(request).await?;
        envelope.into_outcome()?;
        Ok(())
    }

    /// `PUT /appointments/{id}`, sending only the fields being changed.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::list_clients`].
    pub async fn update_appointment(
        &self,
        id: &AppointmentId,
        update: &AppointmentUpdate,
    ) -> ApplicationResult<()> {
        let request = json_request(ApiRequest::put(format!("/appointments/{id}")), update)?;
        let envelope: ApiEnvelope<Value> = self.authenticated_request(request).await?;
        envelope.into_outcome()?;
        Ok(())
    }

    /// `DELETE /appointments/{id}`
    ///
    /// # Errors
    ///
    /// As [`ApiClient::list_clients`].
    pub async fn cancel_appointment(&self, id: &AppointmentId) -> ApplicationResult<()> {
        let envelope: ApiEnvelope<Value> = self
            .authenticated_request(ApiRequest::delete(format!("/appointments/{id}")))
            .await?;
        envelope.into_outcome()?;
        Ok(())
    }
}
