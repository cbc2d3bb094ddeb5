//! Authenticated request pipeline.

use std::sync::Arc;

use clinic_domain::{ApiEnvelope, ApiRequest, ApiResponse};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::auth::SessionStore;
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::HttpTransport;

/// Client for the protected clinic API.
///
/// Every request carries the current bearer token. A 401 triggers one token
/// refresh and exactly one retry; the caller only ever sees the retried
/// result or a session error.
pub struct ApiClient<T: HttpTransport> {
    transport: Arc<T>,
    session: Arc<SessionStore>,
}

impl<T: HttpTransport> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            session: Arc::clone(&self.session),
        }
    }
}

impl<T: HttpTransport> ApiClient<T> {
    /// Creates a client sharing the given transport and session.
    pub const fn new(transport: Arc<T>, session: Arc<SessionStore>) -> Self {
        Self { transport, session }
    }

    /// Returns the session this client authenticates with.
    #[must_use]
    pub const fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Sends `request` with the bearer token and decodes the envelope.
    ///
    /// Caller headers are kept, but `Authorization` and `Content-Type` are
    /// always set by the client.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` if there is no token to send
    /// - `SessionExpired` if the token was rejected and could not be refreshed
    /// - `Network` if no response was received
    /// - `Decode` if the body is not an envelope
    pub async fn authenticated_request<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> ApplicationResult<ApiEnvelope<R>> {
        let token = self
            .session
            .access_token()
            .await
            .ok_or(ApplicationError::Unauthenticated)?;

        let mut response = self.attempt(&request, &token).await?;
        if response.status.is_unauthorized() {
            info!(path = %request.path, "access token rejected, refreshing");
            let fresh = self.session.refresh(&token).await?;
            response = self.attempt(&request, &fresh).await?;
        }

        decode_envelope(&response)
    }

    async fn attempt(&self, request: &ApiRequest, token: &str) -> ApplicationResult<ApiResponse> {
        let mut request = request.clone();
        request.set_header("Authorization", format!("Bearer {token}"));
        request.set_header("Content-Type", "application/json");

        let response = self.transport.execute(&request).await?;
        debug!(
            method = %request.method,
            path = %request.path,
            status = response.status.as_u16(),
            "api request"
        );
        Ok(response)
    }
}

fn decode_envelope<R: DeserializeOwned>(
    response: &ApiResponse,
) -> ApplicationResult<ApiEnvelope<R>> {
    response.parse().map_err(|e| {
        ApplicationError::Decode(format!("HTTP {}: {e}", response.status.as_u16()))
    })
}
