//! Auth provider backed by the clinic API's admin endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use clinic_domain::{ApiEnvelope, ApiRequest, ApiResponse, Credentials, LoginGrant, TokenPair};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::ports::{AuthError, AuthProvider, HttpTransport};

/// Login endpoint.
pub const LOGIN_PATH: &str = "/admin/login";
/// Token refresh endpoint.
pub const REFRESH_PATH: &str = "/admin/refresh-token";

/// Talks to `/admin/login` and `/admin/refresh-token`.
///
/// These calls go straight to the transport. They never carry a bearer
/// token and never trigger a refresh themselves.
pub struct RemoteAuthProvider<T: HttpTransport> {
    transport: Arc<T>,
}

impl<T: HttpTransport> RemoteAuthProvider<T> {
    /// Creates a provider over a shared transport.
    pub const fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    async fn exchange<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, AuthError> {
        let response = self
            .transport
            .execute(&request)
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        debug!(path = %request.path, status = response.status.as_u16(), "auth exchange");
        unwrap_grant(&response)
    }
}

fn unwrap_grant<R: DeserializeOwned>(response: &ApiResponse) -> Result<R, AuthError> {
    let status = response.status;
    let envelope: ApiEnvelope<R> = match response.parse() {
        Ok(envelope) => envelope,
        Err(e) if status.is_success() => return Err(AuthError::Decode(e.to_string())),
        // A gateway or server failure says nothing about the token.
        Err(_) if status.is_server_error() => {
            return Err(AuthError::Network(format!("HTTP {}", status.as_u16())));
        }
        Err(_) => return Err(AuthError::Rejected(format!("HTTP {}", status.as_u16()))),
    };
    if !envelope.success {
        return Err(AuthError::Rejected(envelope.message_or_default()));
    }
    envelope
        .data
        .ok_or_else(|| AuthError::Decode("response did not include data".to_string()))
}

#[async_trait]
impl<T: HttpTransport + 'static> AuthProvider for RemoteAuthProvider<T> {
    async fn login(&self, credentials: &Credentials) -> Result<LoginGrant, AuthError> {
        let request = ApiRequest::post(LOGIN_PATH)
            .with_header("Content-Type", "application/json")
            .with_json(credentials)
            .map_err(|e| AuthError::Decode(e.to_string()))?;
        self.exchange(request).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let request = ApiRequest::post(REFRESH_PATH)
            .with_header("Content-Type", "application/json")
            .with_json(&serde_json::json!({ "refreshToken": refresh_token }))
            .map_err(|e| AuthError::Decode(e.to_string()))?;
        self.exchange(request).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ports::TransportError;
    use crate::test_support::{MockTransport, admin, ok_json};
    use clinic_domain::HttpMethod;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn credentials() -> Credentials {
        Credentials::new("nadia@clinic.test", "correct horse").unwrap()
    }

    #[tokio::test]
    async fn test_login_posts_credentials_and_parses_grant() {
        let transport = Arc::new(MockTransport::always_ok(json!({
            "accessToken": "a-1",
            "refreshToken": "r-1",
            "admin": {
                "id": "adm-1",
                "first_name": "Nadia",
                "last_name": "Haddad",
                "email": "nadia@clinic.test"
            }
        })));
        let provider = RemoteAuthProvider::new(transport.clone());

        let grant = provider.login(&credentials()).await.unwrap();

        assert_eq!(grant.tokens.access_token, "a-1");
        assert_eq!(grant.tokens.refresh_token, "r-1");
        assert_eq!(grant.admin, admin());

        let sent = &transport.requests()[0];
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.path, LOGIN_PATH);
        assert_eq!(sent.header("authorization"), None);
        assert_eq!(
            sent.body,
            Some(json!({"email": "nadia@clinic.test", "password": "correct horse"}))
        );
    }

    #[tokio::test]
    async fn test_login_failure_surfaces_server_message() {
        let transport = Arc::new(MockTransport::new(|_| {
            Ok(ApiResponse::json(
                401u16,
                &json!({"success": false, "message": "Invalid email or password"}),
            ))
        }));
        let provider = RemoteAuthProvider::new(transport);

        assert_eq!(
            provider.login(&credentials()).await.unwrap_err(),
            AuthError::Rejected("Invalid email or password".to_string())
        );
    }

    #[tokio::test]
    async fn test_login_failure_without_message_uses_default() {
        let transport = Arc::new(MockTransport::new(|_| {
            Ok(ApiResponse::json(400u16, &json!({"success": false})))
        }));
        let provider = RemoteAuthProvider::new(transport);

        assert_eq!(
            provider.login(&credentials()).await.unwrap_err(),
            AuthError::Rejected("Request failed".to_string())
        );
    }

    #[tokio::test]
    async fn test_refresh_sends_refresh_token() {
        let transport = Arc::new(MockTransport::always_ok(
            json!({"accessToken": "a-2", "refreshToken": "r-2"}),
        ));
        let provider = RemoteAuthProvider::new(transport.clone());

        let pair = provider.refresh("r-1").await.unwrap();

        assert_eq!(pair.access_token, "a-2");
        assert_eq!(pair.refresh_token, "r-2");
        let sent = &transport.requests()[0];
        assert_eq!(sent.path, REFRESH_PATH);
        assert_eq!(sent.body, Some(json!({"refreshToken": "r-1"})));
    }

    #[tokio::test]
    async fn test_refresh_gateway_error_page_is_network_error() {
        let transport = Arc::new(MockTransport::new(|_| {
            Ok(ApiResponse::new(502u16, "<html>Bad Gateway</html>"))
        }));
        let provider = RemoteAuthProvider::new(transport);

        let error = provider.refresh("r-1").await.unwrap_err();
        assert_eq!(error, AuthError::Network("HTTP 502".to_string()));
        assert!(!error.is_rejection());
    }

    #[tokio::test]
    async fn test_refresh_non_envelope_client_error_is_rejection() {
        let transport = Arc::new(MockTransport::new(|_| {
            Ok(ApiResponse::new(403u16, "Forbidden"))
        }));
        let provider = RemoteAuthProvider::new(transport);

        assert_eq!(
            provider.refresh("r-1").await.unwrap_err(),
            AuthError::Rejected("HTTP 403".to_string())
        );
    }

    #[tokio::test]
    async fn test_refresh_garbled_success_is_decode_error() {
        let transport = Arc::new(MockTransport::new(|_| Ok(ApiResponse::new(200u16, "ok"))));
        let provider = RemoteAuthProvider::new(transport);

        assert!(matches!(
            provider.refresh("r-1").await,
            Err(AuthError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_is_network_error() {
        let transport = Arc::new(MockTransport::new(|_| {
            Err(TransportError::ConnectionFailed("refused".to_string()))
        }));
        let provider = RemoteAuthProvider::new(transport);

        let error = provider.refresh("r-1").await.unwrap_err();
        assert!(!error.is_rejection());
        assert!(matches!(error, AuthError::Network(_)));
    }

    #[tokio::test]
    async fn test_success_without_data_is_decode_error() {
        let transport = Arc::new(MockTransport::new(|_| {
            Ok(ok_json(&serde_json::Value::Null))
        }));
        let provider = RemoteAuthProvider::new(transport);

        assert!(matches!(
            provider.login(&credentials()).await,
            Err(AuthError::Decode(_))
        ));
    }
}
