//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `HttpTransport` port. It joins request paths
//! onto the configured API base URL and applies one timeout to every call.

use std::future::Future;
use std::time::Duration;

use clinic_application::ports::{HttpTransport, TransportError};
use clinic_domain::{ApiRequest, ApiResponse, HttpMethod};
use reqwest::{Client, Method, Url};
use tracing::trace;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP transport bound to one API base URL.
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Creates a transport for `base_url`, e.g. `https://host/api`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` if `base_url` cannot be parsed or cannot carry
    /// a path, and `Other` if the client cannot be created.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("clinic-console/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;
        Self::with_client(client, base_url, timeout)
    }

    /// Creates a transport around an existing reqwest client.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` if `base_url` cannot be parsed or cannot carry
    /// a path.
    pub fn with_client(
        client: Client,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| TransportError::InvalidUrl(format!("{e}: {base_url}")))?;
        if base_url.cannot_be_a_base() {
            return Err(TransportError::InvalidUrl(format!(
                "{base_url} cannot be used as an API base"
            )));
        }
        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// The API base URL, without a trailing slash.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins a request path onto the base, keeping the base's own path.
    fn url_for(&self, path: &str) -> Result<Url, TransportError> {
        let joined = format!(
            "{}{}",
            self.base_url.as_str().trim_end_matches('/'),
            path
        );
        Url::parse(&joined).map_err(|e| TransportError::InvalidUrl(format!("{e}: {joined}")))
    }

    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    fn map_error(error: &reqwest::Error, timeout: Duration) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout {
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            };
        }
        if error.is_connect() {
            return TransportError::ConnectionFailed(error.to_string());
        }
        if error.is_builder() {
            return TransportError::InvalidUrl(error.to_string());
        }
        TransportError::Other(error.to_string())
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute(
        &self,
        request: &ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send {
        let url = self.url_for(&request.path);
        let method = Self::to_reqwest_method(request.method);
        let headers = request.headers.clone();
        let body = request.body.as_ref().map(ToString::to_string);
        let timeout = self.timeout;

        async move {
            let url = url?;
            trace!(%method, %url, "sending request");

            let mut builder = self.client.request(method, url).timeout(timeout);
            for (name, value) in &headers {
                builder = builder.header(name, value);
            }
            if let Some(body) = body {
                builder = builder.body(body);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| Self::map_error(&e, timeout))?;
            let status = response.status().as_u16();
            let bytes = response
                .bytes()
                .await
                .map_err(|e| TransportError::Other(format!("failed to read body: {e}")))?;

            Ok(ApiResponse::new(status, bytes.to_vec()))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn transport(base: &str) -> ReqwestTransport {
        ReqwestTransport::new(base, DEFAULT_TIMEOUT).unwrap()
    }

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Delete),
            Method::DELETE
        );
    }

    #[test]
    fn test_paths_join_under_base_path() {
        let api = transport("https://clinic.example/api");
        assert_eq!(
            api.url_for("/clients/c-1").unwrap().as_str(),
            "https://clinic.example/api/clients/c-1"
        );
    }

    #[test]
    fn test_trailing_slash_on_base_is_ignored() {
        let api = transport("https://clinic.example/api/");
        assert_eq!(
            api.url_for("/appointments").unwrap().as_str(),
            "https://clinic.example/api/appointments"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(matches!(
            ReqwestTransport::new("not a url", DEFAULT_TIMEOUT),
            Err(TransportError::InvalidUrl(_))
        ));
        assert!(matches!(
            ReqwestTransport::new("mailto:desk@clinic.example", DEFAULT_TIMEOUT),
            Err(TransportError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_connection_failure() {
        // Port 9 (discard) on loopback is closed on test machines.
        let api = ReqwestTransport::new("http://127.0.0.1:9/api", Duration::from_secs(2)).unwrap();

        let result = api.execute(&ApiRequest::get("/clients")).await;

        assert!(matches!(
            result,
            Err(TransportError::ConnectionFailed(_) | TransportError::Timeout { .. })
        ));
    }
}
