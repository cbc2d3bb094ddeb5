//! Hand-written port fakes shared by the unit tests of this crate.

#![allow(clippy::unwrap_used, clippy::expect_used, missing_docs)]

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use clinic_domain::{
    AdminProfile, ApiRequest, ApiResponse, Credentials, LoginGrant, Session, SessionSnapshot,
    TokenPair,
};

use crate::auth::SessionStore;
use crate::ports::{
    AuthError, AuthProvider, Clock, HttpTransport, SessionStorage, StorageError, TransportError,
};

type Handler = dyn Fn(&ApiRequest) -> Result<ApiResponse, TransportError> + Send + Sync;

/// Transport answering from a closure and recording every request.
pub struct MockTransport {
    handler: Box<Handler>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new(
        handler: impl Fn(&ApiRequest) -> Result<ApiResponse, TransportError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answers 200 with `data` wrapped in a success envelope, whatever the request.
    pub fn always_ok(data: serde_json::Value) -> Self {
        Self::new(move |_| Ok(ok_json(&data)))
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl HttpTransport for MockTransport {
    fn execute(
        &self,
        request: &ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send {
        self.requests.lock().unwrap().push(request.clone());
        let result = (self.handler)(request);
        async move { result }
    }
}

pub fn ok_json(data: &serde_json::Value) -> ApiResponse {
    ApiResponse::json(200u16, &serde_json::json!({"success": true, "data": data}))
}

pub fn unauthorized() -> ApiResponse {
    ApiResponse::json(
        401u16,
        &serde_json::json!({"success": false, "message": "Unauthorized"}),
    )
}

pub fn bearer(request: &ApiRequest) -> Option<&str> {
    request
        .header("Authorization")
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// In-memory session storage.
#[derive(Default)]
pub struct MemoryStorage {
    snapshot: Mutex<SessionSnapshot>,
    pub saves: AtomicUsize,
}

impl MemoryStorage {
    pub fn with(snapshot: SessionSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn stored(&self) -> SessionSnapshot {
        self.snapshot.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionStorage for MemoryStorage {
    async fn load(&self) -> Result<SessionSnapshot, StorageError> {
        Ok(self.stored())
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StorageError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.snapshot.lock().unwrap() = snapshot.clone();
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        *self.snapshot.lock().unwrap() = SessionSnapshot::default();
        Ok(())
    }
}

/// Auth provider with scripted outcomes and call counters.
pub struct FakeAuthProvider {
    login_result: Result<LoginGrant, AuthError>,
    refresh_result: Mutex<Result<TokenPair, AuthError>>,
    refresh_delay: Option<Duration>,
    pub login_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
}

impl FakeAuthProvider {
    pub fn new(
        login_result: Result<LoginGrant, AuthError>,
        refresh_result: Result<TokenPair, AuthError>,
    ) -> Self {
        Self {
            login_result,
            refresh_result: Mutex::new(refresh_result),
            refresh_delay: None,
            login_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
        }
    }

    /// Logs in as [`admin`] and refreshes to `fresh`/`refresh-2`.
    pub fn accepting() -> Self {
        Self::new(Ok(grant()), Ok(tokens("fresh", "refresh-2")))
    }

    /// Logs in fine, but every refresh is rejected.
    pub fn rejecting_refresh() -> Self {
        Self::new(
            Ok(grant()),
            Err(AuthError::Rejected("Invalid refresh token".to_string())),
        )
    }

    #[must_use]
    pub fn with_refresh_delay(mut self, delay: Duration) -> Self {
        self.refresh_delay = Some(delay);
        self
    }

    pub fn refresh_count(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthProvider for FakeAuthProvider {
    async fn login(&self, _credentials: &Credentials) -> Result<LoginGrant, AuthError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.login_result.clone()
    }

    async fn refresh(&self, _refresh_token: &str) -> Result<TokenPair, AuthError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.refresh_delay {
            tokio::time::sleep(delay).await;
        }
        self.refresh_result.lock().unwrap().clone()
    }
}

/// Clock pinned to one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
}

pub fn admin() -> AdminProfile {
    AdminProfile {
        id: "adm-1".to_string(),
        first_name: "Nadia".to_string(),
        last_name: "Haddad".to_string(),
        email: "nadia@clinic.test".to_string(),
    }
}

pub fn tokens(access: &str, refresh: &str) -> TokenPair {
    TokenPair {
        access_token: access.to_string(),
        refresh_token: refresh.to_string(),
    }
}

pub fn grant() -> LoginGrant {
    LoginGrant {
        tokens: tokens("stale", "refresh-1"),
        admin: admin(),
    }
}

pub fn stored_session(access: &str) -> SessionSnapshot {
    Session {
        admin: admin(),
        tokens: tokens(access, "refresh-1"),
    }
    .snapshot()
}

/// Session store restored from a stored session whose access token is `access`.
pub async fn logged_in_store(
    access: &str,
    provider: Arc<FakeAuthProvider>,
) -> (Arc<SessionStore>, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::with(stored_session(access)));
    let store = SessionStore::restore_on_startup(storage.clone(), provider).await;
    (Arc::new(store), storage)
}
