//! Wiring of adapters into the application services.

use std::sync::Arc;

use clinic_application::{ApiClient, Clock, RemoteAuthProvider, SessionStore};
use clinic_infrastructure::{FileSessionStorage, ReqwestTransport, SystemClock};
use tracing::debug;

use crate::config::ConsoleConfig;

/// Services shared by every command of one run.
pub struct Console {
    /// Authenticated API client.
    pub api: ApiClient<ReqwestTransport>,
    /// Process-wide session.
    pub session: Arc<SessionStore>,
    /// Wall clock for status and date windows.
    pub clock: Arc<dyn Clock>,
}

impl Console {
    /// Builds the transport, restores the persisted session and wires the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or session location is unusable.
    pub async fn connect(config: &ConsoleConfig) -> anyhow::Result<Self> {
        let transport = Arc::new(ReqwestTransport::new(
            &config.base_url,
            config.request_timeout(),
        )?);
        let session_path = config.session_path()?;
        debug!(base_url = %config.base_url, session = %session_path.display(), "console configured");

        let storage = Arc::new(FileSessionStorage::new(session_path));
        let provider = Arc::new(RemoteAuthProvider::new(Arc::clone(&transport)));
        let session = Arc::new(SessionStore::restore_on_startup(storage, provider).await);

        Ok(Self {
            api: ApiClient::new(transport, Arc::clone(&session)),
            session,
            clock: Arc::new(SystemClock::new()),
        })
    }
}
