//! The admin session, held once per process.
//!
//! [`SessionStore`] owns the in-memory session, keeps the persisted copy in
//! step with it and serializes token refreshes. Consumers share it through
//! an `Arc` and observe transitions with [`SessionStore::subscribe`].

use std::sync::Arc;

use clinic_domain::{AdminProfile, Credentials, Session, SessionSnapshot, SessionStatus};
use tokio::sync::{Mutex, RwLock, watch};
use tracing::{debug, info, warn};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{AuthError, AuthProvider, SessionStorage};

/// Process-wide session state backed by persistent storage.
///
/// Invariant: the profile and the access token are written together and
/// cleared together, so `is_authenticated` never sees one without the other.
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    provider: Arc<dyn AuthProvider>,
    session: RwLock<Option<Session>>,
    /// Held for the whole duration of a refresh exchange.
    refresh_gate: Mutex<()>,
    status: watch::Sender<SessionStatus>,
}

impl SessionStore {
    /// Restores the persisted session, if any, at process start.
    ///
    /// Only presence is checked; an expired token is discovered by the
    /// first request that gets a 401. A partial snapshot is discarded.
    pub async fn restore_on_startup(
        storage: Arc<dyn SessionStorage>,
        provider: Arc<dyn AuthProvider>,
    ) -> Self {
        let snapshot = match storage.load().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "could not read persisted session, starting logged out");
                SessionSnapshot::default()
            }
        };

        let session = if snapshot.is_empty() {
            None
        } else if let Some(session) = snapshot.clone().into_session() {
            debug!(email = %session.admin.email, "restored persisted session");
            Some(session)
        } else {
            warn!(
                has_profile = snapshot.admin.is_some(),
                has_access_token = snapshot.access_token.is_some(),
                "discarding partial persisted session"
            );
            if let Err(e) = storage.clear().await {
                warn!(error = %e, "could not clear partial session");
            }
            None
        };

        let status = session.as_ref().map_or(SessionStatus::Unauthenticated, |s| {
            SessionStatus::Authenticated {
                email: s.admin.email.clone(),
            }
        });

        Self {
            storage,
            provider,
            session: RwLock::new(session),
            refresh_gate: Mutex::new(()),
            status: watch::Sender::new(status),
        }
    }

    /// Logs in and persists the resulting session.
    ///
    /// # Errors
    ///
    /// `Auth` if the server rejects the credentials, `Storage` if the session
    /// cannot be persisted. Nothing is stored in either case.
    pub async fn login(&self, credentials: &Credentials) -> ApplicationResult<Session> {
        let _gate = self.refresh_gate.lock().await;
        let grant = self.provider.login(credentials).await?;
        let session = Session::from_grant(grant);

        self.storage.save(&session.snapshot()).await?;
        *self.session.write().await = Some(session.clone());

        info!(email = %session.admin.email, "logged in");
        self.status.send_replace(SessionStatus::Authenticated {
            email: session.admin.email.clone(),
        });
        Ok(session)
    }

    /// Clears the session everywhere. Never fails.
    pub async fn logout(&self) {
        // Waits out an in-flight refresh so it cannot restore the session.
        let _gate = self.refresh_gate.lock().await;
        *self.session.write().await = None;
        if let Err(e) = self.storage.clear().await {
            warn!(error = %e, "could not clear persisted session");
        }
        info!("logged out");
        self.status.send_replace(SessionStatus::LoggedOut);
    }

    /// True iff a profile and a non-empty access token are both present.
    pub async fn is_authenticated(&self) -> bool {
        self.session
            .read()
            .await
            .as_ref()
            .is_some_and(|s| !s.access_token().is_empty())
    }

    /// Returns the current access token.
    pub async fn access_token(&self) -> Option<String> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.access_token().to_string())
            .filter(|t| !t.is_empty())
    }

    /// Returns the logged-in admin's profile.
    pub async fn admin(&self) -> Option<AdminProfile> {
        self.session.read().await.as_ref().map(|s| s.admin.clone())
    }

    /// Returns the latest published status.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status.borrow().clone()
    }

    /// Subscribes to status transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }

    /// Replaces a rejected access token with a fresh one.
    ///
    /// `stale_access_token` is the token the caller just saw rejected. If
    /// another caller already replaced it, the replacement is returned
    /// without contacting the server, so concurrent 401s cost one refresh.
    ///
    /// # Errors
    ///
    /// `SessionExpired` if there is no session or the server rejects the
    /// refresh token; the session is cleared first. `Network` or `Decode` if
    /// the exchange itself failed, in which case the session is kept.
    pub async fn refresh(&self, stale_access_token: &str) -> ApplicationResult<String> {
        let _gate = self.refresh_gate.lock().await;

        let Some(current) = self.session.read().await.clone() else {
            return Err(ApplicationError::SessionExpired);
        };
        if current.access_token() != stale_access_token {
            debug!("access token already refreshed by a concurrent request");
            return Ok(current.access_token().to_string());
        }
        if current.tokens.refresh_token.is_empty() {
            self.expire("no refresh token stored").await;
            return Err(ApplicationError::SessionExpired);
        }

        match self.provider.refresh(&current.tokens.refresh_token).await {
            Ok(tokens) => {
                let session = Session {
                    admin: current.admin,
                    tokens,
                };
                if let Err(e) = self.storage.save(&session.snapshot()).await {
                    warn!(error = %e, "could not persist refreshed tokens");
                }
                let access_token = session.access_token().to_string();
                *self.session.write().await = Some(session);
                info!("access token refreshed");
                Ok(access_token)
            }
            Err(AuthError::Rejected(message)) => {
                self.expire(&message).await;
                Err(ApplicationError::SessionExpired)
            }
            Err(AuthError::Network(message)) => Err(ApplicationError::Network(message)),
            Err(AuthError::Decode(message)) => Err(ApplicationError::Decode(message)),
        }
    }

    /// Drops the whole session and tells subscribers to go back to login.
    async fn expire(&self, reason: &str) {
        *self.session.write().await = None;
        if let Err(e) = self.storage.clear().await {
            warn!(error = %e, "could not clear expired session");
        }
        warn!(reason, "session expired");
        self.status.send_replace(SessionStatus::Expired);
    }
}
