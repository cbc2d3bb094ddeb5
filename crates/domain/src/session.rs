//! Admin session types.
//!
//! A [`Session`] is the authenticated state: the admin's profile plus the
//! access/refresh token pair. [`SessionSnapshot`] is what sits on disk and
//! may be partial if the file was edited or half-written.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Profile of the logged-in administrator as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    /// Server identifier of the admin.
    pub id: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Login email.
    pub email: String,
}

impl AdminProfile {
    /// Returns "First Last", falling back to the email when both names are blank.
    #[must_use]
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }
}

/// Email/password pair submitted to the login endpoint.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Admin email.
    pub email: String,
    /// Admin password.
    pub password: String,
}

impl Credentials {
    /// Builds credentials, rejecting blank fields before any request is made.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCredentials` if either field is blank.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> DomainResult<Self> {
        let email = email.into().trim().to_string();
        let password = password.into();
        if email.is_empty() {
            return Err(DomainError::InvalidCredentials("email is required".to_string()));
        }
        if password.is_empty() {
            return Err(DomainError::InvalidCredentials(
                "password is required".to_string(),
            ));
        }
        Ok(Self { email, password })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Access/refresh token pair issued by login or refresh.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Short-lived bearer token.
    pub access_token: String,
    /// Long-lived token used to mint a new pair.
    pub refresh_token: String,
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &token_preview(&self.access_token))
            .field("refresh_token", &token_preview(&self.refresh_token))
            .finish()
    }
}

/// Payload of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginGrant {
    /// Issued tokens.
    #[serde(flatten)]
    pub tokens: TokenPair,
    /// Profile of the admin who logged in.
    pub admin: AdminProfile,
}

/// An authenticated admin session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Profile of the logged-in admin.
    pub admin: AdminProfile,
    /// Current token pair.
    pub tokens: TokenPair,
}

impl Session {
    /// Builds a session from a login grant.
    #[must_use]
    pub fn from_grant(grant: LoginGrant) -> Self {
        Self {
            admin: grant.admin,
            tokens: grant.tokens,
        }
    }

    /// Returns the bearer access token.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.tokens.access_token
    }

    /// Returns the snapshot that should be persisted for this session.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            access_token: Some(self.tokens.access_token.clone()),
            refresh_token: Some(self.tokens.refresh_token.clone()),
            admin: Some(self.admin.clone()),
        }
    }
}

/// Persisted session fields; any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Stored access token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Stored refresh token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Stored admin profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<AdminProfile>,
}

impl SessionSnapshot {
    /// True when nothing at all is stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none() && self.admin.is_none()
    }

    /// True iff a profile and a non-empty access token are both present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.admin.is_some() && self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Converts a complete snapshot into a session.
    ///
    /// Presence is the only check; token expiry is left to the server.
    #[must_use]
    pub fn into_session(self) -> Option<Session> {
        if !self.is_authenticated() {
            return None;
        }
        let Self {
            access_token: Some(access_token),
            refresh_token,
            admin: Some(admin),
        } = self
        else {
            return None;
        };
        Some(Session {
            admin,
            tokens: TokenPair {
                access_token,
                refresh_token: refresh_token.unwrap_or_default(),
            },
        })
    }
}

/// Observable authentication state of the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// No session has been established.
    Unauthenticated,
    /// A session is active.
    Authenticated {
        /// Email of the logged-in admin.
        email: String,
    },
    /// The admin logged out explicitly.
    LoggedOut,
    /// The refresh token was rejected; the admin must log in again.
    Expired,
}

impl SessionStatus {
    /// Returns true if a session is active.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Returns true if the admin has to be sent back to the login entry point.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::Expired)
    }

    /// Returns a user-facing message.
    #[must_use]
    pub const fn message(&self) -> &str {
        match self {
            Self::Unauthenticated => "Not logged in",
            Self::Authenticated { .. } => "Logged in",
            Self::LoggedOut => "Logged out",
            Self::Expired => "Session expired, please log in again",
        }
    }
}

/// Returns the first eight characters of a token followed by an ellipsis.
#[must_use]
pub fn token_preview(token: &str) -> String {
    if token.len() > 12 {
        let cut = token
            .char_indices()
            .nth(8)
            .map_or(token.len(), |(idx, _)| idx);
        format!("{}...", &token[..cut])
    } else {
        "***".to_string()
    }
}
