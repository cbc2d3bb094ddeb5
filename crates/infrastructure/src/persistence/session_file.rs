//! File-based session storage.
//!
//! The session is stored as one JSON document, by default at
//! `<config dir>/clinic/session.json`:
//! ```json
//! {
//!   "accessToken": "eyJ...",
//!   "refreshToken": "eyJ...",
//!   "admin": { "id": "...", "first_name": "...", "last_name": "...", "email": "..." }
//! }
//! ```
//! All three fields are written in one rename so a crash never leaves a
//! token without its profile. Clearing deletes the file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use clinic_application::ports::{SessionStorage, StorageError};
use clinic_domain::SessionSnapshot;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

/// Session storage backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    /// Stores the session at an explicit path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/clinic/session.json`, if the platform has a config dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("clinic").join("session.json"))
    }

    /// Location of the session file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn load(&self) -> Result<SessionSnapshot, StorageError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(SessionSnapshot::default()),
            Err(e) => return Err(e.into()),
        };
        from_json_bytes(&bytes).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).await?;
        }

        let content =
            to_json_stable_bytes(snapshot).map_err(|e| StorageError::Serialization(e.to_string()))?;

        let temp = self.temp_path();
        write_private(&temp, &content).await?;
        fs::rename(&temp, &self.path).await?;

        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "session file removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Writes `content` to a fresh file that only the owner can read on Unix.
///
/// A leftover file at `path` is removed first, since the mode only applies
/// when the file is created.
async fn write_private(path: &Path, content: &[u8]) -> std::io::Result<()> {
    match fs::remove_file(path).await {
        Err(e) if e.kind() != ErrorKind::NotFound => return Err(e),
        _ => {}
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(content).await?;
    file.sync_all().await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clinic_domain::{AdminProfile, Session, TokenPair};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn session() -> Session {
        Session {
            admin: AdminProfile {
                id: "adm-1".to_string(),
                first_name: "Nadia".to_string(),
                last_name: "Haddad".to_string(),
                email: "nadia@clinic.test".to_string(),
            },
            tokens: TokenPair {
                access_token: "access-1".to_string(),
                refresh_token: "refresh-1".to_string(),
            },
        }
    }

    #[test]
    fn test_default_path_ends_with_clinic_session() {
        if let Some(path) = FileSessionStorage::default_path() {
            assert!(path.ends_with("clinic/session.json"));
        }
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("session.json"));

        assert!(storage.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_keeps_all_fields() {
        let dir = TempDir::new().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("nested").join("session.json"));

        storage.save(&session().snapshot()).await.unwrap();
        let loaded = storage.load().await.unwrap();

        assert_eq!(loaded.into_session(), Some(session()));
        assert!(!storage.temp_path().exists());
    }

    #[tokio::test]
    async fn test_file_uses_browser_key_names() {
        let dir = TempDir::new().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("session.json"));

        storage.save(&session().snapshot()).await.unwrap();
        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(storage.path()).unwrap()).unwrap();

        assert_eq!(raw["accessToken"], "access-1");
        assert_eq!(raw["refreshToken"], "refresh-1");
        assert_eq!(raw["admin"]["email"], "nadia@clinic.test");
    }

    #[tokio::test]
    async fn test_clear_removes_file_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("session.json"));
        storage.save(&session().snapshot()).await.unwrap();

        storage.clear().await.unwrap();
        storage.clear().await.unwrap();

        assert!(!storage.path().exists());
        assert!(storage.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_partial_file_loads_as_partial_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"accessToken": "orphan"}"#).unwrap();

        let loaded = FileSessionStorage::new(&path).load().await.unwrap();

        assert_eq!(loaded.access_token.as_deref(), Some("orphan"));
        assert!(!loaded.is_authenticated());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            FileSessionStorage::new(&path).load().await,
            Err(StorageError::Serialization(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("session.json"));
        storage.save(&session().snapshot()).await.unwrap();

        let mode = std::fs::metadata(storage.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_leftover_world_readable_temp_file_is_replaced() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("session.json"));
        let leftover = dir.path().join("session.json.tmp");
        std::fs::write(&leftover, "partial").unwrap();
        std::fs::set_permissions(&leftover, std::fs::Permissions::from_mode(0o644)).unwrap();

        storage.save(&session().snapshot()).await.unwrap();

        let mode = std::fs::metadata(storage.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert!(!leftover.exists());
        assert_eq!(storage.load().await.unwrap(), session().snapshot());
    }
}
