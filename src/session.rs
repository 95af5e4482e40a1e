//! On-disk session cache.
//!
//! The terminal analog of the original client's per-tab token storage: the
//! bearer token and user identity live in a small JSON file under the app
//! directory. Malformed stored data is discarded on load.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Client-held proof of authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub access_token: String,
}

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default location: `~/.euclid-cli/session.json`.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".euclid-cli")
            .join("session.json")
    }

    pub fn open_default() -> Self {
        Self::new(Self::default_path())
    }

    /// Rehydrate the session at startup. Returns `None` (and removes the
    /// file) when the stored data is missing, unparseable, or has empty
    /// fields.
    pub fn load(&self) -> Option<Session> {
        let contents = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<Session>(&contents) {
            Ok(session)
                if !session.email.trim().is_empty()
                    && !session.access_token.trim().is_empty() =>
            {
                debug!(email = %session.email, "session restored");
                Some(session)
            }
            _ => {
                warn!(path = %self.path.display(), "discarding malformed session file");
                let _ = fs::remove_file(&self.path);
                None
            }
        }
    }

    pub fn store(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("create session directory")?;
        }
        let contents = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, contents).context("write session file")?;
        debug!(email = %session.email, "session stored");
        Ok(())
    }

    /// Remove the cached identity and token. Missing file is not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context("remove session file"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> SessionStore {
        SessionStore::new(dir.path().join("session.json"))
    }

    #[test]
    fn store_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .store(&Session {
                email: "user@example.com".into(),
                access_token: "tok-123".into(),
            })
            .unwrap();
        let session = store.load().unwrap();
        assert_eq!(session.email, "user@example.com");
        assert_eq!(session.access_token, "tok-123");
    }

    #[test]
    fn clear_removes_identity_and_token() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .store(&Session {
                email: "user@example.com".into(),
                access_token: "tok-123".into(),
            })
            .unwrap();
        store.clear().unwrap();
        assert!(store.load().is_none());
        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[test]
    fn malformed_file_is_discarded() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(dir.path().join("session.json"), "{not json").unwrap();
        assert!(store.load().is_none());
        assert!(!dir.path().join("session.json").exists());
    }

    #[test]
    fn empty_token_is_treated_as_malformed() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            dir.path().join("session.json"),
            r#"{"email": "user@example.com", "access_token": ""}"#,
        )
        .unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = TempDir::new().unwrap();
        assert!(store_in(&dir).load().is_none());
    }
}
