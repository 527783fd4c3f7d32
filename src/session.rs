//! Logged-in user identity, durable across process restarts.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

pub trait SessionStore: Send + Sync {
    fn save(&self, user_id: i64, email: &str) -> anyhow::Result<()>;
    fn current_user_id(&self) -> anyhow::Result<Option<i64>>;
    fn current_email(&self) -> anyhow::Result<Option<String>>;
    fn is_logged_in(&self) -> anyhow::Result<bool>;
    fn clear(&self) -> anyhow::Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionData {
    user_id: Option<i64>,
    email: Option<String>,
    logged_in: bool,
}

/// JSON file in app storage, read on demand and rewritten atomically on
/// every change.
pub struct FileSession {
    path: PathBuf,
}

impl FileSession {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> anyhow::Result<SessionData> {
        if !self.path.exists() {
            return Ok(SessionData::default());
        }
        let raw = fs::read_to_string(&self.path).context("Failed to read session file")?;
        serde_json::from_str(&raw).context("Corrupt session file")
    }

    fn store(&self, data: &SessionData) -> anyhow::Result<()> {
        let raw = serde_json::to_string_pretty(data)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw).context("Failed to write session file")?;
        fs::rename(&tmp, &self.path).context("Failed to replace session file")?;
        Ok(())
    }
}

impl SessionStore for FileSession {
    fn save(&self, user_id: i64, email: &str) -> anyhow::Result<()> {
        self.store(&SessionData {
            user_id: Some(user_id),
            email: Some(email.to_string()),
            logged_in: true,
        })
    }

    fn current_user_id(&self) -> anyhow::Result<Option<i64>> {
        Ok(self.load()?.user_id)
    }

    fn current_email(&self) -> anyhow::Result<Option<String>> {
        Ok(self.load()?.email)
    }

    fn is_logged_in(&self) -> anyhow::Result<bool> {
        Ok(self.load()?.logged_in)
    }

    fn clear(&self) -> anyhow::Result<()> {
        self.store(&SessionData::default())
    }
}

/// Volatile session for tests.
#[derive(Default)]
pub struct MemorySession {
    data: Mutex<SessionData>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySession {
    fn save(&self, user_id: i64, email: &str) -> anyhow::Result<()> {
        let mut data = self.data.lock().unwrap();
        *data = SessionData {
            user_id: Some(user_id),
            email: Some(email.to_string()),
            logged_in: true,
        };
        Ok(())
    }

    fn current_user_id(&self) -> anyhow::Result<Option<i64>> {
        Ok(self.data.lock().unwrap().user_id)
    }

    fn current_email(&self) -> anyhow::Result<Option<String>> {
        Ok(self.data.lock().unwrap().email.clone())
    }

    fn is_logged_in(&self) -> anyhow::Result<bool> {
        Ok(self.data.lock().unwrap().logged_in)
    }

    fn clear(&self) -> anyhow::Result<()> {
        *self.data.lock().unwrap() = SessionData::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_session_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let session = FileSession::new(&path);
        assert!(!session.is_logged_in().unwrap());

        session.save(7, "ada@example.com").unwrap();
        assert!(session.is_logged_in().unwrap());

        // a fresh handle sees the same state
        let reopened = FileSession::new(&path);
        assert_eq!(reopened.current_user_id().unwrap(), Some(7));
        assert_eq!(
            reopened.current_email().unwrap().as_deref(),
            Some("ada@example.com")
        );

        reopened.clear().unwrap();
        assert!(!session.is_logged_in().unwrap());
        assert_eq!(session.current_user_id().unwrap(), None);
    }
}
