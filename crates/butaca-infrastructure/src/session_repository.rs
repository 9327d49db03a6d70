//! JSON-file session repository.
//!
//! The session record lives in a single well-known file
//! (`session.json`). Its presence is the sole signed-in indicator, so a
//! missing or unreadable file must read as "not signed in" and never as
//! an error.

use crate::paths::ButacaPaths;
use butaca_core::error::Result;
use butaca_core::session::{Session, SessionStore};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// `SessionStore` backed by one JSON file.
#[derive(Debug, Clone)]
pub struct JsonSessionRepository {
    file_path: PathBuf,
}

impl JsonSessionRepository {
    /// Creates a repository at the default platform location.
    pub fn new() -> Result<Self> {
        Self::with_paths(&ButacaPaths::default())
    }

    /// Creates a repository using the given path resolution, used by
    /// tests to point at a temporary directory.
    pub fn with_paths(paths: &ButacaPaths) -> Result<Self> {
        Ok(Self {
            file_path: paths.session_file()?,
        })
    }
}

impl SessionStore for JsonSessionRepository {
    fn load(&self) -> Option<Session> {
        let raw = fs::read_to_string(&self.file_path).ok()?;
        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                warn!(
                    path = %self.file_path.display(),
                    error = %err,
                    "stored session record is corrupt, treating as signed out"
                );
                None
            }
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(session)?;
        fs::write(&self.file_path, raw)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.file_path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
