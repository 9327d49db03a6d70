//! Unified path management for butaca configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/butaca/            # Config directory
//! ├── secret.json              # API keys
//! └── session.json             # Persisted session record
//! ```

use butaca_core::error::{ButacaError, Result};
use std::path::{Path, PathBuf};

/// Resolves butaca's on-disk locations.
///
/// A base path override is used by tests and takes precedence over the
/// platform config directory.
#[derive(Debug, Clone, Default)]
pub struct ButacaPaths {
    base: Option<PathBuf>,
}

impl ButacaPaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the butaca configuration directory, e.g. `~/.config/butaca/`.
    pub fn config_dir(&self) -> Result<PathBuf> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join("butaca"))
            .ok_or_else(|| ButacaError::config("cannot determine the user config directory"))
    }

    /// Returns the path to the secrets file.
    pub fn secret_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("secret.json"))
    }

    /// Returns the path to the persisted session record.
    pub fn session_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("session.json"))
    }
}
