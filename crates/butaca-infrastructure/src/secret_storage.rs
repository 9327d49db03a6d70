//! Secret storage for API keys.
//!
//! Keys are read from `~/.config/butaca/secret.json`, falling back to
//! environment variables. Priority:
//!
//! 1. `secret.json`
//! 2. Environment variables (`TMDB_API_KEY`, `FIREBASE_API_KEY`,
//!    `FIREBASE_PROJECT_ID`)

use crate::paths::ButacaPaths;
use butaca_core::error::{ButacaError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

/// TMDB credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbSecret {
    pub api_key: String,
}

/// Firebase credentials: the web API key plus the project whose
/// Firestore holds the comment documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirebaseSecret {
    pub api_key: String,
    pub project_id: String,
}

/// Contents of `secret.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub tmdb: Option<TmdbSecret>,
    #[serde(default)]
    pub firebase: Option<FirebaseSecret>,
}

/// Reads secrets from disk with environment fallback.
#[derive(Debug, Clone, Default)]
pub struct SecretStorage {
    paths: ButacaPaths,
}

impl SecretStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_paths(paths: ButacaPaths) -> Self {
        Self { paths }
    }

    /// Loads `secret.json` if it exists; a missing file is an empty
    /// config, a malformed one is an error.
    pub fn load(&self) -> Result<SecretConfig> {
        let path = self.paths.secret_file()?;
        if !path.exists() {
            return Ok(SecretConfig::default());
        }
        let raw = fs::read_to_string(&path)?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Resolves the TMDB API key from the secret file or environment.
    pub fn tmdb_api_key(&self) -> Result<String> {
        if let Some(tmdb) = self.load()?.tmdb {
            return Ok(tmdb.api_key);
        }
        env::var("TMDB_API_KEY").map_err(|_| {
            ButacaError::config(
                "TMDB API key not found in secret.json or the TMDB_API_KEY environment variable",
            )
        })
    }

    /// Resolves the Firebase credentials from the secret file or
    /// environment.
    pub fn firebase(&self) -> Result<FirebaseSecret> {
        if let Some(firebase) = self.load()?.firebase {
            return Ok(firebase);
        }
        let api_key = env::var("FIREBASE_API_KEY").map_err(|_| {
            ButacaError::config(
                "Firebase API key not found in secret.json or the FIREBASE_API_KEY environment variable",
            )
        })?;
        let project_id = env::var("FIREBASE_PROJECT_ID").map_err(|_| {
            ButacaError::config(
                "Firebase project id not found in secret.json or the FIREBASE_PROJECT_ID environment variable",
            )
        })?;
        Ok(FirebaseSecret {
            api_key,
            project_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn storage_in(dir: &Path) -> SecretStorage {
        SecretStorage::with_paths(ButacaPaths::new(Some(dir)))
    }

    #[test]
    fn test_missing_file_is_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = storage_in(dir.path()).load().unwrap();
        assert_eq!(config, SecretConfig::default());
    }

    #[test]
    fn test_secret_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let config = SecretConfig {
            tmdb: Some(TmdbSecret {
                api_key: "tmdb-key".to_string(),
            }),
            firebase: Some(FirebaseSecret {
                api_key: "fb-key".to_string(),
                project_id: "peliculas-87b7d".to_string(),
            }),
        };
        fs::write(
            dir.path().join("secret.json"),
            serde_json::to_string(&config).unwrap(),
        )
        .unwrap();

        let storage = storage_in(dir.path());
        assert_eq!(storage.tmdb_api_key().unwrap(), "tmdb-key");
        assert_eq!(storage.firebase().unwrap().project_id, "peliculas-87b7d");
    }

    #[test]
    fn test_malformed_secret_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("secret.json"), "not json").unwrap();
        assert!(storage_in(dir.path()).load().is_err());
    }
}
