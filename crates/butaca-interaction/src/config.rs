//! Endpoint configuration for the remote services.

use butaca_infrastructure::{FirebaseSecret, SecretStorage};
use butaca_core::error::Result;

pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const TMDB_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const DEFAULT_LANGUAGE: &str = "es-ES";

pub const IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// TMDB connection settings.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub base_url: String,
    pub image_base_url: String,
    pub api_key: String,
    pub language: String,
}

impl TmdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: TMDB_BASE_URL.to_string(),
            image_base_url: TMDB_IMAGE_BASE_URL.to_string(),
            api_key: api_key.into(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Loads the API key from secret storage / environment.
    pub fn from_secrets(secrets: &SecretStorage) -> Result<Self> {
        Ok(Self::new(secrets.tmdb_api_key()?))
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// Firebase connection settings shared by the identity and comment
/// adapters.
#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    pub identity_base_url: String,
    pub firestore_base_url: String,
    pub api_key: String,
    pub project_id: String,
}

impl FirebaseConfig {
    pub fn new(api_key: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            identity_base_url: IDENTITY_BASE_URL.to_string(),
            firestore_base_url: FIRESTORE_BASE_URL.to_string(),
            api_key: api_key.into(),
            project_id: project_id.into(),
        }
    }

    /// Loads credentials from secret storage / environment.
    pub fn from_secrets(secrets: &SecretStorage) -> Result<Self> {
        let FirebaseSecret {
            api_key,
            project_id,
        } = secrets.firebase()?;
        Ok(Self::new(api_key, project_id))
    }
}
