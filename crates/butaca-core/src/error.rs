//! Error types for the Butaca application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Butaca application.
///
/// Every adapter produces these variants explicitly; nothing downstream
/// inspects error identity or message text to decide behavior.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ButacaError {
    /// A remote catalog/store/identity request failed (transport or HTTP status)
    #[error("Network error: {message}")]
    Network { message: String },

    /// Local input rejected before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// The identity service rejected a sign-in or sign-up attempt
    #[error("Authentication error: {message}")]
    Auth { message: String },

    /// The action requires a signed-in session and none is present
    #[error("You must be signed in to do this")]
    AuthorizationRequired,

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error (missing API key, bad endpoint, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ButacaError {
    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an Auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a Network error
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an Auth error
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// Check if this is an AuthorizationRequired error
    pub fn is_authorization_required(&self) -> bool {
        matches!(self, Self::AuthorizationRequired)
    }

    /// A short message suitable for a user-facing toast or error panel.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<std::io::Error> for ButacaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ButacaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ButacaError>`.
pub type Result<T> = std::result::Result<T, ButacaError>;
