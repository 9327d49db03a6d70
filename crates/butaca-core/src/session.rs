//! Session domain model.
//!
//! A `Session` is the locally persisted proof of a successful sign-in.
//! Its presence is the sole client-side authorization check for posting
//! comments; the external services enforce whatever they enforce on top.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// The persisted session record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
}

/// What the identity service returns on a successful sign-in or
/// sign-up. The token is not persisted; only the uid/email pair is.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
    pub id_token: String,
}

impl From<AuthenticatedUser> for Session {
    fn from(user: AuthenticatedUser) -> Self {
        Session {
            user_id: user.user_id,
            email: user.email,
        }
    }
}

/// Emitted on every session change so dependent views refresh in place
/// instead of forcing a full reload.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SignedIn(Session),
    SignedOut,
}

/// Local persistence for the single session record.
///
/// Reads are synchronous and never contact the network. A missing or
/// corrupt stored record reads as "not signed in" rather than an error.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Option<Session>;
    fn save(&self, session: &Session) -> Result<()>;
    /// Idempotent: clearing an absent record succeeds.
    fn clear(&self) -> Result<()>;
}

/// Boundary to the external identity service.
///
/// Failures carry a human-readable reason from the upstream service
/// (invalid credentials, malformed email, already-registered email) as
/// `ButacaError::Auth`.
#[async_trait::async_trait]
pub trait IdentityGateway: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthenticatedUser>;
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthenticatedUser>;
}
