//! Session use case.
//!
//! Coordinates the identity gateway and the local session store, and
//! broadcasts a `SessionEvent` on every change so session-dependent
//! views refresh in place. This replaces the ambient-storage-plus-full-
//! reload pattern: components subscribe instead of re-reading storage.

use butaca_core::error::Result;
use butaca_core::session::{IdentityGateway, Session, SessionEvent, SessionStore};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::info;

/// Use case for the sign-in/sign-up/sign-out lifecycle.
#[derive(Clone)]
pub struct SessionUseCase {
    identity: Arc<dyn IdentityGateway>,
    store: Arc<dyn SessionStore>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionUseCase {
    pub fn new(identity: Arc<dyn IdentityGateway>, store: Arc<dyn SessionStore>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            identity,
            store,
            events,
        }
    }

    /// Signs in and persists the resulting session.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let user = self.identity.sign_in(email, password).await?;
        let session: Session = user.into();
        self.store.save(&session)?;
        info!(email = %session.email, "signed in");
        let _ = self.events.send(SessionEvent::SignedIn(session.clone()));
        Ok(session)
    }

    /// Registers a new account; on success the session is established
    /// exactly as for `sign_in`.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Session> {
        let user = self.identity.sign_up(email, password).await?;
        let session: Session = user.into();
        self.store.save(&session)?;
        info!(email = %session.email, "signed up");
        let _ = self.events.send(SessionEvent::SignedIn(session.clone()));
        Ok(session)
    }

    /// Clears the persisted session. Idempotent: signing out while
    /// signed out still succeeds and still notifies subscribers.
    pub fn sign_out(&self) -> Result<()> {
        self.store.clear()?;
        info!("signed out");
        let _ = self.events.send(SessionEvent::SignedOut);
        Ok(())
    }

    /// Synchronous read of the persisted session; never touches the
    /// network. Missing or corrupt records read as `None`.
    pub fn current_session(&self) -> Option<Session> {
        self.store.load()
    }

    /// Subscribes to session changes.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}
