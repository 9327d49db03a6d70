//! Comment use case.
//!
//! Validates and authorizes comment submissions before they touch the
//! network, and normalizes read-side ordering: the store returns
//! documents in an implementation-defined order, so listings are sorted
//! by `posted_at` ascending here.

use crate::session_usecase::SessionUseCase;
use butaca_core::comment::{Comment, CommentStore};
use butaca_core::error::{ButacaError, Result};
use std::sync::Arc;

#[derive(Clone)]
pub struct CommentUseCase {
    store: Arc<dyn CommentStore>,
    sessions: SessionUseCase,
}

impl CommentUseCase {
    pub fn new(store: Arc<dyn CommentStore>, sessions: SessionUseCase) -> Self {
        Self { store, sessions }
    }

    /// Posts a comment as the current session's user.
    ///
    /// An empty or whitespace-only body fails with `Validation` and a
    /// missing session with `AuthorizationRequired`; neither reaches
    /// the store.
    pub async fn post(&self, movie_id: u64, body: &str) -> Result<Comment> {
        if body.trim().is_empty() {
            return Err(ButacaError::validation("the comment cannot be empty"));
        }
        let session = self
            .sessions
            .current_session()
            .ok_or(ButacaError::AuthorizationRequired)?;
        self.store
            .post_comment(movie_id, &session.email, body)
            .await
    }

    /// Lists the comments for one movie, oldest first.
    pub async fn list(&self, movie_id: u64) -> Result<Vec<Comment>> {
        let mut comments = self.store.list_comments(movie_id).await?;
        comments.sort_by_key(|comment| comment.posted_at);
        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use butaca_core::session::{AuthenticatedUser, IdentityGateway, Session, SessionStore};
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct MemoryCommentStore {
        comments: Mutex<Vec<Comment>>,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl CommentStore for MemoryCommentStore {
        async fn post_comment(
            &self,
            movie_id: u64,
            author_email: &str,
            body: &str,
        ) -> Result<Comment> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let comment = Comment {
                movie_id,
                author_email: author_email.to_string(),
                body: body.to_string(),
                posted_at: Utc::now(),
            };
            self.comments.lock().unwrap().push(comment.clone());
            Ok(comment)
        }

        async fn list_comments(&self, movie_id: u64) -> Result<Vec<Comment>> {
            Ok(self
                .comments
                .lock()
                .unwrap()
                .iter()
                .filter(|comment| comment.movie_id == movie_id)
                .cloned()
                .collect())
        }
    }

    struct FakeIdentity;

    #[async_trait::async_trait]
    impl IdentityGateway for FakeIdentity {
        async fn sign_in(&self, email: &str, _password: &str) -> Result<AuthenticatedUser> {
            Ok(AuthenticatedUser {
                user_id: "uid-1".to_string(),
                email: email.to_string(),
                id_token: "tok".to_string(),
            })
        }

        async fn sign_up(&self, email: &str, password: &str) -> Result<AuthenticatedUser> {
            self.sign_in(email, password).await
        }
    }

    #[derive(Default)]
    struct MemorySessionStore {
        session: Mutex<Option<Session>>,
    }

    impl SessionStore for MemorySessionStore {
        fn load(&self) -> Option<Session> {
            self.session.lock().unwrap().clone()
        }

        fn save(&self, session: &Session) -> Result<()> {
            *self.session.lock().unwrap() = Some(session.clone());
            Ok(())
        }

        fn clear(&self) -> Result<()> {
            *self.session.lock().unwrap() = None;
            Ok(())
        }
    }

    fn build() -> (Arc<MemoryCommentStore>, SessionUseCase, CommentUseCase) {
        let store = Arc::new(MemoryCommentStore::default());
        let sessions = SessionUseCase::new(
            Arc::new(FakeIdentity),
            Arc::new(MemorySessionStore::default()),
        );
        let comments = CommentUseCase::new(store.clone(), sessions.clone());
        (store, sessions, comments)
    }

    #[tokio::test]
    async fn test_empty_body_never_reaches_the_store() {
        let (store, sessions, comments) = build();
        sessions.sign_in("ana@example.com", "secret").await.unwrap();

        for body in ["", "   "] {
            let err = comments.post(42, body).await.unwrap_err();
            assert!(err.is_validation());
        }
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unauthenticated_post_is_authorization_required() {
        let (store, _sessions, comments) = build();
        let err = comments.post(42, "Great movie").await.unwrap_err();
        assert!(err.is_authorization_required());
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_posted_comment_shows_up_in_listing() {
        let (_store, sessions, comments) = build();
        sessions.sign_in("ana@example.com", "secret").await.unwrap();

        comments.post(42, "Great movie").await.unwrap();
        let listed = comments.list(42).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].body, "Great movie");
        assert_eq!(listed[0].author_email, "ana@example.com");

        // Other movies are unaffected
        assert!(comments.list(7).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_listing_sorts_oldest_first() {
        let (store, sessions, comments) = build();
        sessions.sign_in("ana@example.com", "secret").await.unwrap();

        let later = Comment {
            movie_id: 42,
            author_email: "b@example.com".to_string(),
            body: "second".to_string(),
            posted_at: Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap(),
        };
        let earlier = Comment {
            movie_id: 42,
            author_email: "a@example.com".to_string(),
            body: "first".to_string(),
            posted_at: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
        };
        store.comments.lock().unwrap().extend([later, earlier]);

        let listed = comments.list(42).await.unwrap();
        assert_eq!(listed[0].body, "first");
        assert_eq!(listed[1].body, "second");
    }
}
