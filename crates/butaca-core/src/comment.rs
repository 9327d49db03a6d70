//! Comment domain model.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user comment attached to one movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub movie_id: u64,
    pub author_email: String,
    pub body: String,
    /// Server-assigned creation time.
    pub posted_at: DateTime<Utc>,
}

/// Boundary to the external comment document store.
///
/// The store is append-and-query only: no edits, no deletes, no
/// pagination. An empty query result is an empty vec, never an error,
/// so callers can distinguish "no comments yet" from a failed fetch.
#[async_trait::async_trait]
pub trait CommentStore: Send + Sync {
    /// Appends a comment and returns the persisted record, including
    /// the server-assigned timestamp.
    async fn post_comment(&self, movie_id: u64, author_email: &str, body: &str)
    -> Result<Comment>;

    /// Lists every comment stored for `movie_id`, in store order.
    async fn list_comments(&self, movie_id: u64) -> Result<Vec<Comment>>;
}
