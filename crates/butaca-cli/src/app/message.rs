//! Messages and commands flowing between the shell and the runtime.
//!
//! Key handling mutates the `App` synchronously and may emit
//! `Command`s; the runtime executes each command on the tokio runtime
//! and feeds the completion back as an `AppMessage`. Every fetch
//! completion carries the generation token it started with so stale
//! results can be discarded.

use butaca_core::catalog::{CastMember, CatalogEntry};
use butaca_core::comment::Comment;
use butaca_core::error::Result;
use butaca_core::session::{Session, SessionEvent};
use butaca_core::view::Generation;

/// Which form the auth modal submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

/// Asynchronous work requested by the shell.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadNowPlaying { generation: Generation },
    LoadTopRated { generation: Generation },
    LoadSearch { generation: Generation, query: String },
    LoadDetails { generation: Generation, id: u64 },
    LoadCast { generation: Generation, id: u64 },
    LoadComments { generation: Generation, id: u64 },
    Authenticate {
        mode: AuthMode,
        email: String,
        password: String,
    },
    PostComment { movie_id: u64, body: String },
    SignOut,
}

/// Completions delivered back to the shell.
#[derive(Debug, Clone)]
pub enum AppMessage {
    NowPlayingLoaded {
        generation: Generation,
        result: Result<Vec<CatalogEntry>>,
    },
    TopRatedLoaded {
        generation: Generation,
        result: Result<Vec<CatalogEntry>>,
    },
    SearchLoaded {
        generation: Generation,
        result: Result<Vec<CatalogEntry>>,
    },
    DetailsLoaded {
        generation: Generation,
        result: Result<CatalogEntry>,
    },
    CastLoaded {
        generation: Generation,
        result: Result<Vec<CastMember>>,
    },
    CommentsLoaded {
        generation: Generation,
        result: Result<Vec<Comment>>,
    },
    AuthCompleted {
        mode: AuthMode,
        result: Result<Session>,
    },
    CommentPosted {
        movie_id: u64,
        result: Result<Comment>,
    },
    SessionChanged(SessionEvent),
    /// Periodic timer used to expire toasts.
    Tick,
}
