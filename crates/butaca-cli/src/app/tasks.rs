//! Command execution.
//!
//! Each `Command` runs as its own tokio task; whatever it produces
//! comes back to the shell as one `AppMessage`. Nothing here touches
//! the `App` directly, which keeps the state machine synchronous and
//! the fetches independent of each other.

use crate::app::message::{AppMessage, AuthMode, Command};
use crate::app::state::TOP_RATED_LIMIT;
use butaca_application::{CommentUseCase, SessionUseCase};
use butaca_core::catalog::CatalogGateway;
use std::sync::Arc;
use tokio::sync::mpsc;

/// The gateways and use cases the shell runs against.
#[derive(Clone)]
pub struct Services {
    pub catalog: Arc<dyn CatalogGateway>,
    pub sessions: SessionUseCase,
    pub comments: CommentUseCase,
}

/// Executes one command to completion and returns its completion
/// message, if the command produces one.
pub async fn execute(services: &Services, command: Command) -> Option<AppMessage> {
    match command {
        Command::LoadNowPlaying { generation } => Some(AppMessage::NowPlayingLoaded {
            generation,
            result: services.catalog.fetch_now_playing().await,
        }),
        Command::LoadTopRated { generation } => Some(AppMessage::TopRatedLoaded {
            generation,
            result: services.catalog.fetch_top_rated(TOP_RATED_LIMIT).await,
        }),
        Command::LoadSearch { generation, query } => Some(AppMessage::SearchLoaded {
            generation,
            result: services.catalog.search_by_title(&query).await,
        }),
        Command::LoadDetails { generation, id } => Some(AppMessage::DetailsLoaded {
            generation,
            result: services.catalog.fetch_details(id).await,
        }),
        Command::LoadCast { generation, id } => Some(AppMessage::CastLoaded {
            generation,
            result: services.catalog.fetch_cast(id).await,
        }),
        Command::LoadComments { generation, id } => Some(AppMessage::CommentsLoaded {
            generation,
            result: services.comments.list(id).await,
        }),
        Command::Authenticate {
            mode,
            email,
            password,
        } => {
            let result = match mode {
                AuthMode::SignIn => services.sessions.sign_in(&email, &password).await,
                AuthMode::SignUp => services.sessions.sign_up(&email, &password).await,
            };
            Some(AppMessage::AuthCompleted { mode, result })
        }
        Command::PostComment { movie_id, body } => Some(AppMessage::CommentPosted {
            movie_id,
            result: services.comments.post(movie_id, &body).await,
        }),
        Command::SignOut => {
            if let Err(err) = services.sessions.sign_out() {
                tracing::warn!(error = %err, "sign out failed");
            }
            // The session broadcast delivers the state change.
            None
        }
    }
}

/// Spawns each command as an independent task reporting back over the
/// message channel. In-flight work is never cancelled; stale results
/// are discarded by generation on arrival instead.
pub fn spawn_all(
    services: &Services,
    commands: Vec<Command>,
    messages: &mpsc::UnboundedSender<AppMessage>,
) {
    for command in commands {
        let services = services.clone();
        let messages = messages.clone();
        tokio::spawn(async move {
            if let Some(message) = execute(&services, command).await {
                let _ = messages.send(message);
            }
        });
    }
}
