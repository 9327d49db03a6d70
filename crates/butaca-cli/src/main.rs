use anyhow::Context;
use butaca_application::{CommentUseCase, SessionUseCase};
use butaca_infrastructure::{JsonSessionRepository, SecretStorage};
use butaca_interaction::{
    FirebaseConfig, FirebaseIdentityGateway, FirestoreCommentStore, TmdbCatalogGateway, TmdbConfig,
};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod app;
mod runtime;
mod ui;

use app::Services;

#[derive(Parser)]
#[command(name = "butaca")]
#[command(about = "Butaca - browse movies and comment from your terminal", long_about = None)]
struct Cli {
    /// Language for catalog data, e.g. es-ES or en-US
    #[arg(long, default_value = "es-ES")]
    language: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let secrets = SecretStorage::new();
    let tmdb_config = TmdbConfig::from_secrets(&secrets)
        .context("TMDB credentials are not configured")?
        .with_language(cli.language);
    let firebase_config =
        FirebaseConfig::from_secrets(&secrets).context("Firebase credentials are not configured")?;

    let session_store = Arc::new(JsonSessionRepository::new()?);
    let sessions = SessionUseCase::new(
        Arc::new(FirebaseIdentityGateway::new(firebase_config.clone())),
        session_store,
    );
    let comments = CommentUseCase::new(
        Arc::new(FirestoreCommentStore::new(firebase_config)),
        sessions.clone(),
    );

    let services = Services {
        catalog: Arc::new(TmdbCatalogGateway::new(tmdb_config)),
        sessions: sessions.clone(),
        comments,
    };

    let session = sessions.current_session();
    runtime::run(services, session).await
}
