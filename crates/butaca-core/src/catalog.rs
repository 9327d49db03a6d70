//! Catalog domain model.
//!
//! `CatalogEntry` and `CastMember` are the normalized representations of
//! what the remote movie-metadata service returns. They are transient
//! view models: fetched fresh for every view and discarded on
//! navigation, never cached.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// One movie record as this application sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: u64,
    pub title: String,
    /// Derived from the upstream release date. A missing or malformed
    /// date yields `None` rather than failing the whole listing.
    pub release_year: Option<i32>,
    pub synopsis: String,
    /// Fully-joined poster image URL, when the upstream record has one.
    pub poster_image: Option<String>,
    /// Fully-joined backdrop image URL (used by the home carousel).
    pub backdrop_image: Option<String>,
}

/// One credited cast member, scoped to a single detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    /// The character played.
    pub role: String,
    pub portrait_image: Option<String>,
}

/// Read-only boundary to the external movie-metadata service.
///
/// All operations are asynchronous and side-effect free beyond the
/// network call itself. Failures surface as `ButacaError::Network` so a
/// caller can render a Failed state distinct from "loading" and
/// "no results".
#[async_trait::async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Lists movies currently playing.
    async fn fetch_now_playing(&self) -> Result<Vec<CatalogEntry>>;

    /// Lists top-rated movies, truncated to `limit` entries.
    async fn fetch_top_rated(&self, limit: usize) -> Result<Vec<CatalogEntry>>;

    /// Text search by title. An empty or whitespace-only query returns
    /// an empty list without contacting the network.
    async fn search_by_title(&self, query: &str) -> Result<Vec<CatalogEntry>>;

    /// Fetches one movie by its upstream id.
    async fn fetch_details(&self, id: u64) -> Result<CatalogEntry>;

    /// Fetches the full credited cast. Callers truncate to whatever the
    /// view needs (the detail page shows the first six).
    async fn fetch_cast(&self, id: u64) -> Result<Vec<CastMember>>;
}
