//! TmdbCatalogGateway - read-only adapter over The Movie Database API.
//!
//! Maps TMDB's wire records into `CatalogEntry`/`CastMember` view
//! models. Mapping is fail-soft: a record with a missing or malformed
//! release date still produces an entry, with `release_year: None`.

use crate::config::TmdbConfig;
use async_trait::async_trait;
use butaca_core::catalog::{CastMember, CatalogEntry, CatalogGateway};
use butaca_core::error::{ButacaError, Result};
use chrono::{Datelike, NaiveDate};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

/// Image widths used when joining TMDB image paths into full URLs,
/// matching what each view renders.
const POSTER_WIDTH: &str = "w500";
const BACKDROP_WIDTH: &str = "w1280";
const PORTRAIT_WIDTH: &str = "w200";

/// Stateless gateway to the TMDB HTTP API.
#[derive(Clone)]
pub struct TmdbCatalogGateway {
    client: Client,
    config: TmdbConfig,
}

impl TmdbCatalogGateway {
    pub fn new(config: TmdbConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        extra_query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.config.base_url, path);
        debug!(%url, "TMDB request");

        let mut query: Vec<(&str, &str)> = vec![
            ("api_key", self.config.api_key.as_str()),
            ("language", self.config.language.as_str()),
        ];
        query.extend_from_slice(extra_query);

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|err| ButacaError::network(format!("TMDB request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read TMDB error body".to_string());
            return Err(map_http_error(status, body));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| ButacaError::network(format!("failed to parse TMDB response: {err}")))
    }

    fn map_movie(&self, record: MovieRecord) -> CatalogEntry {
        CatalogEntry {
            id: record.id,
            title: record.title,
            release_year: parse_release_year(record.release_date.as_deref()),
            synopsis: record.overview.unwrap_or_default(),
            poster_image: self.join_image(record.poster_path.as_deref(), POSTER_WIDTH),
            backdrop_image: self.join_image(record.backdrop_path.as_deref(), BACKDROP_WIDTH),
        }
    }

    fn map_cast(&self, record: CastRecord) -> CastMember {
        CastMember {
            id: record.id,
            name: record.name,
            role: record.character.unwrap_or_default(),
            portrait_image: self.join_image(record.profile_path.as_deref(), PORTRAIT_WIDTH),
        }
    }

    fn join_image(&self, path: Option<&str>, width: &str) -> Option<String> {
        let path = path?;
        if path.is_empty() {
            return None;
        }
        Some(format!("{}/{}{}", self.config.image_base_url, width, path))
    }
}

#[async_trait]
impl CatalogGateway for TmdbCatalogGateway {
    async fn fetch_now_playing(&self) -> Result<Vec<CatalogEntry>> {
        let listing: ListingResponse = self
            .get_json("/movie/now_playing", &[("page", "1")])
            .await?;
        Ok(listing
            .results
            .into_iter()
            .map(|record| self.map_movie(record))
            .collect())
    }

    async fn fetch_top_rated(&self, limit: usize) -> Result<Vec<CatalogEntry>> {
        let listing: ListingResponse = self.get_json("/movie/top_rated", &[("page", "1")]).await?;
        Ok(listing
            .results
            .into_iter()
            .take(limit)
            .map(|record| self.map_movie(record))
            .collect())
    }

    async fn search_by_title(&self, query: &str) -> Result<Vec<CatalogEntry>> {
        // An empty query never reaches the network.
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let listing: ListingResponse = self
            .get_json("/search/movie", &[("query", query)])
            .await?;
        Ok(listing
            .results
            .into_iter()
            .map(|record| self.map_movie(record))
            .collect())
    }

    async fn fetch_details(&self, id: u64) -> Result<CatalogEntry> {
        let record: MovieRecord = self.get_json(&format!("/movie/{id}"), &[]).await?;
        Ok(self.map_movie(record))
    }

    async fn fetch_cast(&self, id: u64) -> Result<Vec<CastMember>> {
        let credits: CreditsResponse = self
            .get_json(&format!("/movie/{id}/credits"), &[])
            .await?;
        Ok(credits
            .cast
            .into_iter()
            .map(|record| self.map_cast(record))
            .collect())
    }
}

/// Derives the release year from TMDB's `release_date` field.
/// Empty or malformed dates yield `None` instead of failing the listing.
fn parse_release_year(release_date: Option<&str>) -> Option<i32> {
    let raw = release_date?.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.year())
}

fn map_http_error(status: StatusCode, body: String) -> ButacaError {
    let message = serde_json::from_str::<TmdbErrorResponse>(&body)
        .map(|wrapper| wrapper.status_message)
        .unwrap_or(body);
    ButacaError::network(format!("TMDB returned {status}: {message}"))
}

#[derive(Deserialize)]
struct ListingResponse {
    results: Vec<MovieRecord>,
}

#[derive(Deserialize)]
struct MovieRecord {
    id: u64,
    title: String,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    backdrop_path: Option<String>,
}

#[derive(Deserialize)]
struct CreditsResponse {
    cast: Vec<CastRecord>,
}

#[derive(Deserialize)]
struct CastRecord {
    id: u64,
    name: String,
    #[serde(default)]
    character: Option<String>,
    #[serde(default)]
    profile_path: Option<String>,
}

#[derive(Deserialize)]
struct TmdbErrorResponse {
    status_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TmdbConfig;

    fn gateway() -> TmdbCatalogGateway {
        TmdbCatalogGateway::new(TmdbConfig::new("test-key"))
    }

    #[test]
    fn test_parse_release_year() {
        assert_eq!(parse_release_year(Some("2020-05-01")), Some(2020));
        assert_eq!(parse_release_year(Some("1999-12-31")), Some(1999));
        assert_eq!(parse_release_year(Some("")), None);
        assert_eq!(parse_release_year(Some("not-a-date")), None);
        assert_eq!(parse_release_year(None), None);
    }

    #[test]
    fn test_map_movie_joins_image_urls() {
        let record: MovieRecord = serde_json::from_str(
            r#"{
                "id": 42,
                "title": "X",
                "release_date": "2020-05-01",
                "overview": "Y",
                "poster_path": "/p.jpg",
                "backdrop_path": "/b.jpg"
            }"#,
        )
        .unwrap();

        let entry = gateway().map_movie(record);
        assert_eq!(entry.id, 42);
        assert_eq!(entry.title, "X");
        assert_eq!(entry.release_year, Some(2020));
        assert_eq!(entry.synopsis, "Y");
        assert_eq!(
            entry.poster_image.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/p.jpg")
        );
        assert_eq!(
            entry.backdrop_image.as_deref(),
            Some("https://image.tmdb.org/t/p/w1280/b.jpg")
        );
    }

    #[test]
    fn test_map_movie_tolerates_sparse_records() {
        let record: MovieRecord =
            serde_json::from_str(r#"{"id": 7, "title": "Sin fecha"}"#).unwrap();
        let entry = gateway().map_movie(record);
        assert_eq!(entry.release_year, None);
        assert_eq!(entry.synopsis, "");
        assert!(entry.poster_image.is_none());
        assert!(entry.backdrop_image.is_none());
    }

    #[test]
    fn test_map_cast() {
        let credits: CreditsResponse = serde_json::from_str(
            r#"{"cast": [
                {"id": 1, "name": "A", "character": "Hero", "profile_path": "/a.jpg"},
                {"id": 2, "name": "B"}
            ]}"#,
        )
        .unwrap();

        let gateway = gateway();
        let cast: Vec<CastMember> = credits
            .cast
            .into_iter()
            .map(|record| gateway.map_cast(record))
            .collect();
        assert_eq!(cast.len(), 2);
        assert_eq!(cast[0].role, "Hero");
        assert_eq!(
            cast[0].portrait_image.as_deref(),
            Some("https://image.tmdb.org/t/p/w200/a.jpg")
        );
        assert_eq!(cast[1].role, "");
        assert!(cast[1].portrait_image.is_none());
    }

    #[test]
    fn test_map_http_error_prefers_status_message() {
        let err = map_http_error(
            StatusCode::UNAUTHORIZED,
            r#"{"status_code": 7, "status_message": "Invalid API key"}"#.to_string(),
        );
        assert!(err.is_network());
        assert!(err.to_string().contains("Invalid API key"));
    }

    #[tokio::test]
    async fn test_empty_search_skips_the_network() {
        // The gateway has a bogus base URL reachable only if a request
        // is actually attempted, so an Ok result proves no call happened.
        let mut config = TmdbConfig::new("test-key");
        config.base_url = "http://127.0.0.1:1".to_string();
        let gateway = TmdbCatalogGateway::new(config);

        assert_eq!(gateway.search_by_title("").await.unwrap(), Vec::new());
        assert_eq!(gateway.search_by_title("   ").await.unwrap(), Vec::new());
    }
}
