//! FirestoreCommentStore - comment persistence over the Firestore REST
//! API.
//!
//! Comments live in the `Comentarios` collection with the wire fields
//! `id_pelicula`, `comentario`, `correo_usuario` and `fecha_comentario`.
//! `posted_at` on a freshly created comment is the document's
//! server-assigned create time.

use crate::config::FirebaseConfig;
use async_trait::async_trait;
use butaca_core::comment::{Comment, CommentStore};
use butaca_core::error::{ButacaError, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

const COLLECTION: &str = "Comentarios";

const FIELD_MOVIE_ID: &str = "id_pelicula";
const FIELD_BODY: &str = "comentario";
const FIELD_AUTHOR: &str = "correo_usuario";
const FIELD_POSTED_AT: &str = "fecha_comentario";

/// Stateless adapter over the Firestore document store.
#[derive(Clone)]
pub struct FirestoreCommentStore {
    client: Client,
    config: FirebaseConfig,
}

impl FirestoreCommentStore {
    pub fn new(config: FirebaseConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents",
            self.config.firestore_base_url, self.config.project_id
        )
    }
}

#[async_trait]
impl CommentStore for FirestoreCommentStore {
    async fn post_comment(
        &self,
        movie_id: u64,
        author_email: &str,
        body: &str,
    ) -> Result<Comment> {
        let url = format!(
            "{}/{}?key={}",
            self.documents_url(),
            COLLECTION,
            self.config.api_key
        );
        debug!(movie_id, "posting comment");

        // Keys mirror the FIELD_* constants used on the read side.
        let request = json!({
            "fields": {
                "id_pelicula": { "integerValue": movie_id.to_string() },
                "comentario": { "stringValue": body },
                "correo_usuario": { "stringValue": author_email },
                "fecha_comentario": { "timestampValue": Utc::now() },
            }
        });

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|err| ButacaError::network(format!("comment store request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read comment store error body".to_string());
            return Err(ButacaError::network(format!(
                "comment store returned {status}: {body_text}"
            )));
        }

        let created: FirestoreDocument = response.json().await.map_err(|err| {
            ButacaError::network(format!("failed to parse comment store response: {err}"))
        })?;

        map_document(&created).ok_or_else(|| {
            ButacaError::network("comment store returned an incomplete document".to_string())
        })
    }

    async fn list_comments(&self, movie_id: u64) -> Result<Vec<Comment>> {
        let url = format!(
            "{}:runQuery?key={}",
            self.documents_url(),
            self.config.api_key
        );
        debug!(movie_id, "listing comments");

        let request = json!({
            "structuredQuery": {
                "from": [{ "collectionId": "Comentarios" }],
                "where": {
                    "fieldFilter": {
                        "field": { "fieldPath": "id_pelicula" },
                        "op": "EQUAL",
                        "value": { "integerValue": movie_id.to_string() },
                    }
                },
            }
        });

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|err| ButacaError::network(format!("comment query failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read comment query error body".to_string());
            return Err(ButacaError::network(format!(
                "comment query returned {status}: {body_text}"
            )));
        }

        let rows: Vec<QueryRow> = response.json().await.map_err(|err| {
            ButacaError::network(format!("failed to parse comment query response: {err}"))
        })?;

        Ok(map_query_rows(rows))
    }
}

/// Extracts comments from query rows, skipping rows without a document
/// (Firestore emits a trailing read-time-only row for empty results)
/// and documents missing required fields.
fn map_query_rows(rows: Vec<QueryRow>) -> Vec<Comment> {
    rows.into_iter()
        .filter_map(|row| {
            let document = row.document?;
            let mapped = map_document(&document);
            if mapped.is_none() {
                warn!(name = %document.name, "skipping malformed comment document");
            }
            mapped
        })
        .collect()
}

fn map_document(document: &FirestoreDocument) -> Option<Comment> {
    let fields = &document.fields;
    let movie_id = fields
        .get(FIELD_MOVIE_ID)?
        .integer_value
        .as_deref()?
        .parse::<u64>()
        .ok()?;
    let body = fields.get(FIELD_BODY)?.string_value.clone()?;
    let author_email = fields.get(FIELD_AUTHOR)?.string_value.clone()?;
    // Prefer the server-assigned create time; fall back to the stored
    // timestamp field for documents written by other clients.
    let posted_at = document
        .create_time
        .or_else(|| fields.get(FIELD_POSTED_AT)?.timestamp_value)?;

    Some(Comment {
        movie_id,
        author_email,
        body,
        posted_at,
    })
}

#[derive(Debug, Deserialize)]
struct QueryRow {
    #[serde(default)]
    document: Option<FirestoreDocument>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FirestoreDocument {
    #[serde(default)]
    name: String,
    #[serde(default)]
    fields: std::collections::HashMap<String, FirestoreValue>,
    #[serde(default)]
    create_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FirestoreValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    string_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    integer_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timestamp_value: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document_json(movie_id: u64, body: &str) -> String {
        format!(
            r#"{{
                "name": "projects/p/databases/(default)/documents/Comentarios/abc",
                "fields": {{
                    "id_pelicula": {{ "integerValue": "{movie_id}" }},
                    "comentario": {{ "stringValue": "{body}" }},
                    "correo_usuario": {{ "stringValue": "ana@example.com" }},
                    "fecha_comentario": {{ "timestampValue": "2024-03-01T10:00:00Z" }}
                }},
                "createTime": "2024-03-01T10:00:01Z",
                "updateTime": "2024-03-01T10:00:01Z"
            }}"#
        )
    }

    #[test]
    fn test_map_document_uses_server_create_time() {
        let document: FirestoreDocument =
            serde_json::from_str(&document_json(42, "Great movie")).unwrap();
        let comment = map_document(&document).unwrap();
        assert_eq!(comment.movie_id, 42);
        assert_eq!(comment.body, "Great movie");
        assert_eq!(comment.author_email, "ana@example.com");
        assert_eq!(
            comment.posted_at,
            "2024-03-01T10:00:01Z".parse::<DateTime<Utc>>().unwrap()
        );
    }

    #[test]
    fn test_map_query_rows_skips_documentless_rows() {
        let raw = format!(
            r#"[
                {{ "document": {}, "readTime": "2024-03-02T00:00:00Z" }},
                {{ "readTime": "2024-03-02T00:00:00Z" }}
            ]"#,
            document_json(42, "Great movie")
        );
        let rows: Vec<QueryRow> = serde_json::from_str(&raw).unwrap();
        let comments = map_query_rows(rows);
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].body, "Great movie");
    }

    #[test]
    fn test_empty_result_is_empty_vec() {
        let rows: Vec<QueryRow> =
            serde_json::from_str(r#"[{ "readTime": "2024-03-02T00:00:00Z" }]"#).unwrap();
        assert!(map_query_rows(rows).is_empty());
    }

    #[test]
    fn test_malformed_document_is_skipped() {
        let raw = r#"[
            { "document": { "name": "x", "fields": { "comentario": { "stringValue": "orphan" } } } }
        ]"#;
        let rows: Vec<QueryRow> = serde_json::from_str(raw).unwrap();
        assert!(map_query_rows(rows).is_empty());
    }
}
