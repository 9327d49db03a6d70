//! HTTP adapters for the external services butaca talks to: the TMDB
//! catalog, the Firebase identity service, and the Firestore comment
//! store. Each adapter is a stateless boundary object translating
//! between the wire format and the core view models.

pub mod config;
pub mod firebase_identity;
pub mod firestore_comments;
pub mod tmdb_gateway;

pub use config::{FirebaseConfig, TmdbConfig};
pub use firebase_identity::FirebaseIdentityGateway;
pub use firestore_comments::FirestoreCommentStore;
pub use tmdb_gateway::TmdbCatalogGateway;
