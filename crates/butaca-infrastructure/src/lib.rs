pub mod paths;
pub mod secret_storage;
pub mod session_repository;

pub use paths::ButacaPaths;
pub use secret_storage::{FirebaseSecret, SecretConfig, SecretStorage, TmdbSecret};
pub use session_repository::JsonSessionRepository;
