pub mod carousel;
pub mod catalog;
pub mod comment;
pub mod error;
pub mod route;
pub mod session;
pub mod view;

// Re-export common error type
pub use error::{ButacaError, Result};
