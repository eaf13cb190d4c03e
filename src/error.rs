//! Error taxonomy shared by the HTTP surface, the CLI, and the core
//! operations.
//!
//! Each variant maps to one recovery strategy: [`Error::InvalidItem`] is
//! recovered element-by-element during bulk normalization and never aborts a
//! listing, while the remaining variants propagate to the caller and carry
//! their HTTP status (see the `IntoResponse` impl in [`crate::server`]).

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A single malformed record inside an otherwise usable collection.
    #[error("invalid item: {0}")]
    InvalidItem(String),

    /// Caller-supplied data failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The requested entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// An upstream source could not be reached or answered unusably.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The favorites store failed; the driver message is preserved.
    #[error("store failure: {0}")]
    Store(#[from] sqlx::Error),
}

impl Error {
    /// Machine-readable code used in HTTP error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidItem(_) => "invalid_item",
            Error::InvalidInput(_) => "invalid_input",
            Error::NotFound(_) => "not_found",
            Error::UpstreamUnavailable(_) => "upstream_unavailable",
            Error::Store(_) => "store_failure",
        }
    }
}
