//! Error type shared by the song library crates
//!
//! Variants classify a failure; turning them into HTTP statuses is left to
//! the service crate.

use thiserror::Error;

/// Result alias for song library operations
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Song library error
#[derive(Debug, Error)]
pub enum Error {
    /// Store failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Bad setting from the command line, environment or config file
    #[error("Configuration error: {0}")]
    Config(String),

    /// No row for the named resource, e.g. `song 7`
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller-supplied value rejected; the message is shown to the client
    #[error("{0}")]
    InvalidInput(String),

    /// Inconsistent data from a collaborator
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Song `id` does not exist
    pub fn song_not_found(id: i64) -> Self {
        Error::NotFound(format!("song {}", id))
    }
}
