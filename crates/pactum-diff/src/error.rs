//! Error types for the diff crate.

use pactum_types::TypeError;

/// Errors that can occur during diff operations.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// One of the documents being compared is not valid JSON.
    #[error("cannot diff malformed document: {0}")]
    MalformedDocument(#[from] TypeError),
}

/// Result alias for diff operations.
pub type DiffResult<T> = Result<T, DiffError>;
